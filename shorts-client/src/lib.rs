// Project data model and wire types
pub mod project;

// Status vocabulary and the status -> phase reducer
pub mod status;

// Workflow variants and their declarative stage plans
pub mod variant;

// HTTP client for the generation backend
pub mod api;

// Error types
pub mod error;

// Bounded status poller
pub mod poller;

// Per-project workflow controller
pub mod controller;

pub use api::{ApiClient, ApiConfig};
pub use controller::{WorkflowBackend, WorkflowController};
pub use error::{ClientError, Result};
pub use poller::{PollConfig, PollHandle, PollSnapshot, PollState, ProjectFetch, StatusPoller};
pub use project::{
    DogAnalysis, DogUploadResponse, Project, PromptType, PromptTypeExample, SceneImage,
};
pub use status::{stage_view, ProjectStatus, StageView};
pub use variant::{DirectVideoForm, SceneStyleOptions, StageSpec, StageTrigger, WorkflowVariant};
