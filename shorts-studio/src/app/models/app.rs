//! Main application state

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use shorts_client::{ApiClient, PollHandle, Project, WorkflowVariant};

use crate::app::notifications::NotificationManager;

use super::{GenerationTab, View};

/// Outcome of a background network operation, drained by the event loop.
pub enum OpOutcome {
    ProjectsLoaded(Result<Vec<Project>, String>),
    /// Creation + pipeline kickoff finished; on success the poll handle is
    /// already observing the job.
    PipelineStarted {
        variant: WorkflowVariant,
        result: Result<(Project, PollHandle), String>,
    },
    ProjectDeleted {
        project_id: String,
        result: Result<(), String>,
    },
    /// A manual stage trigger finished and returned a refreshed snapshot.
    StageFinished {
        project_id: String,
        result: Result<Project, String>,
    },
    ProjectRefreshed(Result<Project, String>),
}

/// Main application state
pub struct App {
    pub api: Arc<ApiClient>,

    // Project listing
    pub projects: Vec<Project>,
    pub projects_loading: bool,

    // Tab management
    pub open_tabs: Vec<GenerationTab>,
    pub active_tab_idx: usize,
    pub tab_counters: HashMap<String, usize>,
    pub show_close_confirmation: bool,

    pub selected: usize,
    pub current_view: View,
    pub should_quit: bool,

    // Create form state
    pub edit_field_index: usize,
    pub edit_buffer: String,
    pub is_editing: bool,
    pub field_values: HashMap<String, String>,
    pub form_loading: bool,
    pub form_progress: u8,
    pub form_step: String, // human-readable current-step message

    // Detail view state
    pub detail_project: Option<Project>,
    pub detail_poll: Option<PollHandle>,
    pub detail_loading: bool,

    // Delete confirmation state
    pub show_delete_confirmation: bool,
    pub delete_target: Option<String>, // project id
    pub deleting: bool,

    // File browser state
    pub show_file_browser: bool,
    pub file_browser_items: Vec<PathBuf>,
    pub file_browser_selected: usize,
    pub file_browser_search: String,
    pub current_dir: PathBuf,

    // Notifications
    pub notifications: NotificationManager,

    // Async plumbing: tasks push outcomes, the event loop drains them
    pub op_results: Arc<Mutex<Vec<OpOutcome>>>,

    // Tokio runtime for async operations
    pub tokio_runtime: tokio::runtime::Runtime,
}
