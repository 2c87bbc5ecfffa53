//! Wire data model for the generation backend
//!
//! Every struct here mirrors a JSON payload owned by the backend. The client
//! treats fetched snapshots as immutable and wholesale-replaces its cached
//! copy on every fetch; nothing in this module mutates server state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::ProjectStatus;

/// A server-side generation project and its accumulated pipeline outputs.
///
/// `project_id` and `description` are assigned at creation and immutable.
/// `status` is owned by the server; the client parses it but never assigns it.
/// The artifact lists are absent or empty until the corresponding stage
/// finishes. Variant-specific fields (dog analysis, scene images, direct
/// video) are populated only for projects created through those workflows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,

    // Classic variant extras
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_analysis: Option<DogAnalysis>,

    // Scene (4-step) variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_prompts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_images: Option<Vec<SceneImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_prompts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u32>,

    // Direct-video variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_image_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_video_path: Option<String>,
}

impl Project {
    /// Parsed form of the server-reported status string.
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::parse(&self.status)
    }

    /// Whether no further automatic processing will happen for this project.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Number of non-empty video entries (the backend pads failed scenes
    /// with empty strings).
    pub fn video_count(&self) -> usize {
        self.videos
            .as_deref()
            .map(|v| v.iter().filter(|p| !p.is_empty()).count())
            .unwrap_or(0)
    }
}

/// Breed analysis produced by the image-analysis stage of the upload variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogAnalysis {
    pub breed: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub confidence: f64,
}

/// One scene slot of the 4-step workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneImage {
    pub scene_number: u32,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_regeneration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regenerated: Option<bool>,
}

impl SceneImage {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// A content category the backend can tailor prompt generation to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptType {
    #[serde(rename = "type")]
    pub type_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub examples: Vec<PromptTypeExample>,
    #[serde(default)]
    pub suggested_descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTypeExample {
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub description: String,
}

/// Envelope for `GET /api/projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// Envelope for `GET /api/prompt-types`.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptTypesResponse {
    pub prompt_types: Vec<PromptType>,
}

/// Response of the standalone upload-and-analyze endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DogUploadResponse {
    pub image_path: String,
    pub analysis: DogAnalysis,
}
