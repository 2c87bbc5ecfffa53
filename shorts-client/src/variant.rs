//! Workflow variants and their declarative stage plans
//!
//! Each variant is one parameterized pipeline description: an ordered list of
//! stages, each naming the backend trigger that starts it and the statuses
//! that mark it finished. The controller and the status reducer both run off
//! these tables, so adding a variant means adding a table, not a state
//! machine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::status::ProjectStatus;

/// The mutually exclusive pipelines offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowVariant {
    /// Single description in, full pipeline fired as one backend operation.
    Classic,
    /// Upload-driven 4-step workflow with per-step triggers and per-scene
    /// image regeneration.
    Scene,
    /// Uploaded images plus per-image prompts straight to video.
    DirectVideo,
}

/// One discrete backend pipeline trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageTrigger {
    GenerateAll,
    GenerateImages,
    AnalyzeVideoPrompts,
    GenerateVideos,
    ExecuteStep(u8),
    ExecuteCompleteWorkflow,
    ExecuteDirectVideo,
}

/// One stage of a variant's pipeline.
#[derive(Debug, Clone, Copy)]
pub struct StageSpec {
    /// Short human name, also used to derive phase labels.
    pub name: &'static str,
    /// Trigger that starts this stage.
    pub trigger: StageTrigger,
    /// Server statuses that mark this stage finished.
    pub completes_with: &'static [ProjectStatus],
    /// Progress percentage once this stage has completed.
    pub progress: u8,
}

const CLASSIC_STAGES: &[StageSpec] = &[
    StageSpec {
        name: "prompts",
        trigger: StageTrigger::GenerateAll,
        completes_with: &[
            ProjectStatus::PromptsGenerated,
            ProjectStatus::ImagePromptsGenerated,
        ],
        progress: 30,
    },
    StageSpec {
        name: "images",
        trigger: StageTrigger::GenerateImages,
        completes_with: &[ProjectStatus::ImagesGenerated],
        progress: 70,
    },
    StageSpec {
        name: "video prompts",
        trigger: StageTrigger::AnalyzeVideoPrompts,
        completes_with: &[ProjectStatus::VideoPromptsGenerated],
        progress: 85,
    },
    StageSpec {
        name: "videos",
        trigger: StageTrigger::GenerateVideos,
        completes_with: &[ProjectStatus::VideosGenerated, ProjectStatus::Completed],
        progress: 100,
    },
];

const SCENE_STAGES: &[StageSpec] = &[
    StageSpec {
        name: "scene prompts",
        trigger: StageTrigger::ExecuteStep(1),
        completes_with: &[
            ProjectStatus::ImagePromptsGenerated,
            ProjectStatus::PromptsGenerated,
        ],
        progress: 30,
    },
    StageSpec {
        name: "scene images",
        trigger: StageTrigger::ExecuteStep(2),
        completes_with: &[ProjectStatus::ImagesGenerated],
        progress: 55,
    },
    StageSpec {
        name: "video prompts",
        trigger: StageTrigger::ExecuteStep(3),
        completes_with: &[ProjectStatus::VideoPromptsGenerated],
        progress: 80,
    },
    StageSpec {
        name: "videos",
        trigger: StageTrigger::ExecuteStep(4),
        completes_with: &[ProjectStatus::VideosGenerated, ProjectStatus::Completed],
        progress: 100,
    },
];

const DIRECT_VIDEO_STAGES: &[StageSpec] = &[StageSpec {
    name: "videos",
    trigger: StageTrigger::ExecuteDirectVideo,
    completes_with: &[ProjectStatus::VideosGenerated, ProjectStatus::Completed],
    progress: 100,
}];

impl WorkflowVariant {
    pub fn all() -> &'static [WorkflowVariant] {
        &[
            WorkflowVariant::Classic,
            WorkflowVariant::Scene,
            WorkflowVariant::DirectVideo,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            WorkflowVariant::Classic => "Classic pipeline",
            WorkflowVariant::Scene => "Scene workflow (4-step)",
            WorkflowVariant::DirectVideo => "Direct image-to-video",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkflowVariant::Classic => {
                "Describe the video; prompts, images and clips are generated end to end"
            }
            WorkflowVariant::Scene => {
                "Step through scene prompts, images and video prompts with a reference image"
            }
            WorkflowVariant::DirectVideo => {
                "Upload images with per-image prompts and generate clips directly"
            }
        }
    }

    pub fn stages(&self) -> &'static [StageSpec] {
        match self {
            WorkflowVariant::Classic => CLASSIC_STAGES,
            WorkflowVariant::Scene => SCENE_STAGES,
            WorkflowVariant::DirectVideo => DIRECT_VIDEO_STAGES,
        }
    }

    /// Trigger that kicks off the whole pipeline after creation.
    pub fn initial_trigger(&self) -> StageTrigger {
        match self {
            WorkflowVariant::Classic => StageTrigger::GenerateAll,
            WorkflowVariant::Scene => StageTrigger::ExecuteCompleteWorkflow,
            WorkflowVariant::DirectVideo => StageTrigger::ExecuteDirectVideo,
        }
    }

    pub fn is_terminal(&self, status: &ProjectStatus) -> bool {
        status.is_terminal()
    }

    /// Infer which pipeline produced a fetched project from its populated
    /// side-data fields. Listings mix variants, so the detail view needs
    /// this to pick the right stage plan.
    pub fn infer(project: &crate::project::Project) -> WorkflowVariant {
        if project.final_video_path.is_some() || project.selected_image_index.is_some() {
            WorkflowVariant::DirectVideo
        } else if project.current_step.is_some()
            || project.scene_images.is_some()
            || project.scene_prompts.is_some()
        {
            WorkflowVariant::Scene
        } else {
            WorkflowVariant::Classic
        }
    }
}

/// Style options of the scene workflow, serialized into the creation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneStyleOptions {
    pub style: String,
    pub version: String,
    pub aspect_ratio: String,
    pub photographic: bool,
    pub consistent_lighting: bool,
}

impl Default for SceneStyleOptions {
    fn default() -> Self {
        SceneStyleOptions {
            style: "raw".to_string(),
            version: "6".to_string(),
            aspect_ratio: "9:16".to_string(),
            photographic: true,
            consistent_lighting: true,
        }
    }
}

/// Form input of the direct-video variant: N images, one prompt per image.
#[derive(Debug, Clone, Default)]
pub struct DirectVideoForm {
    pub description: String,
    pub images: Vec<PathBuf>,
    pub prompts: Vec<String>,
}

impl DirectVideoForm {
    /// Client-side validation, run before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.images.is_empty() {
            return Err(ClientError::Validation(
                "at least one image is required".to_string(),
            ));
        }
        if self.prompts.len() != self.images.len() {
            return Err(ClientError::Validation(format!(
                "{} images but {} prompts; every image needs a prompt",
                self.images.len(),
                self.prompts.len()
            )));
        }
        if self.prompts.iter().any(|p| p.trim().is_empty()) {
            return Err(ClientError::Validation(
                "prompts must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
