//! Status vocabulary and the status -> phase reducer
//!
//! The server owns the status string; this module turns whatever it reports
//! into something renderable. `stage_view` is a total pure function: any
//! input string, including ones this client has never heard of, yields a
//! non-empty label and a defined action set.

use std::fmt;

use crate::variant::{StageTrigger, WorkflowVariant};

/// Parsed pipeline position of a project.
///
/// `Other` carries any unrecognized wire string so the client degrades to a
/// generic "processing" rendering instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Created,
    PromptsGenerated,
    ImagePromptsGenerated,
    ImagesGenerated,
    VideoPromptsGenerated,
    VideosGenerated,
    Completed,
    Other(String),
}

impl ProjectStatus {
    /// Total parse; never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "created" => ProjectStatus::Created,
            "prompts_generated" => ProjectStatus::PromptsGenerated,
            "image_prompts_generated" => ProjectStatus::ImagePromptsGenerated,
            "images_generated" => ProjectStatus::ImagesGenerated,
            "video_prompts_generated" => ProjectStatus::VideoPromptsGenerated,
            "videos_generated" => ProjectStatus::VideosGenerated,
            "completed" => ProjectStatus::Completed,
            other => ProjectStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Created => "created",
            ProjectStatus::PromptsGenerated => "prompts_generated",
            ProjectStatus::ImagePromptsGenerated => "image_prompts_generated",
            ProjectStatus::ImagesGenerated => "images_generated",
            ProjectStatus::VideoPromptsGenerated => "video_prompts_generated",
            ProjectStatus::VideosGenerated => "videos_generated",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Other(s) => s,
        }
    }

    /// `videos_generated` and `completed` are equivalent terminals for every
    /// workflow variant.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProjectStatus::VideosGenerated | ProjectStatus::Completed
        )
    }

    /// Monotone pipeline position. `None` for unrecognized statuses.
    pub fn stage_rank(&self) -> Option<u8> {
        match self {
            ProjectStatus::Created => Some(0),
            ProjectStatus::PromptsGenerated | ProjectStatus::ImagePromptsGenerated => Some(1),
            ProjectStatus::ImagesGenerated => Some(2),
            ProjectStatus::VideoPromptsGenerated => Some(3),
            ProjectStatus::VideosGenerated | ProjectStatus::Completed => Some(4),
            ProjectStatus::Other(_) => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renderable phase derived from a status: what to show and what the user may
/// do next. Pure data, no rendering concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub label: String,
    pub progress: u8,
    pub terminal: bool,
    /// The single follow-up trigger enabled in this phase, if any. Terminal
    /// phases enable none; the view layer offers "view results" instead.
    pub action: Option<StageTrigger>,
}

impl StageView {
    fn processing() -> Self {
        StageView {
            label: "processing".to_string(),
            progress: 0,
            terminal: false,
            action: None,
        }
    }

    fn done() -> Self {
        StageView {
            label: "done".to_string(),
            progress: 100,
            terminal: true,
            action: None,
        }
    }
}

/// Map a server-reported status string to its renderable phase for the given
/// workflow variant.
///
/// Unrecognized statuses fall through to a generic "processing" view with no
/// enabled action; this branch must stay total.
pub fn stage_view(variant: WorkflowVariant, raw_status: &str) -> StageView {
    let status = ProjectStatus::parse(raw_status);
    if status.is_terminal() {
        return StageView::done();
    }
    if status == ProjectStatus::Created {
        let first = variant
            .stages()
            .first()
            .map(|s| s.name)
            .unwrap_or("prompts");
        return StageView {
            label: format!("generating {}", first),
            progress: 10,
            terminal: false,
            action: None,
        };
    }

    let stages = variant.stages();
    for (idx, stage) in stages.iter().enumerate() {
        if stage.completes_with.contains(&status) {
            return StageView {
                label: format!("{} ready", stage.name),
                progress: stage.progress,
                terminal: false,
                action: stages.get(idx + 1).map(|next| next.trigger),
            };
        }
    }

    StageView::processing()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(ProjectStatus::parse("created"), ProjectStatus::Created);
        assert_eq!(
            ProjectStatus::parse("prompts_generated"),
            ProjectStatus::PromptsGenerated
        );
        assert_eq!(
            ProjectStatus::parse("videos_generated"),
            ProjectStatus::VideosGenerated
        );
        assert_eq!(ProjectStatus::parse("completed"), ProjectStatus::Completed);
    }

    #[test]
    fn test_parse_is_total() {
        let parsed = ProjectStatus::parse("some_future_status");
        assert_eq!(
            parsed,
            ProjectStatus::Other("some_future_status".to_string())
        );
        assert_eq!(ProjectStatus::parse(""), ProjectStatus::Created);
    }

    #[test]
    fn test_display_round_trips_known_values() {
        for raw in [
            "created",
            "prompts_generated",
            "image_prompts_generated",
            "images_generated",
            "video_prompts_generated",
            "videos_generated",
            "completed",
        ] {
            assert_eq!(ProjectStatus::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_terminal_statuses_are_equivalent() {
        assert!(ProjectStatus::VideosGenerated.is_terminal());
        assert!(ProjectStatus::Completed.is_terminal());
        assert!(!ProjectStatus::ImagesGenerated.is_terminal());
        assert!(!ProjectStatus::Other("weird".to_string()).is_terminal());
    }

    #[test]
    fn test_classic_phase_table() {
        let view = stage_view(WorkflowVariant::Classic, "created");
        assert_eq!(view.label, "generating prompts");
        assert!(view.action.is_none());
        assert!(!view.terminal);

        let view = stage_view(WorkflowVariant::Classic, "image_prompts_generated");
        assert_eq!(view.label, "prompts ready");
        assert_eq!(view.action, Some(StageTrigger::GenerateImages));

        let view = stage_view(WorkflowVariant::Classic, "images_generated");
        assert_eq!(view.label, "images ready");
        assert_eq!(view.action, Some(StageTrigger::AnalyzeVideoPrompts));

        let view = stage_view(WorkflowVariant::Classic, "video_prompts_generated");
        assert_eq!(view.label, "video prompts ready");
        assert_eq!(view.action, Some(StageTrigger::GenerateVideos));

        for raw in ["videos_generated", "completed"] {
            let view = stage_view(WorkflowVariant::Classic, raw);
            assert_eq!(view.label, "done");
            assert_eq!(view.progress, 100);
            assert!(view.terminal);
            assert!(view.action.is_none());
        }
    }

    #[test]
    fn test_unrecognized_status_renders_processing() {
        for variant in WorkflowVariant::all() {
            let view = stage_view(*variant, "totally_unknown");
            assert_eq!(view.label, "processing");
            assert!(!view.terminal);
            assert!(view.action.is_none());
        }
    }

    #[test]
    fn test_stage_view_never_empty_label() {
        let inputs = ["", "created", "garbage", "images_generated", "완료", "??"];
        for variant in WorkflowVariant::all() {
            for raw in inputs {
                let view = stage_view(*variant, raw);
                assert!(!view.label.is_empty(), "empty label for {raw:?}");
                assert!(view.progress <= 100);
            }
        }
    }

    #[test]
    fn test_progress_is_monotone_through_classic_pipeline() {
        let order = [
            "created",
            "prompts_generated",
            "images_generated",
            "video_prompts_generated",
            "videos_generated",
        ];
        let mut last = 0u8;
        for raw in order {
            let view = stage_view(WorkflowVariant::Classic, raw);
            assert!(view.progress > last, "{raw} did not advance progress");
            last = view.progress;
        }
    }
}
