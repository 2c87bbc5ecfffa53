//! Stage plan consistency and form validation

use std::path::PathBuf;

use shorts_client::{
    ClientError, DirectVideoForm, SceneStyleOptions, StageTrigger, WorkflowVariant,
};

use super::common::*;

#[test]
fn test_every_variant_has_a_plan_ending_terminal() {
    for variant in WorkflowVariant::all() {
        let stages = variant.stages();
        assert!(!stages.is_empty());
        let last = stages.last().unwrap();
        assert!(
            last.completes_with.iter().all(|s| s.is_terminal()),
            "{variant:?} does not end in a terminal status"
        );
        assert_eq!(last.progress, 100);
    }
}

#[test]
fn test_stage_ranks_advance_monotonically() {
    for variant in WorkflowVariant::all() {
        let mut last_rank = 0u8;
        for stage in variant.stages() {
            for status in stage.completes_with {
                let rank = status
                    .stage_rank()
                    .expect("plans only reference known statuses");
                assert!(
                    rank >= last_rank,
                    "{variant:?}: {status} regresses the pipeline"
                );
            }
            let stage_rank = stage
                .completes_with
                .iter()
                .filter_map(|s| s.stage_rank())
                .max()
                .unwrap();
            assert!(stage_rank > last_rank || last_rank == 0);
            last_rank = stage_rank;
        }
    }
}

#[test]
fn test_scene_plan_steps_are_ordered_one_to_four() {
    let steps: Vec<_> = WorkflowVariant::Scene
        .stages()
        .iter()
        .map(|s| s.trigger)
        .collect();
    assert_eq!(
        steps,
        vec![
            StageTrigger::ExecuteStep(1),
            StageTrigger::ExecuteStep(2),
            StageTrigger::ExecuteStep(3),
            StageTrigger::ExecuteStep(4),
        ]
    );
}

#[test]
fn test_initial_triggers() {
    assert_eq!(
        WorkflowVariant::Classic.initial_trigger(),
        StageTrigger::GenerateAll
    );
    assert_eq!(
        WorkflowVariant::Scene.initial_trigger(),
        StageTrigger::ExecuteCompleteWorkflow
    );
    assert_eq!(
        WorkflowVariant::DirectVideo.initial_trigger(),
        StageTrigger::ExecuteDirectVideo
    );
}

#[test]
fn test_direct_video_form_rejects_missing_images() {
    let form = DirectVideoForm {
        description: "clips".to_string(),
        images: vec![],
        prompts: vec![],
    };
    assert!(matches!(form.validate(), Err(ClientError::Validation(_))));
}

#[test]
fn test_direct_video_form_rejects_prompt_count_mismatch() {
    // Three uploaded images but only two prompts filled in.
    let form = DirectVideoForm {
        description: "clips".to_string(),
        images: vec![
            PathBuf::from("a.png"),
            PathBuf::from("b.png"),
            PathBuf::from("c.png"),
        ],
        prompts: vec!["first".to_string(), "second".to_string()],
    };
    let err = form.validate().unwrap_err();
    match err {
        ClientError::Validation(message) => {
            assert!(message.contains("3 images"));
            assert!(message.contains("2 prompts"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn test_direct_video_form_rejects_blank_prompts() {
    let form = DirectVideoForm {
        description: "clips".to_string(),
        images: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
        prompts: vec!["fine".to_string(), "   ".to_string()],
    };
    assert!(matches!(form.validate(), Err(ClientError::Validation(_))));
}

#[test]
fn test_direct_video_form_accepts_matching_input() {
    let form = DirectVideoForm {
        description: "clips".to_string(),
        images: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
        prompts: vec!["pan left".to_string(), "zoom out".to_string()],
    };
    assert!(form.validate().is_ok());
}

#[test]
fn test_scene_style_defaults_match_backend_expectations() {
    let style = SceneStyleOptions::default();
    assert_eq!(style.style, "raw");
    assert_eq!(style.version, "6");
    assert_eq!(style.aspect_ratio, "9:16");
    assert!(style.photographic);
    assert!(style.consistent_lighting);

    let json = serde_json::to_value(&style).unwrap();
    assert_eq!(json["aspect_ratio"], "9:16");
}

#[test]
fn test_sample_project_helper_round_trips_status() {
    let project = sample_project("images_generated");
    assert_eq!(project.status().to_string(), "images_generated");
    assert!(!project.is_terminal());
}
