//! Wire model deserialization against representative backend payloads

use shorts_client::project::{ProjectListResponse, PromptTypesResponse};
use shorts_client::Project;

use super::common::*;

#[test]
fn test_minimal_project_deserializes() {
    let json = r#"{
        "project_id": "abc123",
        "description": "a cat plays with yarn",
        "status": "created"
    }"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert_eq!(project.project_id, "abc123");
    assert_eq!(project.status, "created");
    assert!(project.prompts.is_none());
    assert_eq!(project.video_count(), 0);
    assert!(!project.is_terminal());
}

#[test]
fn test_completed_project_with_artifacts() {
    let json = r#"{
        "project_id": "abc123",
        "description": "a cat plays with yarn",
        "status": "completed",
        "created_at": "2025-03-01T12:00:00Z",
        "prompts": ["scene one", "scene two"],
        "images": ["/images/1.png", "/images/2.png"],
        "videos": ["/videos/1.mp4", ""]
    }"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert!(project.is_terminal());
    assert!(project.created_at.is_some());
    // Failed scenes are padded with empty strings and not counted.
    assert_eq!(project.video_count(), 1);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let json = r#"{
        "project_id": "abc123",
        "description": "d",
        "status": "created",
        "brand_new_backend_field": {"nested": true}
    }"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert_eq!(project.project_id, "abc123");
}

#[test]
fn test_dog_analysis_payload() {
    let json = r#"{
        "project_id": "abc123",
        "description": "d",
        "status": "created",
        "dog_image_path": "/uploads/dog.png",
        "dog_analysis": {
            "breed": "corgi",
            "characteristics": ["short legs", "big ears"],
            "confidence": 0.93
        }
    }"#;
    let project: Project = serde_json::from_str(json).unwrap();
    let analysis = project.dog_analysis.unwrap();
    assert_eq!(analysis.breed, "corgi");
    assert_eq!(analysis.characteristics.len(), 2);
    assert!(analysis.confidence > 0.9);
}

#[test]
fn test_scene_project_payload() {
    let json = r#"{
        "project_id": "abc123",
        "description": "d",
        "status": "images_generated",
        "current_step": 2,
        "scene_prompts": ["p1", "p2"],
        "scene_images": [
            {"scene_number": 1, "prompt": "p1", "filepath": "downloads/scene_images/1.png",
             "filename": "1.png", "status": "success"},
            {"scene_number": 2, "prompt": "p2", "filepath": null,
             "filename": null, "status": "failed"}
        ]
    }"#;
    let project: Project = serde_json::from_str(json).unwrap();
    let images = project.scene_images.unwrap();
    assert!(images[0].is_success());
    assert!(!images[1].is_success());
    assert_eq!(project.current_step, Some(2));
}

#[test]
fn test_list_envelope() {
    let json = r#"{"projects": [
        {"project_id": "a", "description": "one", "status": "created"},
        {"project_id": "b", "description": "two", "status": "completed"}
    ]}"#;
    let body: ProjectListResponse = serde_json::from_str(json).unwrap();
    assert_eq!(body.projects.len(), 2);
    assert!(body.projects[1].is_terminal());
}

#[test]
fn test_prompt_types_envelope() {
    let json = r#"{"prompt_types": [{
        "type": "pet",
        "name": "Pet stories",
        "description": "Animal-centric shorts",
        "icon": "paw",
        "examples": [{"title": "t", "prompt": "p", "description": "d"}],
        "suggested_descriptions": ["a dog surfs"]
    }]}"#;
    let body: PromptTypesResponse = serde_json::from_str(json).unwrap();
    assert_eq!(body.prompt_types[0].type_id, "pet");
    assert_eq!(body.prompt_types[0].examples.len(), 1);
}

#[test]
fn test_sample_builder_matches_wire_shape() {
    let project = sample_project("created");
    let json = serde_json::to_string(&project).unwrap();
    let back: Project = serde_json::from_str(&json).unwrap();
    assert_eq!(back.description, "a cat plays with yarn");
}
