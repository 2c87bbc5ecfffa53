//! Creation form field definitions per workflow variant
//!
//! The edit view is generic over these tables the same way the backend
//! endpoints are generic over the variant: adding a field means adding a row,
//! not a view.

use std::collections::HashMap;
use std::path::PathBuf;

use shorts_client::{DirectVideoForm, WorkflowVariant};

/// How a field is edited and completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Single path; `/` in the editor opens the file browser.
    FilePath,
    /// Semicolon-separated paths; the file browser appends.
    FileList,
    /// "true"/"false" toggled with Enter.
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

/// List separator for `FileList` values and the direct-video prompt list.
pub const LIST_SEPARATOR: char = ';';

pub fn fields_for(variant: WorkflowVariant) -> &'static [FieldSpec] {
    match variant {
        WorkflowVariant::Classic => CLASSIC_FIELDS,
        WorkflowVariant::Scene => SCENE_FIELDS,
        WorkflowVariant::DirectVideo => DIRECT_VIDEO_FIELDS,
    }
}

const CLASSIC_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "description",
        label: "Video description",
        description: "What the video should show, in a few sentences",
        kind: FieldKind::Text,
        required: true,
        default: None,
    },
    FieldSpec {
        name: "content_type",
        label: "Content category",
        description: "Prompt-type id from the backend catalog",
        kind: FieldKind::Text,
        required: false,
        default: Some("general"),
    },
    FieldSpec {
        name: "dog_image",
        label: "Pet reference image",
        description: "Optional photo; the backend analyzes the breed and tailors prompts",
        kind: FieldKind::FilePath,
        required: false,
        default: None,
    },
];

const SCENE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "description",
        label: "Main description",
        description: "Drives the per-scene prompt generation",
        kind: FieldKind::Text,
        required: true,
        default: None,
    },
    FieldSpec {
        name: "reference_image",
        label: "Base reference image",
        description: "Recommended for character consistency across scenes",
        kind: FieldKind::FilePath,
        required: false,
        default: None,
    },
    FieldSpec {
        name: "photographic",
        label: "Character consistency",
        description: "Photographic style flag",
        kind: FieldKind::Flag,
        required: false,
        default: Some("true"),
    },
    FieldSpec {
        name: "consistent_lighting",
        label: "Consistent lighting",
        description: "Keep lighting uniform across scenes",
        kind: FieldKind::Flag,
        required: false,
        default: Some("true"),
    },
];

const DIRECT_VIDEO_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "description",
        label: "Description",
        description: "Shared context for the uploaded images",
        kind: FieldKind::Text,
        required: false,
        default: None,
    },
    FieldSpec {
        name: "images",
        label: "Images",
        description: "Semicolon-separated image paths; `/` browses, selections append",
        kind: FieldKind::FileList,
        required: true,
        default: None,
    },
    FieldSpec {
        name: "prompts",
        label: "Prompts",
        description: "Semicolon-separated, one prompt per image in order",
        kind: FieldKind::Text,
        required: true,
        default: None,
    },
];

/// Split a semicolon-separated list value, dropping empty segments.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Assemble the direct-video form input from raw field values. Validation
/// happens in the client before any network call.
pub fn direct_video_form(values: &HashMap<String, String>) -> DirectVideoForm {
    let images = values
        .get("images")
        .map(|v| split_list(v).into_iter().map(PathBuf::from).collect())
        .unwrap_or_default();
    // Blank prompt slots are kept so a trailing unfilled prompt still counts
    // against the image total during validation.
    let prompts = values
        .get("prompts")
        .map(|v| {
            v.split(LIST_SEPARATOR)
                .map(|s| s.trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    DirectVideoForm {
        description: values.get("description").cloned().unwrap_or_default(),
        images,
        prompts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_variant_has_a_description_field() {
        for variant in shorts_client::WorkflowVariant::all() {
            assert!(
                fields_for(*variant).iter().any(|f| f.name == "description"),
                "{variant:?} is missing a description field"
            );
        }
    }

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list("a.png; b.png;"), vec!["a.png", "b.png"]);
        assert_eq!(split_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_direct_video_form_counts_unfilled_prompts() {
        // Three images, two prompts typed: must fail validation before any
        // network call.
        let form = direct_video_form(&values(&[
            ("images", "a.png;b.png;c.png"),
            ("prompts", "one;two"),
        ]));
        assert_eq!(form.images.len(), 3);
        assert_eq!(form.prompts.len(), 2);
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_direct_video_form_valid_input_passes() {
        let form = direct_video_form(&values(&[
            ("description", "my clips"),
            ("images", "a.png;b.png"),
            ("prompts", "pan left;zoom out"),
        ]));
        assert!(form.validate().is_ok());
        assert_eq!(form.description, "my clips");
    }

    #[test]
    fn test_scene_flags_default_on() {
        let fields = fields_for(shorts_client::WorkflowVariant::Scene);
        for name in ["photographic", "consistent_lighting"] {
            let field = fields.iter().find(|f| f.name == name).unwrap();
            assert_eq!(field.kind, FieldKind::Flag);
            assert_eq!(field.default, Some("true"));
        }
    }
}
