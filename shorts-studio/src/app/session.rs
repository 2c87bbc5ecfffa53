//! Session persistence
//!
//! Open tabs survive a restart: variant, project id, form values and the
//! last observed status land in a JSON file in the platform data dir. Tabs
//! restored with a non-terminal status resume polling immediately.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shorts_client::{ProjectStatus, WorkflowBackend, WorkflowController, WorkflowVariant};

use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SavedTab {
    pub variant: WorkflowVariant,
    pub project_id: String,
    pub title: String,
    pub instance_number: usize,
    pub field_values: HashMap<String, String>,
    pub last_status: Option<String>,
}

fn session_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "shorts-studio") {
        proj_dirs.data_dir().join("session.json")
    } else {
        PathBuf::from(".shorts-studio-session.json")
    }
}

impl App {
    pub fn save_session(&self) {
        let saved: Vec<SavedTab> = self
            .open_tabs
            .iter()
            .map(|tab| SavedTab {
                variant: tab.variant,
                project_id: tab.project_id.clone(),
                title: tab.title.clone(),
                instance_number: tab.instance_number,
                field_values: tab.field_values.clone(),
                last_status: tab.project.as_ref().map(|p| p.status.clone()),
            })
            .collect();

        let path = session_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(&saved) {
            let _ = std::fs::write(path, json);
        }
    }

    pub fn restore_session(&mut self) {
        let Ok(json) = std::fs::read_to_string(session_path()) else {
            return;
        };
        let Ok(saved_tabs) = serde_json::from_str::<Vec<SavedTab>>(&json) else {
            return;
        };

        for saved in saved_tabs {
            let terminal = saved
                .last_status
                .as_deref()
                .map(|s| ProjectStatus::parse(s).is_terminal())
                .unwrap_or(false);

            let poll = if terminal {
                None
            } else {
                // Still generating when the app quit; watch it again
                let controller = WorkflowController::new(
                    Arc::clone(&self.api) as Arc<dyn WorkflowBackend>,
                    saved.variant,
                    saved.project_id.clone(),
                );
                let _guard = self.tokio_runtime.enter();
                Some(controller.resume())
            };

            let state = if terminal {
                TabState::Done
            } else {
                TabState::Running
            };

            let counter = self
                .tab_counters
                .entry(saved.variant.title().to_string())
                .or_insert(0);
            if saved.instance_number > *counter {
                *counter = saved.instance_number;
            }

            self.open_tabs.push(GenerationTab {
                id: format!("restored_{}_{}", saved.project_id, saved.instance_number),
                variant: saved.variant,
                instance_number: saved.instance_number,
                start_time: None,
                project_id: saved.project_id,
                title: saved.title,
                project: None,
                poll,
                state,
                notified: terminal,
                field_values: saved.field_values,
                scroll_offset: 0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_tab_round_trip() {
        let mut field_values = HashMap::new();
        field_values.insert("description".to_string(), "a cat plays".to_string());

        let saved = vec![SavedTab {
            variant: WorkflowVariant::Scene,
            project_id: "p-42".to_string(),
            title: "a cat plays".to_string(),
            instance_number: 3,
            field_values,
            last_status: Some("images_generated".to_string()),
        }];

        let json = serde_json::to_string_pretty(&saved).unwrap();
        let back: Vec<SavedTab> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].variant, WorkflowVariant::Scene);
        assert_eq!(back[0].project_id, "p-42");
        assert_eq!(back[0].last_status.as_deref(), Some("images_generated"));
        assert_eq!(
            back[0].field_values.get("description").map(String::as_str),
            Some("a cat plays")
        );
    }

    #[test]
    fn test_terminal_status_restores_without_polling() {
        // Only non-terminal restored tabs resume polling; this mirrors the
        // branch in restore_session.
        for (status, terminal) in [
            ("completed", true),
            ("videos_generated", true),
            ("images_generated", false),
        ] {
            assert_eq!(ProjectStatus::parse(status).is_terminal(), terminal);
        }
    }
}
