//! Application state and module organization
//!
//! This module contains the main App struct and re-exports all functionality
//! organized by domain.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use shorts_client::{ApiClient, ApiConfig};

mod models;
pub use models::*;

pub mod notifications;
pub use notifications::{Notification, NotificationLevel, NotificationManager};

// Declare submodules
mod file_browser;
mod navigation;
mod project_ops;
mod session;
mod tabs;

impl App {
    pub fn new(config: ApiConfig) -> Self {
        let current_dir = std::env::current_dir()
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")));

        // Create tokio runtime for async operations
        let tokio_runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        let mut app = Self {
            api: Arc::new(ApiClient::new(config)),
            projects: Vec::new(),
            projects_loading: false,
            open_tabs: Vec::new(),
            active_tab_idx: 0,
            tab_counters: HashMap::new(),
            show_close_confirmation: false,
            selected: 0,
            current_view: View::ProjectList,
            should_quit: false,
            edit_field_index: 0,
            edit_buffer: String::new(),
            is_editing: false,
            field_values: HashMap::new(),
            form_loading: false,
            form_progress: 0,
            form_step: String::new(),
            detail_project: None,
            detail_poll: None,
            detail_loading: false,
            show_delete_confirmation: false,
            delete_target: None,
            deleting: false,
            show_file_browser: false,
            file_browser_items: Vec::new(),
            file_browser_selected: 0,
            file_browser_search: String::new(),
            current_dir,
            notifications: NotificationManager::new(),
            op_results: Arc::new(Mutex::new(Vec::new())),
            tokio_runtime,
        };

        // Restore previous session tabs before the first frame
        app.restore_session();

        // Kick off the initial listing fetch
        app.load_projects();

        app
    }
}
