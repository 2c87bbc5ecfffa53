//! Tab state management

use std::collections::HashMap;

use shorts_client::{PollHandle, Project, WorkflowVariant};

/// Per-tab state container for the tabbed generation monitor
pub struct GenerationTab {
    // Identity
    pub id: String, // Unique: "classic_20250805_120000"
    pub variant: WorkflowVariant,
    pub instance_number: usize, // Counter for display: #1, #2, #3
    pub start_time: Option<chrono::DateTime<chrono::Local>>,

    // Project state (latest fetched snapshot wholesale-replaces the old one)
    pub project_id: String,
    pub title: String, // description excerpt
    pub project: Option<Project>,

    // Polling
    pub poll: Option<PollHandle>,
    pub state: TabState,
    pub notified: bool, // terminal notification already raised

    // Form values the tab was launched with (for session restore)
    pub field_values: HashMap<String, String>,

    // UI state (per tab)
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Running,
    Done,
    TimedOut,
    Failed,
}

impl GenerationTab {
    pub fn is_running(&self) -> bool {
        self.state == TabState::Running
    }

    /// Stop observing this tab's job. In-flight server work is untouched;
    /// only the subscription ends.
    pub fn stop_polling(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.abort();
        }
    }
}
