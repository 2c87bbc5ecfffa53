//! Tab management operations

use std::collections::HashMap;

use shorts_client::{PollHandle, PollState, Project, WorkflowVariant};

use super::*;

impl App {
    // Tab navigation
    pub fn next_tab(&mut self) {
        if !self.open_tabs.is_empty() {
            self.active_tab_idx = (self.active_tab_idx + 1) % self.open_tabs.len();
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.open_tabs.is_empty() {
            self.active_tab_idx = if self.active_tab_idx == 0 {
                self.open_tabs.len() - 1
            } else {
                self.active_tab_idx - 1
            };
        }
    }

    /// Open a monitor tab for a freshly started generation.
    pub fn open_generation_tab(
        &mut self,
        variant: WorkflowVariant,
        project: Project,
        handle: PollHandle,
        field_values: HashMap<String, String>,
    ) {
        let counter_key = variant.title().to_string();
        let instance_number = {
            let counter = self.tab_counters.entry(counter_key).or_insert(0);
            *counter += 1;
            *counter
        };

        let mut title: String = project.description.chars().take(30).collect();
        if project.description.chars().count() > 30 {
            title.push('…');
        }
        if title.is_empty() {
            title = project.project_id.clone();
        }

        let tab = GenerationTab {
            id: format!(
                "{:?}_{}",
                variant,
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            ),
            variant,
            instance_number,
            start_time: Some(chrono::Local::now()),
            project_id: project.project_id.clone(),
            title,
            project: Some(project),
            poll: Some(handle),
            state: TabState::Running,
            notified: false,
            field_values,
            scroll_offset: 0,
        };

        self.open_tabs.push(tab);
        self.active_tab_idx = self.open_tabs.len() - 1;
    }

    /// Drain every tab's poll subscription into view state. Terminal states
    /// raise a one-shot notification; timeouts get a distinct warning.
    pub fn poll_all_tabs(&mut self) {
        let mut notices: Vec<(TabState, String)> = Vec::new();

        for tab in &mut self.open_tabs {
            if !tab.is_running() {
                continue;
            }
            let Some(poll) = &tab.poll else { continue };
            let snapshot = poll.snapshot();
            if let Some(project) = snapshot.project {
                tab.project = Some(project);
            }
            tab.state = match snapshot.state {
                PollState::Polling => TabState::Running,
                PollState::Done => TabState::Done,
                PollState::TimedOut => TabState::TimedOut,
            };
            if !tab.is_running() && !tab.notified {
                tab.notified = true;
                notices.push((tab.state, tab.title.clone()));
                tab.stop_polling();
            }
        }

        for (state, title) in notices {
            match state {
                TabState::Done => {
                    self.notifications.success("Generation complete", title);
                }
                TabState::TimedOut => {
                    self.notifications.warning(
                        "Generation timed out",
                        format!("{title}: no terminal status observed; re-open to keep watching"),
                    );
                }
                _ => {}
            }
        }

        // Keep listings in sync with whatever the monitors fetched last
        self.sync_projects_from_tabs();
    }

    fn sync_projects_from_tabs(&mut self) {
        for tab in &self.open_tabs {
            let Some(project) = &tab.project else { continue };
            if let Some(existing) = self
                .projects
                .iter_mut()
                .find(|p| p.project_id == project.project_id)
            {
                *existing = project.clone();
            }
        }
    }

    pub fn scroll_tab_down(&mut self) {
        if let Some(tab) = self.open_tabs.get_mut(self.active_tab_idx) {
            tab.scroll_offset = tab.scroll_offset.saturating_add(1);
        }
    }

    pub fn scroll_tab_up(&mut self) {
        if let Some(tab) = self.open_tabs.get_mut(self.active_tab_idx) {
            tab.scroll_offset = tab.scroll_offset.saturating_sub(1);
        }
    }

    // Tab close flow
    pub fn close_current_tab(&mut self) {
        if self.open_tabs.is_empty() {
            return;
        }

        let tab = &self.open_tabs[self.active_tab_idx];

        // If still generating, ask first
        if tab.is_running() {
            self.show_close_confirmation = true;
            return;
        }

        self.close_tab_confirmed();
    }

    pub fn close_tab_confirmed(&mut self) {
        if self.open_tabs.is_empty() {
            return;
        }

        if let Some(tab) = self.open_tabs.get_mut(self.active_tab_idx) {
            tab.stop_polling();
        }
        self.open_tabs.remove(self.active_tab_idx);

        // Adjust active index
        if self.open_tabs.is_empty() {
            self.active_tab_idx = 0;
        } else if self.active_tab_idx >= self.open_tabs.len() {
            self.active_tab_idx = self.open_tabs.len() - 1;
        }

        self.show_close_confirmation = false;
    }

    /// Re-attach a poller to the active tab, e.g. after a timeout.
    pub fn rewatch_current_tab(&mut self) {
        use shorts_client::{WorkflowBackend, WorkflowController};
        use std::sync::Arc;

        let Some(tab) = self.open_tabs.get_mut(self.active_tab_idx) else {
            return;
        };
        if tab.is_running() {
            return;
        }
        let controller = WorkflowController::new(
            Arc::clone(&self.api) as Arc<dyn WorkflowBackend>,
            tab.variant,
            tab.project_id.clone(),
        );
        let _guard = self.tokio_runtime.enter();
        tab.poll = Some(controller.resume());
        tab.state = TabState::Running;
        tab.notified = false;
    }

    /// Open the detail view for the active tab's project.
    pub fn view_current_tab_project(&mut self) {
        let Some(tab) = self.open_tabs.get(self.active_tab_idx) else {
            return;
        };
        let Some(project) = tab.project.clone() else {
            return;
        };
        let index = self
            .projects
            .iter()
            .position(|p| p.project_id == project.project_id)
            .unwrap_or(0);
        self.open_detail(project);
        self.current_view = View::ProjectDetail(index);
    }
}
