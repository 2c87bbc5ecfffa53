//! Project operations: listing, creation, deletion, stage triggers
//!
//! Every operation runs on the tokio runtime and reports back through the
//! `op_results` inbox drained once per frame. Failure handling follows one
//! rule everywhere: clear the loading flag, reset progress, raise a
//! notification, leave the form editable.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use shorts_client::{
    ApiClient, PollHandle, Project, SceneStyleOptions, WorkflowBackend, WorkflowController,
    WorkflowVariant,
};

use super::models::direct_video_form;
use super::*;

impl App {
    /// Fetch the project listing in the background.
    pub fn load_projects(&mut self) {
        if self.projects_loading {
            return;
        }
        self.projects_loading = true;
        let api = Arc::clone(&self.api);
        let results = Arc::clone(&self.op_results);
        self.tokio_runtime.spawn(async move {
            let outcome = api.list().await.map_err(|e| e.to_string());
            if let Ok(mut results) = results.lock() {
                results.push(OpOutcome::ProjectsLoaded(outcome));
            }
        });
    }

    /// Validate the create form and, if it passes, create the project and
    /// kick off its pipeline. Validation failures never reach the network.
    pub fn launch_generation(&mut self) {
        let variant = match self.current_view {
            View::CreateForm(variant) => variant,
            _ => return,
        };
        if self.form_loading {
            return;
        }

        let values = self.field_values.clone();

        // Client-side validation before any network call
        match variant {
            WorkflowVariant::Classic | WorkflowVariant::Scene => {
                let description = values.get("description").map(String::as_str).unwrap_or("");
                if description.trim().is_empty() {
                    self.notifications
                        .error("Missing description", "Describe the video first");
                    return;
                }
            }
            WorkflowVariant::DirectVideo => {
                if let Err(e) = direct_video_form(&values).validate() {
                    self.notifications.error("Invalid form", e.to_string());
                    return;
                }
            }
        }

        self.form_loading = true;
        self.form_progress = 10;
        self.form_step = "creating project...".to_string();

        let api = Arc::clone(&self.api);
        let results = Arc::clone(&self.op_results);
        self.tokio_runtime.spawn(async move {
            let result = create_and_start(api, variant, values)
                .await
                .map_err(|e| e.to_string());
            if let Ok(mut results) = results.lock() {
                results.push(OpOutcome::PipelineStarted { variant, result });
            }
        });
    }

    /// Open the detail view for the selected listed project and, when the
    /// project is still generating, resume observation of it.
    pub fn view_selected_project(&mut self) {
        if self.selected >= self.projects.len() {
            return;
        }
        let project = self.projects[self.selected].clone();
        self.open_detail(project);
        self.current_view = View::ProjectDetail(self.selected);
    }

    pub(crate) fn open_detail(&mut self, project: Project) {
        self.detail_poll = None;
        if !project.is_terminal() {
            let variant = WorkflowVariant::infer(&project);
            let controller = WorkflowController::new(
                Arc::clone(&self.api) as Arc<dyn WorkflowBackend>,
                variant,
                project.project_id.clone(),
            );
            let _guard = self.tokio_runtime.enter();
            self.detail_poll = Some(controller.resume());
        }
        self.detail_project = Some(project);
    }

    /// Drain the detail view's poll subscription. Fetched snapshots replace
    /// both the detail copy and the listing copy wholesale.
    pub fn poll_detail(&mut self) {
        let Some(poll) = &self.detail_poll else {
            return;
        };
        let snapshot = poll.snapshot();
        if let Some(project) = snapshot.project {
            self.apply_project_update(project);
        }
        if snapshot.state.is_final() {
            // Done or timed out; dropping the handle ends the task
            self.detail_poll = None;
        }
    }

    /// Leaving the detail view drops the poll handle, which cancels the
    /// polling task. Late responses have nowhere to land.
    pub fn close_detail(&mut self) {
        self.detail_poll = None;
        self.detail_project = None;
        self.detail_loading = false;
        self.current_view = View::ProjectList;
    }

    /// Re-fetch the detail project once.
    pub fn refresh_detail(&mut self) {
        let Some(project) = &self.detail_project else {
            return;
        };
        if self.detail_loading {
            return;
        }
        self.detail_loading = true;
        let project_id = project.project_id.clone();
        let api = Arc::clone(&self.api);
        let results = Arc::clone(&self.op_results);
        self.tokio_runtime.spawn(async move {
            let outcome = api.get(&project_id).await.map_err(|e| e.to_string());
            if let Ok(mut results) = results.lock() {
                results.push(OpOutcome::ProjectRefreshed(outcome));
            }
        });
    }

    /// Fire the single stage action enabled for the detail project's current
    /// phase, if any. Disabled while another request is in flight.
    pub fn run_enabled_stage(&mut self) {
        let Some(project) = &self.detail_project else {
            return;
        };
        if self.detail_loading {
            return;
        }
        let variant = WorkflowVariant::infer(project);
        let view = shorts_client::stage_view(variant, &project.status);
        let Some(trigger) = view.action else {
            return;
        };

        self.detail_loading = true;
        let project_id = project.project_id.clone();
        let api = Arc::clone(&self.api);
        let results = Arc::clone(&self.op_results);
        self.tokio_runtime.spawn(async move {
            let controller = WorkflowController::new(
                Arc::clone(&api) as Arc<dyn WorkflowBackend>,
                variant,
                project_id.clone(),
            );
            let result = controller
                .run_stage(trigger)
                .await
                .map_err(|e| e.to_string());
            if let Ok(mut results) = results.lock() {
                results.push(OpOutcome::StageFinished { project_id, result });
            }
        });
    }

    // --- Delete flow ----------------------------------------------------

    pub fn request_delete_selected(&mut self) {
        if let Some(project) = self.projects.get(self.selected) {
            self.delete_target = Some(project.project_id.clone());
            self.show_delete_confirmation = true;
        }
    }

    pub fn request_delete_detail(&mut self) {
        if let Some(project) = &self.detail_project {
            self.delete_target = Some(project.project_id.clone());
            self.show_delete_confirmation = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.show_delete_confirmation = false;
        self.delete_target = None;
    }

    pub fn confirm_delete(&mut self) {
        let Some(project_id) = self.delete_target.clone() else {
            self.show_delete_confirmation = false;
            return;
        };
        if self.deleting {
            return;
        }
        self.deleting = true;
        let api = Arc::clone(&self.api);
        let results = Arc::clone(&self.op_results);
        self.tokio_runtime.spawn(async move {
            let result = api.delete(&project_id).await.map_err(|e| e.to_string());
            if let Ok(mut results) = results.lock() {
                results.push(OpOutcome::ProjectDeleted { project_id, result });
            }
        });
    }

    // --- Outcome drain --------------------------------------------------

    /// Apply finished background operations to view state. Runs once per
    /// frame on the UI thread.
    pub fn drain_op_results(&mut self) {
        let outcomes: Vec<OpOutcome> = match self.op_results.lock() {
            Ok(mut results) => results.drain(..).collect(),
            Err(_) => return,
        };

        for outcome in outcomes {
            match outcome {
                OpOutcome::ProjectsLoaded(Ok(projects)) => {
                    self.projects = projects;
                    self.projects_loading = false;
                    if self.selected >= self.projects.len() {
                        self.selected = self.projects.len().saturating_sub(1);
                    }
                }
                OpOutcome::ProjectsLoaded(Err(e)) => {
                    self.projects_loading = false;
                    self.notifications.error("Failed to load projects", e);
                }

                OpOutcome::PipelineStarted { variant, result } => match result {
                    Ok((project, handle)) => {
                        self.form_loading = false;
                        self.form_progress = 0;
                        self.form_step.clear();
                        let field_values = std::mem::take(&mut self.field_values);
                        self.open_generation_tab(variant, project, handle, field_values);
                        self.current_view = View::Tabs;
                    }
                    Err(e) => {
                        // Reset on catch: the form stays editable and can be
                        // resubmitted as-is.
                        self.form_loading = false;
                        self.form_progress = 0;
                        self.form_step.clear();
                        self.notifications.error("Generation failed to start", e);
                    }
                },

                OpOutcome::ProjectDeleted { project_id, result } => {
                    self.deleting = false;
                    self.show_delete_confirmation = false;
                    self.delete_target = None;
                    match result {
                        Ok(()) => {
                            self.projects.retain(|p| p.project_id != project_id);
                            if self.selected >= self.projects.len() {
                                self.selected = self.projects.len().saturating_sub(1);
                            }
                            let detail_open = self
                                .detail_project
                                .as_ref()
                                .map(|p| p.project_id == project_id)
                                .unwrap_or(false);
                            if detail_open {
                                self.close_detail();
                            }
                            self.notifications.success("Project deleted", project_id);
                        }
                        Err(e) => {
                            self.notifications.error("Delete failed", e);
                        }
                    }
                }

                OpOutcome::StageFinished { project_id, result } => {
                    self.detail_loading = false;
                    match result {
                        Ok(project) => {
                            self.apply_project_update(project);
                        }
                        Err(e) => {
                            self.notifications
                                .error("Stage failed", format!("{project_id}: {e}"));
                        }
                    }
                }

                OpOutcome::ProjectRefreshed(Ok(project)) => {
                    self.detail_loading = false;
                    self.apply_project_update(project);
                }
                OpOutcome::ProjectRefreshed(Err(e)) => {
                    self.detail_loading = false;
                    self.notifications.error("Refresh failed", e);
                }
            }
        }
    }

    /// Replace the cached copies of a project with a fresh snapshot.
    fn apply_project_update(&mut self, project: Project) {
        if let Some(existing) = self
            .projects
            .iter_mut()
            .find(|p| p.project_id == project.project_id)
        {
            *existing = project.clone();
        }
        let detail_matches = self
            .detail_project
            .as_ref()
            .map(|p| p.project_id == project.project_id)
            .unwrap_or(false);
        if detail_matches {
            self.detail_project = Some(project);
        }
    }
}

/// Create a project for the variant and fire its initial pipeline trigger,
/// handing back the poll handle that observes completion.
async fn create_and_start(
    api: Arc<ApiClient>,
    variant: WorkflowVariant,
    values: HashMap<String, String>,
) -> shorts_client::Result<(Project, PollHandle)> {
    let description = values.get("description").cloned().unwrap_or_default();

    let project = match variant {
        WorkflowVariant::Classic => {
            let content_type = values.get("content_type").map(String::as_str);
            match values.get("dog_image").filter(|v| !v.trim().is_empty()) {
                Some(path) => {
                    api.create_with_dog_upload(
                        &description,
                        content_type.unwrap_or("general"),
                        Path::new(path),
                    )
                    .await?
                }
                None => api.create(&description, content_type).await?,
            }
        }
        WorkflowVariant::Scene => {
            let style = SceneStyleOptions {
                photographic: values.get("photographic").map(String::as_str) != Some("false"),
                consistent_lighting: values.get("consistent_lighting").map(String::as_str)
                    != Some("false"),
                ..SceneStyleOptions::default()
            };
            let reference = values
                .get("reference_image")
                .filter(|v| !v.trim().is_empty())
                .map(Path::new);
            api.create_scene_project(&description, &style, reference)
                .await?
        }
        WorkflowVariant::DirectVideo => {
            let form = direct_video_form(&values);
            api.create_direct_video(&form).await?
        }
    };

    let controller = WorkflowController::new(
        Arc::clone(&api) as Arc<dyn WorkflowBackend>,
        variant,
        project.project_id.clone(),
    );
    let handle = controller.start_pipeline().await?;
    Ok((project, handle))
}
