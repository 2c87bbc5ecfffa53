//! Per-project workflow controller
//!
//! Binds a backend, a workflow variant and a project id into the one object
//! the view layer talks to. Firing a trigger and observing its completion
//! are a single path here: `start` fires the stage and hands back the poll
//! subscription, so there is no separate fire-and-forget route to reconcile.
//!
//! Mutating actions are serialized per controller: while one trigger is in
//! flight, a second one fails fast with [`ClientError::Busy`] instead of
//! racing the first.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::poller::{PollConfig, PollHandle, ProjectFetch, StatusPoller};
use crate::project::Project;
use crate::variant::{StageTrigger, WorkflowVariant};

/// The operations a controller needs from the backend.
#[async_trait]
pub trait WorkflowBackend: ProjectFetch {
    async fn trigger(&self, project_id: &str, trigger: StageTrigger) -> Result<()>;
}

#[async_trait]
impl WorkflowBackend for ApiClient {
    async fn trigger(&self, project_id: &str, trigger: StageTrigger) -> Result<()> {
        ApiClient::trigger(self, project_id, trigger).await
    }
}

pub struct WorkflowController {
    backend: Arc<dyn WorkflowBackend>,
    variant: WorkflowVariant,
    project_id: String,
    poll_config: PollConfig,
    in_flight: Mutex<()>,
}

impl WorkflowController {
    pub fn new(
        backend: Arc<dyn WorkflowBackend>,
        variant: WorkflowVariant,
        project_id: impl Into<String>,
    ) -> Self {
        WorkflowController {
            backend,
            variant,
            project_id: project_id.into(),
            poll_config: PollConfig::default(),
            in_flight: Mutex::new(()),
        }
    }

    pub fn with_poll_config(mut self, poll_config: PollConfig) -> Self {
        self.poll_config = poll_config;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.variant
    }

    /// Fire a stage trigger, then spawn the poller that observes its
    /// completion. The returned handle is the only subscription; dropping it
    /// cancels polling.
    pub async fn start(&self, trigger: StageTrigger) -> Result<PollHandle> {
        let _guard = self.in_flight.try_lock().map_err(|_| ClientError::Busy)?;
        self.backend.trigger(&self.project_id, trigger).await?;
        Ok(self.spawn_poller())
    }

    /// Kick off the variant's whole pipeline (the post-creation trigger).
    pub async fn start_pipeline(&self) -> Result<PollHandle> {
        self.start(self.variant.initial_trigger()).await
    }

    /// Run one stage and return the refreshed snapshot, without polling.
    /// Used by detail views for the manual stage buttons.
    pub async fn run_stage(&self, trigger: StageTrigger) -> Result<Project> {
        let _guard = self.in_flight.try_lock().map_err(|_| ClientError::Busy)?;
        self.backend.trigger(&self.project_id, trigger).await?;
        self.backend.fetch(&self.project_id).await
    }

    /// Spawn a poller without firing anything, for resuming observation of a
    /// job that is already running (e.g. a restored session tab).
    pub fn resume(&self) -> PollHandle {
        self.spawn_poller()
    }

    fn spawn_poller(&self) -> PollHandle {
        StatusPoller::spawn(
            Arc::clone(&self.backend),
            self.project_id.clone(),
            self.variant,
            self.poll_config.clone(),
        )
    }
}
