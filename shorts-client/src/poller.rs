//! Bounded status poller
//!
//! A generation job runs for minutes on the backend with no push channel, so
//! progress is observed by re-fetching the project on a timer: 3 seconds
//! after a successful fetch, 5 seconds after a failed one. Failures are
//! swallowed and retried; the loop ends when a terminal status is observed
//! or the attempt budget runs out, in which case a `TimedOut` state is
//! published instead of polling forever.
//!
//! The `watch` channel is the single subscription surface. Consumers read
//! the latest snapshot whenever they like; a consumer that goes away simply
//! stops reading, and dropping the handle aborts the task.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::Result;
use crate::project::Project;
use crate::variant::WorkflowVariant;

/// Seam between the poller and the HTTP client so tests can script fetches.
#[async_trait]
pub trait ProjectFetch: Send + Sync {
    async fn fetch(&self, project_id: &str) -> Result<Project>;
}

#[async_trait]
impl ProjectFetch for ApiClient {
    async fn fetch(&self, project_id: &str) -> Result<Project> {
        self.get(project_id).await
    }
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the next check after a successful fetch.
    pub success_interval: Duration,
    /// Delay before the next check after a failed fetch.
    pub error_interval: Duration,
    /// Attempt budget; exceeding it publishes `TimedOut` and stops.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            success_interval: Duration::from_secs(3),
            error_interval: Duration::from_secs(5),
            // ~10 minutes at the success cadence
            max_attempts: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling,
    /// A terminal status was observed; no further checks are scheduled.
    Done,
    /// The attempt budget ran out before a terminal status appeared.
    TimedOut,
}

impl PollState {
    pub fn is_final(&self) -> bool {
        !matches!(self, PollState::Polling)
    }
}

/// Latest observed state of one polling loop. Each fetched project snapshot
/// wholesale-replaces the previous one; there is no field-level merging.
#[derive(Debug, Clone)]
pub struct PollSnapshot {
    pub project: Option<Project>,
    pub attempts: u32,
    pub consecutive_errors: u32,
    pub state: PollState,
}

impl PollSnapshot {
    fn initial() -> Self {
        PollSnapshot {
            project: None,
            attempts: 0,
            consecutive_errors: 0,
            state: PollState::Polling,
        }
    }
}

/// Handle to a running polling loop. Dropping it aborts the task, which is
/// how a closed view cancels its subscription.
pub struct PollHandle {
    pub id: Uuid,
    project_id: String,
    task: JoinHandle<()>,
    rx: watch::Receiver<PollSnapshot>,
}

impl PollHandle {
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Clone of the latest published snapshot.
    pub fn snapshot(&self) -> PollSnapshot {
        self.rx.borrow().clone()
    }

    /// A second receiver onto the same loop.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.rx.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct StatusPoller;

impl StatusPoller {
    /// Spawn a polling loop for `project_id` on the current tokio runtime.
    ///
    /// The first check happens one `success_interval` after spawning, mirroring
    /// the delay between firing a trigger and the job making observable
    /// progress.
    pub fn spawn<F>(
        fetcher: Arc<F>,
        project_id: String,
        variant: WorkflowVariant,
        config: PollConfig,
    ) -> PollHandle
    where
        F: ProjectFetch + ?Sized + 'static,
    {
        let (tx, rx) = watch::channel(PollSnapshot::initial());
        let id = Uuid::new_v4();
        let task_project_id = project_id.clone();

        let task = tokio::spawn(async move {
            let mut attempts: u32 = 0;
            let mut consecutive_errors: u32 = 0;
            let mut project: Option<Project> = None;

            loop {
                if attempts >= config.max_attempts {
                    let _ = tx.send(PollSnapshot {
                        project,
                        attempts,
                        consecutive_errors,
                        state: PollState::TimedOut,
                    });
                    return;
                }

                let delay = if consecutive_errors > 0 {
                    config.error_interval
                } else {
                    config.success_interval
                };
                tokio::time::sleep(delay).await;
                attempts += 1;

                match fetcher.fetch(&task_project_id).await {
                    Ok(fetched) => {
                        consecutive_errors = 0;
                        let terminal = variant.is_terminal(&fetched.status());
                        project = Some(fetched);
                        let state = if terminal {
                            PollState::Done
                        } else {
                            PollState::Polling
                        };
                        let _ = tx.send(PollSnapshot {
                            project: project.clone(),
                            attempts,
                            consecutive_errors,
                            state,
                        });
                        if terminal {
                            return;
                        }
                    }
                    Err(_) => {
                        // Transient by assumption; retried at the error cadence
                        consecutive_errors += 1;
                        let _ = tx.send(PollSnapshot {
                            project: project.clone(),
                            attempts,
                            consecutive_errors,
                            state: PollState::Polling,
                        });
                    }
                }
            }
        });

        PollHandle {
            id,
            project_id,
            task,
            rx,
        }
    }
}
