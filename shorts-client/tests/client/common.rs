//! Common test utilities for the client test suite

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use shorts_client::controller::WorkflowBackend;
use shorts_client::{ClientError, PollConfig, Project, ProjectFetch, Result, StageTrigger};

/// Create a project snapshot with the given status.
pub fn sample_project(status: &str) -> Project {
    Project {
        project_id: "p-1".to_string(),
        description: "a cat plays with yarn".to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

/// One scripted fetch outcome.
#[derive(Debug, Clone)]
pub enum FetchStep {
    Status(&'static str),
    Fail,
}

/// A `ProjectFetch` that replays a script. When the script runs out, the
/// last step repeats, so "never reaches terminal" is expressible.
pub struct ScriptedFetch {
    steps: Mutex<Vec<FetchStep>>,
    calls: AtomicU32,
}

impl ScriptedFetch {
    pub fn new(steps: Vec<FetchStep>) -> Self {
        assert!(!steps.is_empty(), "script must have at least one step");
        ScriptedFetch {
            steps: Mutex::new(steps),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> FetchStep {
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.remove(0)
        } else {
            steps[0].clone()
        }
    }
}

#[async_trait]
impl ProjectFetch for ScriptedFetch {
    async fn fetch(&self, project_id: &str) -> Result<Project> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_step() {
            FetchStep::Status(status) => {
                let mut project = sample_project(status);
                project.project_id = project_id.to_string();
                Ok(project)
            }
            FetchStep::Fail => Err(ClientError::Validation("scripted failure".to_string())),
        }
    }
}

#[async_trait]
impl WorkflowBackend for ScriptedFetch {
    async fn trigger(&self, _project_id: &str, _trigger: StageTrigger) -> Result<()> {
        Ok(())
    }
}

/// A backend whose triggers take a while, for exercising the in-flight
/// guard.
pub struct SlowBackend {
    pub trigger_delay: Duration,
}

#[async_trait]
impl ProjectFetch for SlowBackend {
    async fn fetch(&self, project_id: &str) -> Result<Project> {
        let mut project = sample_project("created");
        project.project_id = project_id.to_string();
        Ok(project)
    }
}

#[async_trait]
impl WorkflowBackend for SlowBackend {
    async fn trigger(&self, _project_id: &str, _trigger: StageTrigger) -> Result<()> {
        tokio::time::sleep(self.trigger_delay).await;
        Ok(())
    }
}

/// Poll config with a small bound so timeout tests finish quickly.
pub fn bounded_config(max_attempts: u32) -> PollConfig {
    PollConfig {
        max_attempts,
        ..PollConfig::default()
    }
}
