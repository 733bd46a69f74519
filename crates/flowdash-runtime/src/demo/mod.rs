//! Built-in demo dataset.
//!
//! Seeded once when the store is created and mutated in place for the rest
//! of the process. Accessors hand out clones, never references into the
//! store.

mod seed;

pub use seed::DEMO_SUCCESS_RATE;

use flowdash_core::records::{Execution, Stats, User, Workflow, WorkflowStatus};
use tokio::sync::RwLock;

/// In-memory demo collections.
#[derive(Debug)]
pub struct DemoStore {
    workflows: RwLock<Vec<Workflow>>,
    executions: RwLock<Vec<Execution>>,
    users: RwLock<Vec<User>>,
}

impl DemoStore {
    /// Create a store holding the fixed demo dataset.
    pub fn seeded() -> Self {
        Self::from_records(seed::workflows(), seed::executions(), seed::users())
    }

    /// Create a store from explicit collections.
    pub fn from_records(
        workflows: Vec<Workflow>,
        executions: Vec<Execution>,
        users: Vec<User>,
    ) -> Self {
        Self {
            workflows: RwLock::new(workflows),
            executions: RwLock::new(executions),
            users: RwLock::new(users),
        }
    }

    pub async fn workflows(&self) -> Vec<Workflow> {
        self.workflows.read().await.clone()
    }

    pub async fn executions(&self) -> Vec<Execution> {
        self.executions.read().await.clone()
    }

    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Counts over the current collections with the fixed demo success rate.
    pub async fn stats(&self) -> Stats {
        let workflows = self.workflows.read().await;
        let executions = self.executions.read().await;
        let users = self.users.read().await;
        Stats::with_success_rate(&workflows, &executions, users.len(), DEMO_SUCCESS_RATE)
    }

    /// Remove a workflow. Returns whether it was present.
    pub async fn delete_workflow(&self, id: &str) -> bool {
        let mut workflows = self.workflows.write().await;
        let before = workflows.len();
        workflows.retain(|w| w.id != id);
        workflows.len() != before
    }

    /// Set a workflow's status to paused. Returns whether it was present.
    pub async fn pause_workflow(&self, id: &str) -> bool {
        let mut workflows = self.workflows.write().await;
        match workflows.iter_mut().find(|w| w.id == id) {
            Some(workflow) => {
                workflow.status = WorkflowStatus::Paused;
                true
            }
            None => false,
        }
    }

    /// Mark an execution as stopped by the user. Returns whether it was present.
    pub async fn stop_execution(&self, id: &str) -> bool {
        let mut executions = self.executions.write().await;
        match executions.iter_mut().find(|e| e.id == id) {
            Some(execution) => {
                execution.stop();
                true
            }
            None => false,
        }
    }

    /// Remove a user. Returns whether it was present.
    pub async fn delete_user(&self, id: &str) -> bool {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        users.len() != before
    }
}

impl Default for DemoStore {
    fn default() -> Self {
        Self::seeded()
    }
}
