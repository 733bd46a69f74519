//! The single entry point dashboard consumers use to read and mutate data.
//!
//! Each call re-reads the settings store. When the settings are configured
//! the call goes to the live n8n instance, otherwise to the demo store.
//! Reads that fail live are logged and answered from the demo store; writes
//! that fail live are returned to the caller and the demo store is left
//! untouched.

use std::future::Future;
use std::sync::Arc;

use flowdash_core::http::HttpTransport;
use flowdash_core::records::{Execution, Stats, User, Workflow};
use flowdash_core::{FlowdashError, N8nSettings, Result, SettingsStore};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::demo::DemoStore;
use crate::n8n::N8nClient;

/// Total users reported by live stats; n8n has no user directory here.
pub const LIVE_TOTAL_USERS: usize = 1;

/// Where data is currently served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Demo,
    Live,
}

/// Routing data access over the demo store and a live n8n instance.
pub struct DataService {
    settings: Arc<dyn SettingsStore>,
    transport: Arc<dyn HttpTransport>,
    demo: DemoStore,
}

impl DataService {
    /// Create a service over the seeded demo dataset.
    pub fn new(settings: Arc<dyn SettingsStore>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_demo_store(settings, transport, DemoStore::seeded())
    }

    pub fn with_demo_store(
        settings: Arc<dyn SettingsStore>,
        transport: Arc<dyn HttpTransport>,
        demo: DemoStore,
    ) -> Self {
        Self {
            settings,
            transport,
            demo,
        }
    }

    /// Currently stored settings.
    pub fn settings(&self) -> N8nSettings {
        self.settings.read()
    }

    /// Persist new settings. Takes effect on the next call.
    pub fn save_settings(&self, settings: &N8nSettings) -> Result<()> {
        self.settings.write(settings)?;
        info!(enabled = settings.enabled, base_url = %settings.base_url, "n8n settings updated");
        Ok(())
    }

    pub fn mode(&self) -> DataMode {
        if self.settings().is_configured() {
            DataMode::Live
        } else {
            DataMode::Demo
        }
    }

    fn live_client(&self) -> Option<N8nClient> {
        let settings = self.settings();
        settings
            .is_configured()
            .then(|| N8nClient::new(&settings, Arc::clone(&self.transport)))
    }

    /// Run `live` when configured, answering from `demo` if it fails or if
    /// not configured. Never fails.
    async fn try_live_then_fallback<T, L, LF, D, DF>(
        &self,
        operation: &'static str,
        live: L,
        demo: D,
    ) -> T
    where
        L: FnOnce(N8nClient) -> LF,
        LF: Future<Output = Result<T>>,
        D: FnOnce() -> DF,
        DF: Future<Output = T>,
    {
        if let Some(client) = self.live_client() {
            match live(client).await {
                Ok(value) => return value,
                Err(e) => {
                    warn!(operation, error = %e, "Live n8n read failed, serving demo data");
                }
            }
        }
        demo().await
    }

    /// Run `live` when configured and propagate its failure; otherwise apply
    /// `demo`. A failed live call never touches the demo store.
    async fn try_live_or_fail<L, LF, D, DF>(
        &self,
        operation: &'static str,
        live: L,
        demo: D,
    ) -> Result<()>
    where
        L: FnOnce(N8nClient) -> LF,
        LF: Future<Output = Result<()>>,
        D: FnOnce() -> DF,
        DF: Future<Output = ()>,
    {
        match self.live_client() {
            Some(client) => live(client).await.map_err(|e| {
                error!(operation, error = %e, "Live n8n mutation failed");
                e
            }),
            None => {
                demo().await;
                Ok(())
            }
        }
    }

    // =========================================================================
    // WORKFLOWS
    // =========================================================================

    pub async fn get_workflows(&self) -> Vec<Workflow> {
        self.try_live_then_fallback(
            "get_workflows",
            |client| async move { client.list_workflows().await },
            || self.demo.workflows(),
        )
        .await
    }

    pub async fn delete_workflow(&self, id: &str) -> Result<()> {
        info!(workflow_id = id, "Deleting workflow");
        self.try_live_or_fail(
            "delete_workflow",
            |client| async move { client.delete_workflow(id).await },
            || async move {
                self.demo.delete_workflow(id).await;
            },
        )
        .await
    }

    pub async fn execute_workflow(&self, id: &str) -> Result<()> {
        info!(workflow_id = id, "Executing workflow");
        self.try_live_or_fail(
            "execute_workflow",
            |client| async move { client.activate_workflow(id).await },
            || async {},
        )
        .await
    }

    pub async fn pause_workflow(&self, id: &str) -> Result<()> {
        info!(workflow_id = id, "Pausing workflow");
        self.try_live_or_fail(
            "pause_workflow",
            |client| async move { client.deactivate_workflow(id).await },
            || async move {
                self.demo.pause_workflow(id).await;
            },
        )
        .await
    }

    // =========================================================================
    // EXECUTIONS
    // =========================================================================

    pub async fn get_executions(&self) -> Vec<Execution> {
        self.try_live_then_fallback(
            "get_executions",
            |client| async move { client.list_executions().await },
            || self.demo.executions(),
        )
        .await
    }

    pub async fn stop_execution(&self, id: &str) -> Result<()> {
        info!(execution_id = id, "Stopping execution");
        self.try_live_or_fail(
            "stop_execution",
            |client| async move { client.stop_execution(id).await },
            || async move {
                self.demo.stop_execution(id).await;
            },
        )
        .await
    }

    // =========================================================================
    // USERS (demo only)
    // =========================================================================

    pub async fn get_users(&self) -> Vec<User> {
        self.demo.users().await
    }

    pub async fn delete_user(&self, id: &str) {
        info!(user_id = id, "Deleting user");
        self.demo.delete_user(id).await;
    }

    // =========================================================================
    // STATS
    // =========================================================================

    pub async fn get_stats(&self) -> Stats {
        self.try_live_then_fallback(
            "get_stats",
            |client| async move {
                let workflows = client.list_workflows().await?;
                let executions = client.list_executions().await?;
                Ok::<_, FlowdashError>(Stats::from_live(
                    &workflows,
                    &executions,
                    LIVE_TOTAL_USERS,
                ))
            },
            || self.demo.stats(),
        )
        .await
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Probe candidate settings with `GET /workflows`. The enabled flag is
    /// ignored and nothing is stored.
    pub async fn test_connection(&self, candidate: &N8nSettings) -> Result<()> {
        if candidate.base_url.is_empty() || candidate.api_key.is_empty() {
            return Err(FlowdashError::Config(
                "base URL and API key are required".into(),
            ));
        }

        let client = N8nClient::new(candidate, Arc::clone(&self.transport));
        match client.ping().await {
            Ok(()) => {
                info!(base_url = client.base_url(), "n8n connection test succeeded");
                Ok(())
            }
            Err(e) => {
                warn!(base_url = client.base_url(), error = %e, "n8n connection test failed");
                Err(e)
            }
        }
    }
}
