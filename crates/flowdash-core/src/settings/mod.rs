//! Persisted n8n connection settings.
//!
//! The settings decide, per call, whether the data service talks to a live
//! n8n instance or serves the built-in demo data. Stores are injected into
//! the service so routing can be tested without touching disk.

mod file;

pub use file::FileSettingsStore;

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Key under which the settings are stored.
pub const SETTINGS_KEY: &str = "n8n-settings";

/// Connection settings for a live n8n instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct N8nSettings {
    /// Base URL of the n8n public API, e.g. `https://n8n.example.com/api/v1`.
    #[serde(default)]
    pub base_url: String,
    /// API key sent as `X-N8N-API-KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Whether live data should be used at all.
    #[serde(default)]
    pub enabled: bool,
}

impl N8nSettings {
    /// Create enabled settings.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            enabled: true,
        }
    }

    /// True iff enabled and both the base URL and API key are non-empty.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let api_key = if self.api_key.is_empty() {
            String::new()
        } else {
            let tail: String = self
                .api_key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{}", tail)
        };
        Self {
            base_url: self.base_url.clone(),
            api_key,
            enabled: self.enabled,
        }
    }
}

/// Durable storage for [`N8nSettings`].
pub trait SettingsStore: Send + Sync {
    /// Last saved settings, or the zero value if nothing was ever saved.
    fn read(&self) -> N8nSettings;

    /// Overwrite the stored settings. Last write wins.
    fn write(&self, settings: &N8nSettings) -> Result<()>;
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: RwLock<N8nSettings>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given settings.
    pub fn with_settings(settings: N8nSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read(&self) -> N8nSettings {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write(&self, settings: &N8nSettings) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = settings.clone();
        Ok(())
    }
}
