use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{N8nSettings, SettingsStore, SETTINGS_KEY};
use crate::error::{FlowdashError, Result};

/// Settings store backed by a JSON key-value file.
///
/// The file holds a flat object; settings live under [`SETTINGS_KEY`] and any
/// other keys are preserved on write.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Create a store for the given file. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> Result<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(FlowdashError::Deserialization(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(FlowdashError::Deserialization(e.to_string())),
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self) -> N8nSettings {
        let entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable settings file, using defaults");
                return N8nSettings::default();
            }
        };

        match entries.get(SETTINGS_KEY) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Malformed settings entry, using defaults");
                N8nSettings::default()
            }),
            None => N8nSettings::default(),
        }
    }

    fn write(&self, settings: &N8nSettings) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // A corrupt file is replaced; an unreadable one is left alone.
        let mut entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(FlowdashError::Deserialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Replacing corrupt settings file");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(SETTINGS_KEY.to_string(), serde_json::to_value(settings)?);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&Value::Object(entries))?;
        write_atomic(&self.path, &content)?;

        debug!(path = %self.path.display(), enabled = settings.enabled, "Saved n8n settings");
        Ok(())
    }
}

/// Write through a sibling temp file and rename it into place. The temp
/// file is removed if either step fails.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let result =
        std::fs::write(&tmp_path, content).and_then(|()| std::fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}
