//! Persisted console preferences: print-server connection, demo mode, first visit.
//!
//! # Design
//! - Values are opaque strings behind a small key/value store trait.
//! - Missing or malformed stored data never fails a read; defaults are returned instead.
//! - Configuring a real server address always leaves demo mode.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::defaults::DEFAULT_PORT;
use crate::error::{ConfigError, ConfigResult};

/// Key holding the JSON-encoded [`ConnectionSettings`].
pub const CONNECTION_KEY: &str = "cups-config";
/// Key holding the demo-mode flag.
pub const DEMO_MODE_KEY: &str = "cups-demo-mode";
/// Key present once the operator has visited the console.
pub const VISITED_KEY: &str = "cups-has-visited";

/// Minimal string key/value store.
pub trait PreferenceStore {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()>;

    /// Delete `key`; deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> ConfigResult<()>;
}

/// In-process store with no persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ConfigResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object of strings.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Load the store at `path`. Absent or unreadable files start empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path);
        Self { path, values }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                operation: "preferences.create_dir",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(&self.values).map_err(|source| {
            ConfigError::Serialize {
                what: "preferences",
                source,
            }
        })?;
        fs::write(&self.path, body).map_err(|source| ConfigError::Io {
            operation: "preferences.write",
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "persisted preferences");
        Ok(())
    }
}

fn load_values(path: &Path) -> BTreeMap<String, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read preferences; using defaults"
            );
            return BTreeMap::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "malformed preferences file; using defaults");
        BTreeMap::new()
    })
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> ConfigResult<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Print-server connection details entered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionSettings {
    /// Host name or address of the print server.
    pub server_address: String,
    /// Port as entered; kept as text.
    pub port: String,
    /// Account name.
    pub username: String,
    /// Account password, stored as entered.
    pub password: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            server_address: String::new(),
            port: DEFAULT_PORT.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ConnectionSettings {
    /// Whether both the address and the port are filled in.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.server_address.is_empty() && !self.port.is_empty()
    }
}

/// Typed view of the console preferences held in a [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleSettings<S> {
    store: S,
}

impl<S: PreferenceStore> ConsoleSettings<S> {
    /// Wrap a store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Stored connection, or the defaults when nothing usable is stored.
    #[must_use]
    pub fn connection(&self) -> ConnectionSettings {
        let Some(raw) = self.store.get(CONNECTION_KEY).filter(|raw| !raw.is_empty()) else {
            return ConnectionSettings::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "stored connection settings are malformed; using defaults");
            ConnectionSettings::default()
        })
    }

    /// Persist `settings`. A non-empty server address also leaves demo mode.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings cannot be encoded or the store cannot be written.
    pub fn set_connection(&mut self, settings: &ConnectionSettings) -> ConfigResult<()> {
        let encoded = serde_json::to_string(settings).map_err(|source| ConfigError::Serialize {
            what: "connection settings",
            source,
        })?;
        self.store.set(CONNECTION_KEY, &encoded)?;
        if !settings.server_address.is_empty() {
            self.store.remove(DEMO_MODE_KEY)?;
        }
        Ok(())
    }

    /// Whether a server address and port are stored.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.connection().is_configured()
    }

    /// Whether demo mode is switched on.
    #[must_use]
    pub fn is_demo_mode(&self) -> bool {
        self.store.get(DEMO_MODE_KEY).as_deref() == Some("true")
    }

    /// Switch demo mode on or off.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be written.
    pub fn set_demo_mode(&mut self, enabled: bool) -> ConfigResult<()> {
        self.store
            .set(DEMO_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Whether the console has never been visited.
    #[must_use]
    pub fn is_first_visit(&self) -> bool {
        self.store
            .get(VISITED_KEY)
            .is_none_or(|value| value.is_empty())
    }

    /// Record that the console has been visited.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be written.
    pub fn mark_visited(&mut self) -> ConfigResult<()> {
        self.store.set(VISITED_KEY, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ConnectionSettings {
        ConnectionSettings {
            server_address: "printhost.lan".to_string(),
            port: "631".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn defaults_when_nothing_stored() {
        let settings = ConsoleSettings::new(MemoryStore::default());
        assert_eq!(settings.connection(), ConnectionSettings::default());
        assert_eq!(settings.connection().port, "631");
        assert!(!settings.is_configured());
        assert!(!settings.is_demo_mode());
        assert!(settings.is_first_visit());
    }

    #[test]
    fn malformed_connection_falls_back_to_defaults() -> anyhow::Result<()> {
        let mut store = MemoryStore::default();
        store.set(CONNECTION_KEY, "{not json")?;
        let settings = ConsoleSettings::new(store);
        assert_eq!(settings.connection(), ConnectionSettings::default());
        Ok(())
    }

    #[test]
    fn connection_is_stored_as_camel_case_json() -> anyhow::Result<()> {
        let mut settings = ConsoleSettings::new(MemoryStore::default());
        settings.set_connection(&configured())?;
        let raw = settings
            .store()
            .get(CONNECTION_KEY)
            .expect("connection stored");
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(value["serverAddress"], "printhost.lan");
        assert_eq!(value["port"], "631");
        assert_eq!(settings.connection(), configured());
        assert!(settings.is_configured());
        Ok(())
    }

    #[test]
    fn configuring_a_server_leaves_demo_mode() -> anyhow::Result<()> {
        let mut settings = ConsoleSettings::new(MemoryStore::default());
        settings.set_demo_mode(true)?;
        assert!(settings.is_demo_mode());

        settings.set_connection(&ConnectionSettings::default())?;
        assert!(settings.is_demo_mode(), "empty address keeps demo mode");

        settings.set_connection(&configured())?;
        assert!(!settings.is_demo_mode());
        assert!(settings.store().get(DEMO_MODE_KEY).is_none());
        Ok(())
    }

    #[test]
    fn port_is_required_for_configured_state() -> anyhow::Result<()> {
        let mut settings = ConsoleSettings::new(MemoryStore::default());
        settings.set_connection(&ConnectionSettings {
            port: String::new(),
            ..configured()
        })?;
        assert!(!settings.is_configured());
        Ok(())
    }

    #[test]
    fn first_visit_marker() -> anyhow::Result<()> {
        let mut settings = ConsoleSettings::new(MemoryStore::default());
        assert!(settings.is_first_visit());
        settings.mark_visited()?;
        assert!(!settings.is_first_visit());
        Ok(())
    }

    #[test]
    fn file_store_round_trips_through_disk() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("preferences.json");

        let mut settings = ConsoleSettings::new(JsonFileStore::open(&path));
        settings.set_connection(&configured())?;
        settings.mark_visited()?;
        assert!(path.exists());

        let reopened = ConsoleSettings::new(JsonFileStore::open(&path));
        assert_eq!(reopened.connection(), configured());
        assert!(!reopened.is_first_visit());
        Ok(())
    }

    #[test]
    fn malformed_file_is_treated_as_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("preferences.json");
        fs::write(&path, "[1, 2, 3]")?;

        let mut store = JsonFileStore::open(&path);
        assert!(store.get(CONNECTION_KEY).is_none());

        store.set(DEMO_MODE_KEY, "true")?;
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(DEMO_MODE_KEY).as_deref(), Some("true"));
        Ok(())
    }

    #[test]
    fn missing_file_is_not_created_by_reads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let store = JsonFileStore::open(&path);
        assert!(store.get(VISITED_KEY).is_none());
        assert!(!path.exists());
        assert_eq!(store.path(), path.as_path());
    }
}
