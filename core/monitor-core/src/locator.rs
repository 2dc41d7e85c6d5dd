//! SwiftBar plugin directory discovery (macOS).
//!
//! SwiftBar records its live plugin folder in its preference domain. One
//! query per run; a failed query and an empty answer both mean
//! [`PluginDirectory::Absent`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const SWIFTBAR_PREFERENCE_DOMAIN: &str = "com.ameba.SwiftBar";
pub const SWIFTBAR_PLUGIN_DIR_KEY: &str = "PluginDirectory";

/// Result of the plugin directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginDirectory {
    Found(PathBuf),
    Absent,
}

impl PluginDirectory {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PluginDirectory::Found(path) => Some(path),
            PluginDirectory::Absent => None,
        }
    }

    /// Value handed to the JSON-trust helper: the directory, or the empty
    /// string when nothing was found.
    pub fn as_argument(&self) -> OsString {
        match self {
            PluginDirectory::Found(path) => path.as_os_str().to_os_string(),
            PluginDirectory::Absent => OsString::new(),
        }
    }
}

/// Read access to a host application's preference store.
pub trait PreferencesStore {
    /// Returns the raw value for `key` in `domain`, or `None` when it cannot
    /// be read.
    fn read(&self, domain: &str, key: &str) -> Option<String>;
}

/// Reads preferences through `defaults read <domain> <key>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultsCommand;

impl PreferencesStore for DefaultsCommand {
    fn read(&self, domain: &str, key: &str) -> Option<String> {
        let output = Command::new("defaults")
            .args(["read", domain, key])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                tracing::debug!(
                    domain,
                    key,
                    code = ?output.status.code(),
                    "defaults read returned non-zero"
                );
                None
            }
            Err(e) => {
                tracing::debug!(domain, key, error = %e, "defaults command unavailable");
                None
            }
        }
    }
}

/// Preferences with a fixed answer. Used for a configured override and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedPreferences {
    value: Option<String>,
}

impl FixedPreferences {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

impl PreferencesStore for FixedPreferences {
    fn read(&self, _domain: &str, _key: &str) -> Option<String> {
        self.value.clone()
    }
}

/// Where to look for the plugin directory setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDirQuery {
    pub domain: String,
    pub key: String,
}

impl Default for PluginDirQuery {
    fn default() -> Self {
        Self {
            domain: SWIFTBAR_PREFERENCE_DOMAIN.to_string(),
            key: SWIFTBAR_PLUGIN_DIR_KEY.to_string(),
        }
    }
}

/// Queries `store` once for the plugin directory.
pub fn locate_plugin_dir(store: &dyn PreferencesStore, query: &PluginDirQuery) -> PluginDirectory {
    let raw = store.read(&query.domain, &query.key).unwrap_or_default();
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        tracing::info!(domain = %query.domain, "SwiftBar plugin directory not configured");
        PluginDirectory::Absent
    } else {
        tracing::debug!(path = trimmed, "SwiftBar plugin directory found");
        PluginDirectory::Found(PathBuf::from(trimmed))
    }
}
