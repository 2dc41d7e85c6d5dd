//! Installer configuration.
//!
//! Optional TOML file at `~/.config/claude-usage-monitor/install.toml`:
//!
//! ```toml
//! prefix = "/opt/homebrew"
//! source_dir = "/path/to/claude-usage-monitor"
//!
//! [swiftbar]
//! preference_domain = "com.ameba.SwiftBar"
//! preference_key = "PluginDirectory"
//! plugin_dir = "/Users/alex/SwiftBar"
//! ```
//!
//! A missing file means defaults. Command-line overrides win over the file.

use crate::error::{MonitorError, Result};
use crate::locator::{PluginDirQuery, SWIFTBAR_PLUGIN_DIR_KEY, SWIFTBAR_PREFERENCE_DOMAIN};
use crate::paths::{InstallPaths, SourceTree};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_RELATIVE_PATH: &str = ".config/claude-usage-monitor/install.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    pub prefix: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub swiftbar: SwiftBarConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwiftBarConfig {
    pub preference_domain: String,
    pub preference_key: String,
    pub plugin_dir: Option<PathBuf>,
}

impl Default for SwiftBarConfig {
    fn default() -> Self {
        Self {
            preference_domain: SWIFTBAR_PREFERENCE_DOMAIN.to_string(),
            preference_key: SWIFTBAR_PLUGIN_DIR_KEY.to_string(),
            plugin_dir: None,
        }
    }
}

pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_RELATIVE_PATH)
}

/// Loads the config file at `path`, or the default location under `home`.
pub fn load_config(path: Option<PathBuf>, home: &Path) -> Result<InstallerConfig> {
    let config_path = path.unwrap_or_else(|| default_config_path(home));

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No installer config; using defaults");
        return Ok(InstallerConfig::default());
    }

    let content = fs_err::read_to_string(&config_path)
        .map_err(|e| MonitorError::io(format!("read {}", config_path.display()), e))?;
    toml::from_str::<InstallerConfig>(&content).map_err(|e| MonitorError::ConfigMalformed {
        path: config_path,
        details: e.to_string(),
    })
}

/// Values given on the command line; each replaces the config file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prefix: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub plugin_dir: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct InstallSettings {
    pub paths: InstallPaths,
    pub source: SourceTree,
    pub plugin_query: PluginDirQuery,
    /// Used instead of querying preferences when set.
    pub plugin_dir: Option<PathBuf>,
}

impl InstallSettings {
    /// Applies `overrides` over `config`, filling the rest with defaults
    /// (`<home>/.local` prefix, `cwd` as source tree).
    pub fn resolve(config: InstallerConfig, overrides: Overrides, home: &Path, cwd: &Path) -> Self {
        let prefix = overrides
            .prefix
            .or(config.prefix)
            .unwrap_or_else(|| InstallPaths::default_prefix(home));
        let source_dir = overrides
            .source_dir
            .or(config.source_dir)
            .unwrap_or_else(|| cwd.to_path_buf());
        let plugin_dir = overrides.plugin_dir.or(config.swiftbar.plugin_dir);

        Self {
            paths: InstallPaths::with_prefix(prefix),
            source: SourceTree::new(source_dir),
            plugin_query: PluginDirQuery {
                domain: config.swiftbar.preference_domain,
                key: config.swiftbar.preference_key,
            },
            plugin_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_err as fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config, InstallerConfig::default());
        assert_eq!(config.swiftbar.preference_domain, "com.ameba.SwiftBar");
        assert_eq!(config.swiftbar.preference_key, "PluginDirectory");
    }

    #[test]
    fn test_parses_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("install.toml");
        fs::write(
            &path,
            r#"
prefix = "/opt/homebrew"

[swiftbar]
plugin_dir = "/Users/alex/SwiftBar"
"#,
        )
        .unwrap();

        let config = load_config(Some(path), temp.path()).unwrap();
        assert_eq!(config.prefix, Some(PathBuf::from("/opt/homebrew")));
        assert_eq!(
            config.swiftbar.plugin_dir,
            Some(PathBuf::from("/Users/alex/SwiftBar"))
        );
        assert_eq!(config.swiftbar.preference_key, "PluginDirectory");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("install.toml");
        fs::write(&path, "prefix = [not toml").unwrap();

        let err = load_config(Some(path), temp.path()).unwrap_err();
        assert!(matches!(err, MonitorError::ConfigMalformed { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("install.toml");
        fs::write(&path, "prefx = \"/usr\"\n").unwrap();

        assert!(load_config(Some(path), temp.path()).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = InstallerConfig {
            prefix: Some(PathBuf::from("/from/file")),
            source_dir: Some(PathBuf::from("/src/file")),
            swiftbar: SwiftBarConfig {
                plugin_dir: Some(PathBuf::from("/plugins/file")),
                ..SwiftBarConfig::default()
            },
        };
        let overrides = Overrides {
            prefix: Some(PathBuf::from("/from/flag")),
            source_dir: None,
            plugin_dir: None,
        };

        let settings =
            InstallSettings::resolve(config, overrides, Path::new("/home/alex"), Path::new("/cwd"));
        assert_eq!(settings.paths.prefix(), Path::new("/from/flag"));
        assert_eq!(settings.source.root(), Path::new("/src/file"));
        assert_eq!(settings.plugin_dir, Some(PathBuf::from("/plugins/file")));
    }

    #[test]
    fn test_defaults_fill_the_rest() {
        let settings = InstallSettings::resolve(
            InstallerConfig::default(),
            Overrides::default(),
            Path::new("/home/alex"),
            Path::new("/cwd"),
        );
        assert_eq!(settings.paths.prefix(), Path::new("/home/alex/.local"));
        assert_eq!(settings.source.root(), Path::new("/cwd"));
        assert_eq!(settings.plugin_query, PluginDirQuery::default());
        assert!(settings.plugin_dir.is_none());
    }
}
