//! Install orchestration.
//!
//! [`InstallEngine`] strings the components together for one run:
//!
//! ```text
//! detect platform → resolve layout → place files
//!   → (macOS) locate plugin dir → copy plugin
//!   → configuration sequence
//! ```
//!
//! Ambient state (OS identity, home directory, preference store, console,
//! subprocesses) is passed in; the engine never reads it on its own.

use crate::caveats::caveats;
use crate::config::InstallSettings;
use crate::configurator::{plan_linux, plan_macos, ConfigureReport, Configurator};
use crate::error::{MonitorError, Result};
use crate::installer::{InstalledArtifacts, Installer};
use crate::invocation::ScriptRunner;
use crate::layout::{resolve_layout, FilePlacement};
use crate::locator::{locate_plugin_dir, PluginDirectory, PreferencesStore};
use crate::platform::Platform;
use crate::prompt::ResponseProvider;
use crate::verifier::{expected_artifacts, verify, VerifyReport};
use std::io::Write;
use std::path::PathBuf;

/// Host facts the engine depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// OS identifier as in `std::env::consts::OS`.
    pub os: String,
    pub home: PathBuf,
}

impl HostEnvironment {
    /// Captures the running host.
    pub fn current() -> Result<Self> {
        let home = dirs::home_dir().ok_or(MonitorError::HomeDirNotFound)?;
        Ok(Self {
            os: std::env::consts::OS.to_string(),
            home,
        })
    }
}

/// Console and subprocess capabilities used by the configuration sequence.
pub struct Interaction<'a> {
    pub output: &'a mut dyn Write,
    pub responses: &'a mut dyn ResponseProvider,
    pub runner: &'a mut dyn ScriptRunner,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub artifacts: InstalledArtifacts,
    /// `None` on Linux, where no plugin directory exists.
    pub plugin_dir: Option<PluginDirectory>,
    pub configured: ConfigureReport,
}

pub struct InstallEngine<'a> {
    platform: Platform,
    home: PathBuf,
    settings: InstallSettings,
    preferences: &'a dyn PreferencesStore,
}

impl<'a> InstallEngine<'a> {
    /// Detects the platform from `env`; unsupported hosts fail here, before
    /// anything touches the filesystem.
    pub fn new(
        env: &HostEnvironment,
        settings: InstallSettings,
        preferences: &'a dyn PreferencesStore,
    ) -> Result<Self> {
        let platform = Platform::detect(&env.os)?;
        tracing::debug!(
            platform = %platform,
            prefix = %settings.paths.prefix().display(),
            "Install engine ready"
        );
        Ok(Self {
            platform,
            home: env.home.clone(),
            settings,
            preferences,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn settings(&self) -> &InstallSettings {
        &self.settings
    }

    pub fn layout(&self) -> Vec<FilePlacement> {
        resolve_layout(self.platform, &self.settings.paths)
    }

    /// Places the static files for this platform.
    pub fn place_files(&self) -> Result<InstalledArtifacts> {
        let installer = Installer::new(self.settings.source.clone());
        installer.install(&self.layout())
    }

    /// Looks up the live SwiftBar plugin directory (macOS only). A configured
    /// directory is used as-is without querying preferences.
    pub fn locate_plugin_dir(&self) -> Option<PluginDirectory> {
        match self.platform {
            Platform::Linux => None,
            Platform::MacOs => Some(match &self.settings.plugin_dir {
                Some(dir) => PluginDirectory::Found(dir.clone()),
                None => locate_plugin_dir(self.preferences, &self.settings.plugin_query),
            }),
        }
    }

    /// Full run: place files, then [`InstallEngine::post_install`].
    pub fn install(&self, io: Interaction<'_>) -> Result<InstallReport> {
        tracing::info!(platform = %self.platform, "Installing Claude Usage Monitor");
        let mut artifacts = self.place_files()?;
        let mut report = self.post_install(io)?;
        artifacts.extend(report.artifacts.paths().iter().cloned());
        report.artifacts = artifacts;
        Ok(report)
    }

    /// Plugin copy and the configuration sequence, against files already in
    /// place.
    pub fn post_install(&self, io: Interaction<'_>) -> Result<InstallReport> {
        let paths = &self.settings.paths;
        let mut artifacts = InstalledArtifacts::default();

        let (steps, plugin_dir) = match self.platform {
            Platform::MacOs => {
                let plugin_dir = self.locate_plugin_dir().unwrap_or(PluginDirectory::Absent);
                if let Some(dir) = plugin_dir.path() {
                    let installer = Installer::new(self.settings.source.clone());
                    let copied = installer.install_plugin(&paths.staged_plugin(), dir)?;
                    artifacts.extend([copied]);
                }
                (plan_macos(paths, &plugin_dir), Some(plugin_dir))
            }
            Platform::Linux => {
                let snippet_path = paths.installed_snippet();
                let snippet = fs_err::read(&snippet_path).map_err(|e| {
                    MonitorError::io(format!("read {}", snippet_path.display()), e)
                })?;
                (plan_linux(paths, &snippet, &self.home), None)
            }
        };

        let configured = Configurator::new(io.output, io.responses, io.runner).run(&steps)?;

        Ok(InstallReport {
            artifacts,
            plugin_dir,
            configured,
        })
    }

    /// Checks the installed files for this platform.
    pub fn verify(&self) -> VerifyReport {
        verify(expected_artifacts(self.platform, &self.settings.paths))
    }

    pub fn caveats(&self) -> String {
        caveats(self.platform, &self.settings.paths)
    }
}
