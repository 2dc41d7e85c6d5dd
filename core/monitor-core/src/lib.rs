//! # usage-monitor-core
//!
//! Install and post-install configuration for the Claude usage monitor, a
//! status-bar plugin for SwiftBar (macOS) and Polybar (Linux).
//!
//! ## Design Principles
//!
//! - **Synchronous**: One linear sequence; the only blocking points are
//!   prompt reads and helper scripts.
//! - **Injected environment**: OS identity, home directory, preferences,
//!   console and subprocesses are all passed in, so every flow runs in tests.
//! - **Fail closed**: Unsupported platforms error before any write.
//! - **No rollback**: Files already placed stay placed when a later step fails.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use usage_monitor_core::*;
//!
//! let env = HostEnvironment::current()?;
//! let config = load_config(None, &env.home)?;
//! let settings = InstallSettings::resolve(config, Overrides::default(), &env.home, &cwd);
//! let engine = InstallEngine::new(&env, settings, &DefaultsCommand)?;
//! engine.install(Interaction { output: &mut stdout, responses: &mut prompt, runner: &mut ProcessRunner })?;
//! ```

pub mod caveats;
pub mod config;
pub mod configurator;
pub mod engine;
pub mod error;
pub mod installer;
pub mod invocation;
pub mod layout;
pub mod locator;
pub mod paths;
pub mod platform;
pub mod prompt;
pub mod verifier;

pub use config::{load_config, InstallSettings, InstallerConfig, Overrides};
pub use configurator::{ConfigurationStep, ConfigureReport, Configurator};
pub use engine::{HostEnvironment, InstallEngine, InstallReport, Interaction};
pub use error::{MonitorError, Result};
pub use installer::{InstalledArtifacts, Installer};
pub use invocation::{ProcessRunner, RecordingRunner, ScriptInvocation, ScriptRunner};
pub use layout::{resolve_layout, FileMode, FilePlacement};
pub use locator::{DefaultsCommand, FixedPreferences, PluginDirectory, PreferencesStore};
pub use paths::{InstallPaths, SourceTree};
pub use platform::Platform;
pub use prompt::{FixedAnswer, LinePrompt, ResponseProvider, ScriptedResponses};
pub use verifier::{ArtifactCheck, VerifyReport};
