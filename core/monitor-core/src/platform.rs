//! Host platform detection.
//!
//! Every later decision (file layout, plugin directory lookup, the
//! configuration transcript) branches on the single [`Platform`] value
//! resolved here. The OS identity is passed in rather than read inside
//! business logic so the whole flow can be driven from tests.

use crate::error::{MonitorError, Result};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Status-bar host platform the monitor can be installed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS with the SwiftBar menu bar host.
    MacOs,
    /// Linux with the Polybar panel host.
    Linux,
}

impl Platform {
    /// Resolves a platform from an OS identifier as reported by
    /// `std::env::consts::OS` (`"macos"`, `"linux"`).
    ///
    /// Anything else fails closed; the installer never guesses.
    pub fn detect(os: &str) -> Result<Platform> {
        match os.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => Err(MonitorError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Name of the status-bar host application for this platform.
    pub fn host_app(self) -> &'static str {
        match self {
            Platform::MacOs => "SwiftBar",
            Platform::Linux => "Polybar",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        };

        write!(f, "{name}")
    }
}
