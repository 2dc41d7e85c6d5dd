//! Error types for usage-monitor-core operations.
//!
//! A missing plugin directory and a declined prompt are ordinary values,
//! not errors. Everything here aborts the remaining install sequence.

use std::path::PathBuf;

/// All errors that can occur while installing or configuring the monitor.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    // ─────────────────────────────────────────────────────────────────────
    // Platform / Environment Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Unsupported platform: {0} (only macOS and Linux are supported)")]
    UnsupportedPlatform(String),

    #[error("Home directory not found")]
    HomeDirNotFound,

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // Filesystem Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Source file not found: {0}")]
    SourceMissing(PathBuf),

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Helper Script Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Failed to run {command}: {source}")]
    ScriptSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {}", exit_label(.code))]
    ScriptFailed { command: String, code: Option<i32> },

    // ─────────────────────────────────────────────────────────────────────
    // Console Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Console I/O failed: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Verification Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Installation check failed:\n{}", .failures.join("\n"))]
    VerificationFailed { failures: Vec<String> },
}

impl MonitorError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        MonitorError::Io {
            context: context.into(),
            source,
        }
    }

    /// Exit code a CLI should terminate with for this error.
    ///
    /// A helper that exits non-zero hands its own status through; everything
    /// else is a plain failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            MonitorError::ScriptFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

/// Convenience type alias for Results using MonitorError.
pub type Result<T> = std::result::Result<T, MonitorError>;
