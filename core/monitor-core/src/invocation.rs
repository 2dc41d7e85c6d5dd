//! Helper script invocation.
//!
//! Helpers are described by a typed [`ScriptInvocation`] and run through a
//! [`ScriptRunner`]. Spawn failures and non-zero exits come back as
//! distinct errors.

use crate::error::{MonitorError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// How the exit status of a helper is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPredicate {
    /// Exit code 0 is success; any other code or a signal is a failure.
    #[default]
    ZeroExit,
}

impl SuccessPredicate {
    pub fn accepts(self, code: Option<i32>) -> bool {
        match self {
            SuccessPredicate::ZeroExit => code == Some(0),
        }
    }
}

/// One helper script call: program, ordered arguments, success rule.
///
/// Arguments are OS strings so paths reach the helper byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub success: SuccessPredicate,
}

impl ScriptInvocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            success: SuccessPredicate::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Short name for messages: the script's file name.
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Checks an exit code against the success rule.
    pub fn check(&self, code: Option<i32>) -> Result<()> {
        if self.success.accepts(code) {
            Ok(())
        } else {
            Err(MonitorError::ScriptFailed {
                command: self.display_name(),
                code,
            })
        }
    }
}

/// Runs helper scripts to completion.
pub trait ScriptRunner {
    /// Runs `invocation` and returns its exit code (`None` if terminated by a
    /// signal). Spawn failures are errors; the exit code is judged by the
    /// caller through [`ScriptInvocation::check`].
    fn run(&mut self, invocation: &ScriptInvocation) -> Result<Option<i32>>;
}

/// Runs helpers as child processes sharing the installer's terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ScriptRunner for ProcessRunner {
    fn run(&mut self, invocation: &ScriptInvocation) -> Result<Option<i32>> {
        tracing::info!(
            program = %invocation.program.display(),
            args = ?invocation.args,
            "Running helper script"
        );

        let status: ExitStatus = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| MonitorError::ScriptSpawn {
                command: invocation.program.display().to_string(),
                source,
            })?;

        tracing::debug!(code = ?status.code(), "Helper script finished");
        Ok(status.code())
    }
}

/// Records invocations instead of running them. Each call returns the next
/// queued exit code, or 0.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Vec<ScriptInvocation>,
    exit_codes: Vec<i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_codes(exit_codes: impl IntoIterator<Item = i32>) -> Self {
        let mut codes: Vec<i32> = exit_codes.into_iter().collect();
        codes.reverse();
        Self {
            calls: Vec::new(),
            exit_codes: codes,
        }
    }

    pub fn calls(&self) -> &[ScriptInvocation] {
        &self.calls
    }

    pub fn ran(&self, program: &Path) -> bool {
        self.calls.iter().any(|c| c.program == program)
    }
}

impl ScriptRunner for RecordingRunner {
    fn run(&mut self, invocation: &ScriptInvocation) -> Result<Option<i32>> {
        self.calls.push(invocation.clone());
        Ok(Some(self.exit_codes.pop().unwrap_or(0)))
    }
}
