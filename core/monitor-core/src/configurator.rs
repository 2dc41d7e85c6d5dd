//! Post-install configuration sequence.
//!
//! The sequence is planned as data ([`plan_macos`], [`plan_linux`]) and then
//! run once, in order, by a [`Configurator`] holding the output, the
//! response provider and the script runner.
//!
//! ```text
//! macOS: installed → plugin dir outcome → instructions
//!        → "configure ~/.claude.json?" → configure-claude-json.sh <plugin dir | "">
//!        → "set up SwiftBar autostart?" → setup-swiftbar-autostart-macos.sh
//! Linux: installed → Polybar snippet + instructions
//!        → "configure ~/.claude.json?" → configure-claude-json.sh <home>
//! ```

use crate::error::{MonitorError, Result};
use crate::invocation::{ScriptInvocation, ScriptRunner};
use crate::locator::PluginDirectory;
use crate::paths::{InstallPaths, AUTOSTART_SCRIPT, CONFIGURE_JSON_SCRIPT};
use crate::prompt::ResponseProvider;
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 70;

pub const CONFIGURE_JSON_QUESTION: &str = "Would you like to configure ~/.claude.json now?";
pub const AUTOSTART_QUESTION: &str = "Would you like to set up SwiftBar autostart now?";

/// One entry of the configuration sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationStep {
    /// Status headline, printed as `==> text`.
    Heading(String),
    /// Non-fatal problem, printed as `Warning: text`.
    Warning(String),
    /// A single output line; empty for a blank line.
    Line(String),
    /// Content echoed byte for byte, newline-terminated.
    Verbatim(Vec<u8>),
    /// Yes/no question guarding a helper invocation.
    Confirm {
        question: String,
        action: ScriptInvocation,
    },
}

fn heading(text: impl Into<String>) -> ConfigurationStep {
    ConfigurationStep::Heading(text.into())
}

fn line(text: impl Into<String>) -> ConfigurationStep {
    ConfigurationStep::Line(text.into())
}

fn blank() -> ConfigurationStep {
    ConfigurationStep::Line(String::new())
}

fn rule() -> ConfigurationStep {
    ConfigurationStep::Line("=".repeat(RULE_WIDTH))
}

fn confirm(question: &str, action: ScriptInvocation) -> ConfigurationStep {
    ConfigurationStep::Confirm {
        question: question.to_string(),
        action,
    }
}

/// Plans the macOS sequence.
///
/// `plugin` is the lookup outcome after the plugin copy: `Found` means the
/// copy already succeeded.
pub fn plan_macos(paths: &InstallPaths, plugin: &PluginDirectory) -> Vec<ConfigurationStep> {
    let bin = paths.bin_dir();
    let mut steps = vec![heading("Claude Usage Monitor installed!"), blank()];

    match plugin {
        PluginDirectory::Found(dir) => {
            steps.push(heading(format!(
                "✓ Installed SwiftBar plugin to {}",
                dir.display()
            )));
        }
        PluginDirectory::Absent => {
            steps.push(ConfigurationStep::Warning(
                "SwiftBar plugin directory not found.".to_string(),
            ));
            steps.push(line("Please set up SwiftBar first, then manually copy:"));
            steps.push(line(format!("  {}", paths.staged_plugin().display())));
            steps.push(line("  to your SwiftBar plugin directory"));
        }
    }

    steps.extend([
        blank(),
        rule(),
        line("CONFIGURATION REQUIRED"),
        rule(),
        blank(),
        line("1. Configure ~/.claude.json to suppress trust dialog:"),
        line(format!("   Run: {}", bin.join(CONFIGURE_JSON_SCRIPT).display())),
        blank(),
        line("2. (Optional) Set up SwiftBar to start automatically at login:"),
        line(format!("   Run: {}", bin.join(AUTOSTART_SCRIPT).display())),
        blank(),
        rule(),
        blank(),
        confirm(
            CONFIGURE_JSON_QUESTION,
            ScriptInvocation::new(paths.configure_json_script()).arg(plugin.as_argument()),
        ),
        blank(),
        confirm(
            AUTOSTART_QUESTION,
            ScriptInvocation::new(paths.autostart_script()),
        ),
    ]);

    steps
}

/// Plans the Linux sequence. `snippet` is the raw content of the installed
/// Polybar snippet.
pub fn plan_linux(paths: &InstallPaths, snippet: &[u8], home: &Path) -> Vec<ConfigurationStep> {
    vec![
        heading("Claude Usage Monitor installed!"),
        blank(),
        rule(),
        line("POLYBAR CONFIGURATION"),
        rule(),
        blank(),
        line("1. Add the following to your ~/.config/polybar/config.ini:"),
        blank(),
        ConfigurationStep::Verbatim(snippet.to_vec()),
        blank(),
        line("2. Configure ~/.claude.json to suppress trust dialog:"),
        line(format!(
            "   Run: {}",
            paths.bin_dir().join(CONFIGURE_JSON_SCRIPT).display()
        )),
        blank(),
        rule(),
        blank(),
        confirm(
            CONFIGURE_JSON_QUESTION,
            ScriptInvocation::new(paths.configure_json_script()).arg(home),
        ),
    ]
}

/// What happened at each prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureReport {
    /// Helpers that were confirmed and ran successfully, in order.
    pub ran: Vec<ScriptInvocation>,
    /// Questions answered no.
    pub declined: Vec<String>,
}

/// Runs a planned sequence once, top to bottom.
pub struct Configurator<'a> {
    output: &'a mut dyn Write,
    responses: &'a mut dyn ResponseProvider,
    runner: &'a mut dyn ScriptRunner,
}

impl<'a> Configurator<'a> {
    pub fn new(
        output: &'a mut dyn Write,
        responses: &'a mut dyn ResponseProvider,
        runner: &'a mut dyn ScriptRunner,
    ) -> Self {
        Self {
            output,
            responses,
            runner,
        }
    }

    /// Presents every step. A helper that fails to start or exits non-zero
    /// ends the sequence with an error; steps already taken stay applied.
    pub fn run(&mut self, steps: &[ConfigurationStep]) -> Result<ConfigureReport> {
        let mut report = ConfigureReport::default();

        for step in steps {
            match step {
                ConfigurationStep::Heading(text) => self.write_line(&format!("==> {}", text))?,
                ConfigurationStep::Warning(text) => {
                    self.write_line(&format!("Warning: {}", text))?
                }
                ConfigurationStep::Line(text) => self.write_line(text)?,
                ConfigurationStep::Verbatim(content) => {
                    self.write_raw(content)?;
                    if !content.ends_with(b"\n") {
                        self.write_raw(b"\n")?;
                    }
                }
                ConfigurationStep::Confirm { question, action } => {
                    self.output
                        .flush()
                        .map_err(|source| MonitorError::Prompt { source })?;

                    if !self.responses.confirm(question)? {
                        tracing::debug!(question = %question, "Step declined");
                        report.declined.push(question.clone());
                        continue;
                    }

                    let code = self.runner.run(action)?;
                    action.check(code)?;
                    report.ran.push(action.clone());
                }
            }
        }

        self.output
            .flush()
            .map_err(|source| MonitorError::Prompt { source })?;
        Ok(report)
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).map_err(|source| MonitorError::Prompt { source })
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.output
            .write_all(bytes)
            .map_err(|source| MonitorError::Prompt { source })
    }
}
