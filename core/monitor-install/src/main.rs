//! usage-monitor-install: installer for the Claude usage monitor.
//!
//! Places the monitor script, helper scripts and docs for the current
//! platform, copies the plugin into SwiftBar's plugin folder on macOS, and
//! walks through the `~/.claude.json` and autostart setup.
//!
//! ## Subcommands
//!
//! - `install`: place files, then run `post-install`
//! - `post-install`: plugin copy and interactive configuration only
//! - `layout`: show where files go on this platform
//! - `verify`: check an existing install
//! - `caveats`: show post-install notes

mod logging;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use usage_monitor_core::{
    load_config, DefaultsCommand, FilePlacement, FixedAnswer, HostEnvironment, InstallEngine,
    InstallSettings, Interaction, LinePrompt, MonitorError, Overrides, Platform,
    PreferencesStore, ProcessRunner, ResponseProvider, ScriptRunner,
};

#[derive(Parser)]
#[command(name = "usage-monitor-install")]
#[command(about = "Install the Claude usage monitor for SwiftBar (macOS) or Polybar (Linux)")]
#[command(version)]
struct Cli {
    /// Installer config file (default: ~/.config/claude-usage-monitor/install.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PrefixArgs {
    /// Install prefix; files go to <prefix>/bin and <prefix>/share
    #[arg(long, value_name = "DIR")]
    prefix: Option<PathBuf>,
}

#[derive(Args)]
struct AnswerArgs {
    /// Answer yes to every prompt
    #[arg(long, conflicts_with = "no")]
    yes: bool,

    /// Answer no to every prompt
    #[arg(long)]
    no: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Place files and run the post-install configuration
    Install {
        #[command(flatten)]
        prefix: PrefixArgs,

        /// Distribution tree to install from (default: current directory)
        #[arg(long, value_name = "DIR")]
        source_dir: Option<PathBuf>,

        /// SwiftBar plugin directory; skips the preferences lookup
        #[arg(long, value_name = "DIR")]
        plugin_dir: Option<PathBuf>,

        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Copy the SwiftBar plugin and run the interactive configuration
    PostInstall {
        #[command(flatten)]
        prefix: PrefixArgs,

        /// SwiftBar plugin directory; skips the preferences lookup
        #[arg(long, value_name = "DIR")]
        plugin_dir: Option<PathBuf>,

        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Show where each file is placed on this platform
    Layout {
        #[command(flatten)]
        prefix: PrefixArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check that installed files exist and are executable
    Verify {
        #[command(flatten)]
        prefix: PrefixArgs,
    },

    /// Show post-install notes
    Caveats {
        #[command(flatten)]
        prefix: PrefixArgs,
    },
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    platform: Platform,
    placements: &'a [FilePlacement],
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    let code = exit_status(run(cli));
    if code != 0 {
        std::process::exit(code);
    }
}

/// Reports a failed run and returns the process exit status for it.
fn exit_status(result: Result<(), MonitorError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "usage-monitor-install failed");
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), MonitorError> {
    let env = HostEnvironment::current()?;
    let cwd = std::env::current_dir().map_err(|source| MonitorError::Io {
        context: "resolve current directory".to_string(),
        source,
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut runner = ProcessRunner;
    execute(cli, &env, &cwd, &DefaultsCommand, &mut runner, &mut out)
}

/// Command-line values that replace config file settings for `command`.
fn overrides_for(command: &Commands) -> Overrides {
    match command {
        Commands::Install {
            prefix,
            source_dir,
            plugin_dir,
            ..
        } => Overrides {
            prefix: prefix.prefix.clone(),
            source_dir: source_dir.clone(),
            plugin_dir: plugin_dir.clone(),
        },
        Commands::PostInstall {
            prefix, plugin_dir, ..
        } => Overrides {
            prefix: prefix.prefix.clone(),
            plugin_dir: plugin_dir.clone(),
            ..Overrides::default()
        },
        Commands::Layout { prefix, .. }
        | Commands::Verify { prefix }
        | Commands::Caveats { prefix } => Overrides {
            prefix: prefix.prefix.clone(),
            ..Overrides::default()
        },
    }
}

fn execute(
    cli: Cli,
    env: &HostEnvironment,
    cwd: &Path,
    preferences: &dyn PreferencesStore,
    runner: &mut dyn ScriptRunner,
    out: &mut dyn Write,
) -> Result<(), MonitorError> {
    let config = load_config(cli.config, &env.home)?;
    let settings = InstallSettings::resolve(config, overrides_for(&cli.command), &env.home, cwd);
    let engine = InstallEngine::new(env, settings, preferences)?;

    match cli.command {
        Commands::Install { answers, .. } => {
            let mut responses = responses_for(&answers);
            let report = engine.install(Interaction {
                output: &mut *out,
                responses: responses.as_mut(),
                runner,
            })?;
            tracing::info!(
                files = report.artifacts.len(),
                helpers_run = report.configured.ran.len(),
                "Install finished"
            );
            writeln!(out).map_err(console_error)?;
            write!(out, "{}", engine.caveats()).map_err(console_error)?;
        }
        Commands::PostInstall { answers, .. } => {
            let mut responses = responses_for(&answers);
            engine.post_install(Interaction {
                output: &mut *out,
                responses: responses.as_mut(),
                runner,
            })?;
        }
        Commands::Layout { json, .. } => {
            let placements = engine.layout();
            if json {
                let output = LayoutOutput {
                    platform: engine.platform(),
                    placements: &placements,
                };
                let text = serde_json::to_string_pretty(&output).map_err(|e| MonitorError::Io {
                    context: "serialize layout".to_string(),
                    source: e.into(),
                })?;
                writeln!(out, "{}", text).map_err(console_error)?;
            } else {
                writeln!(out, "{} ({})", engine.platform(), engine.platform().host_app())
                    .map_err(console_error)?;
                for placement in &placements {
                    writeln!(
                        out,
                        "  {:o}  {} → {}",
                        placement.mode.bits(),
                        placement.source.display(),
                        placement.destination().display()
                    )
                    .map_err(console_error)?;
                }
            }
        }
        Commands::Verify { .. } => {
            let report = engine.verify().into_result()?;
            for check in &report.checked {
                writeln!(out, "ok  {}", check.path.display()).map_err(console_error)?;
            }
        }
        Commands::Caveats { .. } => {
            write!(out, "{}", engine.caveats()).map_err(console_error)?;
        }
    }

    out.flush().map_err(console_error)
}

/// Interactive stdin prompts unless `--yes` or `--no` was given.
fn responses_for(answers: &AnswerArgs) -> Box<dyn ResponseProvider> {
    if answers.yes || answers.no {
        Box::new(FixedAnswer::new(answers.yes, io::stdout()))
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stdout()))
    }
}

fn console_error(source: io::Error) -> MonitorError {
    MonitorError::Prompt { source }
}
