//! Install and source path management.
//!
//! Two values centralize every path decision:
//!
//! - [`InstallPaths`]: where files land, all derived from one prefix
//!   (`<prefix>/bin`, `<prefix>/share/...`, `<prefix>/share/doc/...`).
//! - [`SourceTree`]: where files come from, relative to the root of the
//!   distribution being installed.
//!
//! Tests build both from temp directories.

use std::path::{Path, PathBuf};

/// Monitor script rendered by the status-bar host.
pub const MONITOR_SCRIPT: &str = "claude-usage.sh";
/// Helper that edits `~/.claude.json` to suppress the trust dialog.
pub const CONFIGURE_JSON_SCRIPT: &str = "configure-claude-json.sh";
/// Helper that registers SwiftBar as a login item (macOS only).
pub const AUTOSTART_SCRIPT: &str = "setup-swiftbar-autostart-macos.sh";
/// Polybar module definition (Linux only).
pub const PANEL_SNIPPET: &str = "config-snippet.ini";
pub const README: &str = "README.md";
pub const MANUAL_INSTALL: &str = "MANUAL_INSTALL.md";

const PACKAGE_NAME: &str = "claude-usage-monitor";

/// Destination directories for an installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    prefix: PathBuf,
}

impl InstallPaths {
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Default prefix for a per-user install: `<home>/.local`.
    pub fn default_prefix(home: &Path) -> PathBuf {
        home.join(".local")
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Directories
    // ─────────────────────────────────────────────────────────────────────────────

    /// Executable-binaries directory.
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    pub fn share_dir(&self) -> PathBuf {
        self.prefix.join("share")
    }

    /// Staging directory for the SwiftBar plugin. The plugin is copied from
    /// here into the live SwiftBar plugin directory.
    pub fn swiftbar_plugins_dir(&self) -> PathBuf {
        self.share_dir().join("swiftbar-plugins")
    }

    /// Shared directory holding Polybar module snippets.
    pub fn polybar_modules_dir(&self) -> PathBuf {
        self.share_dir().join("polybar-modules")
    }

    pub fn doc_dir(&self) -> PathBuf {
        self.share_dir().join("doc").join(PACKAGE_NAME)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Installed Files
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn staged_plugin(&self) -> PathBuf {
        self.swiftbar_plugins_dir().join(MONITOR_SCRIPT)
    }

    pub fn installed_snippet(&self) -> PathBuf {
        self.polybar_modules_dir().join(PANEL_SNIPPET)
    }

    pub fn configure_json_script(&self) -> PathBuf {
        self.bin_dir().join(CONFIGURE_JSON_SCRIPT)
    }

    pub fn autostart_script(&self) -> PathBuf {
        self.bin_dir().join(AUTOSTART_SCRIPT)
    }

    pub fn monitor_binary(&self) -> PathBuf {
        self.bin_dir().join(MONITOR_SCRIPT)
    }
}

/// Layout of the distribution tree files are installed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a distribution-relative path against the tree root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn monitor_script() -> PathBuf {
        PathBuf::from(MONITOR_SCRIPT)
    }

    pub fn configure_json_script() -> PathBuf {
        Path::new("scripts").join(CONFIGURE_JSON_SCRIPT)
    }

    pub fn autostart_script() -> PathBuf {
        Path::new("scripts").join(AUTOSTART_SCRIPT)
    }

    pub fn panel_snippet() -> PathBuf {
        Path::new("plugins").join("polybar").join(PANEL_SNIPPET)
    }

    pub fn readme() -> PathBuf {
        PathBuf::from(README)
    }

    pub fn manual_install() -> PathBuf {
        PathBuf::from(MANUAL_INSTALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_derive_from_prefix() {
        let paths = InstallPaths::with_prefix("/opt/homebrew");
        assert_eq!(paths.bin_dir(), PathBuf::from("/opt/homebrew/bin"));
        assert_eq!(
            paths.swiftbar_plugins_dir(),
            PathBuf::from("/opt/homebrew/share/swiftbar-plugins")
        );
        assert_eq!(
            paths.polybar_modules_dir(),
            PathBuf::from("/opt/homebrew/share/polybar-modules")
        );
        assert_eq!(
            paths.doc_dir(),
            PathBuf::from("/opt/homebrew/share/doc/claude-usage-monitor")
        );
    }

    #[test]
    fn test_default_prefix_is_per_user() {
        assert_eq!(
            InstallPaths::default_prefix(Path::new("/home/alex")),
            PathBuf::from("/home/alex/.local")
        );
    }

    #[test]
    fn test_source_tree_resolves_relative_paths() {
        let tree = SourceTree::new("/src/claude-usage-monitor");
        assert_eq!(
            tree.resolve(&SourceTree::panel_snippet()),
            PathBuf::from("/src/claude-usage-monitor/plugins/polybar/config-snippet.ini")
        );
        assert_eq!(
            tree.resolve(&SourceTree::configure_json_script()),
            PathBuf::from("/src/claude-usage-monitor/scripts/configure-claude-json.sh")
        );
    }
}
