//! Per-platform file layout.
//!
//! Pure data: which distribution file goes to which directory, with which
//! mode. The [`crate::installer::Installer`] does the copying.
//!
//! ```text
//! macOS:  claude-usage.sh                   → share/swiftbar-plugins
//!         configure-claude-json.sh          → bin
//!         setup-swiftbar-autostart-macos.sh → bin
//! Linux:  claude-usage.sh                   → bin
//!         config-snippet.ini                → share/polybar-modules
//!         configure-claude-json.sh          → bin
//! Both:   README.md, MANUAL_INSTALL.md      → share/doc/claude-usage-monitor
//! ```

use crate::paths::{InstallPaths, SourceTree};
use crate::platform::Platform;
use serde::Serialize;
use std::path::PathBuf;

/// Permission mode applied to a placed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    /// rwxr-xr-x
    Executable,
    /// rw-r--r--
    Regular,
}

impl FileMode {
    pub fn bits(self) -> u32 {
        match self {
            FileMode::Executable => 0o755,
            FileMode::Regular => 0o644,
        }
    }
}

/// One file to place: distribution-relative source, destination directory,
/// resulting mode. The destination file keeps the source's file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePlacement {
    pub source: PathBuf,
    pub dest_dir: PathBuf,
    pub mode: FileMode,
}

impl FilePlacement {
    fn new(source: PathBuf, dest_dir: PathBuf, mode: FileMode) -> Self {
        Self {
            source,
            dest_dir,
            mode,
        }
    }

    /// Full destination path of the placed file.
    pub fn destination(&self) -> PathBuf {
        match self.source.file_name() {
            Some(name) => self.dest_dir.join(name),
            None => self.dest_dir.clone(),
        }
    }
}

/// Returns the ordered placements for `platform`.
///
/// Total and deterministic: the platform branch is the only condition.
pub fn resolve_layout(platform: Platform, paths: &InstallPaths) -> Vec<FilePlacement> {
    let bin = paths.bin_dir();
    let mut placements = match platform {
        Platform::MacOs => vec![
            FilePlacement::new(
                SourceTree::monitor_script(),
                paths.swiftbar_plugins_dir(),
                FileMode::Executable,
            ),
            FilePlacement::new(
                SourceTree::configure_json_script(),
                bin.clone(),
                FileMode::Executable,
            ),
            FilePlacement::new(SourceTree::autostart_script(), bin, FileMode::Executable),
        ],
        Platform::Linux => vec![
            FilePlacement::new(
                SourceTree::monitor_script(),
                bin.clone(),
                FileMode::Executable,
            ),
            FilePlacement::new(
                SourceTree::panel_snippet(),
                paths.polybar_modules_dir(),
                FileMode::Regular,
            ),
            FilePlacement::new(
                SourceTree::configure_json_script(),
                bin,
                FileMode::Executable,
            ),
        ],
    };

    let doc = paths.doc_dir();
    placements.push(FilePlacement::new(
        SourceTree::readme(),
        doc.clone(),
        FileMode::Regular,
    ));
    placements.push(FilePlacement::new(
        SourceTree::manual_install(),
        doc,
        FileMode::Regular,
    ));

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{AUTOSTART_SCRIPT, MONITOR_SCRIPT, PANEL_SNIPPET};

    fn paths() -> InstallPaths {
        InstallPaths::with_prefix("/usr/local")
    }

    fn file_names(placements: &[FilePlacement]) -> Vec<String> {
        placements
            .iter()
            .map(|p| p.destination().file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_macos_layout_order() {
        let placements = resolve_layout(Platform::MacOs, &paths());
        assert_eq!(
            file_names(&placements),
            vec![
                "claude-usage.sh",
                "configure-claude-json.sh",
                "setup-swiftbar-autostart-macos.sh",
                "README.md",
                "MANUAL_INSTALL.md",
            ]
        );
        assert_eq!(
            placements[0].destination(),
            PathBuf::from("/usr/local/share/swiftbar-plugins/claude-usage.sh")
        );
    }

    #[test]
    fn test_linux_layout_order() {
        let placements = resolve_layout(Platform::Linux, &paths());
        assert_eq!(
            file_names(&placements),
            vec![
                "claude-usage.sh",
                "config-snippet.ini",
                "configure-claude-json.sh",
                "README.md",
                "MANUAL_INSTALL.md",
            ]
        );
        assert_eq!(
            placements[0].destination(),
            PathBuf::from("/usr/local/bin/claude-usage.sh")
        );
        assert_eq!(
            placements[1].destination(),
            PathBuf::from("/usr/local/share/polybar-modules/config-snippet.ini")
        );
    }

    #[test]
    fn test_linux_layout_has_no_autostart_helper() {
        let placements = resolve_layout(Platform::Linux, &paths());
        assert!(!file_names(&placements).contains(&AUTOSTART_SCRIPT.to_string()));
    }

    #[test]
    fn test_layout_is_deterministic() {
        for platform in [Platform::MacOs, Platform::Linux] {
            let first = resolve_layout(platform, &paths());
            let second = resolve_layout(platform, &paths());
            assert!(!first.is_empty());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_scripts_are_executable_and_docs_are_not() {
        for platform in [Platform::MacOs, Platform::Linux] {
            for placement in resolve_layout(platform, &paths()) {
                let name = placement.destination();
                let is_script = name.extension().map(|e| e == "sh").unwrap_or(false);
                let expected = if is_script {
                    FileMode::Executable
                } else {
                    FileMode::Regular
                };
                assert_eq!(placement.mode, expected, "{}", name.display());
            }
        }
        let linux = resolve_layout(Platform::Linux, &paths());
        let snippet = linux
            .iter()
            .find(|p| p.destination().ends_with(PANEL_SNIPPET))
            .unwrap();
        assert_eq!(snippet.mode.bits(), 0o644);
        let monitor = linux
            .iter()
            .find(|p| p.destination().ends_with(MONITOR_SCRIPT))
            .unwrap();
        assert_eq!(monitor.mode.bits(), 0o755);
    }
}
