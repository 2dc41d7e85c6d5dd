//! Post-install verification.
//!
//! Checks that the files a working install depends on are present, and
//! executable where they have to be. Every failure is collected before
//! reporting.

use crate::error::{MonitorError, Result};
use crate::installer::is_executable;
use crate::paths::InstallPaths;
use crate::platform::Platform;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactCheck {
    pub path: PathBuf,
    pub require_executable: bool,
}

impl ArtifactCheck {
    fn executable(path: PathBuf) -> Self {
        Self {
            path,
            require_executable: true,
        }
    }

    fn exists(path: PathBuf) -> Self {
        Self {
            path,
            require_executable: false,
        }
    }

    /// Returns a failure description, or `None` if the check passes.
    fn failure(&self) -> Option<String> {
        if !self.path.exists() {
            return Some(format!("{} is missing", self.path.display()));
        }
        if self.require_executable && !is_executable(&self.path) {
            return Some(format!("{} is not executable", self.path.display()));
        }
        None
    }
}

/// Files checked for `platform`.
pub fn expected_artifacts(platform: Platform, paths: &InstallPaths) -> Vec<ArtifactCheck> {
    let mut checks = vec![ArtifactCheck::executable(paths.configure_json_script())];

    match platform {
        Platform::MacOs => {
            checks.push(ArtifactCheck::executable(paths.autostart_script()));
            checks.push(ArtifactCheck::exists(paths.staged_plugin()));
        }
        Platform::Linux => {
            checks.push(ArtifactCheck::executable(paths.monitor_binary()));
            checks.push(ArtifactCheck::exists(paths.installed_snippet()));
        }
    }

    checks
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub checked: Vec<ArtifactCheck>,
    pub failures: Vec<String>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_result(self) -> Result<VerifyReport> {
        if self.passed() {
            Ok(self)
        } else {
            Err(MonitorError::VerificationFailed {
                failures: self.failures,
            })
        }
    }
}

/// Runs every check in `checks`.
pub fn verify(checks: Vec<ArtifactCheck>) -> VerifyReport {
    let failures = checks.iter().filter_map(ArtifactCheck::failure).collect();
    VerifyReport {
        checked: checks,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_err as fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn touch(path: &std::path::Path, mode: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_linux_checks() {
        let checks = expected_artifacts(Platform::Linux, &InstallPaths::with_prefix("/p"));
        let paths: Vec<_> = checks.iter().map(|c| c.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/p/bin/configure-claude-json.sh"),
                PathBuf::from("/p/bin/claude-usage.sh"),
                PathBuf::from("/p/share/polybar-modules/config-snippet.ini"),
            ]
        );
        assert!(!checks[2].require_executable);
    }

    #[test]
    fn test_empty_prefix_reports_every_missing_file() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::with_prefix(temp.path());
        let report = verify(expected_artifacts(Platform::MacOs, &paths));

        assert!(!report.passed());
        assert_eq!(report.failures.len(), 3);
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_non_executable_helper_fails() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::with_prefix(temp.path());
        touch(&paths.configure_json_script(), 0o644);
        touch(&paths.monitor_binary(), 0o755);
        touch(&paths.installed_snippet(), 0o644);

        let report = verify(expected_artifacts(Platform::Linux, &paths));
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("configure-claude-json.sh is not executable"));
    }

    #[test]
    fn test_complete_macos_install_passes() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::with_prefix(temp.path());
        touch(&paths.configure_json_script(), 0o755);
        touch(&paths.autostart_script(), 0o755);
        touch(&paths.staged_plugin(), 0o755);

        let report = verify(expected_artifacts(Platform::MacOs, &paths))
            .into_result()
            .unwrap();
        assert_eq!(report.checked.len(), 3);
    }
}
