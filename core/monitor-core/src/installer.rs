//! File placement.
//!
//! Copies each [`FilePlacement`] in order, creating destination directories
//! and resetting the mode on every run. An existing destination (file or
//! symlink) is removed before the copy, so a symlink is replaced rather than
//! written through. A failure stops the sequence; files already placed stay
//! on disk.

use crate::error::{MonitorError, Result};
use crate::layout::{FileMode, FilePlacement};
use crate::paths::{SourceTree, MONITOR_SCRIPT};
use fs_err as fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Destination paths written during a run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledArtifacts {
    paths: Vec<PathBuf>,
}

impl InstalledArtifacts {
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn record(&mut self, path: PathBuf) {
        self.paths.push(path);
    }
}

impl Extend<PathBuf> for InstalledArtifacts {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

pub struct Installer {
    source: SourceTree,
}

impl Installer {
    pub fn new(source: SourceTree) -> Self {
        Self { source }
    }

    /// Places every file in `placements`, in order.
    pub fn install(&self, placements: &[FilePlacement]) -> Result<InstalledArtifacts> {
        let mut artifacts = InstalledArtifacts::default();

        for placement in placements {
            let source = self.source.resolve(&placement.source);
            let dest = placement.destination();
            place_file(&source, &placement.dest_dir, &dest, placement.mode)?;
            artifacts.record(dest);
        }

        tracing::info!(count = artifacts.len(), "Placed distribution files");
        Ok(artifacts)
    }

    /// Copies the staged monitor script into the live SwiftBar plugin
    /// directory. The directory must already exist.
    pub fn install_plugin(&self, staged_plugin: &Path, plugin_dir: &Path) -> Result<PathBuf> {
        if !plugin_dir.is_dir() {
            return Err(MonitorError::io(
                format!("SwiftBar plugin directory {}", plugin_dir.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let dest = plugin_dir.join(MONITOR_SCRIPT);
        copy_with_mode(staged_plugin, &dest, FileMode::Executable)?;
        tracing::info!(path = %dest.display(), "Installed SwiftBar plugin");
        Ok(dest)
    }
}

fn place_file(source: &Path, dest_dir: &Path, dest: &Path, mode: FileMode) -> Result<()> {
    if !source.is_file() {
        return Err(MonitorError::SourceMissing(source.to_path_buf()));
    }

    fs::create_dir_all(dest_dir)
        .map_err(|e| MonitorError::io(format!("create {}", dest_dir.display()), e))?;

    copy_with_mode(source, dest, mode)
}

fn copy_with_mode(source: &Path, dest: &Path, mode: FileMode) -> Result<()> {
    if dest.exists() || dest.is_symlink() {
        fs::remove_file(dest)
            .map_err(|e| MonitorError::io(format!("remove existing {}", dest.display()), e))?;
    }

    fs::copy(source, dest).map_err(|e| {
        MonitorError::io(
            format!("copy {} to {}", source.display(), dest.display()),
            e,
        )
    })?;
    fs::set_permissions(dest, std::fs::Permissions::from_mode(mode.bits()))
        .map_err(|e| MonitorError::io(format!("chmod {}", dest.display()), e))?;

    tracing::debug!(
        source = %source.display(),
        dest = %dest.display(),
        mode = %format!("{:o}", mode.bits()),
        "Placed file"
    );
    Ok(())
}

/// True when `path` carries any execute bit.
pub fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
