use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{HookError, IoContext, Result};
use crate::sync::marker::{Marker, DEFAULT_MARKER_NAME};

pub const DEFAULT_PRESERVED: &[&str] = &[".gitignore"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub removed: Vec<String>,
    /// Preserved entries and directories left in place.
    pub kept: Vec<String>,
}

impl UninstallReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

pub fn default_preserved() -> BTreeSet<String> {
    DEFAULT_PRESERVED.iter().map(|s| s.to_string()).collect()
}

/// Removes every managed file from `target_dir`, leaving `preserved` names
/// and the directory itself in place.
pub fn uninstall(target_dir: &Path, preserved: &BTreeSet<String>) -> Result<UninstallReport> {
    uninstall_with_marker(target_dir, preserved, DEFAULT_MARKER_NAME)
}

pub fn uninstall_with_marker(
    target_dir: &Path,
    preserved: &BTreeSet<String>,
    marker_name: &str,
) -> Result<UninstallReport> {
    let read_dir = match fs::read_dir(target_dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(UninstallReport::default()),
        Err(e) => return Err(HookError::io("read directory", target_dir, e)),
    };

    let mut report = UninstallReport::default();
    for entry in read_dir {
        let entry = entry.io_context("read directory", target_dir)?;
        let name = entry.file_name().to_string_lossy().into_owned();

        // Does not follow symlinks: a link to a directory is removed as a link.
        let file_type = entry.file_type().io_context("stat", &entry.path())?;
        if preserved.contains(&name) || file_type.is_dir() {
            report.kept.push(name);
            continue;
        }

        let path = entry.path();
        fs::remove_file(&path).io_context("remove", &path)?;
        report.removed.push(name);
    }

    if !preserved.contains(marker_name) && Marker::new(target_dir, marker_name).remove()? {
        report.removed.push(marker_name.to_string());
    }

    report.removed.sort();
    report.kept.sort();
    Ok(report)
}
