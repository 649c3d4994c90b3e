pub mod marker;

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{HookError, IoContext, Result};
use crate::hash::{compute_signature, signature_of, source_entries, Signature};
use marker::{Marker, DEFAULT_MARKER_NAME};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub marker_name: String,
    /// Reinstall even when the marker matches the source.
    pub force: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            marker_name: DEFAULT_MARKER_NAME.to_string(),
            force: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The source directory does not exist; the target was not touched.
    Skipped,
    Unchanged { signature: Signature },
    Changed {
        signature: Signature,
        installed: Vec<String>,
    },
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed { .. })
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Outcome::Skipped => None,
            Outcome::Unchanged { signature } | Outcome::Changed { signature, .. } => {
                Some(signature)
            }
        }
    }
}

/// Result of a sync plus the one-line status of each step taken.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub outcome: Outcome,
    pub steps: Vec<String>,
}

/// Read-only comparison of a target against its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    MissingSource,
    NotInstalled { current: Signature },
    UpToDate { signature: Signature },
    Stale {
        installed: Signature,
        current: Signature,
    },
}

pub fn sync(source_dir: &Path, target_dir: &Path) -> Result<SyncReport> {
    sync_with(source_dir, target_dir, &SyncOptions::default())
}

pub fn sync_with(source_dir: &Path, target_dir: &Path, opts: &SyncOptions) -> Result<SyncReport> {
    let mut steps = Vec::new();

    if !source_dir.exists() {
        steps.push(format!(
            "{} not found, skipping hooks installation",
            source_dir.display()
        ));
        return Ok(SyncReport {
            outcome: Outcome::Skipped,
            steps,
        });
    }

    let entries = source_entries(source_dir)?;
    if let Some(entry) = entries.iter().find(|e| e.name == opts.marker_name) {
        return Err(HookError::ReservedName {
            path: entry.path.clone(),
        });
    }

    let current = signature_of(&entries)?;
    let marker = Marker::new(target_dir, &opts.marker_name);

    if !opts.force && marker.read()?.as_ref() == Some(&current) {
        steps.push("Hooks already installed and up to date".to_string());
        return Ok(SyncReport {
            outcome: Outcome::Unchanged { signature: current },
            steps,
        });
    }

    if target_dir.exists() {
        steps.push(format!("Removing existing {}", target_dir.display()));
        fs::remove_dir_all(target_dir).io_context("remove", target_dir)?;
    }

    steps.push(format!("Creating fresh {}", target_dir.display()));
    fs::create_dir_all(target_dir).io_context("create", target_dir)?;

    steps.push(format!(
        "Copying {} hook(s) with executable permissions",
        entries.len()
    ));

    let mut installed = Vec::with_capacity(entries.len());
    for entry in &entries {
        let target = target_dir.join(&entry.name);
        copy_hook(&entry.path, &target)?;
        make_executable(&target)?;
        installed.push(entry.name.clone());
    }

    marker.write(&current)?;
    steps.push("Hooks installed successfully".to_string());

    Ok(SyncReport {
        outcome: Outcome::Changed {
            signature: current,
            installed,
        },
        steps,
    })
}

pub fn status(source_dir: &Path, target_dir: &Path, marker_name: &str) -> Result<SyncStatus> {
    if !source_dir.exists() {
        return Ok(SyncStatus::MissingSource);
    }

    let current = compute_signature(source_dir)?;
    let status = match Marker::new(target_dir, marker_name).read()? {
        None => SyncStatus::NotInstalled { current },
        Some(installed) if installed == current => SyncStatus::UpToDate { signature: current },
        Some(installed) => SyncStatus::Stale { installed, current },
    };

    Ok(status)
}

fn copy_hook(source: &Path, target: &Path) -> Result<()> {
    let mut input = File::open(source).io_context("open", source)?;
    let mut output = File::create(target).io_context("create", target)?;
    io::copy(&mut input, &mut output).io_context("copy to", target)?;
    output.sync_all().io_context("flush", target)?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path).io_context("stat", path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).io_context("set permissions on", path)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    // No executable bit to set outside Unix
    Ok(())
}
