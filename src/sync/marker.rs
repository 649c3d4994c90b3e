use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{HookError, IoContext, Result};
use crate::hash::Signature;

pub const DEFAULT_MARKER_NAME: &str = ".installed";

/// The persisted record of the last signature applied to a target directory.
#[derive(Debug, Clone)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(target_dir: &Path, name: &str) -> Self {
        Marker {
            path: target_dir.join(name),
        }
    }

    /// Returns `None` when no marker has been written yet or its content is
    /// not a readable signature, so the next sync rewrites it.
    pub fn read(&self) -> Result<Option<Signature>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8(bytes).ok().map(Signature::new)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HookError::io("read marker", &self.path, e)),
        }
    }

    pub fn write(&self, signature: &Signature) -> Result<()> {
        fs::write(&self.path, signature.as_str()).io_context("write marker", &self.path)
    }

    /// Returns whether a marker was present.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(HookError::io("remove marker", &self.path, e)),
        }
    }
}
