use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, HookError>;

/// Failures surfaced by the sync engine.
///
/// A missing source or target directory is never an error; those are
/// reported through [`crate::sync::Outcome`] and empty reports instead.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to {op} {}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Nested directories are not supported in the hooks source: {}", .path.display())]
    NestedEntry { path: PathBuf },

    #[error("Hook name is reserved for the install marker: {}", .path.display())]
    ReservedName { path: PathBuf },
}

impl HookError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        HookError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Attaches the failed operation and path to an `io::Result`.
pub(crate) trait IoContext<T> {
    fn io_context(self, op: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context(self, op: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| HookError::io(op, path, e))
    }
}
