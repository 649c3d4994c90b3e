//! Hooksync - keeps a git hooks directory mirrored to a versioned hooks folder.
//!
//! The engine is three pieces:
//! - `hash`: content-addressed signature of the hooks source directory
//! - `sync`: marker-guarded full replace of the install directory
//! - `uninstall`: teardown that keeps externally-owned entries
//!
//! `cfg`, `vcs`, `ui` and `logging` support the command-line front end.

pub mod cfg;
pub mod error;
pub mod hash;
pub mod logging;
pub mod sync;
pub mod ui;
pub mod uninstall;
pub mod vcs;

pub use error::{HookError, Result};
pub use hash::{compute_signature, Signature};
pub use sync::{status, sync, sync_with, Outcome, SyncOptions, SyncReport, SyncStatus};
pub use uninstall::{uninstall, UninstallReport};
