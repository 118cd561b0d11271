//! Error types for the execution engine.
//!
//! Most failures the user can cause (unknown command, bad cd target, missing
//! redirection file) are reported as diagnostics on the current error stream
//! and swallowed where they occur; only genuine engine failures propagate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use ush_hal::HalError;

/// Result type for engine operations.
pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    /// No branch of executable resolution produced a usable path.
    #[error("command not found")]
    CommandNotFound,

    /// A redirection target could not be opened for the requested mode.
    #[error("cannot open {}: {}", .path.display(), .source)]
    Redirection {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Hal(#[from] HalError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
