//! Error types for HAL operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

/// Errors raised by the OS abstraction layer.
#[derive(Debug, Error)]
pub enum HalError {
    /// An I/O system call failed.
    #[error("I/O error in {operation}{}: {source}", path_suffix(.path))]
    Io {
        operation: &'static str,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// A process-control system call failed.
    #[error("process error in {operation}: {message}")]
    Process {
        operation: &'static str,
        message: String,
    },

    /// Operation is not available on this platform.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid argument handed to the HAL.
    #[error("invalid argument: {0}")]
    Invalid(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" on {}", p.display()),
        None => String::new(),
    }
}

impl HalError {
    pub fn io_error(operation: &'static str, path: Option<&std::path::Path>, source: io::Error) -> Self {
        HalError::Io {
            operation,
            path: path.map(|p| p.to_path_buf()),
            source,
        }
    }

    pub fn process_error(operation: &'static str, message: impl Into<String>) -> Self {
        HalError::Process {
            operation,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        HalError::Unsupported(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        HalError::Invalid(message.into())
    }
}

impl From<std::ffi::NulError> for HalError {
    fn from(err: std::ffi::NulError) -> Self {
        HalError::Invalid(format!("interior null byte in string: {err}"))
    }
}

#[cfg(unix)]
impl From<nix::errno::Errno> for HalError {
    fn from(err: nix::errno::Errno) -> Self {
        HalError::Io {
            operation: "syscall",
            path: None,
            source: io::Error::from_raw_os_error(err as i32),
        }
    }
}
