//! Standard-descriptor bookkeeping.
//!
//! The three standard slots are a process-wide resource; every redirected
//! execution must leave them exactly as it found them. The guards here dup
//! the live descriptors on construction and dup them back on drop, so
//! restoration happens on every exit path, early returns and errors included.

use crate::error::{HalError, HalResult};
use std::io::Write;
use std::os::fd::RawFd;

use nix::unistd::{close, dup, dup2};

pub const STDIN_FILENO: RawFd = libc::STDIN_FILENO;
pub const STDOUT_FILENO: RawFd = libc::STDOUT_FILENO;
pub const STDERR_FILENO: RawFd = libc::STDERR_FILENO;

/// Duplicate `fd` onto the standard-input slot.
pub fn bind_stdin(fd: RawFd) -> HalResult<()> {
    dup2(fd, STDIN_FILENO).map_err(|e| HalError::process_error("dup2", e.to_string()))?;
    Ok(())
}

/// Duplicate `fd` onto the standard-output slot.
pub fn bind_stdout(fd: RawFd) -> HalResult<()> {
    dup2(fd, STDOUT_FILENO).map_err(|e| HalError::process_error("dup2", e.to_string()))?;
    Ok(())
}

/// Duplicate `fd` onto the standard-error slot.
pub fn bind_stderr(fd: RawFd) -> HalResult<()> {
    dup2(fd, STDERR_FILENO).map_err(|e| HalError::process_error("dup2", e.to_string()))?;
    Ok(())
}

/// Saved copies of fds 0/1/2, restored on drop.
#[derive(Debug)]
pub struct StdioGuard {
    saved_in: RawFd,
    saved_out: RawFd,
    saved_err: RawFd,
}

impl StdioGuard {
    /// Duplicate the current standard descriptors so they can be put back.
    pub fn save() -> HalResult<Self> {
        let saved_in = dup(STDIN_FILENO).map_err(|e| HalError::process_error("dup", e.to_string()))?;
        let saved_out = match dup(STDOUT_FILENO) {
            Ok(fd) => fd,
            Err(e) => {
                let _ = close(saved_in);
                return Err(HalError::process_error("dup", e.to_string()));
            }
        };
        let saved_err = match dup(STDERR_FILENO) {
            Ok(fd) => fd,
            Err(e) => {
                let _ = close(saved_in);
                let _ = close(saved_out);
                return Err(HalError::process_error("dup", e.to_string()));
            }
        };
        Ok(Self {
            saved_in,
            saved_out,
            saved_err,
        })
    }
}

impl Drop for StdioGuard {
    fn drop(&mut self) {
        // Anything still sitting in the Rust-level buffers belongs to the
        // redirected target, so it must land before the slots flip back.
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        let _ = dup2(self.saved_in, STDIN_FILENO);
        let _ = dup2(self.saved_out, STDOUT_FILENO);
        let _ = dup2(self.saved_err, STDERR_FILENO);
        let _ = close(self.saved_in);
        let _ = close(self.saved_out);
        let _ = close(self.saved_err);
    }
}

/// Saved copy of fd 0 only, restored on drop. Used by the startup-script
/// adapter, which rebinds standard input and nothing else.
#[derive(Debug)]
pub struct StdinGuard {
    saved_in: RawFd,
}

impl StdinGuard {
    pub fn save() -> HalResult<Self> {
        let saved_in = dup(STDIN_FILENO).map_err(|e| HalError::process_error("dup", e.to_string()))?;
        Ok(Self { saved_in })
    }
}

impl Drop for StdinGuard {
    fn drop(&mut self) {
        let _ = dup2(self.saved_in, STDIN_FILENO);
        let _ = close(self.saved_in);
    }
}
