//! External-command launching.
//!
//! Thin layer over the HAL's fork/exec/wait: builds the exec image from the
//! resolved path, argv and the shell's environment table, and blocks until
//! the child terminates. The exit status is returned but callers currently
//! discard it; the contract keeps it for later use.

use crate::error::ShellResult;
use crate::state::ShellState;
use ush_hal::process::{self, ExecImage, StdioBindings};

pub fn launch(
    path: &str,
    argv: &[String],
    state: &ShellState,
    io: StdioBindings,
) -> ShellResult<i32> {
    let image = ExecImage::new(path, argv, state.export_env())?;
    let pid = process::spawn(&image, &io, &[], None)?;
    let status = process::wait(pid)?;
    tracing::debug!(path, status, "external command finished");
    Ok(status)
}
