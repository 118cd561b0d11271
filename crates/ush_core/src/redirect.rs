//! Standard-stream redirection around a single command.
//!
//! The contract: whatever `body` does — return, fail, or print — the three
//! standard descriptors visible afterwards are exactly the ones visible
//! before, and every descriptor opened for the call is closed again. The
//! [`StdioGuard`] carries the restoration; the opened files are plain owned
//! values whose drop closes them.

use crate::error::{ShellError, ShellResult};
use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;

use ush_hal::fd::{self, StdioGuard};
use ush_parser::{Command, InputRedirect, OutputRedirect};

/// Open the file target of an output spec with its truncate-or-append
/// semantics, creating it with owner/group read-write permissions if absent.
/// `Ok(None)` when the spec has no file target.
pub(crate) fn open_output_target(output: &OutputRedirect) -> ShellResult<Option<File>> {
    let Some(path) = output.file_target() else {
        return Ok(None);
    };
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).mode(0o660);
    if output.is_append() {
        opts.append(true);
    } else {
        opts.truncate(true);
    }
    match opts.open(path) {
        Ok(file) => Ok(Some(file)),
        Err(source) => Err(ShellError::Redirection {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Bind the command's redirections onto fds 0/1/2, run `body`, and restore.
pub fn run_with_redirection<F>(command: &Command, body: F) -> ShellResult<()>
where
    F: FnOnce() -> ShellResult<()>,
{
    let _guard = StdioGuard::save()?;

    let _infile = match &command.input {
        InputRedirect::FromFile(path) => {
            let file = File::open(path).map_err(|source| ShellError::Redirection {
                path: path.clone(),
                source,
            })?;
            fd::bind_stdin(file.as_raw_fd())?;
            Some(file)
        }
        InputRedirect::Inherit => None,
    };

    let _outfile = match open_output_target(&command.output)? {
        Some(file) => {
            fd::bind_stdout(file.as_raw_fd())?;
            if command.output.merges_stderr() {
                fd::bind_stderr(file.as_raw_fd())?;
            }
            Some(file)
        }
        None => None,
    };

    body()
    // Drop order: the opened files close first, then the guard flushes and
    // puts the saved descriptors back on their slots.
}
