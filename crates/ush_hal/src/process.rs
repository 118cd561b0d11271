//! Process creation and reaping.
//!
//! Two fork flavors exist: [`spawn`] replaces the child image with an
//! executable, [`fork_relay`] keeps running shell code in the child (used for
//! built-ins that sit inside a pipeline and need a process slot of their
//! own). In both, the child rebinds its standard slots from the supplied
//! bindings before doing anything else and never returns to shell logic.

use crate::error::{HalError, HalResult};
use crate::fd::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use std::ffi::CString;
use std::io::Write;
use std::os::fd::RawFd;

use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, execve, fork, ForkResult};

pub use nix::unistd::Pid;

/// A fully resolved executable image: path, argv and environment, all as
/// C strings ready for `execve`.
#[derive(Debug)]
pub struct ExecImage {
    path: CString,
    argv: Vec<CString>,
    envp: Vec<CString>,
}

impl ExecImage {
    /// Build an image from the resolved path, argv (argument 0 included) and
    /// `name=value` environment entries.
    pub fn new<S, E>(path: &str, argv: &[S], env: E) -> HalResult<Self>
    where
        S: AsRef<str>,
        E: IntoIterator<Item = String>,
    {
        let path = CString::new(path)?;
        let argv = argv
            .iter()
            .map(|a| CString::new(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let envp = env
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { path, argv, envp })
    }
}

/// Descriptors to install on the standard slots of a child. `None` means the
/// slot is inherited untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioBindings {
    pub stdin: Option<RawFd>,
    pub stdout: Option<RawFd>,
    pub stderr: Option<RawFd>,
}

/// Child-side: dup each binding onto its slot, then close the originals.
/// A descriptor bound to several slots (stderr merge) is closed once.
fn apply_bindings(io: &StdioBindings) {
    let pairs = [
        (io.stdin, STDIN_FILENO),
        (io.stdout, STDOUT_FILENO),
        (io.stderr, STDERR_FILENO),
    ];
    for (fd, slot) in pairs {
        if let Some(fd) = fd {
            if fd != slot {
                let _ = dup2(fd, slot);
            }
        }
    }
    let mut closed: Vec<RawFd> = Vec::with_capacity(3);
    for (fd, slot) in pairs {
        if let Some(fd) = fd {
            if fd != slot && fd > STDERR_FILENO && !closed.contains(&fd) {
                let _ = close(fd);
                closed.push(fd);
            }
        }
    }
}

fn flush_parent_buffers() {
    // Buffered bytes would otherwise be written twice, once per process.
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
}

/// Fork a child, rebind its standard slots, optionally renice it, and replace
/// its image. Returns the child's pid; the caller is responsible for waiting
/// on it exactly once. `close_in_child` lists parent descriptors (such as the
/// read end of the child's own output pipe) that must not leak into the new
/// image.
pub fn spawn(
    image: &ExecImage,
    io: &StdioBindings,
    close_in_child: &[RawFd],
    priority: Option<i32>,
) -> HalResult<Pid> {
    flush_parent_buffers();
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            apply_bindings(io);
            for &fd in close_in_child {
                let _ = close(fd);
            }
            if let Some(prio) = priority {
                let _ = crate::priority::set_process_priority(prio);
            }
            let _ = execve(&image.path, &image.argv, &image.envp);
            // Exec failed; nothing in the shell may run in this process.
            unsafe { libc::_exit(127) }
        }
        Ok(ForkResult::Parent { child }) => Ok(child),
        Err(e) => Err(HalError::process_error("fork", e.to_string())),
    }
}

/// Fork a child that runs `body` against the rebound standard slots and then
/// exits. The body's exit status is always 0; diagnostics travel over the
/// bound descriptors, not the status.
pub fn fork_relay<F>(io: &StdioBindings, close_in_child: &[RawFd], body: F) -> HalResult<Pid>
where
    F: FnOnce(),
{
    flush_parent_buffers();
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            apply_bindings(io);
            for &fd in close_in_child {
                let _ = close(fd);
            }
            body();
            let _ = std::io::stdout().flush();
            let _ = std::io::stderr().flush();
            unsafe { libc::_exit(0) }
        }
        Ok(ForkResult::Parent { child }) => Ok(child),
        Err(e) => Err(HalError::process_error("fork", e.to_string())),
    }
}

/// Block until `pid` terminates. The returned code folds signal deaths into
/// the conventional 128+signal form; callers currently discard it, but the
/// contract keeps it available.
pub fn wait(pid: Pid) -> HalResult<i32> {
    match waitpid(pid, None) {
        Ok(WaitStatus::Exited(_, code)) => Ok(code),
        Ok(WaitStatus::Signaled(_, signal, _)) => Ok(128 + signal as i32),
        Ok(_) => Ok(0),
        Err(e) => Err(HalError::process_error("waitpid", e.to_string())),
    }
}
