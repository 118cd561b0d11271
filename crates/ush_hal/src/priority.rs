//! Scheduling-priority adjustment.

use crate::error::{HalError, HalResult};

/// Set the niceness of the calling process. The value is expected to already
/// be clamped to the scheduler's [-20, 19] range.
#[cfg(unix)]
pub fn set_process_priority(priority: i32) -> HalResult<()> {
    // setpriority returns -1 both on failure and for a legitimate priority of
    // -1, so errno has to be cleared and re-read.
    nix::errno::Errno::clear();
    let rc = unsafe { libc::setpriority(libc::PRIO_PROCESS as _, 0, priority) };
    if rc == -1 {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() != Some(0) {
            return Err(HalError::process_error("setpriority", err.to_string()));
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn set_process_priority(_priority: i32) -> HalResult<()> {
    Err(HalError::unsupported(
        "priority adjustment requires a Unix host",
    ))
}
