//! OS abstraction layer for ush.
//!
//! Everything that touches a raw descriptor or a process-control system call
//! lives here: saving and restoring the standard slots, anonymous pipes,
//! fork/exec/wait, scheduling priority, and host identity lookups. The engine
//! crate above this one deals only in owned values and guards.
//!
//! The layer is Unix-only; the execution model (fork, dup2, execve) has no
//! portable equivalent.

pub mod error;

#[cfg(unix)]
pub mod fd;
#[cfg(unix)]
pub mod pipe;
#[cfg(unix)]
pub mod platform;
#[cfg(unix)]
pub mod priority;
#[cfg(unix)]
pub mod process;

pub use error::{HalError, HalResult};
