//! ush execution engine.
//!
//! Takes an already-parsed [`Pipeline`](ush_parser::Pipeline) and runs it:
//! built-in dispatch, standard-stream redirection, multi-stage pipe wiring
//! across forked processes, executable resolution via the search path, and
//! process-priority adjustment. The read-eval loop and the line parser live
//! in sibling crates; this one only performs side effects against the bound
//! descriptors and the [`ShellState`].

pub mod builtins;
pub mod dispatch;
pub mod error;
pub mod launch;
pub mod path;
pub mod pipeline;
pub mod redirect;
pub mod state;

pub use error::{ShellError, ShellResult};
pub use state::ShellState;
