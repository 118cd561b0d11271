//! `nice` — adjust scheduling priority, optionally wrapping a command.
//!
//! Argument selection is inherited behavior: the first argument is parsed as
//! an integer priority and clamped to [-20, 19]. A parsed value of exactly 0
//! is indistinguishable from a failed parse, so both fall back to the
//! default priority of 4 and treat the first argument as the wrapped
//! command; any other value is the priority and the second argument is the
//! wrapped command.

use crate::error::{ShellError, ShellResult};
use crate::launch;
use crate::path;
use crate::state::ShellState;
use ush_hal::process::StdioBindings;

pub const DEFAULT_PRIORITY: i32 = 4;

/// What a `nice` invocation asks for: the priority to apply and, when
/// present, the index in argv where the wrapped command begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NicePlan {
    pub priority: i32,
    pub target: Option<usize>,
}

pub fn plan(args: &[String]) -> NicePlan {
    if args.len() < 2 {
        return NicePlan {
            priority: DEFAULT_PRIORITY,
            target: None,
        };
    }
    // A non-numeric argument parses to 0, the same as an explicit zero.
    let parsed = args[1].parse::<i32>().unwrap_or(0);
    if parsed == 0 {
        NicePlan {
            priority: DEFAULT_PRIORITY,
            target: Some(1),
        }
    } else {
        NicePlan {
            priority: parsed.clamp(-20, 19),
            target: if args.len() > 2 { Some(2) } else { None },
        }
    }
}

/// Plain (non-pipeline) invocation: renice the shell, then launch the
/// wrapped command, if any, exactly like an ordinary external command. The
/// child inherits the adjusted priority.
pub fn invoke(args: &[String], state: &mut ShellState) -> ShellResult<()> {
    let plan = plan(args);
    if let Err(e) = ush_hal::priority::set_process_priority(plan.priority) {
        // Raising priority needs privileges; the wrapped command still runs.
        tracing::warn!(priority = plan.priority, error = %e, "could not adjust priority");
    }

    let Some(index) = plan.target else {
        return Ok(());
    };
    let wrapped = &args[index..];
    match path::resolve(wrapped[0].as_str(), state.current_dir(), state.getenv("PATH")) {
        Ok(resolved) => {
            launch::launch(&resolved, wrapped, state, StdioBindings::default())?;
            Ok(())
        }
        Err(ShellError::CommandNotFound) => {
            eprintln!("command not found");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
