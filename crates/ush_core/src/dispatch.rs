//! Command dispatch: one entry point for both the plain path and the
//! pipeline-interior path, parameterized only by which descriptors are
//! already bound when it runs.

use crate::builtins;
use crate::error::{ShellError, ShellResult};
use crate::launch;
use crate::path;
use crate::redirect;
use crate::state::ShellState;
use ush_hal::process::StdioBindings;
use ush_parser::Command;

pub use crate::builtins::is_builtin;

/// Run one non-pipelined command: bind its redirections, execute, restore.
/// The user-causable failures (unknown command, unopenable redirection
/// target) are reported here and do not propagate.
pub fn run_command(command: &Command, state: &mut ShellState) -> ShellResult<()> {
    match redirect::run_with_redirection(command, || execute(command, state)) {
        Err(ShellError::Redirection { path, source }) => {
            eprintln!("ush: cannot open {}: {source}", path.display());
            Ok(())
        }
        other => other,
    }
}

/// Execute a command against the currently bound descriptors: built-ins
/// in-process, everything else resolved and launched externally.
pub(crate) fn execute(command: &Command, state: &mut ShellState) -> ShellResult<()> {
    if builtins::is_builtin(command.name()) {
        return execute_builtin(command, state);
    }
    match path::resolve(command.name(), state.current_dir(), state.getenv("PATH")) {
        Ok(resolved) => {
            launch::launch(&resolved, &command.args, state, StdioBindings::default())?;
            Ok(())
        }
        Err(ShellError::CommandNotFound) => {
            eprintln!("command not found");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Built-in dispatch by exact name. Callers guarantee `is_builtin` holds.
pub(crate) fn execute_builtin(command: &Command, state: &mut ShellState) -> ShellResult<()> {
    let args = &command.args;
    match command.name() {
        "echo" => builtins::echo::invoke(args),
        "cd" => builtins::cd::invoke(args.get(1).map(String::as_str), state),
        "pwd" => builtins::pwd::invoke(state),
        "logout" => builtins::logout::invoke(),
        "setenv" => builtins::env::setenv(args, state),
        "unsetenv" => builtins::env::unsetenv(args, state),
        "where" => builtins::where_cmd::invoke(args, state),
        "nice" => builtins::nice::invoke(args, state),
        other => Err(ShellError::Hal(ush_hal::HalError::invalid(format!(
            "not a built-in: {other}"
        )))),
    }
}
