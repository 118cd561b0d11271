//! `setenv` / `unsetenv` — environment table mutation.

use crate::error::ShellResult;
use crate::state::ShellState;

/// No extra arguments: enumerate every entry as `name=value`, one per line.
/// One: set the name to the empty string. Two or more: set the first to the
/// second; anything further is ignored.
pub fn setenv(args: &[String], state: &mut ShellState) -> ShellResult<()> {
    match args.len() {
        1 => {
            for (name, value) in state.env_pairs() {
                println!("{name}={value}");
            }
        }
        2 => state.set_env(args[1].clone(), ""),
        _ => state.set_env(args[1].clone(), args[2].clone()),
    }
    Ok(())
}

/// Without an argument this is a silent no-op, as is removing an absent name.
pub fn unsetenv(args: &[String], state: &mut ShellState) -> ShellResult<()> {
    if let Some(name) = args.get(1) {
        state.unset_env(name);
    }
    Ok(())
}
