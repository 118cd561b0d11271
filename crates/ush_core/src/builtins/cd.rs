//! `cd` — change the tracked working directory.
//!
//! With no argument the target is the home directory. The target must exist
//! and be a directory; otherwise state is left untouched and a diagnostic
//! naming the attempted path goes to the error stream. On success the
//! tracked directory, the `PWD` environment entry and the OS working
//! directory all move together.

use crate::error::ShellResult;
use crate::path;
use crate::state::ShellState;

pub fn invoke(arg: Option<&str>, state: &mut ShellState) -> ShellResult<()> {
    let target = match arg {
        None | Some("") => state.home_dir().to_string(),
        Some(p) if p.starts_with('/') => p.to_string(),
        Some(p) => path::join(state.current_dir(), p),
    };

    let meta = match std::fs::metadata(&target) {
        Ok(meta) => meta,
        Err(_) => {
            eprintln!("No such file or directory [{target}]");
            return Ok(());
        }
    };
    if !meta.is_dir() {
        eprintln!("Not a directory [{target}]");
        return Ok(());
    }

    state.set_current_dir(target.clone());
    state.set_env("PWD", target.clone());
    if let Err(e) = std::env::set_current_dir(&target) {
        tracing::warn!(dir = %target, error = %e, "OS working directory out of sync");
    }
    Ok(())
}
