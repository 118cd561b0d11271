//! `where` — list every location a name would be found.
//!
//! Unlike resolution, which stops at the first hit, `where` reports a
//! `[built-in]` line when the name is a built-in and then one line per
//! search-path directory containing the name, in search-variable order.

use crate::builtins;
use crate::error::ShellResult;
use crate::path;
use crate::state::ShellState;
use std::path::Path;

pub fn invoke(args: &[String], state: &ShellState) -> ShellResult<()> {
    let Some(name) = args.get(1).filter(|s| !s.is_empty()) else {
        return Ok(());
    };

    if builtins::is_builtin(name) {
        println!("[built-in] {name}");
    }

    let Some(path_variable) = state.getenv("PATH") else {
        return Ok(());
    };
    for dir in path_variable.split(':').filter(|d| !d.is_empty()) {
        let candidate = path::join(dir, name);
        if Path::new(&candidate).exists() {
            println!("{candidate}");
        }
    }
    Ok(())
}
