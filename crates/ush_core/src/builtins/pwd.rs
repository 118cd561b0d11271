//! `pwd` — print the shell's tracked working directory.

use crate::error::ShellResult;
use crate::state::ShellState;

pub fn invoke(state: &ShellState) -> ShellResult<()> {
    println!("{}", state.current_dir());
    Ok(())
}
