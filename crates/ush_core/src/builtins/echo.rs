//! `echo` — print the arguments after the name, space-separated, newline
//! terminated. No options, no escapes, no trailing space.

use crate::error::ShellResult;

pub fn invoke(args: &[String]) -> ShellResult<()> {
    println!("{}", args[1..].join(" "));
    Ok(())
}
