//! The read-eval loop.
//!
//! One loop serves both callers: the interactive session (prompt on, reading
//! the terminal) and the startup-script adapter (prompt off, reading the
//! rebound rc file). Nothing here ends the process; only the sentinel, EOF,
//! or the `logout` built-in do.

use std::io::{self, BufRead, Write};

use ush_core::ShellState;

/// Fixed terminator token: a pipeline whose first command is this name ends
/// the session.
pub const SENTINEL: &str = "end";

pub fn run_loop<R: BufRead>(
    input: &mut R,
    state: &mut ShellState,
    interactive: bool,
) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        if interactive {
            print!("{}% ", state.hostname());
            io::stdout().flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break; // end of input
        }
        match ush_parser::parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(pipeline)) => {
                if pipeline.first().name() == SENTINEL {
                    break;
                }
                if let Err(e) = ush_core::pipeline::run(&pipeline, state) {
                    eprintln!("ush: {e}");
                }
            }
            Err(e) => eprintln!("ush: {e}"),
        }
    }
    Ok(())
}
