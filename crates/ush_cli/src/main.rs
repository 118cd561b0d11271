//! ush — a small Unix command shell.
//!
//! Wires the pieces together: logging, the one `ShellState` for the process
//! lifetime, the startup script, and the interactive loop.

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ush_core::ShellState;

mod rc;
mod repl;

#[derive(Parser, Debug)]
#[command(name = "ush", about = "A small Unix command shell", version)]
struct Cli {
    /// Execute a single command line and exit.
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,

    /// Skip ~/.ushrc processing.
    #[arg(long)]
    norc: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut state = ShellState::new()?;

    if let Some(line) = cli.command {
        if let Some(pipeline) = ush_parser::parse_line(&line)? {
            ush_core::pipeline::run(&pipeline, &mut state)?;
        }
        return Ok(());
    }

    if !cli.norc {
        let rc_path = Path::new(state.home_dir()).join(rc::RC_FILE_NAME);
        rc::run_startup_script(&mut state, &rc_path)?;
    }

    let interactive = std::io::stdin().is_terminal();
    let stdin = std::io::stdin();
    repl::run_loop(&mut stdin.lock(), &mut state, interactive)
}

#[cfg(test)]
pub(crate) mod test_lock {
    use std::sync::{Mutex, MutexGuard};

    // The rc and repl tests rebind the process-wide standard descriptors;
    // they must not interleave.
    static FD_LOCK: Mutex<()> = Mutex::new(());

    pub fn lock() -> MutexGuard<'static, ()> {
        FD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
