//! Pipeline orchestration.
//!
//! A single-stage pipeline runs in the current process through the
//! redirection manager. A multi-stage pipeline wires an anonymous pipe
//! between each pair of consecutive stages and forks every stage before
//! waiting on any of them, so pipe buffering rather than lockstep governs
//! concurrency. Each forked child is waited on exactly once, in fork order.
//!
//! When a stage fails to resolve, the whole remaining pipeline is aborted:
//! the diagnostic is printed, every outstanding pipe descriptor is closed,
//! and the already-forked children are reaped. (The alternative — skip the
//! stage and let downstream read a silent EOF — produces output that looks
//! like success.)

use crate::builtins;
use crate::dispatch;
use crate::error::{ShellError, ShellResult};
use crate::path;
use crate::redirect;
use crate::state::ShellState;
use std::fs::File;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use ush_hal::process::{self, ExecImage, Pid, StdioBindings};
use ush_parser::{Command, InputRedirect, Pipeline};

/// Run one parsed pipeline to completion.
pub fn run(pipeline: &Pipeline, state: &mut ShellState) -> ShellResult<()> {
    if pipeline.is_empty() {
        return Ok(());
    }
    if pipeline.len() == 1 {
        return dispatch::run_command(pipeline.first(), state);
    }
    run_stages(pipeline, state)
}

/// Forked stage children, waited exactly once each when this drops —
/// including on the abort paths.
#[derive(Default)]
struct Reaper {
    pids: Vec<Pid>,
}

impl Reaper {
    fn adopt(&mut self, pid: Pid) {
        self.pids.push(pid);
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        for pid in self.pids.drain(..) {
            let _ = process::wait(pid);
        }
    }
}

fn run_stages(pipeline: &Pipeline, state: &mut ShellState) -> ShellResult<()> {
    let stages = &pipeline.commands;
    let mut reaper = Reaper::default();

    // The feed is what the next stage reads: the first stage's input file if
    // one was given, the shell's own stdin otherwise, and from then on the
    // read end of the previous pipe.
    let mut feed: Option<OwnedFd> = match &stages[0].input {
        InputRedirect::FromFile(path) => match File::open(path) {
            Ok(file) => Some(OwnedFd::from(file)),
            Err(e) => {
                eprintln!("ush: cannot open {}: {e}", path.display());
                return Ok(());
            }
        },
        InputRedirect::Inherit => None,
    };

    for stage in &stages[..stages.len() - 1] {
        let (read_end, write_end) = ush_hal::pipe::create()?;
        let io = StdioBindings {
            stdin: feed.as_ref().map(|fd| fd.as_raw_fd()),
            stdout: Some(write_end.as_raw_fd()),
            stderr: stage
                .output
                .merges_stderr()
                .then(|| write_end.as_raw_fd()),
        };
        // The child must not hold the read end of its own output pipe, or
        // downstream would never see EOF on it.
        match spawn_stage(stage, io, &[read_end.as_raw_fd()], state) {
            Ok(Some(pid)) => reaper.adopt(pid),
            Ok(None) => {}
            Err(ShellError::CommandNotFound) => {
                eprintln!("command not found");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
        // Moving the read end into `feed` drops the previous feed and the
        // orchestrator's copy of the write end.
        feed = Some(read_end);
    }

    let last = stages.last().expect("pipeline is non-empty");
    let outfile = match redirect::open_output_target(&last.output) {
        Ok(file) => file,
        Err(ShellError::Redirection { path, source }) => {
            eprintln!("ush: cannot open {}: {source}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let io = StdioBindings {
        stdin: feed.as_ref().map(|fd| fd.as_raw_fd()),
        stdout: outfile.as_ref().map(|f| f.as_raw_fd()),
        stderr: if last.output.merges_stderr() {
            outfile.as_ref().map(|f| f.as_raw_fd())
        } else {
            None
        },
    };
    match spawn_stage(last, io, &[], state) {
        Ok(Some(pid)) => reaper.adopt(pid),
        Ok(None) => {}
        Err(ShellError::CommandNotFound) => {
            eprintln!("command not found");
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    // All forks issued; drop the remaining descriptors so the stages see
    // proper EOF, then let the reaper wait for every child in fork order.
    drop(feed);
    drop(outfile);
    Ok(())
}

/// Fork one stage with the given bindings. `Ok(None)` means the stage was
/// handled without a child (bare `nice`); `CommandNotFound` means the stage
/// could not be resolved and nothing was forked.
fn spawn_stage(
    stage: &Command,
    io: StdioBindings,
    close_in_child: &[RawFd],
    state: &mut ShellState,
) -> ShellResult<Option<Pid>> {
    let name = stage.name();

    if name == "nice" {
        let plan = builtins::nice::plan(&stage.args);
        let Some(index) = plan.target else {
            // No wrapped command: adjust the shell itself; the stage owns no
            // process slot and its pipe leg closes immediately.
            if let Err(e) = ush_hal::priority::set_process_priority(plan.priority) {
                tracing::warn!(priority = plan.priority, error = %e, "could not adjust priority");
            }
            return Ok(None);
        };
        let wrapped = &stage.args[index..];
        let resolved = path::resolve(&wrapped[0], state.current_dir(), state.getenv("PATH"))?;
        let image = ExecImage::new(&resolved, wrapped, state.export_env())?;
        // Priority is applied in the child, immediately before exec.
        let pid = process::spawn(&image, &io, close_in_child, Some(plan.priority))?;
        tracing::debug!(%resolved, priority = plan.priority, "forked reniced stage");
        return Ok(Some(pid));
    }

    if dispatch::is_builtin(name) {
        // A built-in in a pipeline needs a process slot of its own to relay
        // through the pipe; its state mutations die with the child.
        let pid = process::fork_relay(&io, close_in_child, || {
            if let Err(e) = dispatch::execute_builtin(stage, state) {
                eprintln!("ush: {e}");
            }
        })?;
        tracing::debug!(name, "forked built-in relay stage");
        return Ok(Some(pid));
    }

    let resolved = path::resolve(name, state.current_dir(), state.getenv("PATH"))?;
    let image = ExecImage::new(&resolved, &stage.args, state.export_env())?;
    let pid = process::spawn(&image, &io, close_in_child, None)?;
    tracing::debug!(%resolved, "forked external stage");
    Ok(Some(pid))
}
