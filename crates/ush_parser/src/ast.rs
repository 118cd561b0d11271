//! Pipeline and command data model.
//!
//! Values of these types are produced once per input line and consumed once
//! by the orchestrator. A command belongs to exactly one pipeline.

use std::path::{Path, PathBuf};

/// Where a command's standard input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRedirect {
    /// Inherit the shell's standard input (or the upstream pipe).
    Inherit,
    /// Read from a file; only valid on the first stage of a pipeline.
    FromFile(PathBuf),
}

/// Where a command's standard output (and optionally standard error) goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRedirect {
    /// Inherit the shell's standard output.
    Inherit,
    /// `> file`
    Truncate(PathBuf),
    /// `>> file`
    Append(PathBuf),
    /// `>& file` — stdout and stderr both into a truncated file.
    TruncateMergeStderr(PathBuf),
    /// `>>& file`
    AppendMergeStderr(PathBuf),
    /// `|` — feed the next stage.
    PipeToNext,
    /// `|&` — feed the next stage, stderr included.
    PipeToNextMergeStderr,
}

impl OutputRedirect {
    /// Does this spec route standard error alongside standard output?
    pub fn merges_stderr(&self) -> bool {
        matches!(
            self,
            OutputRedirect::TruncateMergeStderr(_)
                | OutputRedirect::AppendMergeStderr(_)
                | OutputRedirect::PipeToNextMergeStderr
        )
    }

    /// The file target, if this spec writes to a file.
    pub fn file_target(&self) -> Option<&Path> {
        match self {
            OutputRedirect::Truncate(p)
            | OutputRedirect::Append(p)
            | OutputRedirect::TruncateMergeStderr(p)
            | OutputRedirect::AppendMergeStderr(p) => Some(p),
            _ => None,
        }
    }

    /// True for the `>>`-family specs that open with append semantics.
    pub fn is_append(&self) -> bool {
        matches!(
            self,
            OutputRedirect::Append(_) | OutputRedirect::AppendMergeStderr(_)
        )
    }
}

/// One parsed command: argv (argument 0 is the name) plus redirections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub args: Vec<String>,
    pub input: InputRedirect,
    pub output: OutputRedirect,
}

impl Command {
    pub fn new(args: Vec<String>) -> Self {
        debug_assert!(!args.is_empty());
        Self {
            args,
            input: InputRedirect::Inherit,
            output: OutputRedirect::Inherit,
        }
    }

    /// The command name (argument 0).
    pub fn name(&self) -> &str {
        &self.args[0]
    }
}

/// An ordered, non-empty sequence of commands chained by anonymous pipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn first(&self) -> &Command {
        &self.commands[0]
    }
}
