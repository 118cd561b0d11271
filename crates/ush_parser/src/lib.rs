//! Line parser for ush.
//!
//! Turns one raw input line into the [`Pipeline`]/[`Command`] data model the
//! engine consumes. Deliberately thin: words, quotes, pipe and redirection
//! operators. No variable expansion, no globbing, no control structures.

use std::path::PathBuf;

use logos::Logos;
use thiserror::Error;

pub mod ast;
pub mod lexer;

pub use ast::{Command, InputRedirect, OutputRedirect, Pipeline};
use lexer::Token;

#[cfg(test)]
mod tests;

/// Errors produced while parsing a line. All of them are user-facing and
/// non-fatal; the read-eval loop reports them and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized token near `{0}`")]
    InvalidToken(String),

    #[error("expected a path after `{0}`")]
    MissingTarget(&'static str),

    #[error("missing command")]
    EmptyStage,

    #[error("only the first command of a pipeline may read from a file")]
    MisplacedInputRedirect,

    #[error("only the last command of a pipeline may write to a file")]
    MisplacedOutputRedirect,

    #[error("more than one `{0}` redirection for the same command")]
    DuplicateRedirect(&'static str),
}

/// One stage under construction.
#[derive(Default)]
struct StageBuilder {
    args: Vec<String>,
    input: Option<PathBuf>,
    output: Option<OutputRedirect>,
}

impl StageBuilder {
    fn is_empty(&self) -> bool {
        self.args.is_empty() && self.input.is_none() && self.output.is_none()
    }

    fn finish(self, piped_to_next: Option<bool>) -> Result<Command, ParseError> {
        if self.args.is_empty() {
            return Err(ParseError::EmptyStage);
        }
        let output = match piped_to_next {
            Some(_) if self.output.is_some() => {
                // `cmd > file | next` would race two writers for one stream.
                return Err(ParseError::MisplacedOutputRedirect);
            }
            Some(true) => OutputRedirect::PipeToNextMergeStderr,
            Some(false) => OutputRedirect::PipeToNext,
            None => self.output.unwrap_or(OutputRedirect::Inherit),
        };
        Ok(Command {
            args: self.args,
            input: match self.input {
                Some(path) => InputRedirect::FromFile(path),
                None => InputRedirect::Inherit,
            },
            output,
        })
    }
}

/// Parse one line. A blank line yields `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Pipeline>, ParseError> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next() {
        match tok {
            Ok(t) => tokens.push(t),
            Err(()) => return Err(ParseError::InvalidToken(lexer.slice().to_string())),
        }
    }
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut commands: Vec<Command> = Vec::new();
    let mut stage = StageBuilder::default();
    let mut iter = tokens.into_iter();

    while let Some(tok) = iter.next() {
        match tok {
            Token::Word(_) | Token::SingleQuoted(_) | Token::DoubleQuoted(_) => {
                stage.args.push(tok.word().unwrap_or_default().to_string());
            }
            Token::In => {
                let path = redirect_target(&mut iter, "<")?;
                if stage.input.replace(path).is_some() {
                    return Err(ParseError::DuplicateRedirect("<"));
                }
            }
            Token::Truncate => set_output(&mut stage, OutputRedirect::Truncate(redirect_target(&mut iter, ">")?), ">")?,
            Token::Append => set_output(&mut stage, OutputRedirect::Append(redirect_target(&mut iter, ">>")?), ">>")?,
            Token::TruncateMergeStderr => set_output(
                &mut stage,
                OutputRedirect::TruncateMergeStderr(redirect_target(&mut iter, ">&")?),
                ">&",
            )?,
            Token::AppendMergeStderr => set_output(
                &mut stage,
                OutputRedirect::AppendMergeStderr(redirect_target(&mut iter, ">>&")?),
                ">>&",
            )?,
            Token::Pipe | Token::PipeMergeStderr => {
                let merge = tok == Token::PipeMergeStderr;
                commands.push(std::mem::take(&mut stage).finish(Some(merge))?);
            }
        }
    }
    if stage.is_empty() && !commands.is_empty() {
        // Trailing pipe with nothing after it.
        return Err(ParseError::EmptyStage);
    }
    commands.push(stage.finish(None)?);

    // Input redirection belongs to the first stage alone.
    for cmd in commands.iter().skip(1) {
        if cmd.input != InputRedirect::Inherit {
            return Err(ParseError::MisplacedInputRedirect);
        }
    }

    Ok(Some(Pipeline { commands }))
}

fn redirect_target<'src, I>(iter: &mut I, op: &'static str) -> Result<PathBuf, ParseError>
where
    I: Iterator<Item = Token<'src>>,
{
    match iter.next().and_then(|t| t.word().map(str::to_string)) {
        Some(word) => Ok(PathBuf::from(word)),
        None => Err(ParseError::MissingTarget(op)),
    }
}

fn set_output(
    stage: &mut StageBuilder,
    output: OutputRedirect,
    op: &'static str,
) -> Result<(), ParseError> {
    if stage.output.replace(output).is_some() {
        return Err(ParseError::DuplicateRedirect(op));
    }
    Ok(())
}
