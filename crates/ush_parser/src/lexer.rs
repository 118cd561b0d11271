//! Token definitions for one input line.
//!
//! Longer operators are listed before their prefixes so `>>&` wins over `>>`
//! and `>`; logos resolves the rest by maximal munch.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'src> {
    #[token(">>&")]
    AppendMergeStderr,

    #[token(">>")]
    Append,

    #[token(">&")]
    TruncateMergeStderr,

    #[token(">")]
    Truncate,

    #[token("<")]
    In,

    #[token("|&")]
    PipeMergeStderr,

    #[token("|")]
    Pipe,

    /// Bare word: anything that is not whitespace, an operator character, or
    /// a quote.
    #[regex(r#"[^ \t\r\n|<>&'"]+"#)]
    Word(&'src str),

    /// Single-quoted word, quotes stripped, no escapes.
    #[regex(r"'[^']*'", |lex| trim_quotes(lex.slice()))]
    SingleQuoted(&'src str),

    /// Double-quoted word, quotes stripped, no escapes or expansion.
    #[regex(r#""[^"]*""#, |lex| trim_quotes(lex.slice()))]
    DoubleQuoted(&'src str),
}

fn trim_quotes(slice: &str) -> &str {
    &slice[1..slice.len() - 1]
}

impl<'src> Token<'src> {
    /// The word content, for the three word-like tokens.
    pub fn word(&self) -> Option<&'src str> {
        match self {
            Token::Word(w) | Token::SingleQuoted(w) | Token::DoubleQuoted(w) => Some(w),
            _ => None,
        }
    }
}
