use std::fmt;
use thiserror::Error;

/// Fatal scanner failure. `context` is the lexeme so far plus up to six
/// following characters on the same line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("SCANNER ERROR: Character '{ch}' not in alphabet.\n     Line: {line} Column: {column} Context: \"{context}\"")]
    Alphabet {
        ch: char,
        line: usize,
        column: usize,
        context: String,
    },
    #[error("SCANNER ERROR: '=' is not a valid token.\n     Line: {line} Column: {column} Context: \"{context}\"")]
    BareEqual {
        ch: char,
        line: usize,
        column: usize,
        context: String,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::Alphabet { line, .. } | LexError::BareEqual { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexError::Alphabet { column, .. } | LexError::BareEqual { column, .. } => *column,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            LexError::Alphabet { context, .. } | LexError::BareEqual { context, .. } => context,
        }
    }
}

/// Non-fatal scanner conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexWarning {
    UnterminatedComment { line: usize },
}

impl fmt::Display for LexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexWarning::UnterminatedComment { line } => write!(
                f,
                "WARNING: Comment does not end before end of file (line {}).",
                line
            ),
        }
    }
}
