use lexer::LexError;
use model::{NodeKind, Token};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("ERROR: Building '{production}' on line {line}.\n      Found '{found}', expected '{expected}'.")]
    Unexpected {
        production: NodeKind,
        line: usize,
        found: String,
        expected: String,
    },
    #[error("ERROR: Building 'vars' on line {line}.\n      Integer '{literal}' does not fit in 64 bits.")]
    IntegerOutOfRange { line: usize, literal: String },
    #[error("ERROR: Building '{production}' on line {line}.\n      Nesting is deeper than {limit} levels.")]
    TooDeep {
        production: NodeKind,
        line: usize,
        limit: usize,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub(crate) fn unexpected(production: NodeKind, found: &Token, expected: &str) -> Self {
        ParseError::Unexpected {
            production,
            line: found.line,
            found: found.lexeme.clone(),
            expected: expected.to_string(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Unexpected { line, .. }
            | ParseError::IntegerOutOfRange { line, .. }
            | ParseError::TooDeep { line, .. } => *line,
            ParseError::Lex(e) => e.line(),
        }
    }
}
