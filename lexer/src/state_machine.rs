use model::{Token, TokenKind};
use tracing::{debug, trace};

use crate::error::{LexError, LexWarning};
use crate::fsa::{is_whitespace, FiniteStateTable, State, TokenClass, Transition};
use crate::keywords::{keyword_or_identifier, operator_kind};
use crate::source::CharSource;

const COMMENT: u8 = b'#';
const CONTEXT_LEN: usize = 6;

/// Maximal-munch scanner with one character of lookahead.
pub struct StateMachineLexer<S> {
    source: S,
    table: &'static FiniteStateTable,
    lexeme: String,
    line: usize,
    column: usize,
    finished: bool,
    warnings: Vec<LexWarning>,
}

impl<S: CharSource> StateMachineLexer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: FiniteStateTable::shared(),
            lexeme: String::new(),
            line: 1,
            column: 0,
            finished: false,
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[LexWarning] {
        &self.warnings
    }

    /// Drain the source, ending with the end-of-input token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token. Once input is exhausted every call yields `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.finished {
            return Ok(Token::eof(self.line));
        }
        let Some(mut current) = self.filter_input() else {
            self.finished = true;
            return Ok(Token::eof(self.line));
        };

        self.lexeme.clear();
        let mut state = State::Start;
        loop {
            self.lexeme.push(char::from(current));
            state = match self.table.lookup(Some(current), state) {
                Transition::Next(next) => next,
                // The previous lookahead already decided this character does
                // not complete the token, and nothing completes from Start.
                Transition::Complete(_) => state,
                error => return Err(self.error(error, current, self.column)),
            };

            let lookahead = self.source.peek_char();
            match self.table.lookup(lookahead, state) {
                Transition::Complete(class) => return self.build_token(class),
                Transition::Next(_) => {}
                error => {
                    let ch = lookahead.unwrap_or(b' ');
                    return Err(self.error(error, ch, self.column + 1));
                }
            }

            current = match self.advance() {
                Some(ch) => ch,
                None => return self.build_token(TokenClass::Operator),
            };
        }
    }

    fn build_token(&mut self, class: TokenClass) -> Result<Token, LexError> {
        let kind = match class {
            TokenClass::Identifier => keyword_or_identifier(&self.lexeme),
            TokenClass::Integer => TokenKind::Integer,
            TokenClass::Operator => match operator_kind(&self.lexeme) {
                Some(kind) => kind,
                None => {
                    let ch = self.lexeme.chars().last().unwrap_or(' ');
                    return Err(LexError::Alphabet {
                        ch,
                        line: self.line,
                        column: self.column,
                        context: self.lexeme.clone(),
                    });
                }
            },
        };
        let token = Token::new(kind, std::mem::take(&mut self.lexeme), self.line);
        trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, "token");
        Ok(token)
    }

    /// Consume one character, keeping line and column current.
    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.next_char()?;
        self.column += 1;
        match ch {
            b'\n' | b'\r' => {
                self.line += 1;
                self.column = 0;
            }
            _ => {}
        }
        Some(ch)
    }

    /// Next character that is neither whitespace nor inside a `#...#` comment.
    fn filter_input(&mut self) -> Option<u8> {
        let mut comment_line = None;
        loop {
            let Some(ch) = self.advance() else {
                if let Some(line) = comment_line {
                    debug!(line, "comment does not end before end of file");
                    self.warnings.push(LexWarning::UnterminatedComment { line });
                }
                return None;
            };
            if ch == COMMENT {
                comment_line = match comment_line {
                    Some(_) => None,
                    None => Some(self.line),
                };
                continue;
            }
            if comment_line.is_some() || is_whitespace(ch) {
                continue;
            }
            return Some(ch);
        }
    }

    fn error(&mut self, transition: Transition, ch: u8, column: usize) -> LexError {
        // Finish the context from unconsumed input, stopping at end of line.
        let mut context = std::mem::take(&mut self.lexeme);
        for _ in 0..CONTEXT_LEN {
            match self.source.peek_char() {
                Some(b'\n') | Some(b'\r') | None => break,
                Some(_) => {
                    if let Some(next) = self.source.next_char() {
                        context.push(char::from(next));
                    }
                }
            }
        }
        let ch = char::from(ch);
        let line = self.line;
        match transition {
            Transition::EqualError => LexError::BareEqual {
                ch,
                line,
                column,
                context,
            },
            _ => LexError::Alphabet {
                ch,
                line,
                column,
                context,
            },
        }
    }
}
