use lexer::{CharSource, LexWarning, StateMachineLexer};
use model::{Declaration, NodeKind, Program, Token, TokenKind};
use tracing::debug;

use crate::error::ParseError;
use crate::statements::StatementParser;

/// Deepest nesting of statements and expression productions the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Core parser: pulls tokens lazily and holds one token of lookahead.
pub struct Parser<S> {
    lexer: StateMachineLexer<S>,
    pub(crate) current: Token,
    depth: usize,
}

impl<S: CharSource> Parser<S> {
    pub fn new(mut lexer: StateMachineLexer<S>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Warnings the lexer raised while the parser pulled tokens.
    pub fn warnings(&self) -> &[LexWarning] {
        self.lexer.warnings()
    }

    /// Parse a whole program and require the token stream to end there.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let program = self.parse_program()?;
        if !self.check(TokenKind::Eof) {
            return Err(self.error(NodeKind::Program, "End of File"));
        }
        debug!(
            declarations = program.vars.len(),
            statements = program.block.stats.len(),
            "parsed program"
        );
        Ok(program)
    }

    /// program := vars? block
    pub(crate) fn parse_program(&mut self) -> Result<Program, ParseError> {
        let vars = self.parse_vars()?;
        let block = self.parse_block()?;
        Ok(Program { vars, block })
    }

    /// vars := ("declare" IDENT ":=" INTEGER ";" vars)?
    pub(crate) fn parse_vars(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut vars = Vec::new();
        while self.match_token(TokenKind::Declare)? {
            let name = self.expect(TokenKind::Identifier, NodeKind::Vars, "IDENTIFIER")?;
            self.expect(TokenKind::ColonEqual, NodeKind::Vars, ":=")?;
            let value = self.expect(TokenKind::Integer, NodeKind::Vars, "INTEGER")?;
            let initial = value
                .lexeme
                .parse::<i64>()
                .map_err(|_| ParseError::IntegerOutOfRange {
                    line: value.line,
                    literal: value.lexeme.clone(),
                })?;
            self.expect(TokenKind::Semicolon, NodeKind::Vars, ";")?;
            vars.push(Declaration {
                name,
                value,
                initial,
            });
        }
        Ok(vars)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek(&self) -> TokenKind {
        self.current.kind
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        production: NodeKind,
        expected: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(production, expected))
        }
    }

    /// Run `parse` one nesting level deeper, failing once `MAX_DEPTH` is reached.
    pub(crate) fn nested<T>(
        &mut self,
        production: NodeKind,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                production,
                line: self.current.line,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        let result = parse(&mut *self);
        self.depth -= 1;
        result
    }

    pub(crate) fn error(&self, production: NodeKind, expected: &str) -> ParseError {
        ParseError::unexpected(production, &self.current, expected)
    }
}
