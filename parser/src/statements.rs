use lexer::CharSource;
use model::{Block, NodeKind, Stat, TokenKind};

use crate::error::ParseError;
use crate::expressions::ExpressionParser;
use crate::parser::Parser;

const STAT_EXPECTED: &str = "{, IDENTIFIER, in, out, iffy, loop, goto, or label";

/// Statement parsing functionality
pub(crate) trait StatementParser {
    fn parse_block(&mut self) -> Result<Block, ParseError>;
    fn parse_stat(&mut self) -> Result<Stat, ParseError>;
}

fn starts_stat(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::In
            | TokenKind::Out
            | TokenKind::OpenBrace
            | TokenKind::Iffy
            | TokenKind::Loop
            | TokenKind::Identifier
            | TokenKind::Label
            | TokenKind::Goto
    )
}

impl<S: CharSource> StatementParser for Parser<S> {
    /// block := "{" vars? stat+ "}"
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::OpenBrace, NodeKind::Block, "{")?;
        let vars = self.parse_vars()?;
        let mut stats = vec![self.parse_stat()?];
        loop {
            match self.peek() {
                TokenKind::CloseBrace => break,
                kind if starts_stat(kind) => stats.push(self.parse_stat()?),
                _ => return Err(self.error(NodeKind::Block, "}")),
            }
        }
        self.expect(TokenKind::CloseBrace, NodeKind::Block, "}")?;
        Ok(Block { vars, stats })
    }

    fn parse_stat(&mut self) -> Result<Stat, ParseError> {
        self.nested(NodeKind::Stat, Self::stat_body)
    }
}

impl<S: CharSource> Parser<S> {
    fn stat_body(&mut self) -> Result<Stat, ParseError> {
        let stat = match self.peek() {
            TokenKind::OpenBrace => return Ok(Stat::Block(self.parse_block()?)),
            TokenKind::In => {
                self.advance()?;
                Stat::In(self.expect(TokenKind::Identifier, NodeKind::In, "IDENTIFIER")?)
            }
            TokenKind::Out => {
                self.advance()?;
                Stat::Out(self.parse_expr()?)
            }
            TokenKind::Iffy => {
                self.advance()?;
                self.expect(TokenKind::OpenBracket, NodeKind::Iffy, "[")?;
                let cond = self.parse_condition()?;
                self.expect(TokenKind::CloseBracket, NodeKind::Iffy, "]")?;
                self.expect(TokenKind::Then, NodeKind::Iffy, "then")?;
                let then_branch = Box::new(self.parse_stat()?);
                Stat::Iffy { cond, then_branch }
            }
            TokenKind::Loop => {
                self.advance()?;
                self.expect(TokenKind::OpenBracket, NodeKind::Loop, "[")?;
                let cond = self.parse_condition()?;
                self.expect(TokenKind::CloseBracket, NodeKind::Loop, "]")?;
                let body = Box::new(self.parse_stat()?);
                Stat::Loop { cond, body }
            }
            TokenKind::Identifier => {
                let target = self.advance()?;
                self.expect(TokenKind::ColonEqual, NodeKind::Assign, ":=")?;
                let value = self.parse_expr()?;
                Stat::Assign { target, value }
            }
            TokenKind::Label => {
                self.advance()?;
                Stat::Label(self.expect(TokenKind::Identifier, NodeKind::Label, "IDENTIFIER")?)
            }
            TokenKind::Goto => {
                self.advance()?;
                Stat::Goto(self.expect(TokenKind::Identifier, NodeKind::Goto, "IDENTIFIER")?)
            }
            _ => return Err(self.error(NodeKind::Stat, STAT_EXPECTED)),
        };
        // Every statement other than a block is closed by ';'
        self.expect(TokenKind::Semicolon, stat.kind(), ";")?;
        Ok(stat)
    }
}
