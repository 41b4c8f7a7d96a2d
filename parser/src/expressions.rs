use lexer::CharSource;
use model::{
    Condition, Expr, MulOp, NodeKind, Operand, Product, RelOp, Relational, Sum, TokenKind, Unary,
};

use crate::error::ParseError;
use crate::parser::Parser;

/// Expression parsing for the right-recursive grammar:
///
/// ```text
/// expr := N ("-" expr)?
/// N    := A (("*" | "/") N)?
/// A    := M ("+" A)?
/// M    := "*" M | R
/// R    := "(" expr ")" | IDENT | INTEGER
/// ```
pub(crate) trait ExpressionParser {
    fn parse_expr(&mut self) -> Result<Expr, ParseError>;
    /// `expr RO expr` inside the brackets of `iffy` and `loop`.
    fn parse_condition(&mut self) -> Result<Condition, ParseError>;
}

impl<S: CharSource> ExpressionParser for Parser<S> {
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.nested(NodeKind::Expr, Self::expr_body)
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let left = self.parse_expr()?;
        let op = self.parse_relational()?;
        let right = self.parse_expr()?;
        Ok(Condition { left, op, right })
    }
}

impl<S: CharSource> Parser<S> {
    fn expr_body(&mut self) -> Result<Expr, ParseError> {
        if !matches!(
            self.peek(),
            TokenKind::Star | TokenKind::OpenParenthesis | TokenKind::Identifier | TokenKind::Integer
        ) {
            return Err(self.error(NodeKind::Expr, "*, (, IDENTIFIER, or INTEGER"));
        }
        let left = self.parse_product()?;
        let rest = if self.check(TokenKind::Minus) {
            let minus = self.advance()?;
            Some((minus, Box::new(self.parse_expr()?)))
        } else {
            None
        };
        Ok(Expr { left, rest })
    }

    fn parse_product(&mut self) -> Result<Product, ParseError> {
        self.nested(NodeKind::N, Self::product_body)
    }

    fn product_body(&mut self) -> Result<Product, ParseError> {
        let left = self.parse_sum()?;
        let op = match self.peek() {
            TokenKind::Star => Some(MulOp::Mul),
            TokenKind::Slash => Some(MulOp::Div),
            _ => None,
        };
        let rest = match op {
            Some(op) => {
                let token = self.advance()?;
                Some((op, token, Box::new(self.parse_product()?)))
            }
            None => None,
        };
        Ok(Product { left, rest })
    }

    fn parse_sum(&mut self) -> Result<Sum, ParseError> {
        self.nested(NodeKind::A, Self::sum_body)
    }

    fn sum_body(&mut self) -> Result<Sum, ParseError> {
        let left = self.parse_unary()?;
        let rest = if self.check(TokenKind::Plus) {
            let plus = self.advance()?;
            Some((plus, Box::new(self.parse_sum()?)))
        } else {
            None
        };
        Ok(Sum { left, rest })
    }

    fn parse_unary(&mut self) -> Result<Unary, ParseError> {
        self.nested(NodeKind::M, Self::unary_body)
    }

    fn unary_body(&mut self) -> Result<Unary, ParseError> {
        if self.check(TokenKind::Star) {
            let star = self.advance()?;
            let operand = Box::new(self.parse_unary()?);
            return Ok(Unary::Negate { star, operand });
        }
        Ok(Unary::Operand(self.parse_operand()?))
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        match self.peek() {
            TokenKind::OpenParenthesis => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::CloseParenthesis, NodeKind::R, ")")?;
                Ok(Operand::Group(Box::new(inner)))
            }
            TokenKind::Identifier => Ok(Operand::Identifier(self.advance()?)),
            TokenKind::Integer => Ok(Operand::Integer(self.advance()?)),
            _ => Err(self.error(NodeKind::R, "IDENTIFIER, INTEGER, or (")),
        }
    }

    /// RO := "<" "<"? | "<" ">" | ">" ">"? | "=="
    ///
    /// The two-character forms arrive as one token when written together and
    /// as two tokens when separated by whitespace; both spellings are accepted.
    fn parse_relational(&mut self) -> Result<Relational, ParseError> {
        let (op, first, second) = match self.peek() {
            TokenKind::Less => {
                let first = self.advance()?;
                match self.peek() {
                    TokenKind::Less => (RelOp::LessEqual, first, Some(self.advance()?)),
                    TokenKind::Greater => (RelOp::NotEqual, first, Some(self.advance()?)),
                    _ => (RelOp::Less, first, None),
                }
            }
            TokenKind::Greater => {
                let first = self.advance()?;
                match self.peek() {
                    TokenKind::Greater => (RelOp::GreaterEqual, first, Some(self.advance()?)),
                    _ => (RelOp::Greater, first, None),
                }
            }
            TokenKind::LessLess => (RelOp::LessEqual, self.advance()?, None),
            TokenKind::LessGreater => (RelOp::NotEqual, self.advance()?, None),
            TokenKind::GreaterGreater => (RelOp::GreaterEqual, self.advance()?, None),
            TokenKind::EqualEqual => (RelOp::Equal, self.advance()?, None),
            _ => return Err(self.error(NodeKind::RelOp, "<, <<, >, >>, <>, or ==")),
        };
        Ok(Relational { op, first, second })
    }
}
