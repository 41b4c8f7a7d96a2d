mod display;

use std::fmt;

pub use display::print_preorder;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    // Operators and delimiters
    Colon,          // :
    ColonEqual,     // :=
    EqualEqual,     // ==
    Less,           // <
    Greater,        // >
    LessLess,       // <<
    LessGreater,    // <>
    GreaterGreater, // >>
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Dot,
    OpenParenthesis,
    CloseParenthesis,
    Comma,
    OpenBrace,
    CloseBrace,
    Semicolon,
    OpenBracket,
    CloseBracket,
    // Keywords
    Label,
    Goto,
    Loop,
    Void,
    Declare,
    Return,
    In,
    Out,
    Program,
    Iffy,
    Then,
    Assign,
    Data,
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identifier => "Identifier",
            Self::Integer => "Integer",
            Self::Colon => "Colon",
            Self::ColonEqual => "ColonEqual",
            Self::EqualEqual => "EqualEqual",
            Self::Less => "Less",
            Self::Greater => "Greater",
            Self::LessLess => "LessLess",
            Self::LessGreater => "LessGreater",
            Self::GreaterGreater => "GreaterGreater",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Star => "Star",
            Self::Slash => "Slash",
            Self::Percent => "Percent",
            Self::Dot => "Dot",
            Self::OpenParenthesis => "OpenParenthesis",
            Self::CloseParenthesis => "CloseParenthesis",
            Self::Comma => "Comma",
            Self::OpenBrace => "OpenBrace",
            Self::CloseBrace => "CloseBrace",
            Self::Semicolon => "Semicolon",
            Self::OpenBracket => "OpenBracket",
            Self::CloseBracket => "CloseBracket",
            Self::Label => "Label",
            Self::Goto => "Goto",
            Self::Loop => "Loop",
            Self::Void => "Void",
            Self::Declare => "Declare",
            Self::Return => "Return",
            Self::In => "In",
            Self::Out => "Out",
            Self::Program => "Program",
            Self::Iffy => "Iffy",
            Self::Then => "Then",
            Self::Assign => "Assign",
            Self::Data => "Data",
            Self::Eof => "Eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme and the source line it ended on.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "EOF", line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' line {}", self.kind, self.lexeme, self.line)
    }
}

/// Grammar production tags, used for diagnostics and tree printing.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NodeKind {
    Program,
    Vars,
    Block,
    Stats,
    MStat,
    Stat,
    In,
    Out,
    Iffy,
    Loop,
    Assign,
    Label,
    Goto,
    RelOp,
    Expr,
    N,
    A,
    M,
    R,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Vars => "vars",
            Self::Block => "block",
            Self::Stats => "stats",
            Self::MStat => "mStat",
            Self::Stat => "stat",
            Self::In => "in",
            Self::Out => "out",
            Self::Iffy => "iffy",
            Self::Loop => "loop",
            Self::Assign => "assign",
            Self::Label => "label",
            Self::Goto => "goto",
            Self::RelOp => "RO",
            Self::Expr => "expr",
            Self::N => "N",
            Self::A => "A",
            Self::M => "M",
            Self::R => "R",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub vars: Vec<Declaration>,
    pub block: Block,
}

/// `declare NAME := INTEGER ;`
#[derive(Debug, PartialEq, Clone)]
pub struct Declaration {
    pub name: Token,
    pub value: Token,
    pub initial: i64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub vars: Vec<Declaration>,
    /// Never empty once parsed.
    pub stats: Vec<Stat>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stat {
    In(Token),
    Out(Expr),
    Block(Block),
    Iffy {
        cond: Condition,
        then_branch: Box<Stat>,
    },
    Loop {
        cond: Condition,
        body: Box<Stat>,
    },
    Assign {
        target: Token,
        value: Expr,
    },
    Label(Token),
    Goto(Token),
}

impl Stat {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stat::In(_) => NodeKind::In,
            Stat::Out(_) => NodeKind::Out,
            Stat::Block(_) => NodeKind::Block,
            Stat::Iffy { .. } => NodeKind::Iffy,
            Stat::Loop { .. } => NodeKind::Loop,
            Stat::Assign { .. } => NodeKind::Assign,
            Stat::Label(_) => NodeKind::Label,
            Stat::Goto(_) => NodeKind::Goto,
        }
    }
}

/// `[ expr RO expr ]` guard of an `iffy` or `loop`.
#[derive(Debug, PartialEq, Clone)]
pub struct Condition {
    pub left: Expr,
    pub op: Relational,
    pub right: Expr,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum RelOp {
    LessEqual,    // <<
    NotEqual,     // <>
    Less,         // <
    GreaterEqual, // >>
    Greater,      // >
    Equal,        // ==
}

/// A relational operator and the one or two tokens that spelled it.
#[derive(Debug, PartialEq, Clone)]
pub struct Relational {
    pub op: RelOp,
    pub first: Token,
    pub second: Option<Token>,
}

/// `expr := N ('-' expr)?`
#[derive(Debug, PartialEq, Clone)]
pub struct Expr {
    pub left: Product,
    pub rest: Option<(Token, Box<Expr>)>,
}

/// `N := A (('*' | '/') N)?`
#[derive(Debug, PartialEq, Clone)]
pub struct Product {
    pub left: Sum,
    pub rest: Option<(MulOp, Token, Box<Product>)>,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

/// `A := M ('+' A)?`
#[derive(Debug, PartialEq, Clone)]
pub struct Sum {
    pub left: Unary,
    pub rest: Option<(Token, Box<Sum>)>,
}

/// `M := '*' M | R`. The leading `*` negates.
#[derive(Debug, PartialEq, Clone)]
pub enum Unary {
    Negate { star: Token, operand: Box<Unary> },
    Operand(Operand),
}

/// `R := '(' expr ')' | IDENT | INTEGER`
#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Group(Box<Expr>),
    Identifier(Token),
    Integer(Token),
}
