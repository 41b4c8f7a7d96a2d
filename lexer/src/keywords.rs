use model::TokenKind;

const KEYWORDS: [(&str, TokenKind); 13] = [
    ("label", TokenKind::Label),
    ("goto", TokenKind::Goto),
    ("loop", TokenKind::Loop),
    ("void", TokenKind::Void),
    ("declare", TokenKind::Declare),
    ("return", TokenKind::Return),
    ("in", TokenKind::In),
    ("out", TokenKind::Out),
    ("program", TokenKind::Program),
    ("iffy", TokenKind::Iffy),
    ("then", TokenKind::Then),
    ("assign", TokenKind::Assign),
    ("data", TokenKind::Data),
];

const OPERATORS: [(&str, TokenKind); 22] = [
    (":", TokenKind::Colon),
    (":=", TokenKind::ColonEqual),
    ("==", TokenKind::EqualEqual),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("<<", TokenKind::LessLess),
    ("<>", TokenKind::LessGreater),
    (">>", TokenKind::GreaterGreater),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    (".", TokenKind::Dot),
    ("(", TokenKind::OpenParenthesis),
    (")", TokenKind::CloseParenthesis),
    (",", TokenKind::Comma),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    (";", TokenKind::Semicolon),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
];

/// Exact, case-sensitive keyword match; anything else stays an identifier.
pub(crate) fn keyword_or_identifier(lexeme: &str) -> TokenKind {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == lexeme)
        .map_or(TokenKind::Identifier, |(_, kind)| *kind)
}

pub(crate) fn operator_kind(lexeme: &str) -> Option<TokenKind> {
    OPERATORS
        .iter()
        .find(|(op, _)| *op == lexeme)
        .map(|(_, kind)| *kind)
}
