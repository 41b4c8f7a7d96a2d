mod error;
mod fsa;
mod keywords;
mod source;
mod state_machine;

use model::Token;

pub use error::{LexError, LexWarning};
pub use fsa::{FiniteStateTable, State, TokenClass, Transition};
pub use source::{CharSource, StrSource};
pub use state_machine::StateMachineLexer;

/// Main lexer entry point: every token of `input`, ending with `Eof`.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = StateMachineLexer::new(StrSource::new(input));
    lexer.tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::TokenKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input)
            .expect("lexing should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lex_simple_identifier_and_integer() {
        let tokens = lex("foo 123").expect("lexing should succeed");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Identifier, "foo", 1),
                Token::new(TokenKind::Integer, "123", 1),
                Token::eof(1),
            ]
        );
    }

    #[test]
    fn lex_keywords_and_operators() {
        assert_eq!(
            kinds("iffy [ x == 1 ] then out x ;"),
            vec![
                TokenKind::Iffy,
                TokenKind::OpenBracket,
                TokenKind::Identifier,
                TokenKind::EqualEqual,
                TokenKind::Integer,
                TokenKind::CloseBracket,
                TokenKind::Then,
                TokenKind::Out,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    // ─── Keyword tests ──────────────────────────────────────────
    #[test]
    fn lex_all_keywords() {
        assert_eq!(
            kinds("label goto loop void declare return in out program iffy then assign data"),
            vec![
                TokenKind::Label,
                TokenKind::Goto,
                TokenKind::Loop,
                TokenKind::Void,
                TokenKind::Declare,
                TokenKind::Return,
                TokenKind::In,
                TokenKind::Out,
                TokenKind::Program,
                TokenKind::Iffy,
                TokenKind::Then,
                TokenKind::Assign,
                TokenKind::Data,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_prefix_stays_identifier() {
        let tokens = lex("loop1 loop").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "loop1", 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Loop, "loop", 1));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(kinds("Out"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    // ─── Operator tests ─────────────────────────────────────────
    #[test]
    fn lex_all_single_operators() {
        assert_eq!(
            kinds("% ( ) , + - . * / ; [ ] { } < > :"),
            vec![
                TokenKind::Percent,
                TokenKind::OpenParenthesis,
                TokenKind::CloseParenthesis,
                TokenKind::Comma,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Dot,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Semicolon,
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn relational_pairs_munch_maximally() {
        assert_eq!(kinds("<<"), vec![TokenKind::LessLess, TokenKind::Eof]);
        assert_eq!(kinds("<>"), vec![TokenKind::LessGreater, TokenKind::Eof]);
        assert_eq!(kinds(">>"), vec![TokenKind::GreaterGreater, TokenKind::Eof]);
        assert_eq!(
            kinds("< <"),
            vec![TokenKind::Less, TokenKind::Less, TokenKind::Eof]
        );
        assert_eq!(
            kinds("><"),
            vec![TokenKind::Greater, TokenKind::Less, TokenKind::Eof]
        );
    }

    #[test]
    fn single_character_operators_never_join() {
        assert_eq!(
            kinds("((++"),
            vec![
                TokenKind::OpenParenthesis,
                TokenKind::OpenParenthesis,
                TokenKind::Plus,
                TokenKind::Plus,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("<<<"), vec![TokenKind::LessLess, TokenKind::Less, TokenKind::Eof]);
    }

    #[test]
    fn colon_forms() {
        assert_eq!(kinds(":="), vec![TokenKind::ColonEqual, TokenKind::Eof]);
        assert_eq!(kinds("::"), vec![TokenKind::Colon, TokenKind::Colon, TokenKind::Eof]);
        assert_eq!(kinds("=="), vec![TokenKind::EqualEqual, TokenKind::Eof]);
        assert_eq!(
            kinds("x:=5"),
            vec![TokenKind::Identifier, TokenKind::ColonEqual, TokenKind::Integer, TokenKind::Eof]
        );
    }

    // ─── Edge case tests ────────────────────────────────────────
    #[test]
    fn lex_empty_input() {
        assert_eq!(lex("").unwrap(), vec![Token::eof(1)]);
    }

    #[test]
    fn lex_whitespace_only() {
        assert_eq!(kinds("   \t\n  \r\n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn lex_adjacent_tokens_no_space() {
        assert_eq!(
            kinds("(x+1)"),
            vec![
                TokenKind::OpenParenthesis,
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Integer,
                TokenKind::CloseParenthesis,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn digits_then_letters_split() {
        let tokens = lex("12ab").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Integer, "12", 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Identifier, "ab", 1));
    }

    #[test]
    fn identifiers_may_contain_digits() {
        let tokens = lex("x1y2").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "x1y2", 1));
    }

    #[test]
    fn underscore_is_not_in_alphabet() {
        assert!(matches!(lex("a_b"), Err(LexError::Alphabet { ch: '_', .. })));
    }

    #[test]
    fn lexing_is_deterministic() {
        let src = "declare a := 3; { loop [ a >> 0 ] a := a - 1; ; }";
        assert_eq!(lex(src).unwrap(), lex(src).unwrap());
    }
}
