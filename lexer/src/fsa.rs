// Finite state automaton driving the lexer
//
// Indexed by [character][state]. Every ASCII character has a defined entry
// in every state; anything at or above 128 is outside the alphabet.

use std::sync::OnceLock;

pub const ALPHABET_SIZE: usize = 128;
pub const STATE_COUNT: usize = 8;

/// Code offset marking a completed token in the numeric encoding.
pub const COMPLETE_BASE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start = 0,
    Identifier = 1,
    Integer = 2,
    Operator = 3,
    /// Seen `:`, may still become `:=`.
    Colon = 4,
    /// Seen `=`, only legal if followed by another `=`.
    Equal = 5,
    /// Seen `<`, may still become `<<` or `<>`.
    Less = 6,
    /// Seen `>`, may still become `>>`.
    Greater = 7,
}

impl State {
    pub const ALL: [State; STATE_COUNT] = [
        State::Start,
        State::Identifier,
        State::Integer,
        State::Operator,
        State::Colon,
        State::Equal,
        State::Less,
        State::Greater,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Identifier = 0,
    Integer = 1,
    Operator = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next(State),
    Complete(TokenClass),
    AlphabetError,
    EqualError,
}

impl Transition {
    /// Numeric form: states are 0..=7, completed tokens are 100 + class,
    /// errors are negative.
    pub fn code(&self) -> i32 {
        match self {
            Transition::Next(state) => *state as i32,
            Transition::Complete(class) => COMPLETE_BASE + *class as i32,
            Transition::AlphabetError => -1,
            Transition::EqualError => -2,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Transition::AlphabetError | Transition::EqualError)
    }
}

const SINGLE_OPERATORS: &[u8] = b"%(),+-.*/;[]{}";
const WHITESPACE: &[u8] = &[b'\t', b'\n', 0x0b, 0x0c, b'\r', b' '];

pub fn is_whitespace(ch: u8) -> bool {
    WHITESPACE.contains(&ch)
}

pub struct FiniteStateTable {
    table: [[Transition; STATE_COUNT]; ALPHABET_SIZE],
}

impl FiniteStateTable {
    pub fn new() -> Self {
        let mut fsa = Self {
            table: [[Transition::AlphabetError; STATE_COUNT]; ALPHABET_SIZE],
        };
        for row in fsa.table.iter_mut() {
            row[State::Equal.index()] = Transition::EqualError;
        }

        for ch in (b'A'..=b'Z').chain(b'a'..=b'z') {
            fsa.set_terminating_row(ch);
            fsa.set(ch, State::Start, Transition::Next(State::Identifier));
            fsa.set(ch, State::Identifier, Transition::Next(State::Identifier));
        }

        for ch in b'0'..=b'9' {
            fsa.set_terminating_row(ch);
            fsa.set(ch, State::Start, Transition::Next(State::Integer));
            fsa.set(ch, State::Identifier, Transition::Next(State::Identifier));
            fsa.set(ch, State::Integer, Transition::Next(State::Integer));
        }

        for &ch in SINGLE_OPERATORS {
            fsa.set_terminating_row(ch);
            fsa.set(ch, State::Start, Transition::Next(State::Operator));
        }

        fsa.set_terminating_row(b':');
        fsa.set(b':', State::Start, Transition::Next(State::Colon));

        // '=' never stands alone: it is only the tail of ":=" or "=="
        fsa.set_terminating_row(b'=');
        fsa.set(b'=', State::Start, Transition::Next(State::Equal));
        fsa.set(b'=', State::Colon, Transition::Next(State::Operator));
        fsa.set(b'=', State::Equal, Transition::Next(State::Operator));

        fsa.set_terminating_row(b'<');
        fsa.set(b'<', State::Start, Transition::Next(State::Less));
        fsa.set(b'<', State::Less, Transition::Next(State::Operator));

        fsa.set_terminating_row(b'>');
        fsa.set(b'>', State::Start, Transition::Next(State::Greater));
        fsa.set(b'>', State::Less, Transition::Next(State::Operator));
        fsa.set(b'>', State::Greater, Transition::Next(State::Operator));

        // Whitespace and '#' only show up as lookahead; they end any token.
        for &ch in WHITESPACE.iter().chain(b"#") {
            fsa.set_terminating_row(ch);
            fsa.set(ch, State::Start, Transition::Next(State::Start));
        }

        fsa
    }

    /// The table shared by every lexer in the process, built on first use.
    pub fn shared() -> &'static FiniteStateTable {
        static TABLE: OnceLock<FiniteStateTable> = OnceLock::new();
        TABLE.get_or_init(FiniteStateTable::new)
    }

    /// Look up a character in a state. `None` is end of input, which acts as
    /// whitespace so a pending token is forced to complete.
    pub fn lookup(&self, ch: Option<u8>, state: State) -> Transition {
        let ch = ch.unwrap_or(b' ');
        match self.table.get(usize::from(ch)) {
            Some(row) => row[state.index()],
            None if state == State::Equal => Transition::EqualError,
            None => Transition::AlphabetError,
        }
    }

    fn set(&mut self, ch: u8, state: State, transition: Transition) {
        self.table[usize::from(ch)][state.index()] = transition;
    }

    /// Any in-progress token is completed by this character, except that a
    /// pending '=' is an error.
    fn set_terminating_row(&mut self, ch: u8) {
        let row = &mut self.table[usize::from(ch)];
        row[State::Identifier.index()] = Transition::Complete(TokenClass::Identifier);
        row[State::Integer.index()] = Transition::Complete(TokenClass::Integer);
        row[State::Operator.index()] = Transition::Complete(TokenClass::Operator);
        row[State::Colon.index()] = Transition::Complete(TokenClass::Operator);
        row[State::Less.index()] = Transition::Complete(TokenClass::Operator);
        row[State::Greater.index()] = Transition::Complete(TokenClass::Operator);
        row[State::Equal.index()] = Transition::EqualError;
    }
}

impl Default for FiniteStateTable {
    fn default() -> Self {
        Self::new()
    }
}
