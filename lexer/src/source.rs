/// Character input for the lexer: consume one byte or look at the next one.
/// `None` marks end of input.
pub trait CharSource {
    fn next_char(&mut self) -> Option<u8>;
    fn peek_char(&self) -> Option<u8>;
}

/// In-memory source over the bytes of a string.
pub struct StrSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input)
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Option<u8> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn peek_char(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }
}
