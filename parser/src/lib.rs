// Parser module: builds the parse tree from the lexer's token stream
//
// Module organization:
// - parser.rs: Core Parser struct, token cursor, program and vars productions
// - statements.rs: block and statement productions
// - expressions.rs: right-recursive expression grammar and relational operators

mod error;
mod expressions;
mod parser;
mod statements;

use lexer::{StateMachineLexer, StrSource};
use model::Program;

pub use error::ParseError;
pub use parser::{MAX_DEPTH, Parser};

/// Parse program text into its tree
///
/// # Returns
/// * `Ok(Program)` - the complete tree; the whole input was consumed
/// * `Err(ParseError)` - the first lexical or syntax error; nothing partial is returned
pub fn parse_source(input: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(StateMachineLexer::new(StrSource::new(input)))?;
    parser.parse()
}
