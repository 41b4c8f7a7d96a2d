// Compilation pipeline shared by the binary and the integration tests.
//
// lex -> parse -> check -> generate, each stage stopping the run on failure.

use std::path::{Path, PathBuf};

use codegen::Assembly;
use lexer::{LexError, LexWarning, StateMachineLexer, StrSource};
use model::Program;
use parser::ParseError;
use semantic::SemanticErrors;
use thiserror::Error;
use tracing::info;

/// Extension appended to an input path that does not already carry it.
pub const SOURCE_EXTENSION: &str = "sp2020";
/// Base name used for the output when the program is read from standard input.
pub const STDIN_BASE: &str = "kb";

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Empty file")]
    EmptySource,
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticErrors),
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(lex) => CompileError::Lex(lex),
            other => CompileError::Parse(other),
        }
    }
}

impl CompileError {
    /// Short name of the failing stage.
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::EmptySource => "empty",
            CompileError::Lex(_) => "lex",
            CompileError::Parse(_) => "parse",
            CompileError::Semantic(_) => "semantic",
        }
    }
}

#[derive(Debug)]
pub struct CompileOutput {
    pub assembly: Assembly,
    pub warnings: Vec<LexWarning>,
}

fn reject_empty(source: &str) -> Result<(), CompileError> {
    if source.is_empty() {
        return Err(CompileError::EmptySource);
    }
    Ok(())
}

/// Parse `source` and return the tree with any scanner warnings.
pub fn parse(source: &str) -> Result<(Program, Vec<LexWarning>), CompileError> {
    reject_empty(source)?;
    let mut parser = parser::Parser::new(StateMachineLexer::new(StrSource::new(source)))?;
    let program = parser.parse()?;
    Ok((program, parser.warnings().to_vec()))
}

/// Parse and check `source` without generating code.
pub fn check(source: &str) -> Result<Vec<LexWarning>, CompileError> {
    let (program, warnings) = parse(source)?;
    semantic::check_program(&program)?;
    Ok(warnings)
}

/// Run the whole pipeline.
pub fn compile(source: &str) -> Result<CompileOutput, CompileError> {
    let (program, warnings) = parse(source)?;
    semantic::check_program(&program)?;
    let assembly = codegen::generate(&program);
    info!(
        instructions = assembly.instructions.len(),
        storage = assembly.declarations.len(),
        warnings = warnings.len(),
        "compiled"
    );
    Ok(CompileOutput { assembly, warnings })
}

/// One line per token: `<Kind> '<lexeme>' line <n>`, ending with the EOF token.
pub fn dump_tokens(source: &str) -> Result<String, CompileError> {
    reject_empty(source)?;
    let tokens = lexer::lex(source)?;
    let mut out = String::new();
    for token in &tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// Preorder listing of the parse tree.
pub fn dump_tree(source: &str) -> Result<String, CompileError> {
    let (program, _) = parse(source)?;
    Ok(model::print_preorder(&program))
}

/// The path actually read for `input`: `.sp2020` is appended unless present.
pub fn source_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
        return input.to_path_buf();
    }
    let mut path = input.as_os_str().to_owned();
    path.push(".");
    path.push(SOURCE_EXTENSION);
    PathBuf::from(path)
}

/// Default output path: the input's base name with `.asm`, or `kb.asm` for standard input.
pub fn default_output(input: Option<&Path>) -> PathBuf {
    match input {
        Some(path) => source_path(path).with_extension("asm"),
        None => PathBuf::from(format!("{}.asm", STDIN_BASE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_smallest_program() {
        let output = compile("declare x := 5;\n{ out x; }").unwrap();
        assert_eq!(
            output.assembly.to_string(),
            "LOAD x\nSTORE T0\nWRITE T0\nSTOP\nT0 0\nx 5\n"
        );
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = compile("").unwrap_err();
        assert_eq!(err.kind(), "empty");
        assert_eq!(err.to_string(), "Empty file");
    }

    #[test]
    fn errors_report_their_stage() {
        assert_eq!(compile("{ out 1 = 2; }").unwrap_err().kind(), "lex");
        assert_eq!(compile("{ out 1 }").unwrap_err().kind(), "parse");
        assert_eq!(compile("{ out y; }").unwrap_err().kind(), "semantic");
    }

    #[test]
    fn deep_nesting_is_a_parse_error() {
        let src = format!("{{ out {}1; }}", "* ".repeat(10_000));
        let err = compile(&src).unwrap_err();
        assert_eq!(err.kind(), "parse");
        assert!(matches!(err, CompileError::Parse(ParseError::TooDeep { .. })));
    }

    #[test]
    fn semantic_failure_lists_every_error() {
        let err = compile("declare x := 5;\ndeclare x := 6;\n{ out y; }").unwrap_err();
        let CompileError::Semantic(errors) = err else {
            panic!("expected semantic errors");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn unterminated_comment_is_a_warning() {
        let output = compile("{ out 1; } # trailing").unwrap();
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn check_stops_before_codegen() {
        assert!(check("declare a := 1; { in a; }").is_ok());
        assert!(check("{ in a; }").is_err());
    }

    #[test]
    fn token_dump_lists_every_token() {
        assert_eq!(
            dump_tokens("out x;").unwrap(),
            "Out 'out' line 1\nIdentifier 'x' line 1\nSemicolon ';' line 1\nEof 'EOF' line 1\n"
        );
    }

    #[test]
    fn tree_dump_has_header() {
        let tree = dump_tree("{ in x; }").unwrap();
        assert!(tree.starts_with("Parse tree preorder traversal:\n"));
    }

    #[test]
    fn source_extension_is_appended_once() {
        assert_eq!(source_path(Path::new("prog")), PathBuf::from("prog.sp2020"));
        assert_eq!(source_path(Path::new("prog.sp2020")), PathBuf::from("prog.sp2020"));
        assert_eq!(source_path(Path::new("dir/a.b")), PathBuf::from("dir/a.b.sp2020"));
    }

    #[test]
    fn output_path_follows_base_name() {
        assert_eq!(default_output(Some(Path::new("prog"))), PathBuf::from("prog.asm"));
        assert_eq!(default_output(Some(Path::new("dir/p.sp2020"))), PathBuf::from("dir/p.asm"));
        assert_eq!(default_output(None), PathBuf::from("kb.asm"));
    }
}
