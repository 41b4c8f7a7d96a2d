use anyhow::{Context, Result};
use clap::Parser; // clap crate for CLI argument parsing
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, debug};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program file; `.sp2020` is appended when missing. Reads standard input when absent
    input: Option<PathBuf>,

    /// Assembly output path (default: <base>.asm)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run lexer only and print the tokens
    #[arg(long)]
    lex: bool,

    /// Run lexer and parser only and print the parse tree
    #[arg(long)]
    parse: bool,

    /// Run lexer, parser, and semantic check only
    #[arg(long)]
    check: bool,

    /// Print the assembly instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let source = read_source(args.input.as_deref())?;

    // --lex: print tokens and stop
    // --parse: print the tree and stop
    // --check: stop after the semantic check
    // no option: generate code and write the assembly file
    if args.lex {
        print!("{}", driver::dump_tokens(&source)?);
        return Ok(());
    }
    if args.parse {
        print!("{}", driver::dump_tree(&source)?);
        return Ok(());
    }
    if args.check {
        for warning in driver::check(&source)? {
            eprintln!("{}", warning);
        }
        return Ok(());
    }

    let output = driver::compile(&source)?;
    for warning in &output.warnings {
        eprintln!("{}", warning);
    }
    let asm = output.assembly.to_string();
    if args.stdout {
        print!("{}", asm);
        return Ok(());
    }

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| driver::default_output(args.input.as_deref()));
    fs::write(&out_path, asm)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("{} generated.", out_path.display());
    Ok(())
}

fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => {
            let path = driver::source_path(path);
            debug!(path = %path.display(), "reading program");
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok(source)
        }
    }
}
