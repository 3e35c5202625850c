//! lang: Front end driver for the language.
//!
//! Usage:
//!   lang [options] <FILE>
//!
//! Lexes and parses one source file, prints its syntax tree and reports
//! every diagnostic collected on the way.
//!
//! Exit status: 0 on success, 1 on misuse or a fatal error, 2 when
//! diagnostics were reported and `denyErrors` is set.

mod diagnostic;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;
use lang_ast::token::TokenKind;
use lang_ast::visitor::count_nodes;
use lang_core::arena::{Arena, NodeArena};
use lang_diagnostics::ErrorCollector;
use lang_options::FrontendOptions;
use lang_parser::parse_source;
use lang_printer::TreePrinter;
use lang_scanner::tokenize;
use miette::{IntoDiagnostic, NamedSource, WrapErr};
use tracing::{debug, info};

use crate::diagnostic::SyntaxDiagnostic;

#[derive(ClapParser, Debug)]
#[command(name = "lang", about = "Lex and parse a source file and print its syntax tree", version)]
struct Cli {
    /// Source file to parse.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to lang.json. Defaults to the one next to FILE, if any.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the token stream instead of the syntax tree.
    #[arg(long)]
    tokens: bool,

    /// Do not print the syntax tree.
    #[arg(long = "no-print")]
    no_print: bool,

    /// Log front end progress to stderr.
    #[arg(short = 'v', long)]
    verbose: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also come through here. If even that
            // output cannot be written the run has failed.
            let printed = err.print();
            let code = if err.use_stderr() || printed.is_err() { 1 } else { 0 };
            process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{:?}", report);
            1
        }
    };
    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn load_options(cli: &Cli) -> miette::Result<FrontendOptions> {
    let path = cli
        .config
        .clone()
        .or_else(|| FrontendOptions::discover(&cli.file));
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading options");
            FrontendOptions::load(&path).into_diagnostic()
        }
        None => Ok(FrontendOptions::default()),
    }
}

fn run(cli: &Cli) -> miette::Result<i32> {
    let options = load_options(cli)?;
    let source = std::fs::read_to_string(&cli.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", cli.file.display()))?;
    info!(file = %cli.file.display(), bytes = source.len(), "read source");

    let mut literal_buffer = vec![0u8; options.literal_arena_bytes];
    let literals = Arena::new(&mut literal_buffer);

    if cli.tokens {
        return run_tokens(&source, &literals, &options);
    }

    let nodes = NodeArena::with_limit(options.node_arena_bytes);
    let (program, errors) = parse_source(&source, &literals, &nodes, options.parse_limits())
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to parse {}", cli.file.display()))?;
    debug!(
        statements = program.len(),
        nodes = count_nodes(&program),
        literal_bytes = literals.used(),
        node_bytes = nodes.allocated_bytes(),
        "parse finished"
    );

    if !cli.no_print {
        let tree = TreePrinter::new().print_program(&program);
        io::stdout().lock().write_all(tree.as_bytes()).into_diagnostic()?;
    }

    if !errors.has_errors() {
        return Ok(0);
    }
    report_errors(cli, &source, &errors)?;
    Ok(if options.deny_errors { 2 } else { 0 })
}

fn run_tokens(source: &str, literals: &Arena<'_>, options: &FrontendOptions) -> miette::Result<i32> {
    let tokens = tokenize(source, literals)
        .into_diagnostic()
        .wrap_err("failed to tokenize")?;

    let mut out = io::stdout().lock();
    for token in &tokens {
        writeln!(
            out,
            "{:>4}:{:<4} {:<32} {}",
            token.line,
            token.column,
            token.kind.name(),
            token.literal
        )
        .into_diagnostic()?;
    }

    let illegal = tokens.last().is_some_and(|t| t.kind == TokenKind::Illegal);
    Ok(if illegal && options.deny_errors { 2 } else { 0 })
}

fn report_errors(cli: &Cli, source: &str, errors: &ErrorCollector<'_>) -> miette::Result<()> {
    let use_color = io::stderr().is_terminal();
    if use_color {
        let name = cli.file.display().to_string();
        for error in errors {
            let report = miette::Report::new(SyntaxDiagnostic::new(error, source))
                .with_source_code(NamedSource::new(&name, source.to_string()));
            eprintln!("{:?}", report);
        }
    } else {
        errors.report(&mut io::stderr().lock()).into_diagnostic()?;
    }

    let count = errors.len();
    let plural = if count == 1 { "" } else { "s" };
    if use_color {
        eprintln!("\n{}{}Found {} error{}.{}", BOLD, RED, count, plural, RESET);
    } else {
        eprintln!("\nFound {} error{}.", count, plural);
    }
    Ok(())
}
