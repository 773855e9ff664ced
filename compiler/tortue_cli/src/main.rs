//! Tortue CLI
//!
//! Tokenize documents and check them against the built-in grammars.

use std::io::{self, Write};
use std::process::ExitCode;

use tortue_cli::commands::{self, Verdict};
use tortue_cli::{init_tracing, CliError};
use tortue_grammar::builtin;

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "lex" => match input_args(&args[2..]) {
            Some((path, grammar)) => lex(path, grammar),
            None => {
                eprintln!("Usage: tortue lex <file|-> [--grammar <name>]");
                return ExitCode::FAILURE;
            }
        },
        "check" => match input_args(&args[2..]) {
            Some((path, grammar)) => check(path, grammar),
            None => {
                eprintln!("Usage: tortue check <file|-> [--grammar <name>]");
                return ExitCode::FAILURE;
            }
        },
        "grammars" => grammars(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        "version" | "--version" | "-V" => {
            println!("tortue {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Split `<file> [--grammar <name>]` (flag in either position).
fn input_args(args: &[String]) -> Option<(&str, Option<&str>)> {
    let mut path = None;
    let mut grammar = None;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if let Some(name) = arg.strip_prefix("--grammar=") {
            grammar = Some(name);
        } else if arg == "--grammar" || arg == "-g" {
            grammar = Some(args.get(i + 1)?.as_str());
            i += 1;
        } else if (arg == commands::STDIN || !arg.starts_with('-')) && path.is_none() {
            path = Some(arg);
        } else {
            return None;
        }
        i += 1;
    }
    Some((path?, grammar))
}

fn lex(path: &str, grammar: Option<&str>) -> Result<ExitCode, CliError> {
    let registry = builtin::registry()?;
    let config = commands::lex_config(&registry, path, grammar)?;
    let reader = commands::open_input(path)?;
    let mut out = io::stdout().lock();
    commands::lex(reader, config, &mut out)?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn check(path: &str, grammar: Option<&str>) -> Result<ExitCode, CliError> {
    let registry = builtin::registry()?;
    let grammar = commands::select_grammar(&registry, path, grammar)?;
    let verdict = commands::check(grammar, commands::open_input(path)?)?;
    commands::report(path, verdict, &mut io::stdout().lock())?;
    Ok(match verdict {
        Verdict::WellFormed => ExitCode::SUCCESS,
        Verdict::Rejected { .. } => ExitCode::FAILURE,
    })
}

fn grammars() -> Result<ExitCode, CliError> {
    let registry = builtin::registry()?;
    commands::list_grammars(&registry, &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    println!("Tortue - grammar checker for turtle scripts");
    println!();
    println!("Usage: tortue <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file|->       Print the token stream of a document");
    println!("  check <file|->     Check that a document conforms to its grammar");
    println!("  grammars           List built-in grammars and their extensions");
    println!("  help               Show this message");
    println!("  version            Show version information");
    println!();
    println!("Options:");
    println!("  -g, --grammar <name>   Use this grammar instead of the file extension");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=tortue_grammar=trace) to trace matching.");
}
