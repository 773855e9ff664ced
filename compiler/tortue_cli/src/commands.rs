//! Command handlers for the `tortue` CLI.
//!
//! Handlers write to any [`Write`] and read from any [`Reader`], so they run
//! the same against files, standard input, and in-memory buffers in tests.

use std::fs::File;
use std::io::{self, BufReader, Write};

use tortue_grammar::{Grammar, GrammarRegistry};
use tortue_lexer::{IoReader, Reader, TokenKind, Tokenizer, TokenizerConfig};
use tracing::debug;

use crate::CliError;

/// Path argument that stands for standard input.
pub const STDIN: &str = "-";

/// Outcome of checking one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    WellFormed,
    /// The match stopped at this line.
    Rejected { line: u32 },
}

/// Open `path`, or standard input for [`STDIN`].
pub fn open_input(path: &str) -> Result<IoReader<Box<dyn io::BufRead>>, CliError> {
    let input: Box<dyn io::BufRead> = if path == STDIN {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|source| CliError::Input {
            path: path.into(),
            source,
        })?;
        Box::new(BufReader::new(file))
    };
    Ok(IoReader::new(input))
}

/// Pick the grammar named on the command line, or else the one registered
/// for the file's extension.
pub fn select_grammar<'r>(
    registry: &'r GrammarRegistry,
    path: &str,
    name: Option<&str>,
) -> Result<&'r Grammar, CliError> {
    if let Some(name) = name {
        return registry
            .lookup_by_name(name)
            .ok_or_else(|| CliError::UnknownGrammar { name: name.into() });
    }
    if path == STDIN {
        return Err(CliError::GrammarRequired);
    }
    registry
        .lookup_by_path(path)
        .ok_or_else(|| CliError::NoGrammarForPath { path: path.into() })
}

/// Print every token of the stream, one per line, and return how many
/// tokens came before end-of-stream.
pub fn lex<R: Reader>(
    reader: R,
    config: TokenizerConfig,
    out: &mut impl Write,
) -> Result<usize, CliError> {
    let mut tokenizer = Tokenizer::with_config(reader, config);
    let mut count = 0;
    loop {
        let token = tokenizer.next_token()?;
        if token.is_end_of_stream() {
            break;
        }
        count += 1;
        match token.kind {
            TokenKind::Number => writeln!(
                out,
                "{:>4}  {:<18} {:?} = {}",
                token.line, token.kind, token.text, token.value
            )?,
            _ => writeln!(out, "{:>4}  {:<18} {:?}", token.line, token.kind, token.text)?,
        }
    }
    debug!(tokens = count, "lexed");
    Ok(count)
}

/// Match a document against `grammar`.
pub fn check<R: Reader>(grammar: &Grammar, reader: R) -> Result<Verdict, CliError> {
    let mut tokenizer = grammar.tokenizer(reader);
    if grammar.matches(&mut tokenizer)? {
        Ok(Verdict::WellFormed)
    } else {
        Ok(Verdict::Rejected {
            line: tokenizer.current_line(),
        })
    }
}

/// Report a verdict the way `tortue check` prints it.
pub fn report(path: &str, verdict: Verdict, out: &mut impl Write) -> io::Result<()> {
    let name = if path == STDIN { "<stdin>" } else { path };
    match verdict {
        Verdict::WellFormed => writeln!(out, "{name}: ok"),
        Verdict::Rejected { line } => {
            writeln!(out, "{name}: document is not well-formed at line {line}")
        }
    }
}

/// List registered grammars with their extensions, and any named rules the
/// root never reaches.
pub fn list_grammars(registry: &GrammarRegistry, out: &mut impl Write) -> io::Result<()> {
    for grammar in registry.iter() {
        let extensions: Vec<String> = grammar
            .extensions()
            .iter()
            .map(|extension| format!(".{extension}"))
            .collect();
        writeln!(out, "{:<12} {}", grammar.name(), extensions.join(" "))?;

        let unreachable = grammar.unreachable_rules();
        if !unreachable.is_empty() {
            writeln!(out, "  unreachable rules: {}", unreachable.join(", "))?;
        }
    }
    Ok(())
}

/// Tokenizer settings for `lex`: the selected grammar's, or the defaults
/// when no grammar applies.
pub fn lex_config(
    registry: &GrammarRegistry,
    path: &str,
    name: Option<&str>,
) -> Result<TokenizerConfig, CliError> {
    match select_grammar(registry, path, name) {
        Ok(grammar) => Ok(grammar.config().clone()),
        Err(CliError::GrammarRequired | CliError::NoGrammarForPath { .. }) => {
            debug!(path, "no grammar for input; using default tokenizer settings");
            Ok(TokenizerConfig::default())
        }
        Err(err) => Err(err),
    }
}
