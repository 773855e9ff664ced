//! CLI failures. Rejected documents are not errors; see `check`.

use std::io;
use std::path::PathBuf;

use tortue_grammar::{GrammarError, MatchError};
use tortue_lexer::LexError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Input { path: PathBuf, source: io::Error },

    #[error("no grammar named `{name}`")]
    UnknownGrammar { name: String },

    #[error("no grammar handles '{}'; pass --grammar", path.display())]
    NoGrammarForPath { path: PathBuf },

    #[error("reading standard input needs --grammar")]
    GrammarRequired,

    #[error("built-in grammar is defective: {0}")]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}
