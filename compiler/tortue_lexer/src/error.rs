//! Tokenizer errors.
//!
//! Only hard failures live here. A token that does not fit what a rule
//! expected is not an error; rule nodes push it back and report `false`.

use std::io;

/// A failure that aborts the in-progress match.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    /// The underlying reader failed. Always fatal, never swallowed.
    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),

    /// `push_back` called twice without an intervening `next_token`.
    #[error("token pushed back twice without an intervening read")]
    DoublePushBack,

    /// `push_back` called before any token was read.
    #[error("no token has been read yet, nothing to push back")]
    NothingToPushBack,

    /// `push_back_word_char` called without a word-character read to undo.
    #[error("word character pushed back without a matching read")]
    DoubleWordPushBack,
}

impl LexError {
    /// Returns `true` for errors caused by misuse of the pushback protocol
    /// rather than by the source stream.
    pub fn is_usage_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
