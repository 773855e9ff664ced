//! Tokenizer for grammar-driven matching.
//!
//! The tokenizer pulls characters from a [`Reader`] one at a time and groups
//! them into [`Token`]s. It is deliberately small: it knows nothing about any
//! particular language, and everything language-specific (whitespace set,
//! quotes, comment delimiters, escapes, case sensitivity) comes from a
//! [`TokenizerConfig`] that a grammar applies before matching.
//!
//! # Pushback
//!
//! Backtracking rule nodes undo their reads through two independent,
//! single-level pushback channels:
//!
//! - [`Tokenizer::push_back`] replays the last token verbatim.
//! - [`Tokenizer::push_back_word_char`] rewinds the word-character cursor used
//!   to inspect a word one character at a time.
//!
//! ```text
//! let mut tokenizer = Tokenizer::new(StrReader::new("forward 10"));
//! let word = tokenizer.next_token()?;   // Word("forward")
//! tokenizer.push_back()?;
//! let again = tokenizer.next_token()?;  // Word("forward") again
//! ```

mod config;
mod error;
mod reader;
mod token;
mod tokenizer;

pub use config::{words_equal, TokenizerConfig};
pub use error::LexError;
pub use reader::{IoReader, Reader, StrReader};
pub use token::{Token, TokenKind};
pub use tokenizer::{Mark, Tokenizer, WordChar};
