//! Token stream with single-level pushback.
//!
//! The [`Tokenizer`] exposes two read heads over the same stream:
//!
//! - the token head ([`next_token`](Tokenizer::next_token) /
//!   [`push_back`](Tokenizer::push_back)), and
//! - the word-character head ([`next_word_char`](Tokenizer::next_word_char) /
//!   [`push_back_word_char`](Tokenizer::push_back_word_char)), which walks the
//!   text of a `Word` token one character at a time.
//!
//! # Interaction Between the Heads
//!
//! The first word-character read fetches a token. If it is a word, the word
//! becomes *active* and later reads step through its characters. Reading a
//! token while a word is active finishes that word: if characters are left,
//! they are delivered as a `Word` token of their own, so a rule that matched
//! the start of a word hands the rest to whatever comes next.
//!
//! Once a word has reported [`WordChar::EndOfWord`] and that read was not
//! pushed back, the next word-character read moves on to the following token.

mod scan;

use tracing::trace;

use crate::{LexError, Reader, Token, TokenKind, TokenizerConfig};

/// One step of the word-character head.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordChar {
    /// The next character of the active word.
    Char(char),
    /// The active word has no characters left.
    EndOfWord,
    /// The next token is not a word.
    NotAWord,
}

/// Progress stamp of a tokenizer.
///
/// Two equal marks taken around a successful match mean the match consumed
/// nothing. End-of-stream reads are not progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    tokens: u64,
    word_pos: usize,
}

/// What the last word-character read did, so it can be undone.
#[derive(Clone, Copy, Debug)]
enum WordStep {
    /// Fetched a word token and returned its first character.
    Started,
    Advanced,
    AtEnd,
    NotAWord,
}

#[derive(Clone, Debug)]
struct ActiveWord {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    /// End of word was reported and not pushed back.
    ended: bool,
}

impl ActiveWord {
    fn is_exhausted(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn into_remainder(self) -> Token {
        let text: String = self.chars[self.pos..].iter().collect();
        Token::new(TokenKind::Word, text, self.line)
    }
}

/// Configurable tokenizer over a [`Reader`].
pub struct Tokenizer<R> {
    reader: R,
    config: TokenizerConfig,
    /// Characters read past while probing delimiters; the last one is next.
    lookahead: Vec<char>,
    /// Most recently returned token.
    last: Option<Token>,
    /// `last` was pushed back and is returned by the next read.
    replay: bool,
    line: u32,
    word: Option<ActiveWord>,
    word_step: Option<WordStep>,
    /// Non-EOS tokens handed out, net of pushbacks.
    tokens: u64,
}

impl<R: Reader> Tokenizer<R> {
    /// Create a tokenizer with the default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, TokenizerConfig::default())
    }

    pub fn with_config(reader: R, config: TokenizerConfig) -> Self {
        Tokenizer {
            reader,
            config,
            lookahead: Vec::new(),
            last: None,
            replay: false,
            line: 1,
            word: None,
            word_step: None,
            tokens: 0,
        }
    }

    /// Return the next token.
    ///
    /// A pushed-back token is replayed verbatim. Otherwise the rest of a
    /// partially consumed word comes first, then freshly scanned input.
    pub fn next_token(&mut self) -> Result<&Token, LexError> {
        self.word_step = None;
        let token = if std::mem::take(&mut self.replay) {
            let line = self.line;
            self.last.take().unwrap_or_else(|| Token::end_of_stream(line))
        } else {
            match self.word.take() {
                Some(word) if !word.is_exhausted() => word.into_remainder(),
                _ => self.scan()?,
            }
        };

        if !token.is_end_of_stream() {
            self.tokens += 1;
        }
        trace!(kind = %token.kind, text = %token.text, line = token.line, "token");
        Ok(self.last.insert(token))
    }

    /// Make the next [`next_token`](Self::next_token) replay the token it
    /// just returned. Allowed once between two reads.
    ///
    /// If that token started the active word, the whole word is replayed.
    pub fn push_back(&mut self) -> Result<(), LexError> {
        if self.replay {
            return Err(LexError::DoublePushBack);
        }
        let Some(token) = &self.last else {
            return Err(LexError::NothingToPushBack);
        };
        if !token.is_end_of_stream() {
            self.tokens = self.tokens.saturating_sub(1);
        }
        self.word = None;
        self.word_step = None;
        self.replay = true;
        Ok(())
    }

    /// Read one character of the current word.
    pub fn next_word_char(&mut self) -> Result<WordChar, LexError> {
        if self.word.as_ref().is_some_and(|word| word.ended) {
            self.word = None;
        }
        if let Some(word) = &mut self.word {
            let (step, read) = match word.chars.get(word.pos) {
                Some(&c) => {
                    word.pos += 1;
                    (WordStep::Advanced, WordChar::Char(c))
                }
                None => {
                    word.ended = true;
                    (WordStep::AtEnd, WordChar::EndOfWord)
                }
            };
            self.word_step = Some(step);
            return Ok(read);
        }

        let token = self.next_token()?;
        if token.kind != TokenKind::Word {
            self.push_back()?;
            self.word_step = Some(WordStep::NotAWord);
            return Ok(WordChar::NotAWord);
        }

        let mut word = ActiveWord {
            chars: token.text.chars().collect(),
            pos: 0,
            line: token.line,
            ended: false,
        };
        let (step, read) = match word.chars.first() {
            Some(&c) => {
                word.pos = 1;
                (WordStep::Started, WordChar::Char(c))
            }
            None => {
                word.ended = true;
                (WordStep::AtEnd, WordChar::EndOfWord)
            }
        };
        self.word = Some(word);
        self.word_step = Some(step);
        Ok(read)
    }

    /// Undo the last [`next_word_char`](Self::next_word_char).
    pub fn push_back_word_char(&mut self) -> Result<(), LexError> {
        match self.word_step.take() {
            None => Err(LexError::DoubleWordPushBack),
            Some(WordStep::Advanced) => {
                if let Some(word) = &mut self.word {
                    word.pos -= 1;
                }
                Ok(())
            }
            Some(WordStep::Started) => self.push_back(),
            Some(WordStep::AtEnd) => {
                if let Some(word) = &mut self.word {
                    word.ended = false;
                }
                Ok(())
            }
            Some(WordStep::NotAWord) => Ok(()),
        }
    }

    /// Line of the read head, for diagnostics.
    ///
    /// While a token is pushed back this is the line that token starts on.
    pub fn current_line(&self) -> u32 {
        match &self.last {
            Some(token) if self.replay => token.line,
            _ => self.line,
        }
    }

    /// Current progress stamp.
    pub fn mark(&self) -> Mark {
        Mark {
            tokens: self.tokens,
            word_pos: self.word.as_ref().map_or(0, |word| word.pos),
        }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Replace the whole configuration.
    pub fn apply(&mut self, config: &TokenizerConfig) {
        self.config.clone_from(config);
    }

    pub fn set_whitespace_chars(&mut self, chars: &str) {
        chars.clone_into(&mut self.config.whitespace);
    }

    pub fn set_ignore_whitespace(&mut self, ignore: bool) {
        self.config.ignore_whitespace = ignore;
    }

    pub fn set_quote_chars(&mut self, quotes: &str) {
        quotes.clone_into(&mut self.config.quotes);
    }

    pub fn set_single_line_comment(&mut self, open: Option<&str>) {
        self.config.single_line_comment = open.filter(|d| !d.is_empty()).map(str::to_owned);
    }

    pub fn set_multi_line_comment(&mut self, delimiters: Option<(&str, &str)>) {
        self.config.multi_line_comment = delimiters
            .filter(|(open, close)| !open.is_empty() && !close.is_empty())
            .map(|(open, close)| (open.to_owned(), close.to_owned()));
    }

    pub fn set_ignore_comments(&mut self, ignore: bool) {
        self.config.ignore_comments = ignore;
    }

    pub fn set_escape_char(&mut self, escape: Option<char>) {
        self.config.escape = escape;
    }

    pub fn set_escaping(&mut self, escaping: bool) {
        self.config.escaping = escaping;
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.config.case_sensitive = case_sensitive;
    }

    pub fn set_numbers_as_words(&mut self, numbers_as_words: bool) {
        self.config.numbers_as_words = numbers_as_words;
    }

    pub fn set_parse_numbers(&mut self, parse_numbers: bool) {
        self.config.parse_numbers = parse_numbers;
    }
}
