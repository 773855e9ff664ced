//! Character classification and per-category scanners.
//!
//! Dispatch peeks one character and picks a scanner in this order:
//! whitespace set, ASCII digit, quote, `\r`/`\n`, end-of-stream, and finally
//! the word fallback, which is also where comment delimiters are recognised.

use tracing::debug;

use super::Tokenizer;
use crate::{LexError, Reader, Token, TokenKind};

impl<R: Reader> Tokenizer<R> {
    /// Scan the next token from the character stream.
    pub(super) fn scan(&mut self) -> Result<Token, LexError> {
        loop {
            let line = self.line;
            let Some(c) = self.peek()? else {
                return Ok(Token::end_of_stream(line));
            };

            if self.config.is_whitespace(c) {
                let text = self.whitespace()?;
                if self.config.ignore_whitespace {
                    continue;
                }
                return Ok(Token::new(TokenKind::Whitespace, text, line));
            }
            if c.is_ascii_digit() {
                return self.number(line);
            }
            if self.config.is_quote(c) {
                return self.literal_string(line);
            }
            if c == '\r' || c == '\n' {
                return self.newline(line);
            }
            if let Some(comment) = self.comment(c, line)? {
                if self.config.ignore_comments {
                    continue;
                }
                return Ok(comment);
            }
            return self.word(line);
        }
    }

    // ─── Character Access ───────────────────────────────────────────────

    fn bump(&mut self) -> Result<Option<char>, LexError> {
        if let Some(c) = self.lookahead.pop() {
            return Ok(Some(c));
        }
        Ok(self.reader.read_char()?)
    }

    fn unread(&mut self, c: char) {
        self.lookahead.push(c);
    }

    fn peek(&mut self) -> Result<Option<char>, LexError> {
        if let Some(&c) = self.lookahead.last() {
            return Ok(Some(c));
        }
        let c = self.reader.read_char()?;
        self.reader.push_back();
        Ok(c)
    }

    /// Consume `delimiter` if the input continues with it; otherwise leave
    /// the input untouched.
    fn eat(&mut self, delimiter: &str) -> Result<bool, LexError> {
        let mut taken = Vec::with_capacity(delimiter.len());
        for expected in delimiter.chars() {
            match self.bump()? {
                Some(c) if c == expected => taken.push(c),
                other => {
                    if let Some(c) = other {
                        self.unread(c);
                    }
                    while let Some(c) = taken.pop() {
                        self.unread(c);
                    }
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Advance the line counter for a consumed line break. `\r\n` counts once.
    fn count_line_break(&mut self, c: char) -> Result<(), LexError> {
        match c {
            '\n' => self.line += 1,
            '\r' if self.peek()? != Some('\n') => self.line += 1,
            _ => {}
        }
        Ok(())
    }

    // ─── Scanners ───────────────────────────────────────────────────────

    fn whitespace(&mut self) -> Result<String, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek()? {
            if !self.config.is_whitespace(c) {
                break;
            }
            self.bump()?;
            self.count_line_break(c)?;
            text.push(c);
        }
        Ok(text)
    }

    fn number(&mut self, line: u32) -> Result<Token, LexError> {
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.bump()? {
            if c.is_ascii_digit() {
                text.push(c);
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                text.push(c);
            } else {
                self.unread(c);
                break;
            }
        }

        let value = if self.config.parse_numbers {
            text.parse::<f64>().unwrap_or_default()
        } else {
            0.0
        };
        let kind = if self.config.numbers_as_words {
            TokenKind::Word
        } else {
            TokenKind::Number
        };
        Ok(Token::new(kind, text, line).with_value(value))
    }

    fn newline(&mut self, line: u32) -> Result<Token, LexError> {
        if self.bump()? == Some('\r') {
            match self.bump()? {
                Some('\n') | None => {}
                Some(next) => self.unread(next),
            }
        }
        self.line += 1;
        Ok(Token::new(TokenKind::Newline, "\n", line))
    }

    fn literal_string(&mut self, line: u32) -> Result<Token, LexError> {
        let Some(quote) = self.bump()? else {
            return Ok(Token::end_of_stream(line));
        };
        let escape = self.config.active_escape();
        let mut text = String::from(quote);
        // The opening quote never escapes what follows it.
        let mut previous = None;

        loop {
            let Some(c) = self.bump()? else {
                debug!(line, "unterminated string literal; closing it at end of stream");
                text.push(quote);
                break;
            };
            text.push(c);
            if c == quote && (escape.is_none() || previous != escape) {
                break;
            }
            self.count_line_break(c)?;
            previous = Some(c);
        }

        Ok(Token::new(TokenKind::LiteralString, text, line))
    }

    /// Scan a comment starting at `first`, if one starts here.
    fn comment(&mut self, first: char, line: u32) -> Result<Option<Token>, LexError> {
        let single = self.config.single_line_comment.as_ref().filter(|open| open.starts_with(first));
        if let Some(open) = single.cloned() {
            if self.eat(&open)? {
                let mut text = open;
                while let Some(c) = self.peek()? {
                    if c == '\n' || c == '\r' {
                        break;
                    }
                    self.bump()?;
                    text.push(c);
                }
                return Ok(Some(Token::new(TokenKind::SingleLineComment, text, line)));
            }
        }

        let multi = self.config.multi_line_comment.as_ref().filter(|(open, _)| open.starts_with(first));
        if let Some((open, close)) = multi.cloned() {
            if self.eat(&open)? {
                let mut text = open;
                loop {
                    if self.eat(&close)? {
                        text.push_str(&close);
                        break;
                    }
                    let Some(c) = self.bump()? else {
                        debug!(line, "unterminated block comment; closing it at end of stream");
                        break;
                    };
                    text.push(c);
                    self.count_line_break(c)?;
                }
                return Ok(Some(Token::new(TokenKind::MultiLineComment, text, line)));
            }
        }

        Ok(None)
    }

    fn word(&mut self, line: u32) -> Result<Token, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek()? {
            if !text.is_empty() && self.ends_word(c)? {
                break;
            }
            self.bump()?;
            text.push(c);
        }
        Ok(Token::new(TokenKind::Word, text, line))
    }

    fn ends_word(&mut self, c: char) -> Result<bool, LexError> {
        if c == '\r' || c == '\n' || self.config.is_whitespace(c) || self.config.is_quote(c) {
            return Ok(true);
        }
        let openers: Vec<String> = self.config.comment_openers(c).map(str::to_owned).collect();
        for open in openers {
            if self.eat(&open)? {
                for d in open.chars().rev() {
                    self.unread(d);
                }
                return Ok(true);
            }
        }
        Ok(false)
    }
}
