//! Tokens produced by the tokenizer.

use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Generic fallback: any run that is not one of the categories below.
    Word,
    /// Digits with at most one `.`.
    Number,
    /// `\n`, `\r\n` or a lone `\r`.
    Newline,
    /// A run of configured whitespace characters (only when surfaced).
    Whitespace,
    /// From the single-line comment delimiter up to the line break.
    SingleLineComment,
    /// From the opening through the closing multi-line delimiter.
    MultiLineComment,
    EndOfStream,
    /// Quoted text, quotes included.
    LiteralString,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Word,
        TokenKind::Number,
        TokenKind::Newline,
        TokenKind::Whitespace,
        TokenKind::SingleLineComment,
        TokenKind::MultiLineComment,
        TokenKind::EndOfStream,
        TokenKind::LiteralString,
    ];

    /// Human-readable name, used in diagnostics and token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::Newline => "newline",
            TokenKind::Whitespace => "whitespace",
            TokenKind::SingleLineComment => "line comment",
            TokenKind::MultiLineComment => "block comment",
            TokenKind::EndOfStream => "end of stream",
            TokenKind::LiteralString => "string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A classified chunk of source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text. Newlines are normalized to `"\n"`; strings keep their
    /// quotes and escape characters.
    pub text: String,
    /// Numeric value for number-shaped tokens, `0.0` otherwise.
    pub value: f64,
    /// 1-based line on which the token starts.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            value: 0.0,
            line,
        }
    }

    pub fn end_of_stream(line: u32) -> Self {
        Token::new(TokenKind::EndOfStream, String::new(), line)
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfStream => f.write_str("end of stream"),
            TokenKind::Newline => f.write_str("newline"),
            kind => write!(f, "{kind} `{}`", self.text.escape_debug()),
        }
    }
}
