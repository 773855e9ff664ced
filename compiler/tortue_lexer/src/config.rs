//! Tokenizer configuration.
//!
//! A grammar carries one of these and applies it to the tokenizer before
//! matching, so the same tokenizer type serves every registered language.

/// Language-specific lexing settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Characters that form whitespace runs.
    pub whitespace: String,
    /// Swallow whitespace runs instead of returning `Whitespace` tokens.
    pub ignore_whitespace: bool,
    /// Opening delimiter of comments that run to the end of the line.
    pub single_line_comment: Option<String>,
    /// Opening and closing delimiters of comments that may span lines.
    pub multi_line_comment: Option<(String, String)>,
    /// Swallow comments instead of returning comment tokens.
    pub ignore_comments: bool,
    /// Characters that open (and close) a string literal.
    pub quotes: String,
    pub escape: Option<char>,
    /// Whether `escape` is honoured inside string literals.
    pub escaping: bool,
    /// Whether literal word comparison is case sensitive.
    pub case_sensitive: bool,
    /// Report number-shaped tokens as `Word`.
    pub numbers_as_words: bool,
    /// Convert number text to a numeric value.
    pub parse_numbers: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            whitespace: " \t".to_owned(),
            ignore_whitespace: true,
            single_line_comment: None,
            multi_line_comment: None,
            ignore_comments: true,
            quotes: "\"".to_owned(),
            escape: Some('\\'),
            escaping: true,
            case_sensitive: true,
            numbers_as_words: false,
            parse_numbers: true,
        }
    }
}

impl TokenizerConfig {
    #[must_use]
    pub fn with_whitespace(mut self, chars: &str, ignore: bool) -> Self {
        chars.clone_into(&mut self.whitespace);
        self.ignore_whitespace = ignore;
        self
    }

    /// Set the single-line comment delimiter; an empty delimiter disables it.
    #[must_use]
    pub fn with_single_line_comment(mut self, open: &str) -> Self {
        self.single_line_comment = non_empty(open);
        self
    }

    /// Set the multi-line comment delimiters; either one empty disables them.
    #[must_use]
    pub fn with_multi_line_comment(mut self, open: &str, close: &str) -> Self {
        self.multi_line_comment = non_empty(open).zip(non_empty(close));
        self
    }

    #[must_use]
    pub fn with_ignore_comments(mut self, ignore: bool) -> Self {
        self.ignore_comments = ignore;
        self
    }

    #[must_use]
    pub fn with_quotes(mut self, quotes: &str) -> Self {
        quotes.clone_into(&mut self.quotes);
        self
    }

    #[must_use]
    pub fn with_escape(mut self, escape: Option<char>, escaping: bool) -> Self {
        self.escape = escape;
        self.escaping = escaping;
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_numbers_as_words(mut self, numbers_as_words: bool) -> Self {
        self.numbers_as_words = numbers_as_words;
        self
    }

    #[must_use]
    pub fn with_parse_numbers(mut self, parse_numbers: bool) -> Self {
        self.parse_numbers = parse_numbers;
        self
    }

    #[inline]
    pub fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(c)
    }

    #[inline]
    pub fn is_quote(&self, c: char) -> bool {
        self.quotes.contains(c)
    }

    /// The escape character, if escaping is switched on.
    #[inline]
    pub fn active_escape(&self) -> Option<char> {
        self.escape.filter(|_| self.escaping)
    }

    /// Compare token text against a literal, honouring case sensitivity.
    pub fn words_equal(&self, text: &str, word: &str) -> bool {
        words_equal(text, word, self.case_sensitive)
    }

    /// Comment delimiters that begin with `c`.
    pub(crate) fn comment_openers(&self, c: char) -> impl Iterator<Item = &str> {
        self.single_line_comment
            .as_deref()
            .into_iter()
            .chain(self.multi_line_comment.as_ref().map(|(open, _)| open.as_str()))
            .filter(move |open| open.starts_with(c))
    }
}

/// Compare two words, folding case unless `case_sensitive`.
pub fn words_equal(text: &str, word: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text == word
    } else {
        text.chars()
            .flat_map(char::to_lowercase)
            .eq(word.chars().flat_map(char::to_lowercase))
    }
}

fn non_empty(delimiter: &str) -> Option<String> {
    (!delimiter.is_empty()).then(|| delimiter.to_owned())
}
