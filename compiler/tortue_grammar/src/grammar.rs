//! Resolved, immutable grammars.

use rustc_hash::FxHashMap;
use tortue_lexer::{Reader, StrReader, Tokenizer, TokenizerConfig};

use crate::{validate, MatchError, RuleArena, RuleId};

/// A named language: a resolved rule tree, its root, the tokenizer settings
/// documents of the language are read with, and the file extensions that
/// identify those documents.
///
/// Only [`GrammarBuilder::build`](crate::GrammarBuilder::build) creates
/// grammars, so every reference in the tree is bound. Matching takes `&self`;
/// one grammar can serve any number of threads, each with its own tokenizer.
#[derive(Clone, Debug)]
pub struct Grammar {
    name: String,
    extensions: Vec<String>,
    config: TokenizerConfig,
    arena: RuleArena,
    names: FxHashMap<String, RuleId>,
    root: RuleId,
}

impl Grammar {
    pub(crate) fn new(
        name: String,
        extensions: Vec<String>,
        config: TokenizerConfig,
        arena: RuleArena,
        names: FxHashMap<String, RuleId>,
        root: RuleId,
    ) -> Self {
        Grammar {
            name,
            extensions,
            config,
            arena,
            names,
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase extensions, without the leading dot.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn has_extension(&self, extension: &str) -> bool {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        self.extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn arena(&self) -> &RuleArena {
        &self.arena
    }

    pub fn root(&self) -> RuleId {
        self.root
    }

    /// The rule defined under `name`.
    pub fn rule(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    /// Every defined rule name, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Named rules the root never reaches, sorted. Not an error; a grammar
    /// may keep spare entry points for [`matches_rule`](Self::matches_rule).
    pub fn unreachable_rules(&self) -> Vec<String> {
        validate::unreachable_rules(&self.arena, &self.names, self.root)
    }

    /// A tokenizer over `reader` configured for this language.
    pub fn tokenizer<R: Reader>(&self, reader: R) -> Tokenizer<R> {
        Tokenizer::with_config(reader, self.config.clone())
    }

    /// Does the stream conform to this grammar?
    ///
    /// The grammar's tokenizer settings are applied first. On `Ok(true)` the
    /// tokenizer sits just past the matched input; conformance of a whole
    /// document is expressed by ending the root with an end-of-stream leaf.
    #[tracing::instrument(level = "debug", skip_all, fields(grammar = %self.name))]
    pub fn matches<R: Reader>(&self, tokenizer: &mut Tokenizer<R>) -> Result<bool, MatchError> {
        tokenizer.apply(&self.config);
        self.arena.match_rule(self.root, tokenizer)
    }

    /// Match starting from the rule defined under `name` instead of the root.
    pub fn matches_rule<R: Reader>(
        &self,
        name: &str,
        tokenizer: &mut Tokenizer<R>,
    ) -> Result<bool, MatchError> {
        let Some(id) = self.rule(name) else {
            return Err(MatchError::UnknownRule {
                grammar: self.name.clone(),
                name: name.to_owned(),
            });
        };
        tokenizer.apply(&self.config);
        self.arena.match_rule(id, tokenizer)
    }

    /// Match a whole in-memory document.
    pub fn matches_str(&self, source: &str) -> Result<bool, MatchError> {
        self.matches(&mut self.tokenizer(StrReader::new(source)))
    }
}

#[cfg(test)]
mod tests;
