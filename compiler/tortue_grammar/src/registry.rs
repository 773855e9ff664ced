//! Grammar lookup by name and file extension.

use std::path::Path;

use tracing::debug;

use crate::Grammar;

/// Holds the grammars known to a host and finds the one for a document.
///
/// Grammars are kept in registration order. Lookups are linear; a host
/// registers a handful of languages, not thousands.
#[derive(Clone, Debug, Default)]
pub struct GrammarRegistry {
    grammars: Vec<Grammar>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grammar. A grammar already registered under the same name is
    /// replaced in place and returned.
    pub fn register(&mut self, grammar: Grammar) -> Option<Grammar> {
        debug!(
            grammar = grammar.name(),
            extensions = ?grammar.extensions(),
            "registering grammar"
        );
        match self
            .grammars
            .iter_mut()
            .find(|known| known.name() == grammar.name())
        {
            Some(slot) => Some(std::mem::replace(slot, grammar)),
            None => {
                self.grammars.push(grammar);
                None
            }
        }
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&Grammar> {
        self.grammars.iter().find(|grammar| grammar.name() == name)
    }

    /// Find the grammar for an extension such as `"tt"` or `".TT"`.
    ///
    /// When two grammars claim the same extension, the first registered wins.
    pub fn lookup_by_extension(&self, extension: &str) -> Option<&Grammar> {
        if extension.strip_prefix('.').unwrap_or(extension).is_empty() {
            return None;
        }
        self.grammars
            .iter()
            .find(|grammar| grammar.has_extension(extension))
    }

    /// Find the grammar for a file by its extension.
    pub fn lookup_by_path(&self, path: impl AsRef<Path>) -> Option<&Grammar> {
        let extension = path.as_ref().extension()?.to_str()?;
        self.lookup_by_extension(extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grammar> {
        self.grammars.iter()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

impl FromIterator<Grammar> for GrammarRegistry {
    fn from_iter<I: IntoIterator<Item = Grammar>>(iter: I) -> Self {
        let mut registry = GrammarRegistry::new();
        for grammar in iter {
            registry.register(grammar);
        }
        registry
    }
}
