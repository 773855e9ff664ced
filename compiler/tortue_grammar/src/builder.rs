//! Grammar construction.
//!
//! A builder is the only way to obtain a [`Grammar`]. It threads its own
//! name map through construction, so there is no global registration state
//! and two grammars can be built side by side.
//!
//! ```text
//! let mut b = GrammarBuilder::new("blocks");
//! let begin = b.literal("BEGIN");
//! let number = b.token(TokenKind::Number);
//! let numbers = b.zero_or_more(number);
//! let end = b.literal("END");
//! let root = b.sequence([begin, numbers, end]);
//! b.root(root);
//! let grammar = b.build()?;
//! ```

use rustc_hash::FxHashMap;
use tortue_lexer::{TokenKind, TokenizerConfig};
use tracing::debug;

use crate::{validate, CharClass, Grammar, GrammarError, RuleArena, RuleId, RuleNode};

#[derive(Clone, Debug)]
enum Root {
    Id(RuleId),
    Named(String),
}

/// Builds the rule tree of one grammar, then resolves and validates it.
#[derive(Clone, Debug)]
pub struct GrammarBuilder {
    name: String,
    extensions: Vec<String>,
    config: TokenizerConfig,
    arena: RuleArena,
    names: FxHashMap<String, RuleId>,
    root: Option<Root>,
}

impl GrammarBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        GrammarBuilder {
            name: name.into(),
            extensions: Vec::new(),
            config: TokenizerConfig::default(),
            arena: RuleArena::new(),
            names: FxHashMap::default(),
            root: None,
        }
    }

    /// Add a file extension (without the dot) handled by this grammar.
    pub fn extension(&mut self, extension: &str) -> &mut Self {
        let extension = extension
            .strip_prefix('.')
            .unwrap_or(extension)
            .to_ascii_lowercase();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    pub fn config(&mut self, config: TokenizerConfig) -> &mut Self {
        self.config = config;
        self
    }

    // === Nodes ===

    pub fn sequence(&mut self, children: impl IntoIterator<Item = RuleId>) -> RuleId {
        self.arena.alloc(RuleNode::Sequence(children.into_iter().collect()))
    }

    pub fn choice(&mut self, children: impl IntoIterator<Item = RuleId>) -> RuleId {
        self.arena.alloc(RuleNode::Choice(children.into_iter().collect()))
    }

    /// `body` as a sequence, between `min` and `max` times (`None` = no limit).
    pub fn repeat(
        &mut self,
        min: u32,
        max: Option<u32>,
        body: impl IntoIterator<Item = RuleId>,
    ) -> RuleId {
        self.arena.alloc(RuleNode::Repeat {
            min,
            max,
            body: body.into_iter().collect(),
        })
    }

    pub fn optional(&mut self, rule: RuleId) -> RuleId {
        self.repeat(0, Some(1), [rule])
    }

    pub fn zero_or_more(&mut self, rule: RuleId) -> RuleId {
        self.repeat(0, None, [rule])
    }

    pub fn one_or_more(&mut self, rule: RuleId) -> RuleId {
        self.repeat(1, None, [rule])
    }

    pub fn literal(&mut self, word: impl Into<String>) -> RuleId {
        self.arena.alloc(RuleNode::Literal(word.into()))
    }

    pub fn char_class(&mut self, class: CharClass) -> RuleId {
        self.arena.alloc(RuleNode::CharClass(class))
    }

    pub fn token(&mut self, kind: TokenKind) -> RuleId {
        self.arena.alloc(RuleNode::Token(kind))
    }

    /// A forward reference to a rule named later with [`define`](Self::define).
    pub fn reference(&mut self, name: impl Into<String>) -> RuleId {
        self.arena.alloc(RuleNode::Reference {
            name: name.into(),
            target: None,
        })
    }

    /// A letter followed by letters, digits or underscores, all within one
    /// word.
    pub fn identifier(&mut self) -> RuleId {
        let letter = self.char_class(CharClass::Letter);
        let alnum = self.char_class(CharClass::Alphanumeric);
        let underscore = self.char_class(CharClass::Exact('_'));
        let tail_char = self.choice([alnum, underscore]);
        let tail = self.zero_or_more(tail_char);
        self.sequence([letter, tail])
    }

    // === Names and Root ===

    /// Give `rule` a name that references can resolve to.
    pub fn define(&mut self, name: impl Into<String>, rule: RuleId) -> Result<RuleId, GrammarError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(GrammarError::DuplicateRule { name });
        }
        self.names.insert(name, rule);
        Ok(rule)
    }

    pub fn root(&mut self, rule: RuleId) -> &mut Self {
        self.root = Some(Root::Id(rule));
        self
    }

    /// Use the rule defined under `name` as the root.
    pub fn root_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.root = Some(Root::Named(name.into()));
        self
    }

    /// Resolve references, validate the tree and produce the grammar.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let GrammarBuilder {
            name,
            extensions,
            config,
            mut arena,
            names,
            root,
        } = self;

        let root = match root {
            Some(Root::Id(id)) => id,
            Some(Root::Named(rule)) => match names.get(&rule) {
                Some(&id) => id,
                None => return Err(GrammarError::UnknownRoot { name: rule }),
            },
            None => return Err(GrammarError::MissingRoot { grammar: name }),
        };
        if !arena.contains(root) {
            return Err(GrammarError::DanglingRoot { rule: root });
        }

        validate::check_structure(&arena, &names)?;
        arena.resolve(&names)?;
        validate::check_left_recursion(&arena, &names)?;

        debug!(
            grammar = %name,
            nodes = arena.len(),
            rules = names.len(),
            "grammar built"
        );
        Ok(Grammar::new(name, extensions, config, arena, names, root))
    }
}
