//! Grammar rule-matching engine.
//!
//! A [`Grammar`] is a tree of rule nodes stored in a [`RuleArena`] and
//! addressed by [`RuleId`]. Matching drives a [`Tokenizer`] and answers one
//! question: does the stream conform to the grammar?
//!
//! # Life Cycle
//!
//! 1. **Build**: a [`GrammarBuilder`] allocates nodes and names rules.
//!    Forward references are plain names at this point.
//! 2. **Resolve**: [`GrammarBuilder::build`] binds every reference to a node,
//!    validates the tree, and only then hands out a [`Grammar`].
//! 3. **Match**: the grammar is immutable from here on and can be shared
//!    between threads, each driving its own tokenizer.
//!
//! # Outcomes
//!
//! A match returns `Ok(true)` or `Ok(false)`; rejection is not an error.
//! `Err` is reserved for reader failures and structural grammar defects.
//!
//! [`Tokenizer`]: tortue_lexer::Tokenizer

mod arena;
mod builder;
pub mod builtin;
mod error;
mod grammar;
mod matcher;
mod node;
mod registry;
mod rule_id;
mod stack;
mod validate;

pub use arena::RuleArena;
pub use builder::GrammarBuilder;
pub use error::{GrammarError, MatchError};
pub use grammar::Grammar;
pub use node::{CharClass, RuleNode};
pub use registry::GrammarRegistry;
pub use rule_id::RuleId;
