//! Rule node IDs.

use std::fmt;

/// Index into a [`RuleArena`](crate::RuleArena).
///
/// References between rules are IDs rather than pointers, so a grammar can be
/// cloned, dropped, or shared across threads without any fix-up.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        RuleId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
