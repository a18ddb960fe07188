//! # Identifier Generation
//!
//! Requirement and sub-item IDs come from one shared counter, so the numeric
//! part is never reused across kinds within a process lifetime: creating a
//! requirement and then a sub-item yields `req-1` and `sub-2`.
//!
//! The sequence is not persisted. A restarted process starts again at 1.

/// Entity kind an identifier is minted for. Determines the prefix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Requirement,
    SubItem,
}

impl IdKind {
    /// The string prefix placed before the sequence number.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Requirement => "req",
            Self::SubItem => "sub",
        }
    }
}

/// Monotonic ID sequence.
///
/// Not internally synchronized; [`crate::RequirementStore`] owns one behind
/// its lock so allocation and insertion happen under the same guard.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator whose first ID has sequence number 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Mint the next identifier for `kind` and advance the sequence by one.
    pub fn next(&mut self, kind: IdKind) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}-{n}", kind.prefix())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(IdKind::Requirement), "req-1");
    }

    #[test]
    fn kinds_share_one_sequence() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(IdKind::Requirement), "req-1");
        assert_eq!(ids.next(IdKind::SubItem), "sub-2");
        assert_eq!(ids.next(IdKind::SubItem), "sub-3");
        assert_eq!(ids.next(IdKind::Requirement), "req-4");
    }

    #[test]
    fn fresh_generators_restart_the_sequence() {
        let mut a = IdGenerator::new();
        let mut b = IdGenerator::default();
        a.next(IdKind::Requirement);
        assert_eq!(a.next(IdKind::Requirement), "req-2");
        assert_eq!(b.next(IdKind::Requirement), "req-1");
    }
}
