//! Source span type for tracking locations in the input function.

use serde::{Deserialize, Serialize};

/// A byte range in the source text of the function being translated.
///
/// The source text itself is owned by the external parsing collaborator;
/// spans are only carried through so failures can point back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of start (inclusive)
    pub start: u32,
    /// Byte offset of end (exclusive)
    pub end: u32,
}

impl Span {
    /// A dummy span for synthetic nodes with no source location.
    pub const DUMMY: Span = Span {
        start: u32::MAX,
        end: u32::MAX,
    };

    /// Create a new span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Check if this is a dummy/unknown span.
    pub fn is_dummy(&self) -> bool {
        *self == Span::DUMMY
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::DUMMY
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_dummy() {
            write!(f, "<unknown>")
        } else {
            write!(f, "bytes {}..{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_covers_both() {
        let merged = Span::new(4, 9).merge(Span::new(1, 6));
        assert_eq!(merged, Span::new(1, 9));
    }

    #[test]
    fn test_merge_with_dummy_keeps_known_side() {
        assert_eq!(Span::DUMMY.merge(Span::new(2, 5)), Span::new(2, 5));
        assert_eq!(Span::new(2, 5).merge(Span::DUMMY), Span::new(2, 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(3, 7).to_string(), "bytes 3..7");
        assert_eq!(Span::DUMMY.to_string(), "<unknown>");
    }
}
