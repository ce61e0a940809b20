//! Byte-offset spans.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[pos, end)` within a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    #[must_use]
    pub const fn new(pos: u32, end: u32) -> Self {
        TextRange { pos, end }
    }

    /// An empty range at `pos`, used for insertions.
    #[inline]
    #[must_use]
    pub const fn empty(pos: u32) -> Self {
        TextRange { pos, end: pos }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.pos
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, offset: u32) -> bool {
        self.pos <= offset && offset < self.end
    }

    /// True when the two ranges share at least one byte.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &TextRange) -> bool {
        self.pos < other.end && other.pos < self.end
    }

    /// Slice the range out of `text`, returning `""` when out of bounds.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}
