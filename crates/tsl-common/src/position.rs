//! Line/column positions for byte offsets.
//!
//! `LineMap` records the byte offset of every line start so offset → position
//! lookups are a binary search. Lines are split on `\n`, `\r\n` and lone `\r`.

use serde::{Deserialize, Serialize};

/// A 0-based line and byte column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Precomputed line starts for a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineMap {
    /// Build the line map for `text`.
    #[must_use]
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        let mut pos = 0usize;

        while let Some(offset) = memchr::memchr2(b'\n', b'\r', &bytes[pos..]) {
            let idx = pos + offset;
            let next = if bytes[idx] == b'\r' && bytes.get(idx + 1) == Some(&b'\n') {
                idx + 2
            } else {
                idx + 1
            };
            line_starts.push(next as u32);
            pos = next;
            if pos >= bytes.len() {
                break;
            }
        }

        LineMap {
            line_starts,
            len: text.len() as u32,
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the start of `line`, if it exists.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the
    /// end of the text.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert) => insert - 1,
        };
        Position {
            line: line as u32,
            character: offset - self.line_starts[line],
        }
    }

    /// Convert a position back to a byte offset. Columns past the end of the
    /// line are not clamped; out-of-range lines return `None`.
    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> Option<u32> {
        let start = self.line_start(position.line)?;
        let offset = start.checked_add(position.character)?;
        (offset <= self.len).then_some(offset)
    }
}
