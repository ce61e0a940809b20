//! Comment ranges
//!
//! Comments are not part of the syntax tree. They live in the trivia between
//! tokens, so they are found by scanning exactly those gaps and cached on the
//! source file, sorted by position.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// Create a new comment range.
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source, delimiters included.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }

    /// The comment text without its `//` or `/*` `*/` delimiters.
    pub fn get_body<'a>(&self, source: &'a str) -> &'a str {
        let text = self.get_text(source);
        if self.is_multi_line {
            let inner = text.strip_prefix("/*").unwrap_or(text);
            inner.strip_suffix("*/").unwrap_or(inner)
        } else {
            text.strip_prefix("//").unwrap_or(text)
        }
    }
}

/// Extract the comment ranges found in the trivia `source[pos..end]`.
///
/// The range is expected to hold only whitespace and comments; any other
/// byte is skipped.
pub fn scan_trivia_comments(source: &str, pos: u32, end: u32) -> Vec<CommentRange> {
    let mut comments = Vec::new();
    let bytes = source.as_bytes();
    let len = (end as usize).min(bytes.len());
    let mut pos = pos as usize;

    while pos < len {
        let ch = bytes[pos];

        if ch == b'/' && pos + 1 < len {
            let next = bytes[pos + 1];

            if next == b'/' {
                // Single-line comment
                let start = pos as u32;
                pos += 2;

                while pos < len && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }

                let has_trailing_new_line = pos < len;
                comments.push(CommentRange::new(
                    start,
                    pos as u32,
                    false,
                    has_trailing_new_line,
                ));
                continue;
            } else if next == b'*' {
                // Multi-line comment
                let start = pos as u32;
                pos += 2;

                let mut closed = false;
                while pos + 1 < len {
                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                        pos += 2;
                        closed = true;
                        break;
                    }
                    pos += 1;
                }

                if !closed {
                    pos = len; // Unclosed comment - go to end
                }

                let has_trailing_new_line =
                    pos < len && (bytes[pos] == b'\n' || bytes[pos] == b'\r');

                comments.push(CommentRange::new(
                    start,
                    pos as u32,
                    true,
                    has_trailing_new_line,
                ));
                continue;
            }
        }

        pos += 1;
    }

    comments
}

/// Comments that lie entirely inside `[pos, end)`.
///
/// `comments` must be sorted by position; the lookup is a binary search.
pub fn comments_in_range(comments: &[CommentRange], pos: u32, end: u32) -> &[CommentRange] {
    let first = comments.partition_point(|c| c.pos < pos);
    let last = comments.partition_point(|c| c.end <= end);
    if first >= last {
        &[]
    } else {
        &comments[first..last]
    }
}
