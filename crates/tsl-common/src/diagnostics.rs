//! Diagnostic types produced by lint rules.
//!
//! A `Diagnostic` is immutable once reported. Fixes are pure data: applying
//! them is the host's responsibility, `Fix::apply` exists so hosts and tests
//! share one validated implementation.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
}

/// A single text replacement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn new(file: impl Into<String>, start: u32, end: u32, new_text: impl Into<String>) -> Self {
        TextEdit {
            file: file.into(),
            start,
            end,
            new_text: new_text.into(),
        }
    }
}

/// A named, self-contained set of edits resolving a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub description: String,
    pub edits: Vec<TextEdit>,
}

/// Why a fix could not be applied to a text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    /// An edit range ends before it starts or lies outside the text.
    OutOfBounds { start: u32, end: u32, len: u32 },
    /// Two edits touch the same bytes.
    Overlapping { first: (u32, u32), second: (u32, u32) },
    /// An edit boundary splits a UTF-8 character.
    NotCharBoundary(u32),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::OutOfBounds { start, end, len } => {
                write!(f, "edit [{start}, {end}) is outside the text (length {len})")
            }
            EditError::Overlapping { first, second } => write!(
                f,
                "edits [{}, {}) and [{}, {}) overlap",
                first.0, first.1, second.0, second.1
            ),
            EditError::NotCharBoundary(offset) => {
                write!(f, "offset {offset} is not a character boundary")
            }
        }
    }
}

impl std::error::Error for EditError {}

impl Fix {
    #[must_use]
    pub fn new(description: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Fix {
            description: description.into(),
            edits,
        }
    }

    /// Check that every edit lies within a text of `len` bytes and that no two
    /// edits overlap. Two insertions at the same offset are allowed.
    pub fn validate(&self, len: u32) -> Result<(), EditError> {
        let mut ranges: Vec<(u32, u32)> = self.edits.iter().map(|e| (e.start, e.end)).collect();
        for &(start, end) in &ranges {
            if start > end || end > len {
                return Err(EditError::OutOfBounds { start, end, len });
            }
        }
        ranges.sort_unstable();
        for pair in ranges.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            if second.0 < first.1 {
                return Err(EditError::Overlapping { first, second });
            }
        }
        Ok(())
    }

    /// Apply all edits of this fix to `text`.
    pub fn apply(&self, text: &str) -> Result<String, EditError> {
        self.validate(text.len() as u32)?;

        let mut edits: Vec<&TextEdit> = self.edits.iter().collect();
        // Stable sort keeps insertion order for edits at the same offset.
        edits.sort_by_key(|e| (e.start, e.end));

        let mut result = String::with_capacity(text.len());
        let mut cursor = 0usize;
        for edit in edits {
            let (start, end) = (edit.start as usize, edit.end as usize);
            if !text.is_char_boundary(start) {
                return Err(EditError::NotCharBoundary(edit.start));
            }
            if !text.is_char_boundary(end) {
                return Err(EditError::NotCharBoundary(edit.end));
            }
            result.push_str(&text[cursor..start]);
            result.push_str(&edit.new_text);
            cursor = end;
        }
        result.push_str(&text[cursor..]);
        Ok(result)
    }
}

/// A lint finding with optional fixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    /// Name of the rule that produced the finding
    pub rule: String,
    /// Stable identifier of the message template within the rule
    pub message_id: String,
    pub category: DiagnosticCategory,
    pub message_text: String,
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<Fix>,
}

impl Diagnostic {
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Serialize the diagnostic for hosts that exchange JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
