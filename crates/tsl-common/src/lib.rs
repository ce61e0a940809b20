//! Common types and utilities for the tsl lint engine.
//!
//! This crate provides foundational types used across all tsl crates:
//! - Common enums (`ScriptTarget`)
//! - Source spans (`TextRange`)
//! - Position/line-map types for line/column source locations
//! - Comment range scanning over trivia
//! - Diagnostics and fixes produced by lint rules

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::ScriptTarget;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::TextRange;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Comment parsing utilities
pub mod comments;
pub use comments::CommentRange;

// Diagnostics, fixes and text edits
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, EditError, Fix, TextEdit};
