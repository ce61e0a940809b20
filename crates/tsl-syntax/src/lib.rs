//! Syntax trees for the tsl lint engine.
//!
//! The tree is produced by a compiler front-end (or by `SourceBuilder` in
//! tests) and never mutated afterwards. This crate provides:
//! - `SyntaxKind`, the closed set of token and node kinds
//! - `NodeArena` with typed payload accessors
//! - `SourceFile`: text, tree, line map and comment table
//! - Tree query utilities (token lookup, positional lookup, node equality)

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod node;
pub use node::{Node, NodeArena, NodeData, NodeIndex, NodeList, VariableKind};

pub mod source_file;
pub use source_file::{SourceFile, SourceFileError};

pub mod utilities;
pub mod visit;

// Test-fixture builder: writes text and tree together
pub mod builder;
pub use builder::SourceBuilder;
