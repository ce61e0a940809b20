//! A parsed source file: text, node arena, line map and comment table.

use crate::node::{NodeArena, NodeIndex};
use crate::{SyntaxKind, visit};
use thiserror::Error;
use tsl_common::comments::{CommentRange, comments_in_range, scan_trivia_comments};
use tsl_common::position::{LineMap, Position};

/// Why a tree was rejected when assembling a `SourceFile`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceFileError {
    #[error("root node {0:?} is not a SourceFile")]
    InvalidRoot(NodeIndex),
    #[error("node {index:?} has span [{start}, {end}) outside the text (length {len})")]
    SpanOutOfBounds {
        index: NodeIndex,
        start: u32,
        end: u32,
        len: u32,
    },
    #[error("child {child:?} does not point back to its parent {parent:?}")]
    BrokenParentLink { parent: NodeIndex, child: NodeIndex },
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    file_name: String,
    text: String,
    arena: NodeArena,
    root: NodeIndex,
    line_map: LineMap,
    comments: Vec<CommentRange>,
}

impl SourceFile {
    /// Assemble a source file from a tree produced by a parser, validating
    /// spans and parent links.
    pub fn new(
        file_name: impl Into<String>,
        text: impl Into<String>,
        arena: NodeArena,
        root: NodeIndex,
    ) -> Result<SourceFile, SourceFileError> {
        let text = text.into();
        let len = text.len() as u32;
        if arena.kind(root) != Some(SyntaxKind::SourceFile) {
            return Err(SourceFileError::InvalidRoot(root));
        }
        for index in arena.indices() {
            let Some(node) = arena.get(index) else {
                continue;
            };
            if node.pos > node.start || node.start > node.end || node.end > len {
                return Err(SourceFileError::SpanOutOfBounds {
                    index,
                    start: node.start,
                    end: node.end,
                    len,
                });
            }
            for &child in &node.children {
                if arena.parent(child) != index {
                    return Err(SourceFileError::BrokenParentLink {
                        parent: index,
                        child,
                    });
                }
            }
        }
        Ok(SourceFile::assemble(file_name.into(), text, arena, root))
    }

    pub(crate) fn assemble(
        file_name: String,
        text: String,
        arena: NodeArena,
        root: NodeIndex,
    ) -> SourceFile {
        let line_map = LineMap::build(&text);
        let comments = collect_comments(&text, &arena, root);
        SourceFile {
            file_name,
            text,
            arena,
            root,
            line_map,
            comments,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    #[must_use]
    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// All comments in the file, sorted by position.
    #[must_use]
    pub fn comments(&self) -> &[CommentRange] {
        &self.comments
    }

    /// Comments in the leading trivia of a node.
    #[must_use]
    pub fn leading_comments(&self, index: NodeIndex) -> &[CommentRange] {
        match self.arena.get(index) {
            Some(node) => comments_in_range(&self.comments, node.pos, node.start),
            None => &[],
        }
    }

    /// Source text of a node, trivia excluded.
    #[must_use]
    pub fn node_text(&self, index: NodeIndex) -> &str {
        self.arena
            .get(index)
            .and_then(|n| self.text.get(n.start as usize..n.end as usize))
            .unwrap_or("")
    }

    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        self.line_map.offset_to_position(offset)
    }
}

/// Scan the trivia before every token. Comments only ever sit in those gaps,
/// and the end-of-file token's gap covers trailing comments.
fn collect_comments(text: &str, arena: &NodeArena, root: NodeIndex) -> Vec<CommentRange> {
    let mut comments = Vec::new();
    for token in visit::tokens(arena, root) {
        if let Some(node) = arena.get(token)
            && node.pos < node.start
        {
            comments.extend(scan_trivia_comments(text, node.pos, node.start));
        }
    }
    comments
}
