//! Text edits expressed against syntax nodes.
//!
//! Rules never slice offsets by hand; they ask the fixer for edits relative
//! to nodes and tokens so every edit carries the file name and exact span.

use tsl_common::{Fix, TextEdit};
use tsl_syntax::{NodeIndex, SourceFile};

#[derive(Clone, Copy)]
pub struct Fixer<'a> {
    file: &'a SourceFile,
}

impl<'a> Fixer<'a> {
    #[must_use]
    pub fn new(file: &'a SourceFile) -> Self {
        Fixer { file }
    }

    /// `[start, end)` of a node without its leading trivia.
    #[must_use]
    pub fn range(&self, node: NodeIndex) -> (u32, u32) {
        self.file
            .arena()
            .get(node)
            .map_or((0, 0), |n| (n.start, n.end))
    }

    #[must_use]
    pub fn replace_range(&self, start: u32, end: u32, text: impl Into<String>) -> TextEdit {
        TextEdit::new(self.file.file_name(), start, end, text)
    }

    #[must_use]
    pub fn remove_range(&self, start: u32, end: u32) -> TextEdit {
        self.replace_range(start, end, "")
    }

    #[must_use]
    pub fn replace(&self, node: NodeIndex, text: impl Into<String>) -> TextEdit {
        let (start, end) = self.range(node);
        self.replace_range(start, end, text)
    }

    #[must_use]
    pub fn remove(&self, node: NodeIndex) -> TextEdit {
        self.replace(node, "")
    }

    #[must_use]
    pub fn insert_before(&self, node: NodeIndex, text: impl Into<String>) -> TextEdit {
        let (start, _) = self.range(node);
        self.replace_range(start, start, text)
    }

    #[must_use]
    pub fn insert_after(&self, node: NodeIndex, text: impl Into<String>) -> TextEdit {
        let (_, end) = self.range(node);
        self.replace_range(end, end, text)
    }

    /// Source text of a node, for fixes that move code around.
    #[must_use]
    pub fn text(&self, node: NodeIndex) -> &'a str {
        self.file.node_text(node)
    }

    #[must_use]
    pub fn fix(&self, description: impl Into<String>, edits: Vec<TextEdit>) -> Fix {
        Fix::new(description, edits)
    }
}
