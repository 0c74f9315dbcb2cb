//! Config document renderer
//!
//! Flattens a [`Block`] tree into indented, newline-joined markup.

use super::tree::Block;
use crate::core::{Indent, RenderConfig};

/// Renders blocks with one indentation unit per nesting level
pub struct BlockRenderer {
    indent: String,
}

impl BlockRenderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self::with_indent(config.indent)
    }

    pub fn with_indent(indent: Indent) -> Self {
        Self {
            indent: indent.unit(),
        }
    }

    /// Render a root block; its own lines carry no indentation
    pub fn render(&self, block: &Block) -> String {
        self.render_at(block, 0)
    }

    /// Render `block` with its lines at `level`
    pub fn render_at(&self, block: &Block, level: usize) -> String {
        let mut lines = Vec::new();
        self.collect_lines(block, level, &mut lines);
        lines.join("\n")
    }

    fn collect_lines(&self, block: &Block, level: usize, lines: &mut Vec<String>) {
        let children = match block {
            Block::Line(text) => {
                lines.push(format!("{}{}", self.indent.repeat(level), text));
                return;
            }
            Block::Nested(children) => children,
        };

        // Nested sequences are walked with an explicit stack of open levels
        let mut stack = vec![(children.iter(), level)];
        while let Some((iter, level)) = stack.last_mut() {
            let level = *level;
            match iter.next() {
                Some(Block::Line(text)) => {
                    lines.push(format!("{}{}", self.indent.repeat(level), text))
                }
                Some(Block::Nested(nested)) => stack.push((nested.iter(), level + 1)),
                None => {
                    stack.pop();
                }
            }
        }
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}
