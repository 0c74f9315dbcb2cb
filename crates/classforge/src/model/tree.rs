//! Aggregation tree construction
//!
//! Builds the nested [`Block`] structure for a class and everything
//! aggregated into it. The hierarchy must be acyclic; cycles are not detected.

use anyhow::Result;
use tracing::trace;

use super::database::ModelDatabase;
use super::metadata::Metadata;
use crate::core::ForgeError;

/// A staged piece of the config document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A single line of markup
    Line(String),
    /// A sequence rendered one indentation level deeper than its parent
    Nested(Vec<Block>),
}

impl Block {
    pub fn line(text: impl Into<String>) -> Self {
        Block::Line(text.into())
    }
}

/// A class block under construction
struct Frame<'a> {
    class: String,
    lines: Vec<Block>,
    sources: std::slice::Iter<'a, String>,
}

impl Frame<'_> {
    fn close(mut self) -> Block {
        self.lines.push(Block::Line(format!("</{}>", self.class)));
        Block::Nested(self.lines)
    }
}

/// Builds class blocks from metadata and the aggregation hierarchy
pub struct TreeBuilder<'a> {
    metadata: &'a Metadata,
    database: &'a ModelDatabase,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(metadata: &'a Metadata, database: &'a ModelDatabase) -> Self {
        Self { metadata, database }
    }

    /// Build `[<C>, attribute lines?, child blocks..., </C>]` for `class`
    ///
    /// Descends with an explicit stack, so deep hierarchies cannot exhaust
    /// the thread stack.
    pub fn build_block(&self, class: &str) -> Result<Block> {
        let mut ancestors: Vec<Frame<'a>> = Vec::new();
        let mut current = self.open(class)?;

        loop {
            if let Some(source) = current.sources.next() {
                let child = self.open(source)?;
                ancestors.push(std::mem::replace(&mut current, child));
                continue;
            }

            let block = current.close();
            match ancestors.pop() {
                Some(parent) => {
                    current = parent;
                    current.lines.push(block);
                }
                None => return Ok(block),
            }
        }
    }

    /// Start a block with its opening tag and attribute lines
    fn open(&self, class: &str) -> Result<Frame<'a>> {
        let record = self
            .metadata
            .get(class)
            .ok_or_else(|| ForgeError::unresolved_class(class))?;
        let sources = self.database.find_sources(class);
        trace!(class, children = sources.len(), "Building block");

        let mut lines = Vec::with_capacity(sources.len() + 3);
        lines.push(Block::Line(format!("<{}>", class)));

        if !record.parameters.is_empty() {
            lines.push(Block::Nested(
                record
                    .parameters
                    .iter()
                    .map(|p| Block::Line(format!("<{0}>{1}</{0}>", p.name, p.attr_type)))
                    .collect(),
            ));
        }

        Ok(Frame {
            class: class.to_string(),
            lines,
            sources: sources.iter(),
        })
    }
}
