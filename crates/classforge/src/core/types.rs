//! Core type definitions for class model processing
//!
//! Output configuration shared by the serializer and the pipeline.

use std::fmt;

/// Indentation unit for the rendered configuration document
///
/// One unit is emitted per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Indent {
    /// A single tab character per level
    #[default]
    Tab,
    /// A fixed number of spaces per level
    Spaces(usize),
}

impl Indent {
    /// The text emitted for one nesting level
    pub fn unit(&self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(width) => " ".repeat(*width),
        }
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::Tab => write!(f, "tab"),
            Indent::Spaces(width) => write!(f, "{} spaces", width),
        }
    }
}

/// Rendering configuration for the config artefact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    pub indent: Indent,
}

impl RenderConfig {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
