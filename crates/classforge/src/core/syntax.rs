//! Tag-level syntax shared by the scanner and the model
//!
//! The input grammar is flat: opening tags, self-closing tags and closing
//! tags, each carrying `key="value"` fields. Everything between tags is
//! ignored.

use std::ops::Range;

/// Which form a tag was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<Name ...>`
    Open,
    /// `<Name .../>`
    SelfClosing,
    /// `</Name>`
    Close,
}

/// Ordered `key="value"` pairs from a tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagFields {
    fields: Vec<(String, String)>,
}

impl TagFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// First value recorded for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for TagFields {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A scanned tag with its byte span in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
    pub fields: TagFields,
    pub span: Range<usize>,
}

impl Tag {
    /// True when the tag has exactly this name and form
    pub fn is(&self, name: &str, kind: TagKind) -> bool {
        self.kind == kind && self.name == name
    }
}
