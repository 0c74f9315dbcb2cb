//! Core parser trait for diagram markup
//!
//! This trait defines the interface for loading diagram markup into a
//! database.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use classforge::core::{Database, Parser};
/// use classforge::model::{ModelDatabase, ModelParser};
///
/// let parser = ModelParser::new();
/// let mut db = ModelDatabase::new();
/// parser
///     .parse(r#"<Class name="A" isRoot="true"></Class>"#, &mut db)
///     .unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram markup into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
