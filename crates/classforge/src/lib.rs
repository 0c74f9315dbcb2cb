//! Classforge - Derive class metadata and aggregation config from class diagrams
//!
//! Reads a UML-like class diagram written as flat XML (`<Class>`,
//! `<Attribute/>` and `<Aggregation/>` elements) and produces:
//!
//! - one metadata record per class (root flag, multiplicity bounds, attributes)
//! - a nested XML config document following the aggregation hierarchy from the
//!   root class
//!
//! # Quick Start
//!
//! ```rust
//! use classforge::generate;
//!
//! let input = r#"
//! <Class name="School" isRoot="true"></Class>
//! <Class name="Student" isRoot="false">
//!     <Attribute name="name" type="string"/>
//! </Class>
//! <Aggregation source="Student" target="School" sourceMultiplicity="1..*" targetMultiplicity="1"/>
//! "#;
//!
//! let artefacts = generate(input).unwrap();
//! assert_eq!(
//!     artefacts.config,
//!     "<School>\n\t<Student>\n\t\t<name>string</name>\n\t</Student>\n</School>"
//! );
//! assert_eq!(artefacts.metadata.len(), 2);
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use classforge::prelude::*;
//!
//! let input = r#"
//! <Class name="Car" isRoot="true"></Class>
//! <Class name="Wheel" isRoot="false"></Class>
//! <Aggregation source="Wheel" target="Car" sourceMultiplicity="4" targetMultiplicity="1"/>
//! "#;
//!
//! let parser = ModelParser::new();
//! let mut database = ModelDatabase::new();
//! parser.parse(input, &mut database).unwrap();
//!
//! let metadata = MetadataBuilder::new().build(&database).unwrap();
//! assert_eq!(metadata.get("Wheel").unwrap().max, "4");
//!
//! let tree = TreeBuilder::new(&metadata, &database).build_block("Car").unwrap();
//! let config = BlockRenderer::new().render(&tree);
//! assert_eq!(config, "<Car>\n\t<Wheel>\n\t</Wheel>\n</Car>");
//! ```

pub mod core;
pub mod model;
pub mod pipeline;

pub use core::*;
pub use pipeline::{Artefacts, Pipeline};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Database, ForgeError, Indent, Parser, RenderConfig};
    pub use crate::model::{
        Attribute, Block, BlockRenderer, ClassRecord, FactExtractor, Metadata, MetadataBuilder,
        ModelDatabase, ModelParser, TreeBuilder,
    };
    pub use crate::pipeline::{Artefacts, Pipeline};
}

/// Generate metadata and config with the default tab indentation
///
/// # Example
/// ```rust
/// let err = classforge::generate(r#"<Class name="Alone" isRoot="true"></Class>"#).unwrap_err();
/// assert!(err.to_string().contains("Alone"));
/// ```
pub fn generate(input: &str) -> anyhow::Result<Artefacts> {
    Pipeline::new().run(input)
}

/// Generate metadata and config with a specific render configuration
pub fn generate_with_config(input: &str, config: RenderConfig) -> anyhow::Result<Artefacts> {
    Pipeline::with_config(config).run(input)
}

/// Parse markup into a database without deriving any artefact
///
/// # Example
/// ```rust
/// use classforge::parse;
///
/// let db = parse(r#"<Class name="A" isRoot="true"></Class>"#).unwrap();
/// assert_eq!(db.class_count(), 1);
/// ```
pub fn parse(input: &str) -> anyhow::Result<model::ModelDatabase> {
    Pipeline::new().parse(input)
}
