//! Class model stages
//!
//! Extraction, loading, metadata resolution, tree construction and rendering
//! of the aggregation hierarchy.

mod database;
mod extractor;
mod metadata;
mod parser;
mod renderer;
mod tree;

pub use database::{AggregationEdge, Attribute, ClassDefinition, ModelDatabase, Role};
pub use extractor::{AggregationTag, ClassBlock, ExtractedFacts, FactExtractor};
pub use metadata::{ClassRecord, Metadata, MetadataBuilder, Multiplicity};
pub use parser::ModelParser;
pub use renderer::BlockRenderer;
pub use tree::{Block, TreeBuilder};
