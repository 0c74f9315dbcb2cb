//! Generation pipeline
//!
//! Coordinates the stages end to end:
//! Parser → Database → Metadata → Tree → Renderer

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{ForgeError, Parser, RenderConfig};
use crate::model::{
    BlockRenderer, Metadata, MetadataBuilder, ModelDatabase, ModelParser, TreeBuilder,
};

/// The two artefacts of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artefacts {
    pub metadata: Metadata,
    pub config: String,
}

impl Artefacts {
    /// The metadata document, a JSON array indented with four spaces
    pub fn metadata_json(&self) -> Result<String> {
        self.metadata.to_json()
    }
}

/// Runs extraction, metadata resolution and config rendering in order
pub struct Pipeline {
    parser: ModelParser,
    metadata_builder: MetadataBuilder,
    renderer: BlockRenderer,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            parser: ModelParser::new(),
            metadata_builder: MetadataBuilder::new(),
            renderer: BlockRenderer::with_config(config),
        }
    }

    /// Load the input into a fresh database
    pub fn parse(&self, input: &str) -> Result<ModelDatabase> {
        let mut database = ModelDatabase::new();
        self.parser.parse(input, &mut database)?;
        Ok(database)
    }

    /// Produce metadata and config for one input document
    pub fn run(&self, input: &str) -> Result<Artefacts> {
        let run_span = span!(Level::INFO, "pipeline", input_len = input.len());
        let _enter = run_span.enter();
        info!("Starting generation");

        let database = self.parse(input)?;
        let metadata = self.metadata_builder.build(&database)?;

        let root = metadata.root().ok_or(ForgeError::MissingRoot)?;
        debug!(root = %root.name, "Found root class");

        let tree = TreeBuilder::new(&metadata, &database).build_block(&root.name)?;
        let config = self.renderer.render(&tree);

        info!(
            class_count = metadata.len(),
            config_len = config.len(),
            "Generation completed"
        );
        Ok(Artefacts { metadata, config })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
