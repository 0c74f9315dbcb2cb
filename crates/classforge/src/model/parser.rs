//! Class model parser
//!
//! Loads extracted facts into the [`ModelDatabase`], enforcing the mandatory
//! `name` and `isRoot` fields of every class.

use anyhow::Result;
use tracing::{debug, span, warn, Level};

use super::database::{AggregationEdge, ClassDefinition, ModelDatabase};
use super::extractor::{ClassBlock, FactExtractor};
use crate::core::{ForgeError, Parser};

/// Class model parser
pub struct ModelParser {
    extractor: FactExtractor,
}

impl ModelParser {
    pub fn new() -> Self {
        Self {
            extractor: FactExtractor::new(),
        }
    }

    fn class_definition(block: &ClassBlock) -> Result<ClassDefinition> {
        let name = block
            .fields
            .get("name")
            .ok_or_else(|| {
                ForgeError::missing_class_attribute("name", opening_tag(&block.text))
            })?;
        let is_root = block
            .fields
            .get("isRoot")
            .ok_or_else(|| {
                ForgeError::missing_class_attribute("isRoot", opening_tag(&block.text))
            })?;

        Ok(ClassDefinition {
            name: name.to_string(),
            is_root: is_root == "true",
            attributes: block.attributes.clone(),
        })
    }
}

/// The opening tag of a class block, for error messages
fn opening_tag(text: &str) -> &str {
    text.find('>').map_or(text, |end| &text[..=end])
}

impl Default for ModelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ModelDatabase> for ModelParser {
    fn parse(&self, input: &str, database: &mut ModelDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_model", input_len = input.len());
        let _enter = parse_span.enter();

        let facts = self.extractor.extract(input)?;

        for block in &facts.classes {
            database.add_class(Self::class_definition(block)?)?;
        }

        for tag in &facts.aggregations {
            match AggregationEdge::from_fields(&tag.fields) {
                Some(edge) => database.add_edge(edge)?,
                None => warn!(
                    aggregation = %tag.text,
                    "Skipping aggregation without source or target"
                ),
            }
        }

        debug!(
            class_count = database.class_count(),
            edge_count = database.edge_count(),
            "Loaded class model"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class-model"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        self.extractor
            .extract(input)
            .map(|facts| !facts.classes.is_empty())
            .unwrap_or(false)
    }
}
