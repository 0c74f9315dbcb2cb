//! Class model database
//!
//! Stores class definitions and aggregation edges in document order, plus the
//! first-match indexes used to resolve multiplicities and walk the hierarchy.

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;
use tracing::trace;

use crate::core::{Database, TagFields};

/// A typed field of a class, taken from an `<Attribute name=".." type=".."/>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
        }
    }

    /// Assemble an attribute from tag fields; `None` unless both `name` and `type` are present
    pub fn from_fields(fields: &TagFields) -> Option<Self> {
        Some(Self::new(fields.get("name")?, fields.get("type")?))
    }
}

/// A class definition with its mandatory fields validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub name: String,
    pub is_root: bool,
    pub attributes: Vec<Attribute>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_root: false,
            attributes: Vec::new(),
        }
    }

    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = is_root;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// Which end of an aggregation edge a class sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Source,
    Target,
}

/// An aggregation from a source (part) class to a target (whole) class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationEdge {
    pub source: String,
    pub target: String,
    pub source_multiplicity: Option<String>,
    pub target_multiplicity: Option<String>,
}

impl AggregationEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_multiplicity: None,
            target_multiplicity: None,
        }
    }

    pub fn with_source_multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.source_multiplicity = Some(multiplicity.into());
        self
    }

    pub fn with_target_multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.target_multiplicity = Some(multiplicity.into());
        self
    }

    /// Build an edge from tag fields; `None` unless both `source` and `target` are present
    pub fn from_fields(fields: &TagFields) -> Option<Self> {
        let mut edge = Self::new(fields.get("source")?, fields.get("target")?);
        edge.source_multiplicity = fields.get("sourceMultiplicity").map(str::to_string);
        edge.target_multiplicity = fields.get("targetMultiplicity").map(str::to_string);
        Some(edge)
    }

    /// Multiplicity string written for the given role
    pub fn multiplicity(&self, role: Role) -> Option<&str> {
        match role {
            Role::Source => self.source_multiplicity.as_deref(),
            Role::Target => self.target_multiplicity.as_deref(),
        }
    }
}

/// Class model database
#[derive(Debug, Default)]
pub struct ModelDatabase {
    classes: Vec<ClassDefinition>,
    edges: Vec<AggregationEdge>,
    class_index: HashMap<String, usize>,
    first_as_source: HashMap<String, usize>,
    first_as_target: HashMap<String, usize>,
    sources_by_target: HashMap<String, Vec<String>>,
}

impl ModelDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: ClassDefinition) -> Result<()> {
        trace!(class = %class.name, is_root = class.is_root, "Adding class");
        self.class_index
            .entry(class.name.clone())
            .or_insert(self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    pub fn add_edge(&mut self, edge: AggregationEdge) -> Result<()> {
        trace!(source = %edge.source, target = %edge.target, "Adding aggregation");
        let index = self.edges.len();
        self.first_as_source
            .entry(edge.source.clone())
            .or_insert(index);
        self.first_as_target
            .entry(edge.target.clone())
            .or_insert(index);
        self.sources_by_target
            .entry(edge.target.clone())
            .or_default()
            .push(edge.source.clone());
        self.edges.push(edge);
        Ok(())
    }

    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    pub fn edges(&self) -> &[AggregationEdge] {
        &self.edges
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// First class defined with this name
    pub fn get_class(&self, name: &str) -> Option<&ClassDefinition> {
        self.class_index.get(name).map(|&i| &self.classes[i])
    }

    /// The edge that fixes a class's multiplicity.
    ///
    /// The first edge naming the class as source wins; otherwise the first
    /// edge naming it as target.
    pub fn find_edge(&self, class: &str) -> Option<(&AggregationEdge, Role)> {
        if let Some(&i) = self.first_as_source.get(class) {
            return Some((&self.edges[i], Role::Source));
        }
        self.first_as_target
            .get(class)
            .map(|&i| (&self.edges[i], Role::Target))
    }

    /// Classes aggregated into `target`, in edge document order
    pub fn find_sources(&self, target: &str) -> &[String] {
        self.sources_by_target
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Database for ModelDatabase {
    type Node = ClassDefinition;
    type Edge = AggregationEdge;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_class(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        ModelDatabase::add_edge(self, edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.get_class(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.classes.clear();
        self.edges.clear();
        self.class_index.clear();
        self.first_as_source.clear();
        self.first_as_target.clear();
        self.sources_by_target.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
