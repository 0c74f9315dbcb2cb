//! Class metadata records
//!
//! Resolves each class's multiplicity bounds from the aggregation edge that
//! touches it and assembles one [`ClassRecord`] per class.

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, trace, Level};

use super::database::{Attribute, ModelDatabase};
use crate::core::ForgeError;

/// Cardinality bounds, kept exactly as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplicity {
    pub min: String,
    pub max: String,
}

impl Multiplicity {
    /// Parse `N` (min = max = N) or `N..M`.
    ///
    /// Each bound is a run of ASCII digits or `*`; no numeric check is made.
    pub fn parse(value: &str, class: &str) -> Result<Self, ForgeError> {
        let (min, max) = value.split_once("..").unwrap_or((value, value));

        if !is_bound(min) || !is_bound(max) {
            return Err(ForgeError::malformed_multiplicity(value, class));
        }

        Ok(Self {
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}

fn is_bound(token: &str) -> bool {
    !token.is_empty() && (token == "*" || token.bytes().all(|b| b.is_ascii_digit()))
}

/// Metadata for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    #[serde(rename = "class")]
    pub name: String,
    #[serde(rename = "isRoot")]
    pub is_root: bool,
    pub min: String,
    pub max: String,
    pub parameters: Vec<Attribute>,
}

/// Ordered class records with a first-match name index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    records: Vec<ClassRecord>,
    index: HashMap<String, usize>,
}

impl Metadata {
    pub fn new(records: Vec<ClassRecord>) -> Self {
        let mut index = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            index.entry(record.name.clone()).or_insert(i);
        }
        Self { records, index }
    }

    /// Records in document order
    pub fn records(&self) -> &[ClassRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with this class name
    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// First record flagged as root
    pub fn root(&self) -> Option<&ClassRecord> {
        self.records.iter().find(|record| record.is_root)
    }

    /// Encode the records as a JSON array indented with four spaces
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.records.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Builds [`Metadata`] from a loaded [`ModelDatabase`]
pub struct MetadataBuilder;

impl MetadataBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, database: &ModelDatabase) -> Result<Metadata> {
        let build_span = span!(
            Level::INFO,
            "build_metadata",
            class_count = database.class_count()
        );
        let _enter = build_span.enter();

        let mut records = Vec::with_capacity(database.class_count());
        for class in database.classes() {
            let (edge, role) = database
                .find_edge(&class.name)
                .ok_or_else(|| ForgeError::missing_relationship(&class.name))?;
            let written = edge
                .multiplicity(role)
                .ok_or_else(|| ForgeError::malformed_multiplicity("", &class.name))?;
            let multiplicity = Multiplicity::parse(written, &class.name)?;

            trace!(
                class = %class.name,
                ?role,
                min = %multiplicity.min,
                max = %multiplicity.max,
                "Resolved multiplicity"
            );

            records.push(ClassRecord {
                name: class.name.clone(),
                is_root: class.is_root,
                min: multiplicity.min,
                max: multiplicity.max,
                parameters: class.attributes.clone(),
            });
        }

        debug!(record_count = records.len(), "Built metadata");
        Ok(Metadata::new(records))
    }
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::database::{AggregationEdge, ClassDefinition};

    #[test]
    fn test_multiplicity_single() {
        let m = Multiplicity::parse("1", "A").unwrap();
        assert_eq!(m.min, "1");
        assert_eq!(m.max, "1");
    }

    #[test]
    fn test_multiplicity_range() {
        let m = Multiplicity::parse("1..*", "A").unwrap();
        assert_eq!(m.min, "1");
        assert_eq!(m.max, "*");

        let m = Multiplicity::parse("0..10", "A").unwrap();
        assert_eq!(m.min, "0");
        assert_eq!(m.max, "10");
    }

    #[test]
    fn test_multiplicity_malformed() {
        for value in ["", "..", "1..", "..2", "one", "1...2", "1..2..3", "-1"] {
            let err = Multiplicity::parse(value, "Wheel").unwrap_err();
            assert!(
                matches!(err, ForgeError::MalformedMultiplicity { ref class, .. } if class == "Wheel"),
                "{value:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_build_resolves_roles() {
        let mut db = ModelDatabase::new();
        db.add_class(ClassDefinition::new("School").with_root(true))
            .unwrap();
        db.add_class(
            ClassDefinition::new("Student").with_attribute(Attribute::new("name", "string")),
        )
        .unwrap();
        db.add_edge(
            AggregationEdge::new("Student", "School")
                .with_source_multiplicity("1..*")
                .with_target_multiplicity("1"),
        )
        .unwrap();

        let metadata = MetadataBuilder::new().build(&db).unwrap();
        assert_eq!(metadata.len(), 2);

        let school = metadata.get("School").unwrap();
        assert!(school.is_root);
        assert_eq!((school.min.as_str(), school.max.as_str()), ("1", "1"));
        assert!(school.parameters.is_empty());

        let student = metadata.get("Student").unwrap();
        assert_eq!((student.min.as_str(), student.max.as_str()), ("1", "*"));
        assert_eq!(student.parameters, vec![Attribute::new("name", "string")]);

        assert_eq!(metadata.root().unwrap().name, "School");
    }

    #[test]
    fn test_build_missing_relationship() {
        let mut db = ModelDatabase::new();
        db.add_class(ClassDefinition::new("Orphan").with_root(true))
            .unwrap();

        let err = MetadataBuilder::new().build(&db).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Class `Orphan` has no aggregation relationship"
        );
    }

    #[test]
    fn test_build_missing_role_multiplicity() {
        let mut db = ModelDatabase::new();
        db.add_class(ClassDefinition::new("Part")).unwrap();
        db.add_edge(AggregationEdge::new("Part", "Whole").with_target_multiplicity("1"))
            .unwrap();

        let err = MetadataBuilder::new().build(&db).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::MalformedMultiplicity { .. })
        ));
    }

    #[test]
    fn test_records_keep_document_order() {
        let mut db = ModelDatabase::new();
        db.add_class(ClassDefinition::new("Leaf")).unwrap();
        db.add_class(ClassDefinition::new("Root").with_root(true))
            .unwrap();
        db.add_edge(
            AggregationEdge::new("Leaf", "Root")
                .with_source_multiplicity("2")
                .with_target_multiplicity("1"),
        )
        .unwrap();

        let metadata = MetadataBuilder::new().build(&db).unwrap();
        let names: Vec<_> = metadata.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Leaf", "Root"]);
    }

    #[test]
    fn test_to_json_layout() {
        let metadata = Metadata::new(vec![ClassRecord {
            name: "Student".to_string(),
            is_root: false,
            min: "1".to_string(),
            max: "*".to_string(),
            parameters: vec![Attribute::new("name", "string")],
        }]);

        let expected = r#"[
    {
        "class": "Student",
        "isRoot": false,
        "min": "1",
        "max": "*",
        "parameters": [
            {
                "name": "name",
                "type": "string"
            }
        ]
    }
]"#;
        assert_eq!(metadata.to_json().unwrap(), expected);
    }

    #[test]
    fn test_to_json_empty_parameters() {
        let metadata = Metadata::new(vec![ClassRecord {
            name: "School".to_string(),
            is_root: true,
            min: "1".to_string(),
            max: "1".to_string(),
            parameters: Vec::new(),
        }]);

        let json = metadata.to_json().unwrap();
        assert!(json.contains("\"parameters\": []"));
    }
}
