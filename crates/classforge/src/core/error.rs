//! Core error types for class model processing
//!
//! This module defines the fatal conditions of the generation pipeline.
//! Every variant aborts the run; nothing is retried.

use thiserror::Error;

/// Core error types for class model processing
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Class element is missing mandatory attribute `{attribute}`: {element}")]
    MissingClassAttribute { attribute: String, element: String },

    #[error("Class `{class}` has no aggregation relationship")]
    MissingRelationship { class: String },

    #[error("No root class found")]
    MissingRoot,

    #[error("Class `{class}` is referenced by an aggregation but never defined")]
    UnresolvedClass { class: String },

    #[error("Malformed multiplicity `{value}` for class `{class}`")]
    MalformedMultiplicity { value: String, class: String },

    #[error("Failed to {action} '{path}': {source}")]
    IoError {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ForgeError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create an error for a class tag lacking `name` or `isRoot`
    pub fn missing_class_attribute(attribute: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingClassAttribute {
            attribute: attribute.into(),
            element: element.into(),
        }
    }

    /// Create an error for a class no aggregation edge touches
    pub fn missing_relationship(class: impl Into<String>) -> Self {
        Self::MissingRelationship {
            class: class.into(),
        }
    }

    /// Create an error for a failed read or write of `path`
    pub fn io_error(
        action: &'static str,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoError {
            action,
            path: path.into(),
            source,
        }
    }

    /// Create an error for a class name absent from the metadata
    pub fn unresolved_class(class: impl Into<String>) -> Self {
        Self::UnresolvedClass {
            class: class.into(),
        }
    }

    /// Create an error for a multiplicity that is neither `N` nor `N..M`
    pub fn malformed_multiplicity(value: impl Into<String>, class: impl Into<String>) -> Self {
        Self::MalformedMultiplicity {
            value: value.into(),
            class: class.into(),
        }
    }
}
