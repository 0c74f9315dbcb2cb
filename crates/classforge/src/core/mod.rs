//! Core abstractions for class model processing
//!
//! This module defines the traits, error taxonomy, logging and scanning
//! utilities shared by the model stages.

pub mod chumsky_utils;
mod database;
mod error;
pub mod logging;
mod parser;
mod syntax;
mod types;

pub use database::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use syntax::*;
pub use types::*;
