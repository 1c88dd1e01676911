#![deny(missing_docs)]

//! # Parser Module
//!
//! Go source front end. Tokenizes a single Go file and extracts its top-level
//! struct declarations into the declaration tree consumed by the translator.
//! Everything else in the file (imports, functions, non-struct types) is skipped.

pub mod extractors;
mod lexer;
pub mod models;

pub use extractors::{extract_struct_names, extract_structs};
pub use models::{FieldDeclaration, StructDeclaration, TypeExpression};
