#![deny(missing_docs)]

//! # struct2type Core
//!
//! Converts Go struct declarations into TypeScript interfaces.
//!
//! The engine (`type_mapping` + `codegen`) works on an already parsed
//! declaration tree and never fails. The `parser` module is the Go front end
//! that builds that tree from source text.

/// Shared error types.
pub mod error;

/// Go source parsing.
pub mod parser;

/// Struct tag parsing.
pub mod tags;

/// Type mapping logic (Go -> TypeScript).
pub mod type_mapping;

/// Interface generation.
pub mod codegen;

/// Front end + engine facade.
pub mod converter;

pub use codegen::{
    emit_field, generate_interfaces, translate_struct, EmittedField, TargetInterface,
};
pub use converter::Converter;
pub use error::{AppError, AppResult, ParseError};
pub use parser::{
    extract_struct_names, extract_structs, FieldDeclaration, StructDeclaration, TypeExpression,
};
pub use tags::{resolve_naming, FieldNaming, TagDirective};
pub use type_mapping::{GoToTsMapper, MappingConfig, MappingOverrides, TsType, TypeMapper};
