//! # Converter
//!
//! Glues the Go front end to the translator. Holds one immutable mapper so a
//! single `Converter` can be shared across threads and reused for many files.

use crate::codegen::generate_interfaces;
use crate::error::AppResult;
use crate::parser::{extract_structs, StructDeclaration};
use crate::type_mapping::{GoToTsMapper, MappingConfig};

/// Converts Go struct declarations to TypeScript interfaces.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    mapper: GoToTsMapper,
}

impl Converter {
    /// Creates a converter using the given mapping table.
    pub fn new(config: MappingConfig) -> Self {
        Self {
            mapper: GoToTsMapper::new(config),
        }
    }

    /// Converts already parsed declarations. Never fails.
    pub fn convert_declarations(&self, decls: &[StructDeclaration]) -> String {
        generate_interfaces(decls, &self.mapper)
    }

    /// Parses Go source and converts every struct declaration it contains.
    pub fn convert_source(&self, code: &str) -> AppResult<String> {
        let decls = extract_structs(code)?;
        Ok(self.convert_declarations(&decls))
    }
}
