#![deny(missing_docs)]

//! # Code Generation
//!
//! Translates struct declarations into TypeScript interface source.
//!
//! For each field the translator decides:
//! - the emitted name: the declared name, the embedded type's name, or the `json` tag alias;
//! - whether the field is emitted at all (`json:"-"` drops it);
//! - the emitted type, delegated to a [`TypeMapper`].
//!
//! Field order is declaration order. Embedded structs become a single property
//! named after the embedded type; their members are not promoted.

use crate::parser::{FieldDeclaration, StructDeclaration, TypeExpression};
use crate::tags::{resolve_naming, FieldNaming};
use crate::type_mapping::TypeMapper;
use std::fmt::Display;

/// Name given to embedded fields whose type has no usable identifier.
pub const EMBEDDED_PLACEHOLDER: &str = "embedded";

/// One property line of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedField {
    /// The property name.
    pub name: String,
    /// The rendered TypeScript type.
    pub ty: String,
}

/// A TypeScript interface ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInterface {
    /// The interface name.
    pub name: String,
    /// Properties in declaration order.
    pub members: Vec<EmittedField>,
}

impl Display for TargetInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "interface {} {{", self.name)?;
        for member in &self.members {
            writeln!(f, "  {}: {};", member.name, member.ty)?;
        }
        write!(f, "}}")
    }
}

/// Derives the property name of an embedded field from its type.
///
/// `Base` gives `Base`, `pkg.Base` gives `Base`; any other shape (pointers included)
/// gives [`EMBEDDED_PLACEHOLDER`].
pub fn embedded_field_name(ty: &TypeExpression) -> String {
    match ty {
        TypeExpression::Named(name) | TypeExpression::Primitive(name) => name
            .rsplit('.')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(EMBEDDED_PLACEHOLDER)
            .to_string(),
        _ => EMBEDDED_PLACEHOLDER.to_string(),
    }
}

/// Translates a single field. Returns `None` when the tag excludes it.
pub fn emit_field(field: &FieldDeclaration, mapper: &dyn TypeMapper) -> Option<EmittedField> {
    let declared = match &field.name {
        Some(name) => name.clone(),
        None => embedded_field_name(&field.ty),
    };

    let name = match resolve_naming(field.tag.as_deref()) {
        FieldNaming::Exclude => {
            tracing::trace!(field = %declared, "field excluded by tag");
            return None;
        }
        FieldNaming::Rename(alias) => alias,
        FieldNaming::Inherit => declared,
    };

    Some(EmittedField {
        name,
        ty: mapper.map_type(&field.ty),
    })
}

/// Translates one struct declaration into an interface.
pub fn translate_struct(decl: &StructDeclaration, mapper: &dyn TypeMapper) -> TargetInterface {
    TargetInterface {
        name: decl.name.clone(),
        members: decl
            .fields
            .iter()
            .filter_map(|field| emit_field(field, mapper))
            .collect(),
    }
}

/// Renders every declaration, in order, separated by one blank line.
pub fn generate_interfaces(decls: &[StructDeclaration], mapper: &dyn TypeMapper) -> String {
    decls
        .iter()
        .map(|decl| translate_struct(decl, mapper).to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
