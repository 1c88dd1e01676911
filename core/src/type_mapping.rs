#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts Go type expressions into TypeScript type expressions.
//! Handles primitives, slices/arrays, maps, pointers and references to other structs.
//!
//! Mapping is total: shapes with no structural TypeScript counterpart degrade to
//! the configured fallback token (`any` by default).

use crate::error::{AppError, AppResult};
use crate::parser::TypeExpression;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::Display;

/// The default fallback token for unmappable shapes.
pub const DEFAULT_FALLBACK: &str = "any";

/// Represents a rendered TypeScript type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// A TypeScript keyword type (`string`, `number`, `boolean`).
    Primitive(String),
    /// An array of the inner type (`T[]`).
    Array(Box<TsType>),
    /// A dictionary (`Record<K, V>`).
    Record(Box<TsType>, Box<TsType>),
    /// A reference to another interface, emitted verbatim.
    Reference(String),
    /// The fallback token for shapes that could not be mapped.
    Unknown(String),
}

impl Display for TsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TsType::Primitive(s) | TsType::Reference(s) | TsType::Unknown(s) => write!(f, "{}", s),
            TsType::Array(inner) => write!(f, "{}[]", inner),
            TsType::Record(key, value) => write!(f, "Record<{}, {}>", key, value),
        }
    }
}

/// Immutable lookup table driving the mapper.
///
/// Keys are matched exactly (case sensitive) against primitive names and
/// named references, so qualified names like `time.Time` can be listed too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// Go type name -> TypeScript type.
    pub types: IndexMap<String, String>,
    /// Token emitted for unsupported shapes.
    pub fallback: String,
}

impl Default for MappingConfig {
    fn default() -> Self {
        let mut types = IndexMap::new();
        types.insert("string".to_string(), "string".to_string());
        for int in [
            "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
            "uint64", "float32", "float64", "byte", "rune",
        ] {
            types.insert(int.to_string(), "number".to_string());
        }
        types.insert("bool".to_string(), "boolean".to_string());
        types.insert("[]byte".to_string(), "string".to_string());
        types.insert("time.Time".to_string(), "string".to_string());

        Self {
            types,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// User supplied additions to the default table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingOverrides {
    /// Extra or replacement entries.
    pub types: IndexMap<String, String>,
    /// Replacement fallback token.
    pub fallback: Option<String>,
}

impl MappingConfig {
    /// Layers `overrides` on top of this table.
    ///
    /// Entries with an empty Go or TypeScript name are rejected.
    pub fn merge(mut self, overrides: MappingOverrides) -> AppResult<Self> {
        for (go, ts) in overrides.types {
            let (go, ts) = (go.trim().to_string(), ts.trim().to_string());
            if go.is_empty() || ts.is_empty() {
                return Err(AppError::Config(format!(
                    "type mapping entries need both a Go and a TypeScript name (got {:?} -> {:?})",
                    go, ts
                )));
            }
            self.types.insert(go, ts);
        }

        if let Some(fallback) = overrides.fallback {
            let fallback = fallback.trim().to_string();
            if fallback.is_empty() {
                return Err(AppError::Config("fallback type must not be empty".into()));
            }
            self.fallback = fallback;
        }

        Ok(self)
    }
}

/// Trait for converting Go type expressions to TypeScript types.
pub trait TypeMapper {
    /// Maps a type expression. Never fails.
    fn map(&self, expr: &TypeExpression) -> TsType;

    /// Maps a type expression straight to its rendered text.
    fn map_type(&self, expr: &TypeExpression) -> String {
        self.map(expr).to_string()
    }
}

/// A standard implementation of `TypeMapper`.
#[derive(Debug, Clone, Default)]
pub struct GoToTsMapper {
    config: MappingConfig,
}

impl GoToTsMapper {
    /// Creates a mapper over a fixed table.
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    fn lookup(&self, name: &str) -> Option<TsType> {
        self.config
            .types
            .get(name)
            .map(|ts| TsType::Primitive(ts.clone()))
    }

    fn unknown(&self) -> TsType {
        TsType::Unknown(self.config.fallback.clone())
    }
}

impl TypeMapper for GoToTsMapper {
    fn map(&self, expr: &TypeExpression) -> TsType {
        match expr {
            TypeExpression::Pointer(inner) => self.map(inner),
            TypeExpression::Primitive(name) => self.lookup(name).unwrap_or_else(|| {
                tracing::debug!(primitive = %name, "no mapping for primitive, using fallback");
                self.unknown()
            }),
            TypeExpression::Array(element) => TsType::Array(Box::new(self.map(element))),
            TypeExpression::Map(key, value) => {
                TsType::Record(Box::new(self.map(key)), Box::new(self.map(value)))
            }
            TypeExpression::Named(name) => self
                .lookup(name)
                .unwrap_or_else(|| TsType::Reference(name.clone())),
            TypeExpression::Unsupported(kind) => {
                tracing::debug!(kind = %kind, "unsupported type shape, using fallback");
                self.unknown()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TypeExpression as T;

    fn map(expr: &T) -> String {
        GoToTsMapper::default().map_type(expr)
    }

    #[test]
    fn test_primitive_mapping() {
        let cases = vec![
            ("string", "string"),
            ("int", "number"),
            ("int8", "number"),
            ("int16", "number"),
            ("int32", "number"),
            ("int64", "number"),
            ("uint", "number"),
            ("uint8", "number"),
            ("uint16", "number"),
            ("uint32", "number"),
            ("uint64", "number"),
            ("float32", "number"),
            ("float64", "number"),
            ("byte", "number"),
            ("rune", "number"),
            ("bool", "boolean"),
            ("[]byte", "string"),
        ];

        for (input, expected) in cases {
            assert_eq!(map(&T::primitive(input)), expected, "{}", input);
        }
    }

    #[test]
    fn test_timestamp_is_string() {
        assert_eq!(map(&T::named("time.Time")), "string");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(map(&T::named("String")), "String");
        assert_eq!(map(&T::primitive("Int")), "any");
    }

    #[test]
    fn test_unmapped_primitive_falls_back() {
        assert_eq!(map(&T::primitive("complex128")), "any");
    }

    #[test]
    fn test_named_passthrough() {
        assert_eq!(map(&T::named("Address")), "Address");
        assert_eq!(map(&T::named("models.User")), "models.User");
    }

    #[test]
    fn test_pointer_transparency() {
        let shapes = vec![
            T::primitive("int"),
            T::named("Address"),
            T::array(T::primitive("string")),
            T::map(T::primitive("string"), T::named("Item")),
            T::unsupported("chan"),
        ];
        for shape in shapes {
            let plain = map(&shape);
            assert_eq!(map(&T::pointer(shape.clone())), plain);
            assert_eq!(map(&T::pointer(T::pointer(shape))), plain);
        }
    }

    #[test]
    fn test_array_suffix() {
        let shapes = vec![
            T::primitive("float64"),
            T::named("Item"),
            T::array(T::primitive("int")),
            T::map(T::primitive("string"), T::primitive("int")),
        ];
        for shape in shapes {
            assert_eq!(map(&T::array(shape.clone())), format!("{}[]", map(&shape)));
        }
        assert_eq!(map(&T::array(T::array(T::named("Item")))), "Item[][]");
    }

    #[test]
    fn test_map_key_value_order() {
        assert_eq!(
            map(&T::map(T::primitive("string"), T::primitive("string"))),
            "Record<string, string>"
        );
        assert_eq!(
            map(&T::map(T::primitive("int"), T::primitive("bool"))),
            "Record<number, boolean>"
        );
        assert_eq!(
            map(&T::map(
                T::primitive("string"),
                T::array(T::pointer(T::named("Item")))
            )),
            "Record<string, Item[]>"
        );
    }

    #[test]
    fn test_unsupported_falls_back() {
        assert_eq!(map(&T::unsupported("chan")), "any");
        assert_eq!(map(&T::unsupported("func")), "any");
        assert_eq!(
            map(&T::map(T::primitive("string"), T::unsupported("interface"))),
            "Record<string, any>"
        );
    }

    #[test]
    fn test_merge_overrides() {
        let overrides = MappingOverrides {
            types: IndexMap::from([
                ("uuid.UUID".to_string(), "string".to_string()),
                ("int64".to_string(), "bigint".to_string()),
            ]),
            fallback: Some("unknown".to_string()),
        };
        let mapper = GoToTsMapper::new(MappingConfig::default().merge(overrides).unwrap());

        assert_eq!(mapper.map_type(&T::named("uuid.UUID")), "string");
        assert_eq!(mapper.map_type(&T::primitive("int64")), "bigint");
        assert_eq!(mapper.map_type(&T::primitive("int32")), "number");
        assert_eq!(mapper.map_type(&T::unsupported("chan")), "unknown");
    }

    #[test]
    fn test_merge_rejects_empty_entries() {
        let overrides = MappingOverrides {
            types: IndexMap::from([(" ".to_string(), "string".to_string())]),
            fallback: None,
        };
        let err = MappingConfig::default().merge(overrides).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let overrides = MappingOverrides {
            types: IndexMap::new(),
            fallback: Some(String::new()),
        };
        assert!(MappingConfig::default().merge(overrides).is_err());
    }

    #[test]
    fn test_overrides_deserialize() {
        let json = r#"{ "types": { "decimal.Decimal": "string" }, "fallback": "unknown" }"#;
        let overrides: MappingOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.types.get("decimal.Decimal").map(String::as_str), Some("string"));
        assert_eq!(overrides.fallback.as_deref(), Some("unknown"));

        let bad = r#"{ "typo": {} }"#;
        assert!(serde_json::from_str::<MappingOverrides>(bad).is_err());
    }
}
