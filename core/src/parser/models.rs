//! # Data Models
//!
//! Declaration tree handed from the Go front end to the translation engine.

/// A Go type expression, reduced to the shapes the engine knows how to map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    /// A predeclared basic type (`int`, `string`, ...) or the byte slice `[]byte`.
    Primitive(String),
    /// A slice or fixed-length array (`[]T`, `[N]T`).
    Array(Box<TypeExpression>),
    /// A map (`map[K]V`).
    Map(Box<TypeExpression>, Box<TypeExpression>),
    /// A pointer (`*T`).
    Pointer(Box<TypeExpression>),
    /// A reference to a declared type, possibly package qualified (`Address`, `time.Time`).
    Named(String),
    /// A shape with no structural counterpart (`chan`, `func`, `interface{}`, inline `struct`).
    Unsupported(String),
}

impl TypeExpression {
    /// Creates a `Primitive` expression.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Creates a `Named` expression.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps `element` in an `Array`.
    pub fn array(element: TypeExpression) -> Self {
        Self::Array(Box::new(element))
    }

    /// Wraps `inner` in a `Pointer`.
    pub fn pointer(inner: TypeExpression) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Creates a `Map` from key and value expressions.
    pub fn map(key: TypeExpression, value: TypeExpression) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Creates an `Unsupported` expression.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported(kind.into())
    }
}

/// One member of a struct body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// The declared field name. `None` for embedded fields.
    pub name: Option<String>,
    /// The field's type.
    pub ty: TypeExpression,
    /// The raw tag content, without the surrounding quotes.
    pub tag: Option<String>,
}

impl FieldDeclaration {
    /// A field declared with an explicit name.
    pub fn named(name: impl Into<String>, ty: TypeExpression) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            tag: None,
        }
    }

    /// An embedded (anonymous) field.
    pub fn embedded(ty: TypeExpression) -> Self {
        Self {
            name: None,
            ty,
            tag: None,
        }
    }

    /// Attaches a raw tag string.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A top-level `type Name struct { ... }` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    /// The struct name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDeclaration>,
}

impl StructDeclaration {
    /// Creates a declaration from its name and ordered fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}
