//! # Struct Tags
//!
//! Parsing of Go struct tags such as `` `json:"name,omitempty" db:"name"` ``.
//!
//! A tag is a sequence of space separated `key:"value"` pairs where the value is
//! a Go quoted string. Pairs that do not follow this shape are ignored, so a
//! malformed tag simply behaves as if the directive were absent.

use regex::Regex;
use std::sync::OnceLock;

/// The tag key holding the serialization alias.
pub const JSON_KEY: &str = "json";

/// Alias value that removes a field from the output.
pub const EXCLUDE_MARKER: &str = "-";

/// Returns the unquoted value stored under `key`, if the tag has one.
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    static PAIR_RE: OnceLock<Regex> = OnceLock::new();
    let pair_re = PAIR_RE
        .get_or_init(|| Regex::new(r#"([^\s:"]+):("(?:[^"\\]|\\.)*")"#).expect("Invalid regex"));

    pair_re
        .captures_iter(tag)
        .filter(|caps| caps.get(1).is_some_and(|k| k.as_str() == key))
        .find_map(|caps| caps.get(2).and_then(|v| unquote(v.as_str())))
}

/// A parsed `json:"alias,opt1,opt2"` directive. Modifiers after the alias
/// (`omitempty`, `string`, ...) have no effect on the emitted interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDirective {
    /// The first segment. May be empty.
    pub alias: String,
}

impl TagDirective {
    /// Takes the alias segment of a directive value.
    pub fn parse(value: &str) -> Self {
        let alias = value.split(',').next().unwrap_or_default().to_string();
        Self { alias }
    }

    /// Reads the `json` directive from a raw tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        lookup(tag, JSON_KEY).map(|value| Self::parse(&value))
    }

    /// Whether the directive removes the field.
    pub fn is_excluded(&self) -> bool {
        self.alias == EXCLUDE_MARKER
    }
}

/// What a field's tag says about its emitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNaming {
    /// Drop the field.
    Exclude,
    /// Use this name instead of the declared one.
    Rename(String),
    /// Keep the declared (or derived) name.
    Inherit,
}

/// Resolves the naming decision for an optional raw tag.
pub fn resolve_naming(tag: Option<&str>) -> FieldNaming {
    match tag.and_then(TagDirective::from_tag) {
        Some(directive) if directive.is_excluded() => FieldNaming::Exclude,
        Some(directive) if !directive.alias.is_empty() => FieldNaming::Rename(directive.alias),
        _ => FieldNaming::Inherit,
    }
}

/// Unquotes a Go string literal (`"..."` with escapes, or `` `...` `` raw).
///
/// Returns `None` on invalid escapes or a missing delimiter.
pub fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return Some(raw.replace('\r', ""));
    }

    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'x' => hex_escape(&mut chars, 2)?,
            'u' => hex_escape(&mut chars, 4)?,
            'U' => hex_escape(&mut chars, 8)?,
            d @ '0'..='7' => {
                let mut value = d.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                char::from_u32(value).filter(|_| value <= 0xFF)?
            }
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
