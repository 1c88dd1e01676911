//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! The translation engine itself never fails; errors only originate from the
//! Go source front end (`Parse`) and from the collaborators around it.

use derive_more::{Display, From};

/// Location and description of a syntax error in Go source.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, counted in characters.
    pub column: usize,
    /// What the parser expected or found.
    pub message: String,
}

impl ParseError {
    /// Builds an error positioned at byte `offset` of `source`.
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(source, offset);
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Converts a byte offset into a 1-based (line, column) pair.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let prefix = &source[..end];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    let column = prefix[line_start..].chars().count() + 1;
    (line, column)
}

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Malformed Go source.
    #[display("Parse Error: {_0}")]
    Parse(ParseError),

    /// Invalid mapping configuration.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not Config
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let src = "package x\n\ntype A struct {\n  $\n}";
        let err: AppError = ParseError::at(src, src.find('$').unwrap(), "unexpected '$'").into();
        assert_eq!(format!("{}", err), "Parse Error: 4:3: unexpected '$'");
    }

    #[test]
    fn test_parse_error_offset_past_end() {
        let err = ParseError::at("ab\ncd", 99, "eof");
        assert_eq!((err.line, err.column), (2, 3));
    }

    #[test]
    fn test_config_manual_creation() {
        let app_err = AppError::Config("bad entry".into());
        assert_eq!(format!("{}", app_err), "Config Error: bad entry");
    }
}
