//! # Lexer
//!
//! Tokenizes Go source with `logos` and applies Go's automatic semicolon
//! insertion, so the extractor only ever sees explicit `;` terminators.
//!
//! Trivia (whitespace, comments) never reaches the token stream. A newline, or a
//! block comment spanning one, becomes an empty-span `Semicolon` when the
//! previous token can end a statement.

use crate::error::{AppResult, ParseError};
use logos::Logos;
use std::ops::Range;

/// Token kinds of the Go subset the extractor cares about.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("type")]
    Type,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,
    #[token("func")]
    Func,
    #[token("var")]
    Var,
    #[token("const")]
    Const,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    Rune,
    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    String,
    #[regex(r"`[^`]*`")]
    RawString,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("*")]
    Star,
    #[token(":")]
    Colon,
    #[token("=")]
    Assign,
    #[token("<-")]
    Arrow,
    #[token("~")]
    Tilde,
    #[regex(r"[+\-/%&|^<>!]")]
    Operator,

    #[regex(r"[ \t\r\x0C\x{FEFF}]+")]
    Whitespace,
    #[token("\n")]
    #[token("\r\n")]
    Newline,
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,
    #[regex(r"/\*(?:[^*]|\*+[^*/])*\*+/")]
    BlockComment,
}

impl TokenKind {
    /// Whether a line break after this token terminates a statement.
    fn ends_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Number
                | TokenKind::Rune
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// Whether this kind opens a bracketed group.
    pub fn is_opener(self) -> bool {
        matches!(self, TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace)
    }

    /// The closer matching an opener.
    pub fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            _ => None,
        }
    }

    /// Whether this kind closes a bracketed group.
    pub fn is_closer(self) -> bool {
        matches!(self, TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace)
    }
}

/// Zero-copy token: kind + byte span into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Semicolons produced by line breaks carry an empty span.
    pub fn is_implicit(&self) -> bool {
        self.span.is_empty()
    }
}

/// Tokenizes Go source into significant tokens.
pub fn lex(source: &str) -> AppResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => return Err(unexpected_input(source, span).into()),
        };

        match kind {
            TokenKind::Whitespace | TokenKind::LineComment => {}
            TokenKind::Newline => terminate_line(&mut tokens, span.start),
            TokenKind::BlockComment => {
                if source[span.clone()].contains('\n') {
                    terminate_line(&mut tokens, span.start);
                }
            }
            _ => tokens.push(Token::new(kind, span)),
        }
    }

    terminate_line(&mut tokens, source.len());
    Ok(tokens)
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.clone()]
}

fn terminate_line(tokens: &mut Vec<Token>, offset: usize) {
    if tokens.last().is_some_and(|t| t.kind.ends_statement()) {
        tokens.push(Token::new(TokenKind::Semicolon, offset..offset));
    }
}

fn unexpected_input(source: &str, span: Range<usize>) -> ParseError {
    let text = &source[span.clone()];
    let message = match text.chars().next() {
        Some('"') | Some('`') => "unterminated string literal".to_string(),
        Some('\'') => "unterminated rune literal".to_string(),
        Some(c) => format!("unexpected character {:?}", c),
        None => "unexpected end of input".to_string(),
    };
    ParseError::at(source, span.start, message)
}
