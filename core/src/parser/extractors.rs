//! # Extraction Logic
//!
//! Recursive descent over the token stream of one Go file, collecting the
//! top-level struct declarations in source order.

use crate::error::{AppError, AppResult, ParseError};
use crate::parser::lexer::{lex, token_text, Token, TokenKind};
use crate::parser::models::{FieldDeclaration, StructDeclaration, TypeExpression};
use crate::tags::unquote;

/// Predeclared Go type names lowered to `TypeExpression::Primitive`.
const PREDECLARED: &[&str] = &[
    "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128", "byte",
    "rune",
];

/// Parses a Go source file and returns its struct declarations in source order.
pub fn extract_structs(code: &str) -> AppResult<Vec<StructDeclaration>> {
    let tokens = lex(code)?;
    let structs = Parser::new(code, tokens).parse_file()?;
    tracing::debug!(count = structs.len(), "extracted struct declarations");
    Ok(structs)
}

/// Extracts the names of all structs defined in the provided Go source code.
pub fn extract_struct_names(code: &str) -> AppResult<Vec<String>> {
    Ok(extract_structs(code)?.into_iter().map(|s| s.name).collect())
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    // --- Token cursor ---

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.nth_kind(0)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> AppResult<Token> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error_here(format!("expected {}", what))),
        }
    }

    fn ident(&mut self, what: &str) -> AppResult<String> {
        let token = self.expect(TokenKind::Ident, what)?;
        Ok(self.text(&token).to_string())
    }

    fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    fn skip_semicolons(&mut self) {
        while self.eat(TokenKind::Semicolon) {}
    }

    /// Consumes a spec terminator. `;` may be omitted before a closing `)` or `}`.
    fn end_spec(&mut self) -> AppResult<()> {
        match self.peek_kind() {
            Some(TokenKind::Semicolon) => {
                self.pos += 1;
                Ok(())
            }
            Some(TokenKind::RParen) | Some(TokenKind::RBrace) | None => Ok(()),
            _ => Err(self.error_here("expected ';' or newline")),
        }
    }

    // --- Errors ---

    fn error_here(&self, expected: impl Into<String>) -> AppError {
        let expected = expected.into();
        match self.peek() {
            Some(token) => {
                let found = if token.is_implicit() {
                    "newline".to_string()
                } else {
                    format!("'{}'", self.text(token))
                };
                ParseError::at(
                    self.source,
                    token.span.start,
                    format!("{}, found {}", expected, found),
                )
                .into()
            }
            None => ParseError::at(
                self.source,
                self.source.len(),
                format!("{}, found end of file", expected),
            )
            .into(),
        }
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> AppError {
        ParseError::at(self.source, token.span.start, message).into()
    }

    // --- Declarations ---

    fn parse_file(&mut self) -> AppResult<Vec<StructDeclaration>> {
        self.skip_semicolons();
        self.expect(TokenKind::Package, "'package' clause")?;
        self.ident("package name")?;
        self.end_spec()?;

        let mut structs = Vec::new();
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Semicolon => self.skip_semicolons(),
                TokenKind::Type => {
                    self.pos += 1;
                    self.parse_type_decl(&mut structs)?;
                    self.end_spec()?;
                }
                TokenKind::Import | TokenKind::Func | TokenKind::Var | TokenKind::Const => {
                    self.skip_declaration()?
                }
                _ => return Err(self.error_here("expected declaration")),
            }
        }

        Ok(structs)
    }

    fn parse_type_decl(&mut self, structs: &mut Vec<StructDeclaration>) -> AppResult<()> {
        if !self.at(TokenKind::LParen) {
            return self.parse_type_spec(structs);
        }

        let open = self.bump();
        loop {
            self.skip_semicolons();
            match self.peek_kind() {
                Some(TokenKind::RParen) => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => {
                    self.parse_type_spec(structs)?;
                    self.end_spec()?;
                }
                None => {
                    return Err(match &open {
                        Some(open) => self.error_at(open, "unclosed type group"),
                        None => self.error_here("expected ')'"),
                    })
                }
            }
        }
    }

    fn parse_type_spec(&mut self, structs: &mut Vec<StructDeclaration>) -> AppResult<()> {
        let name = self.ident("type name")?;

        // Type parameters are dropped; references to them pass through as names.
        if self.has_type_parameters() {
            self.skip_group()?;
            tracing::debug!(name = %name, "ignoring type parameters");
        }

        self.eat(TokenKind::Assign);

        if self.at(TokenKind::Struct) {
            let fields = self.parse_struct_body()?;
            structs.push(StructDeclaration::new(name, fields));
        } else {
            let ty = self.parse_type()?;
            tracing::debug!(name = %name, ?ty, "skipping non-struct type declaration");
        }
        Ok(())
    }

    /// `type Name[T any]` as opposed to the array type `type Name [N]T`.
    fn has_type_parameters(&self) -> bool {
        self.at(TokenKind::LBracket)
            && self.nth_kind(1) == Some(TokenKind::Ident)
            && !matches!(
                self.nth_kind(2),
                Some(TokenKind::RBracket) | Some(TokenKind::Dot) | Some(TokenKind::Operator)
            )
    }

    /// Skips `import`, `func`, `var` and `const` declarations.
    fn skip_declaration(&mut self) -> AppResult<()> {
        while let Some(kind) = self.peek_kind() {
            if kind == TokenKind::Semicolon {
                self.pos += 1;
                break;
            }
            if kind.is_opener() {
                self.skip_group()?;
            } else {
                self.pos += 1;
            }
        }
        Ok(())
    }

    /// Consumes a bracketed group, including nested groups, starting at its opener.
    fn skip_group(&mut self) -> AppResult<()> {
        let open = self
            .bump()
            .ok_or_else(|| self.error_here("expected '(', '[' or '{'"))?;
        let mut stack = vec![open.clone()];

        while let Some(top) = stack.last() {
            let expected = top.kind.closer();
            let Some(token) = self.bump() else {
                let unclosed = top.clone();
                return Err(self.error_at(
                    &unclosed,
                    format!("unclosed '{}'", self.text(&unclosed)),
                ));
            };

            if token.kind.is_opener() {
                stack.push(token);
            } else if token.kind.is_closer() {
                if Some(token.kind) != expected {
                    return Err(self.error_at(
                        &token,
                        format!("mismatched '{}'", self.text(&token)),
                    ));
                }
                stack.pop();
            }
        }
        Ok(())
    }

    // --- Structs ---

    /// Parses `struct { ... }` and returns its fields.
    fn parse_struct_body(&mut self) -> AppResult<Vec<FieldDeclaration>> {
        self.expect(TokenKind::Struct, "'struct'")?;
        let open = self.expect(TokenKind::LBrace, "'{'")?;
        let mut fields = Vec::new();

        loop {
            self.skip_semicolons();
            match self.peek_kind() {
                Some(TokenKind::RBrace) => {
                    self.pos += 1;
                    return Ok(fields);
                }
                Some(_) => {
                    self.parse_field_decl(&mut fields)?;
                    self.end_spec()?;
                }
                None => return Err(self.error_at(&open, "unclosed struct body")),
            }
        }
    }

    fn parse_field_decl(&mut self, fields: &mut Vec<FieldDeclaration>) -> AppResult<()> {
        if self.at_embedded_field() {
            let ty = self.parse_type()?;
            let tag = self.parse_tag()?;
            fields.push(FieldDeclaration {
                name: None,
                ty,
                tag,
            });
            return Ok(());
        }

        let mut names = vec![self.ident("field name")?];
        while self.eat(TokenKind::Comma) {
            names.push(self.ident("field name")?);
        }
        let ty = self.parse_type()?;
        let tag = self.parse_tag()?;

        fields.extend(names.into_iter().map(|name| FieldDeclaration {
            name: Some(name),
            ty: ty.clone(),
            tag: tag.clone(),
        }));
        Ok(())
    }

    /// Embedded fields are `T`, `*T`, `pkg.T`, `*pkg.T` or an instantiation
    /// `T[A, B]`, optionally tagged.
    fn at_embedded_field(&self) -> bool {
        match (self.peek_kind(), self.nth_kind(1)) {
            (Some(TokenKind::Star), _) => true,
            (Some(TokenKind::Ident), Some(TokenKind::Dot)) => true,
            // `Base[int]` as opposed to `Items []int` or `Grid [3]int`.
            (Some(TokenKind::Ident), Some(TokenKind::LBracket)) => self
                .matching_close(self.pos + 1)
                .is_some_and(|close| ends_field(self.tokens.get(close + 1).map(|t| t.kind))),
            (Some(TokenKind::Ident), next) => ends_field(next),
            _ => false,
        }
    }

    /// Index of the token closing the group opened at `open`, if balanced.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            if token.kind.is_opener() {
                depth += 1;
            } else if token.kind.is_closer() {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
        }
        None
    }

    fn parse_tag(&mut self) -> AppResult<Option<String>> {
        if !matches!(
            self.peek_kind(),
            Some(TokenKind::String) | Some(TokenKind::RawString)
        ) {
            return Ok(None);
        }
        let Some(token) = self.bump() else {
            return Ok(None);
        };
        unquote(self.text(&token))
            .map(Some)
            .ok_or_else(|| self.error_at(&token, "invalid escape sequence in struct tag"))
    }

    // --- Types ---

    fn parse_type(&mut self) -> AppResult<TypeExpression> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.error_here("expected type"));
        };

        match kind {
            TokenKind::Star => {
                self.pos += 1;
                Ok(TypeExpression::pointer(self.parse_type()?))
            }
            TokenKind::LBracket => {
                if self.nth_kind(1) == Some(TokenKind::RBracket) {
                    self.pos += 2;
                    let element = self.parse_type()?;
                    Ok(lower_slice(element))
                } else {
                    // [N]T and [...]T: the length has no bearing on the mapped type.
                    self.skip_group()?;
                    Ok(TypeExpression::array(self.parse_type()?))
                }
            }
            TokenKind::Map => {
                self.pos += 1;
                self.expect(TokenKind::LBracket, "'[' after 'map'")?;
                let key = self.parse_type()?;
                self.expect(TokenKind::RBracket, "']'")?;
                let value = self.parse_type()?;
                Ok(TypeExpression::map(key, value))
            }
            TokenKind::Chan => {
                self.pos += 1;
                self.eat(TokenKind::Arrow);
                self.parse_type()?;
                Ok(TypeExpression::unsupported("chan"))
            }
            TokenKind::Arrow => {
                self.pos += 1;
                self.expect(TokenKind::Chan, "'chan' after '<-'")?;
                self.parse_type()?;
                Ok(TypeExpression::unsupported("chan"))
            }
            TokenKind::Func => {
                self.pos += 1;
                self.skip_signature()?;
                Ok(TypeExpression::unsupported("func"))
            }
            TokenKind::Interface => {
                self.pos += 1;
                if !self.at(TokenKind::LBrace) {
                    return Err(self.error_here("expected '{' after 'interface'"));
                }
                self.skip_group()?;
                Ok(TypeExpression::unsupported("interface"))
            }
            TokenKind::Struct => {
                let fields = self.parse_struct_body()?;
                tracing::trace!(fields = fields.len(), "inline struct type is not synthesized");
                Ok(TypeExpression::unsupported("struct"))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.parse_type()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident => self.parse_type_name(),
            _ => Err(self.error_here("expected type")),
        }
    }

    fn parse_type_name(&mut self) -> AppResult<TypeExpression> {
        let name = self.ident("type name")?;

        let expr = if self.eat(TokenKind::Dot) {
            let member = self.ident("qualified type name")?;
            TypeExpression::named(format!("{}.{}", name, member))
        } else if name == "any" {
            TypeExpression::unsupported("interface")
        } else if PREDECLARED.contains(&name.as_str()) {
            TypeExpression::primitive(name)
        } else {
            TypeExpression::named(name)
        };

        // Type arguments of a generic instantiation are dropped.
        if self.at(TokenKind::LBracket) {
            self.skip_group()?;
        }
        Ok(expr)
    }

    /// Skips a function signature: parameters and an optional result.
    fn skip_signature(&mut self) -> AppResult<()> {
        if !self.at(TokenKind::LParen) {
            return Err(self.error_here("expected '(' after 'func'"));
        }
        self.skip_group()?;

        match self.peek_kind() {
            Some(TokenKind::LParen) => self.skip_group(),
            Some(
                TokenKind::Ident
                | TokenKind::Star
                | TokenKind::LBracket
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Arrow
                | TokenKind::Func
                | TokenKind::Interface
                | TokenKind::Struct,
            ) => self.parse_type().map(|_| ()),
            _ => Ok(()),
        }
    }
}

/// Tokens that may follow the type of an embedded field.
fn ends_field(next: Option<TokenKind>) -> bool {
    matches!(
        next,
        None | Some(TokenKind::Semicolon)
            | Some(TokenKind::RBrace)
            | Some(TokenKind::String)
            | Some(TokenKind::RawString)
    )
}

/// `[]byte` and `[]uint8` are byte sequences, every other slice is an array.
fn lower_slice(element: TypeExpression) -> TypeExpression {
    match element {
        TypeExpression::Primitive(ref name) if name == "byte" || name == "uint8" => {
            TypeExpression::primitive("[]byte")
        }
        other => TypeExpression::array(other),
    }
}
