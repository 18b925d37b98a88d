// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parser for JavaScript module source code.
//!
//! Transforms a stream of tokens into an Abstract Syntax Tree (AST).
//!
//! ## Structure
//!
//! - `mod.rs` - `Parser` state, token helpers and the program entry point
//! - `statements` - Statement parsing (if, for, while, etc.)
//! - `expressions` - Expression parsing (operators, literals, calls)
//! - `functions` - Functions, arrows, classes and binding patterns
//! - `modules` - `import` and `export` declarations
//!
//! Source is always parsed with module goal: `import`/`export` are
//! accepted at the top level only and `await` is an operator.
//!
//! ## Usage
//!
//! ```rust
//! use modlift_syntax::parser::Parser;
//!
//! let mut parser = Parser::new("import x from \"y\"; let z = x + 1;");
//! let program = parser.parse_program().expect("Should parse");
//! assert_eq!(program.body.len(), 2);
//! ```

mod expressions;
mod functions;
mod modules;
mod statements;

use crate::ast::*;
use crate::error::{Error, Result};
use crate::lexer::{Scanner, Span, Token, TokenKind};

/// Deepest recursion the parser enters before giving up with a syntax
/// error instead of overflowing the stack.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Parses module source text into a [`Program`].
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}

/// A recursive descent parser for JavaScript.
///
/// The parser is cheap to clone, which is how arrow function heads are
/// parsed speculatively.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
    previous: Token,
    /// `in` is not a binary operator (for-statement heads)
    no_in: bool,
    /// Inside a generator body, where `yield` is an operator
    in_generator: bool,
    /// Current recursion depth, bounded by [`MAX_NESTING_DEPTH`]
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given source code.
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            no_in: false,
            in_generator: false,
            depth: 0,
        }
    }

    /// Parses the source code into a Program AST node.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_module_item()?);
        }

        Ok(Program { body })
    }

    /// Parses a top-level item: a module declaration or a statement.
    fn parse_module_item(&mut self) -> Result<Statement> {
        match &self.current.kind {
            TokenKind::Import if !self.import_starts_expression() => self.parse_import_declaration(),
            TokenKind::Export => self.parse_export_declaration(),
            _ => self.parse_statement(),
        }
    }

    // ==================== Token helpers ====================

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.scanner.next_token());
    }

    /// Returns the token after `current` without consuming anything.
    fn peek(&self) -> Token {
        self.scanner.clone().next_token()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Consumes the current token if it matches.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_with(&format!("Expected {kind:?}")))
        }
    }

    /// True if the current token is the plain identifier `name`
    /// (contextual keywords such as `as`, `from`, `of`, `get`).
    fn check_identifier(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(n) if n == name)
    }

    fn expect_contextual(&mut self, name: &str) -> Result<()> {
        if self.check_identifier(name) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_with(&format!("Expected '{name}'")))
        }
    }

    /// The current token as a binding or reference name, if it can be one.
    fn current_identifier_name(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Identifier(name) => Some(name.clone()),
            TokenKind::Yield if !self.in_generator => Some("yield".to_string()),
            // `await` is always an operator in module code
            kind => kind
                .contextual_name()
                .filter(|name| !matches!(*name, "yield" | "await"))
                .map(str::to_string),
        }
    }

    /// The current token as a property name: identifiers and all keywords.
    fn current_property_name(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Identifier(name) => Some(name.clone()),
            kind => kind.keyword_text().map(str::to_string),
        }
    }

    fn expect_identifier(&mut self) -> Result<Identifier> {
        match self.current_identifier_name() {
            Some(name) => {
                self.advance();
                Ok(Identifier { name })
            }
            None => Err(self.unexpected_with("Expected identifier")),
        }
    }

    /// Automatic semicolon insertion: a `;` is optional before `}`, at the
    /// end of input, or after a line break.
    fn consume_semicolon(&mut self) -> Result<()> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(());
        }
        if self.check(&TokenKind::RightBrace) || self.is_at_end() || self.current.newline_before {
            return Ok(());
        }
        Err(self.unexpected_with("Expected ';'"))
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    /// Runs `f` with `in` re-enabled as an operator, as inside brackets.
    fn with_in<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = saved;
        result
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::syntax("Nesting too deep", self.current.span));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous.span.end.max(start))
    }

    fn unexpected(&self) -> Error {
        self.unexpected_with("Unexpected token")
    }

    fn unexpected_with(&self, context: &str) -> Error {
        let message = match &self.current.kind {
            TokenKind::Invalid(reason) => format!("Invalid or unexpected token: {reason}"),
            TokenKind::Eof => format!("{context}, found end of input"),
            kind => format!("{context}, found {}", describe(kind)),
        };
        Error::syntax(message, self.current.span)
    }
}

/// Short human-readable form of a token for error messages.
fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(name) => format!("identifier '{name}'"),
        TokenKind::PrivateIdentifier(name) => format!("'#{name}'"),
        TokenKind::String(_) => "string literal".to_string(),
        TokenKind::Number(_) | TokenKind::BigInt(_) => "number".to_string(),
        TokenKind::NoSubstitutionTemplate(_)
        | TokenKind::TemplateHead(_)
        | TokenKind::TemplateMiddle(_)
        | TokenKind::TemplateTail(_) => "template literal".to_string(),
        kind => match kind.keyword_text() {
            Some(keyword) => format!("'{keyword}'"),
            None => format!("{kind:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to parse and check it succeeds
    pub(super) fn parse_ok(src: &str) -> Program {
        let mut parser = Parser::new(src);
        match parser.parse_program() {
            Ok(program) => program,
            Err(err) => panic!("failed to parse {src:?}: {err}"),
        }
    }

    // Helper to parse and check it fails
    pub(super) fn parse_err(src: &str) -> Error {
        let mut parser = Parser::new(src);
        parser.parse_program().unwrap_err()
    }

    // Helper to parse and get first statement
    pub(super) fn parse_stmt(src: &str) -> Statement {
        parse_ok(src).body.into_iter().next().unwrap()
    }

    // Helper to parse a single expression statement
    pub(super) fn parse_expr(src: &str) -> Expression {
        match parse_stmt(src) {
            Statement::Expression(stmt) => stmt.expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        assert!(parse_ok("").body.is_empty());
        assert!(parse_ok("  // only a comment\n").body.is_empty());
    }

    #[test]
    fn test_asi_on_newline() {
        let program = parse_ok("let a = 1\nlet b = 2\na + b");
        assert_eq!(program.body.len(), 3);
    }

    #[test]
    fn test_missing_semicolon_on_same_line() {
        let err = parse_err("let a = 1 let b = 2");
        assert!(err.message().contains("Expected ';'"));
        assert_eq!(err.span(), Span::new(10, 13));
    }

    #[test]
    fn test_invalid_token_reports_reason() {
        let err = parse_err("let s = \"open");
        assert!(err.message().contains("unterminated string literal"));
    }

    #[test]
    fn test_strict_lexical_errors() {
        for (source, reason) in [
            ("let a = 1__0;", "numeric separators are only allowed between digits"),
            ("let a = 08;", "legacy octal literals are not allowed in module code"),
            ("let a = /x/gg;", "invalid regular expression flags"),
            ("let a = '\\1';", "octal escape sequences are not allowed in module code"),
        ] {
            let err = parse_err(source);
            assert!(err.message().contains(reason), "{source}: {}", err.message());
        }
    }

    #[test]
    fn test_untagged_template_escapes_must_cook() {
        let err = parse_err(r"let a = `\u{`;");
        assert!(err.message().contains("invalid unicode escape"));
        assert_eq!(err.span(), Span::new(8, 13));

        let err = parse_err(r"let a = `${b}\x`;");
        assert!(err.message().contains("invalid hexadecimal escape"));

        parse_ok(r"let a = tag`\u{`;");
        parse_ok(r"let a = tag`${b}\x`;");
    }

    #[test]
    fn test_error_at_end_of_input() {
        let err = parse_err("foo(");
        assert!(err.message().contains("end of input"));
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_NESTING_DEPTH / 2;
        parse_ok(&format!("x = {}1{};", "[".repeat(depth), "]".repeat(depth)));

        let deep = [
            format!("x = {}1{};", "[".repeat(5000), "]".repeat(5000)),
            format!("x = {}1{};", "(".repeat(5000), ")".repeat(5000)),
            format!("x = {}1;", "!".repeat(5000)),
            format!("x = {}1;", "2 ** ".repeat(5000)),
            format!("x = {}X;", "new ".repeat(5000)),
            format!("{}{}", "{".repeat(5000), "}".repeat(5000)),
            format!("{}x;", "if (a) ".repeat(5000)),
            format!("x = {}1;", "a => ".repeat(5000)),
            format!("let {}a{} = b;", "[".repeat(5000), "]".repeat(5000)),
        ];
        for src in &deep {
            let err = parse_err(src);
            assert_eq!(err.message(), "Nesting too deep", "{}", &src[..20]);
        }
    }

    #[test]
    fn test_parse_function_entry_point() {
        let program = parse("export const x = 1;").unwrap();
        assert!(matches!(program.body[0], Statement::ExportNamed(_)));
    }
}
