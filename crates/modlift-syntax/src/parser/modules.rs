// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! `import` and `export` declarations.

use super::Parser;
use crate::ast::*;
use crate::error::{Error, Result};
use crate::lexer::{Span, TokenKind};

impl<'a> Parser<'a> {
    /// `import(` and `import.` begin expressions, not declarations.
    pub(super) fn import_starts_expression(&self) -> bool {
        matches!(self.peek().kind, TokenKind::LeftParen | TokenKind::Dot)
    }

    /// Parses every import form:
    ///
    /// ```text
    /// import "m";
    /// import a from "m";
    /// import * as ns from "m";
    /// import { a, b as c, "d e" as f } from "m";
    /// import a, * as ns from "m";
    /// import a, { b } from "m";
    /// ```
    pub(super) fn parse_import_declaration(&mut self) -> Result<Statement> {
        let start = self.current.span.start;
        self.advance(); // consume 'import'

        let mut specifiers = Vec::new();
        if !matches!(self.current.kind, TokenKind::String(_)) {
            if self.current_identifier_name().is_some() {
                specifiers.push(ImportSpecifier::Default(self.expect_identifier()?));
                if self.eat(&TokenKind::Comma) {
                    self.parse_import_clause_tail(&mut specifiers)?;
                }
            } else {
                self.parse_import_clause_tail(&mut specifiers)?;
            }
            self.expect_contextual("from")?;
        }

        let source = self.parse_module_specifier()?;
        self.consume_semicolon()?;

        Ok(Statement::Import(ImportDeclaration {
            specifiers,
            source,
            span: self.span_from(start),
        }))
    }

    /// `* as ns` or `{ ... }`.
    fn parse_import_clause_tail(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> Result<()> {
        if self.eat(&TokenKind::Star) {
            self.expect_contextual("as")?;
            specifiers.push(ImportSpecifier::Namespace(self.expect_identifier()?));
            return Ok(());
        }

        if !self.eat(&TokenKind::LeftBrace) {
            return Err(self.unexpected_with("Expected '{' or '*' in import"));
        }

        while !self.check(&TokenKind::RightBrace) {
            let name_span = self.current.span;
            let (imported, is_binding) = self.parse_module_export_name()?;

            let local = if self.check_identifier("as") {
                self.advance();
                self.expect_identifier()?
            } else if is_binding {
                Identifier::new(imported.as_str())
            } else {
                return Err(Error::syntax(
                    format!("'{}' cannot be imported without 'as'", imported.as_str()),
                    name_span,
                ));
            };

            specifiers.push(ImportSpecifier::Named { imported, local });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RightBrace)
    }

    /// Parses every export form:
    ///
    /// ```text
    /// export * from "m";
    /// export * as ns from "m";
    /// export { a, b as c, d as "e f" };
    /// export { a as b } from "m";
    /// export var|let|const ...;
    /// export [async] function name() {}
    /// export class Name {}
    /// export default [async] function [name]() {}
    /// export default class [Name] {}
    /// export default <expression>;
    /// ```
    pub(super) fn parse_export_declaration(&mut self) -> Result<Statement> {
        let start = self.current.span.start;
        self.advance(); // consume 'export'

        match &self.current.kind {
            TokenKind::Star => {
                self.advance();
                let exported = if self.check_identifier("as") {
                    self.advance();
                    Some(self.parse_module_export_name()?.0)
                } else {
                    None
                };
                self.expect_contextual("from")?;
                let source = self.parse_module_specifier()?;
                self.consume_semicolon()?;
                Ok(Statement::ExportAll(ExportAllDeclaration {
                    exported,
                    source,
                    span: self.span_from(start),
                }))
            }
            TokenKind::Default => {
                self.advance();
                let declaration = self.parse_export_default_kind()?;
                Ok(Statement::ExportDefault(ExportDefaultDeclaration {
                    declaration,
                    span: self.span_from(start),
                }))
            }
            TokenKind::LeftBrace => self.parse_export_list(start),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_variable_declaration()?;
                self.consume_semicolon()?;
                Ok(self.export_declaration(Declaration::Variable(declaration), start))
            }
            TokenKind::Function => {
                let function = self.parse_function(false, true)?;
                Ok(self.export_declaration(Declaration::Function(function), start))
            }
            TokenKind::Async if self.async_starts_function() => {
                self.advance(); // consume 'async'
                let function = self.parse_function(true, true)?;
                Ok(self.export_declaration(Declaration::Function(function), start))
            }
            TokenKind::Class => {
                let class = self.parse_class(true)?;
                Ok(self.export_declaration(Declaration::Class(class), start))
            }
            _ => Err(self.unexpected_with("Unexpected token after 'export'")),
        }
    }

    fn export_declaration(&self, declaration: Declaration, start: usize) -> Statement {
        Statement::ExportNamed(ExportNamedDeclaration {
            declaration: Some(declaration),
            specifiers: Vec::new(),
            source: None,
            span: self.span_from(start),
        })
    }

    fn parse_export_default_kind(&mut self) -> Result<ExportDefaultKind> {
        match self.current.kind {
            TokenKind::Function => Ok(ExportDefaultKind::Function(self.parse_function(false, false)?)),
            TokenKind::Async if self.async_starts_function() => {
                self.advance(); // consume 'async'
                Ok(ExportDefaultKind::Function(self.parse_function(true, false)?))
            }
            TokenKind::Class => Ok(ExportDefaultKind::Class(self.parse_class(false)?)),
            _ => {
                let expr = self.with_in(|p| p.parse_assignment())?;
                self.consume_semicolon()?;
                Ok(ExportDefaultKind::Expression(expr))
            }
        }
    }

    /// `{ a, b as c } [from "m"];`
    fn parse_export_list(&mut self, start: usize) -> Result<Statement> {
        self.advance(); // consume '{'

        let mut specifiers = Vec::new();
        // first local that only makes sense as a re-export
        let mut non_binding: Option<(String, Span)> = None;

        while !self.check(&TokenKind::RightBrace) {
            let spec_start = self.current.span.start;
            let (local, is_binding) = self.parse_module_export_name()?;
            if !is_binding && non_binding.is_none() {
                non_binding = Some((local.as_str().to_string(), self.previous.span));
            }

            let exported = if self.check_identifier("as") {
                self.advance();
                self.parse_module_export_name()?.0
            } else {
                local.clone()
            };

            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: self.span_from(spec_start),
            });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightBrace)?;

        let source = if self.check_identifier("from") {
            self.advance();
            Some(self.parse_module_specifier()?)
        } else {
            if let Some((name, span)) = non_binding {
                return Err(Error::syntax(
                    format!("'{name}' is not a local binding and cannot be exported without 'from'"),
                    span,
                ));
            }
            None
        };
        self.consume_semicolon()?;

        Ok(Statement::ExportNamed(ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
            span: self.span_from(start),
        }))
    }

    /// An identifier name, keyword or string literal in an import/export
    /// list. The flag reports whether it could also be a local binding.
    fn parse_module_export_name(&mut self) -> Result<(ModuleExportName, bool)> {
        if let TokenKind::String(value) = &self.current.kind {
            let name = ModuleExportName::String(value.clone());
            self.advance();
            return Ok((name, false));
        }

        let is_binding = self.current_identifier_name().is_some();
        match self.current_property_name() {
            Some(name) => {
                self.advance();
                Ok((ModuleExportName::Identifier(Identifier { name }), is_binding))
            }
            None => Err(self.unexpected_with("Expected name in module declaration")),
        }
    }

    fn parse_module_specifier(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::String(value) => {
                let source = value.clone();
                self.advance();
                Ok(source)
            }
            _ => Err(self.unexpected_with("Expected module specifier string")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse_err, parse_ok, parse_stmt};
    use crate::ast::*;
    use crate::lexer::Span;

    fn import(src: &str) -> ImportDeclaration {
        match parse_stmt(src) {
            Statement::Import(decl) => decl,
            other => panic!("expected import, got {other:?}"),
        }
    }

    fn export_named(src: &str) -> ExportNamedDeclaration {
        match parse_stmt(src) {
            Statement::ExportNamed(decl) => decl,
            other => panic!("expected named export, got {other:?}"),
        }
    }

    fn named(imported: &str, local: &str) -> ImportSpecifier {
        ImportSpecifier::Named {
            imported: ModuleExportName::Identifier(Identifier::new(imported)),
            local: Identifier::new(local),
        }
    }

    #[test]
    fn test_side_effect_import() {
        let decl = import("import \"./polyfill\";");
        assert!(decl.specifiers.is_empty());
        assert_eq!(decl.source, "./polyfill");
        assert_eq!(decl.span, Span::new(0, 20));
    }

    #[test]
    fn test_default_and_named_imports() {
        let decl = import("import React, { useState, useEffect as effect } from 'react';");
        assert_eq!(
            decl.specifiers,
            vec![
                ImportSpecifier::Default(Identifier::new("React")),
                named("useState", "useState"),
                named("useEffect", "effect"),
            ]
        );
        assert_eq!(decl.source, "react");
    }

    #[test]
    fn test_namespace_import() {
        let decl = import("import def, * as ns from \"m\"");
        assert_eq!(decl.specifiers.len(), 2);
        assert_eq!(
            decl.specifiers[1],
            ImportSpecifier::Namespace(Identifier::new("ns"))
        );
    }

    #[test]
    fn test_import_keyword_and_string_names() {
        let decl = import("import { default as d, \"a-b\" as ab, } from \"m\";");
        assert_eq!(decl.specifiers[0].local(), &Identifier::new("d"));
        let ImportSpecifier::Named { imported, .. } = &decl.specifiers[1] else {
            panic!("expected named import");
        };
        assert_eq!(imported, &ModuleExportName::String("a-b".into()));
    }

    #[test]
    fn test_import_keyword_without_alias_is_error() {
        let err = parse_err("import { default } from \"m\";");
        assert!(err.message().contains("'default' cannot be imported"));
        parse_err("import { \"x y\" } from \"m\";");
    }

    #[test]
    fn test_import_requires_string_source() {
        parse_err("import x from y;");
        parse_err("import x \"m\";");
    }

    #[test]
    fn test_dynamic_import_statement() {
        let program = parse_ok("import(\"./lazy\").then(run);");
        assert!(matches!(program.body[0], Statement::Expression(_)));
    }

    #[test]
    fn test_export_all() {
        let Statement::ExportAll(decl) = parse_stmt("export * from \"./a\";") else {
            panic!("expected export all");
        };
        assert!(decl.exported.is_none());

        let Statement::ExportAll(decl) = parse_stmt("export * as utils from \"./a\";") else {
            panic!("expected export all");
        };
        assert_eq!(
            decl.exported,
            Some(ModuleExportName::Identifier(Identifier::new("utils")))
        );
    }

    #[test]
    fn test_export_list() {
        let decl = export_named("export { a, a as b, c as \"c d\", d as default };");
        assert!(decl.source.is_none());
        let exported: Vec<_> = decl.specifiers.iter().map(|s| s.exported.as_str()).collect();
        assert_eq!(exported, vec!["a", "b", "c d", "default"]);
        assert_eq!(decl.specifiers[1].span, Span::new(12, 18));
    }

    #[test]
    fn test_reexport_list() {
        let decl = export_named("export { default, \"x y\" as z } from \"./m\";");
        assert_eq!(decl.source.as_deref(), Some("./m"));
        assert_eq!(decl.specifiers[0].local.as_str(), "default");
    }

    #[test]
    fn test_export_non_binding_without_from_is_error() {
        let err = parse_err("export { default };");
        assert!(err.message().contains("without 'from'"));
        assert_eq!(err.span(), Span::new(9, 16));
    }

    #[test]
    fn test_export_declarations() {
        let decl = export_named("export const a = 1, { b } = obj;");
        let Some(declaration) = &decl.declaration else {
            panic!("expected declaration");
        };
        let names: Vec<_> = declaration.bound_names().iter().map(|id| id.name.clone()).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert!(matches!(
            export_named("export function f() {}").declaration,
            Some(Declaration::Function(_))
        ));
        assert!(matches!(
            export_named("export async function f() {}").declaration,
            Some(Declaration::Function(Function { is_async: true, .. }))
        ));
        assert!(matches!(
            export_named("export class C {}").declaration,
            Some(Declaration::Class(_))
        ));
    }

    #[test]
    fn test_export_default_forms() {
        let cases = [
            ("export default function () {}", "function"),
            ("export default function named() {}", "function"),
            ("export default async function () {}", "function"),
            ("export default class {}", "class"),
            ("export default 42;", "expression"),
            ("export default (a, b);", "expression"),
            ("export default x => x;", "expression"),
        ];
        for (src, expected) in cases {
            let Statement::ExportDefault(decl) = parse_stmt(src) else {
                panic!("expected export default for {src}");
            };
            let kind = match decl.declaration {
                ExportDefaultKind::Function(_) => "function",
                ExportDefaultKind::Class(_) => "class",
                ExportDefaultKind::Expression(_) => "expression",
            };
            assert_eq!(kind, expected, "{src}");
        }
    }

    #[test]
    fn test_export_default_span() {
        let program = parse_ok("let x;\nexport default x;");
        let Statement::ExportDefault(decl) = &program.body[1] else {
            panic!("expected export default");
        };
        assert_eq!(decl.span, Span::new(7, 24));
    }

    #[test]
    fn test_invalid_export() {
        parse_err("export 1;");
        parse_err("export let;");
    }
}
