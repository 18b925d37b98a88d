// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Statement parsing.

use super::Parser;
use crate::ast::*;
use crate::error::{Error, Result};
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parses a single statement. Module declarations are rejected here;
    /// they are only valid as top-level items.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        self.nested(Self::parse_statement_unbounded)
    }

    fn parse_statement_unbounded(&mut self) -> Result<Statement> {
        match &self.current.kind {
            TokenKind::Var | TokenKind::Const => self.parse_variable_statement(),
            TokenKind::Let if self.let_starts_declaration() => self.parse_variable_statement(),
            TokenKind::Function => Ok(Statement::FunctionDeclaration(self.parse_function(false, true)?)),
            TokenKind::Async if self.async_starts_function() => {
                self.advance(); // consume 'async'
                Ok(Statement::FunctionDeclaration(self.parse_function(true, true)?))
            }
            TokenKind::Class => Ok(Statement::ClassDeclaration(self.parse_class(true)?)),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => self.parse_jump_statement(true),
            TokenKind::Continue => self.parse_jump_statement(false),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Statement::Debugger)
            }
            TokenKind::LeftBrace => Ok(Statement::Block(self.parse_block()?)),
            TokenKind::Semicolon => {
                self.advance();
                Ok(Statement::Empty)
            }
            TokenKind::Import if !self.import_starts_expression() => Err(Error::syntax(
                "import declarations may only appear at the top level of a module",
                self.current.span,
            )),
            TokenKind::Export => Err(Error::syntax(
                "export declarations may only appear at the top level of a module",
                self.current.span,
            )),
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    /// `let` is only a keyword when a binding follows it.
    fn let_starts_declaration(&self) -> bool {
        match self.peek().kind {
            TokenKind::LeftBracket | TokenKind::LeftBrace | TokenKind::Identifier(_) => true,
            kind => kind.contextual_name().is_some(),
        }
    }

    /// `async function` with no line break in between.
    pub(super) fn async_starts_function(&self) -> bool {
        let next = self.peek();
        matches!(next.kind, TokenKind::Function) && !next.newline_before
    }

    fn parse_variable_statement(&mut self) -> Result<Statement> {
        let decl = self.parse_variable_declaration()?;
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration(decl))
    }

    /// Parses `var|let|const` and its declarators, without the terminator.
    pub(super) fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration> {
        let kind = match &self.current.kind {
            TokenKind::Var => VariableKind::Var,
            TokenKind::Let => VariableKind::Let,
            TokenKind::Const => VariableKind::Const,
            _ => return Err(self.unexpected_with("Expected variable keyword")),
        };
        self.advance();

        let mut declarations = Vec::new();

        loop {
            let id = self.parse_binding_target()?;
            let init = if self.eat(&TokenKind::Equal) {
                Some(self.parse_assignment()?)
            } else {
                None
            };

            declarations.push(VariableDeclarator { id, init });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(VariableDeclaration { kind, declarations })
    }

    pub(super) fn parse_block(&mut self) -> Result<BlockStatement> {
        self.expect(&TokenKind::LeftBrace)?;
        let body = self.parse_statement_list()?;
        self.expect(&TokenKind::RightBrace)?;
        Ok(BlockStatement { body })
    }

    /// Statements up to (not including) the closing brace.
    pub(super) fn parse_statement_list(&mut self) -> Result<Vec<Statement>> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    fn parse_if_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'if'
        self.expect(&TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_switch_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'switch'
        self.expect(&TokenKind::LeftParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        self.expect(&TokenKind::LeftBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;

        while !self.check(&TokenKind::RightBrace) {
            let test = if self.eat(&TokenKind::Case) {
                Some(self.parse_expression()?)
            } else if self.check(&TokenKind::Default) {
                if seen_default {
                    return Err(Error::syntax(
                        "More than one default clause in switch statement",
                        self.current.span,
                    ));
                }
                seen_default = true;
                self.advance();
                None
            } else {
                return Err(self.unexpected_with("Expected 'case' or 'default'"));
            };
            self.expect(&TokenKind::Colon)?;

            let mut consequent = Vec::new();
            while !matches!(
                self.current.kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace | TokenKind::Eof
            ) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, consequent });
        }
        self.advance(); // consume '}'

        Ok(Statement::Switch(SwitchStatement {
            discriminant,
            cases,
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'while'
        self.expect(&TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While(WhileStatement { test, body }))
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'do'
        let body = Box::new(self.parse_statement()?);
        self.expect(&TokenKind::While)?;
        self.expect(&TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        // The semicolon after do-while is always optional
        self.eat(&TokenKind::Semicolon);
        Ok(Statement::DoWhile(DoWhileStatement { body, test }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'for'
        let is_await = self.eat(&TokenKind::Await);
        self.expect(&TokenKind::LeftParen)?;

        let saved_no_in = std::mem::replace(&mut self.no_in, true);
        let head = self.parse_for_head(is_await);
        self.no_in = saved_no_in;
        let init = match head? {
            ForHead::InOf(left) => return self.finish_for_in_of(left, is_await),
            ForHead::Init(init) => init,
        };

        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    /// Parses the part of a for head before `;`, `in` or `of`.
    fn parse_for_head(&mut self, is_await: bool) -> Result<ForHead> {
        if self.check(&TokenKind::Semicolon) && !is_await {
            return Ok(ForHead::Init(None));
        }

        let is_declaration = match self.current.kind {
            TokenKind::Var | TokenKind::Const => true,
            TokenKind::Let => self.let_starts_declaration(),
            _ => false,
        };

        if is_declaration {
            let decl = self.parse_variable_declaration()?;
            if self.check(&TokenKind::In) || self.check_identifier("of") {
                if decl.declarations.len() != 1 {
                    return Err(Error::syntax(
                        "Invalid left-hand side in for-in/for-of loop: must have a single binding",
                        self.current.span,
                    ));
                }
                return Ok(ForHead::InOf(ForInLeft::Declaration(decl)));
            }
            return Ok(ForHead::Init(Some(ForInit::Declaration(decl))));
        }

        let expr = self.parse_expression()?;
        if self.check(&TokenKind::In) || self.check_identifier("of") {
            return Ok(ForHead::InOf(ForInLeft::Expression(expr)));
        }
        Ok(ForHead::Init(Some(ForInit::Expression(expr))))
    }

    fn finish_for_in_of(&mut self, left: ForInLeft, is_await: bool) -> Result<Statement> {
        let is_of = self.check_identifier("of");
        if is_await && !is_of {
            return Err(self.unexpected_with("Expected 'of'"));
        }
        self.advance(); // consume 'in' or 'of'
        let right = if is_of {
            self.parse_assignment()?
        } else {
            self.parse_expression()?
        };
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(if is_of {
            Statement::ForOf(ForOfStatement {
                left,
                right,
                body,
                is_await,
            })
        } else {
            Statement::ForIn(ForInStatement { left, right, body })
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'return'
        let argument = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        Ok(Statement::Return(ReturnStatement { argument }))
    }

    /// Parse break/continue with an optional label on the same line.
    fn parse_jump_statement(&mut self, is_break: bool) -> Result<Statement> {
        self.advance(); // consume 'break' / 'continue'
        let label = if self.at_statement_end() {
            None
        } else {
            Some(self.expect_identifier()?)
        };
        self.consume_semicolon()?;
        Ok(if is_break {
            Statement::Break(label)
        } else {
            Statement::Continue(label)
        })
    }

    /// True where a restricted production ends: `;`, `}`, EOF or a newline.
    fn at_statement_end(&self) -> bool {
        self.current.newline_before
            || matches!(
                self.current.kind,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
            )
    }

    fn parse_throw_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'throw'
        if self.current.newline_before {
            return Err(Error::syntax("Illegal newline after throw", self.current.span));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::Throw(ThrowStatement { argument }))
    }

    fn parse_try_statement(&mut self) -> Result<Statement> {
        let start = self.current.span;
        self.advance(); // consume 'try'
        let block = self.parse_block()?;

        let handler = if self.eat(&TokenKind::Catch) {
            let param = if self.eat(&TokenKind::LeftParen) {
                let param = self.parse_binding_target()?;
                self.expect(&TokenKind::RightParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(Error::syntax("Missing catch or finally after try", start));
        }

        Ok(Statement::Try(TryStatement {
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_with_statement(&mut self) -> Result<Statement> {
        self.advance(); // consume 'with'
        self.expect(&TokenKind::LeftParen)?;
        let object = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::With(WithStatement { object, body }))
    }

    fn parse_expression_or_labeled_statement(&mut self) -> Result<Statement> {
        if self.current_identifier_name().is_some() && matches!(self.peek().kind, TokenKind::Colon) {
            let label = self.expect_identifier()?;
            self.advance(); // consume ':'
            let body = Box::new(self.parse_statement()?);
            return Ok(Statement::Labeled(LabeledStatement { label, body }));
        }

        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::Expression(ExpressionStatement { expression }))
    }
}

/// What a for-statement head turned out to be.
enum ForHead {
    /// `for (init; ...`
    Init(Option<ForInit>),
    /// `for (left in ...` / `for (left of ...`
    InOf(ForInLeft),
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse_err, parse_ok, parse_stmt};
    use crate::ast::*;

    #[test]
    fn test_parse_var_let_const() {
        for src in ["var x = 1;", "let x = 1;", "const x = 1;"] {
            assert!(matches!(parse_stmt(src), Statement::VariableDeclaration(_)));
        }
    }

    #[test]
    fn test_parse_multiple_declarations() {
        let Statement::VariableDeclaration(decl) = parse_stmt("let a = 1, b, c = 3;") else {
            panic!("expected declaration");
        };
        assert_eq!(decl.declarations.len(), 3);
        assert!(decl.declarations[1].init.is_none());
    }

    #[test]
    fn test_let_as_identifier() {
        assert!(matches!(parse_stmt("let = 5;"), Statement::Expression(_)));
    }

    #[test]
    fn test_destructuring_declaration() {
        let Statement::VariableDeclaration(decl) = parse_stmt("const { a, b: [c], ...d } = obj;") else {
            panic!("expected declaration");
        };
        let mut names = Vec::new();
        decl.declarations[0].id.bound_names(&mut names);
        let names: Vec<_> = names.iter().map(|id| id.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_parse_if_else() {
        let Statement::If(stmt) = parse_stmt("if (x) y(); else z();") else {
            panic!("expected if");
        };
        assert!(stmt.alternate.is_some());
    }

    #[test]
    fn test_parse_loops() {
        assert!(matches!(parse_stmt("while (x) {}"), Statement::While(_)));
        assert!(matches!(parse_stmt("do x++; while (x < 3)"), Statement::DoWhile(_)));
        assert!(matches!(parse_stmt("for (let i = 0; i < 3; i++) {}"), Statement::For(_)));
        assert!(matches!(parse_stmt("for (;;) break;"), Statement::For(_)));
        assert!(matches!(parse_stmt("for (const k in o) {}"), Statement::ForIn(_)));
        assert!(matches!(parse_stmt("for (x of xs) {}"), Statement::ForOf(_)));
    }

    #[test]
    fn test_for_await_of() {
        let Statement::ForOf(stmt) = parse_stmt("for await (const x of xs) {}") else {
            panic!("expected for-of");
        };
        assert!(stmt.is_await);
    }

    #[test]
    fn test_in_operator_inside_for_init_parens() {
        let Statement::For(stmt) = parse_stmt("for (var x = (a in b); x; ) {}") else {
            panic!("expected for");
        };
        assert!(matches!(stmt.init, Some(ForInit::Declaration(_))));
    }

    #[test]
    fn test_parse_switch_statement() {
        let Statement::Switch(stmt) =
            parse_stmt("switch (x) { case 1: a(); break; default: b(); }")
        else {
            panic!("expected switch");
        };
        assert_eq!(stmt.cases.len(), 2);
        assert!(stmt.cases[1].test.is_none());
    }

    #[test]
    fn test_duplicate_default_clause() {
        parse_err("switch (x) { default: break; default: break; }");
    }

    #[test]
    fn test_parse_try_catch_finally() {
        assert!(matches!(parse_stmt("try {} catch (e) {} finally {}"), Statement::Try(_)));
        assert!(matches!(parse_stmt("try {} catch {}"), Statement::Try(_)));
        parse_err("try {}");
    }

    #[test]
    fn test_return_with_newline_has_no_argument() {
        let program = parse_ok("function f() { return\n42; }");
        let Statement::FunctionDeclaration(func) = &program.body[0] else {
            panic!("expected function");
        };
        assert_eq!(func.body.len(), 2);
        assert!(matches!(func.body[0], Statement::Return(ReturnStatement { argument: None })));
    }

    #[test]
    fn test_labels() {
        let Statement::Labeled(stmt) = parse_stmt("outer: for (;;) { break outer; }") else {
            panic!("expected label");
        };
        assert_eq!(stmt.label.name, "outer");
    }

    #[test]
    fn test_throw_requires_same_line() {
        parse_err("throw\nerr;");
    }

    #[test]
    fn test_nested_import_is_rejected() {
        let err = parse_err("{ import x from \"y\"; }");
        assert!(err.message().contains("top level"));
        let err = parse_err("function f() { export const a = 1; }");
        assert!(err.message().contains("top level"));
    }

    #[test]
    fn test_async_function_declaration() {
        let Statement::FunctionDeclaration(func) = parse_stmt("async function f() { await g(); }")
        else {
            panic!("expected function");
        };
        assert!(func.is_async);
    }
}
