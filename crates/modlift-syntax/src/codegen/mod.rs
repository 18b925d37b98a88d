// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Source printer: turns an AST back into JavaScript text.
//!
//! Output is normalized rather than preserved. Statements go one per
//! line with two-space indentation, strings are double-quoted, and
//! parentheses appear only where precedence or statement position
//! requires them.
//!
//! # Module Structure
//!
//! - `mod.rs`: `Printer` state, statements and module declarations
//! - `expressions`: Expressions, functions, classes and patterns
//!
//! ```rust
//! use modlift_syntax::{codegen, parse};
//!
//! let program = parse("let  x=1+2*3").unwrap();
//! assert_eq!(codegen::print_program(&program), "let x = 1 + 2 * 3;\n");
//! ```

mod expressions;

use std::fmt::Write as _;

use crate::ast::*;
use crate::lexer::{is_id_continue, is_id_start};

/// Prints a whole program.
pub fn print_program(program: &Program) -> String {
    print_statements(&program.body)
}

/// Prints a list of top-level statements.
pub fn print_statements(statements: &[Statement]) -> String {
    let mut printer = Printer::new();
    printer.statements(statements);
    printer.finish()
}

/// Prints a single expression.
pub fn print_expression(expr: &Expression) -> String {
    let mut printer = Printer::new();
    printer.expression(expr);
    printer.finish()
}

/// Quotes `value` as a double-quoted string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// True if `name` can follow a `.` in a member expression.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_id_start(first) && chars.all(is_id_continue),
        None => false,
    }
}

/// Emits JavaScript source for AST nodes.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    indent: usize,
    /// Inside a for-statement head, where a bare `in` must be wrapped
    no_in: bool,
}

impl Printer {
    /// Creates an empty printer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the printer, returning the text written so far.
    pub fn finish(self) -> String {
        self.out
    }

    /// Prints each statement on its own line.
    pub fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    /// Prints one statement followed by a newline.
    pub fn statement(&mut self, statement: &Statement) {
        self.write_indent();
        self.statement_inline(statement);
        self.out.push('\n');
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn statement_inline(&mut self, statement: &Statement) {
        match statement {
            Statement::VariableDeclaration(decl) => {
                self.variable_declaration(decl);
                self.push(";");
            }
            Statement::FunctionDeclaration(func) => self.function(func),
            Statement::ClassDeclaration(class) => self.class(class),
            Statement::Expression(stmt) => {
                self.statement_expression(&stmt.expression);
                self.push(";");
            }
            Statement::Block(block) => self.block(&block.body),
            Statement::If(stmt) => self.if_statement(stmt),
            Statement::Switch(stmt) => self.switch_statement(stmt),
            Statement::While(stmt) => {
                self.push("while (");
                self.expression(&stmt.test);
                self.push(")");
                self.body(&stmt.body);
            }
            Statement::DoWhile(stmt) => {
                self.push("do");
                self.body(&stmt.body);
                if matches!(*stmt.body, Statement::Block(_)) {
                    self.push(" ");
                } else {
                    self.out.push('\n');
                    self.write_indent();
                }
                self.push("while (");
                self.expression(&stmt.test);
                self.push(");");
            }
            Statement::For(stmt) => self.for_statement(stmt),
            Statement::ForIn(stmt) => {
                self.push("for (");
                self.for_left(&stmt.left);
                self.push(" in ");
                self.expression(&stmt.right);
                self.push(")");
                self.body(&stmt.body);
            }
            Statement::ForOf(stmt) => {
                self.push(if stmt.is_await { "for await (" } else { "for (" });
                self.for_left(&stmt.left);
                self.push(" of ");
                self.assignment_level(&stmt.right);
                self.push(")");
                self.body(&stmt.body);
            }
            Statement::Return(stmt) => match &stmt.argument {
                Some(argument) => {
                    self.push("return ");
                    self.expression(argument);
                    self.push(";");
                }
                None => self.push("return;"),
            },
            Statement::Break(label) => self.jump("break", label.as_ref()),
            Statement::Continue(label) => self.jump("continue", label.as_ref()),
            Statement::Throw(stmt) => {
                self.push("throw ");
                self.expression(&stmt.argument);
                self.push(";");
            }
            Statement::Try(stmt) => self.try_statement(stmt),
            Statement::With(stmt) => {
                self.push("with (");
                self.expression(&stmt.object);
                self.push(")");
                self.body(&stmt.body);
            }
            Statement::Labeled(stmt) => {
                self.push(&stmt.label.name);
                self.push(": ");
                self.statement_inline(&stmt.body);
            }
            Statement::Debugger => self.push("debugger;"),
            Statement::Empty => self.push(";"),
            Statement::Import(decl) => self.import_declaration(decl),
            Statement::ExportNamed(decl) => self.export_named(decl),
            Statement::ExportDefault(decl) => self.export_default(decl),
            Statement::ExportAll(decl) => {
                self.push("export *");
                if let Some(exported) = &decl.exported {
                    self.push(" as ");
                    self.module_export_name(exported);
                }
                self.push(" from ");
                self.push(&quote(&decl.source));
                self.push(";");
            }
        }
    }

    /// `{ ... }` with the statements indented one level.
    fn block(&mut self, body: &[Statement]) {
        if body.is_empty() {
            self.push("{}");
            return;
        }
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        self.push("{\n");
        self.indent += 1;
        self.statements(body);
        self.indent -= 1;
        self.write_indent();
        self.push("}");
        self.no_in = saved_no_in;
    }

    /// The body of a compound statement: blocks stay on the header line,
    /// anything else moves to its own indented line.
    fn body(&mut self, body: &Statement) {
        if let Statement::Block(block) = body {
            self.push(" ");
            self.block(&block.body);
        } else {
            self.out.push('\n');
            self.indent += 1;
            self.write_indent();
            self.statement_inline(body);
            self.indent -= 1;
        }
    }

    fn if_statement(&mut self, stmt: &IfStatement) {
        self.push("if (");
        self.expression(&stmt.test);
        self.push(")");

        // an inner `if` would capture the `else`
        let braced = stmt.alternate.is_some() && matches!(*stmt.consequent, Statement::If(_));
        if braced {
            self.push(" {\n");
            self.indent += 1;
            self.statement(&stmt.consequent);
            self.indent -= 1;
            self.write_indent();
            self.push("}");
        } else {
            self.body(&stmt.consequent);
        }

        let Some(alternate) = &stmt.alternate else {
            return;
        };
        if braced || matches!(*stmt.consequent, Statement::Block(_)) {
            self.push(" else");
        } else {
            self.out.push('\n');
            self.write_indent();
            self.push("else");
        }
        if matches!(**alternate, Statement::If(_)) {
            self.push(" ");
            self.statement_inline(alternate);
        } else {
            self.body(alternate);
        }
    }

    fn switch_statement(&mut self, stmt: &SwitchStatement) {
        self.push("switch (");
        self.expression(&stmt.discriminant);
        self.push(") {\n");
        self.indent += 1;
        for case in &stmt.cases {
            self.write_indent();
            match &case.test {
                Some(test) => {
                    self.push("case ");
                    self.expression(test);
                    self.push(":\n");
                }
                None => self.push("default:\n"),
            }
            self.indent += 1;
            self.statements(&case.consequent);
            self.indent -= 1;
        }
        self.indent -= 1;
        self.write_indent();
        self.push("}");
    }

    fn for_statement(&mut self, stmt: &ForStatement) {
        self.push("for (");
        if let Some(init) = &stmt.init {
            self.no_in = true;
            match init {
                ForInit::Declaration(decl) => self.variable_declaration(decl),
                ForInit::Expression(expr) => self.expression(expr),
            }
            self.no_in = false;
        }
        self.push(";");
        if let Some(test) = &stmt.test {
            self.push(" ");
            self.expression(test);
        }
        self.push(";");
        if let Some(update) = &stmt.update {
            self.push(" ");
            self.expression(update);
        }
        self.push(")");
        self.body(&stmt.body);
    }

    fn for_left(&mut self, left: &ForInLeft) {
        match left {
            ForInLeft::Declaration(decl) => self.variable_declaration(decl),
            ForInLeft::Expression(expr) => self.lhs_level(expr),
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&Identifier>) {
        self.push(keyword);
        if let Some(label) = label {
            self.push(" ");
            self.push(&label.name);
        }
        self.push(";");
    }

    fn try_statement(&mut self, stmt: &TryStatement) {
        self.push("try ");
        self.block(&stmt.block.body);
        if let Some(handler) = &stmt.handler {
            self.push(" catch ");
            if let Some(param) = &handler.param {
                self.push("(");
                self.pattern(param);
                self.push(") ");
            }
            self.block(&handler.body.body);
        }
        if let Some(finalizer) = &stmt.finalizer {
            self.push(" finally ");
            self.block(&finalizer.body);
        }
    }

    /// `kind a = 1, b` without the terminating semicolon.
    fn variable_declaration(&mut self, decl: &VariableDeclaration) {
        self.push(decl.kind.as_str());
        self.push(" ");
        for (i, declarator) in decl.declarations.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.pattern(&declarator.id);
            if let Some(init) = &declarator.init {
                self.push(" = ");
                self.assignment_level(init);
            }
        }
    }

    // ==================== Module declarations ====================

    fn import_declaration(&mut self, decl: &ImportDeclaration) {
        self.push("import ");

        if !decl.specifiers.is_empty() {
            let mut clauses = Vec::new();
            let mut named = Vec::new();
            for specifier in &decl.specifiers {
                match specifier {
                    ImportSpecifier::Default(local) => clauses.push(local.name.clone()),
                    ImportSpecifier::Namespace(local) => clauses.push(format!("* as {}", local.name)),
                    ImportSpecifier::Named { imported, local } => {
                        named.push(match imported {
                            ModuleExportName::Identifier(id) if id.name == local.name => id.name.clone(),
                            _ => format!("{} as {}", export_name_text(imported), local.name),
                        });
                    }
                }
            }
            if !named.is_empty() {
                clauses.push(format!("{{ {} }}", named.join(", ")));
            }
            self.push(&clauses.join(", "));
            self.push(" from ");
        }

        self.push(&quote(&decl.source));
        self.push(";");
    }

    fn export_named(&mut self, decl: &ExportNamedDeclaration) {
        self.push("export ");

        if let Some(declaration) = &decl.declaration {
            match declaration {
                Declaration::Variable(var) => {
                    self.variable_declaration(var);
                    self.push(";");
                }
                Declaration::Function(func) => self.function(func),
                Declaration::Class(class) => self.class(class),
            }
            return;
        }

        let specifiers: Vec<String> = decl
            .specifiers
            .iter()
            .map(|spec| {
                if spec.local == spec.exported {
                    export_name_text(&spec.local)
                } else {
                    format!(
                        "{} as {}",
                        export_name_text(&spec.local),
                        export_name_text(&spec.exported)
                    )
                }
            })
            .collect();
        if specifiers.is_empty() {
            self.push("{}");
        } else {
            self.push("{ ");
            self.push(&specifiers.join(", "));
            self.push(" }");
        }
        if let Some(source) = &decl.source {
            self.push(" from ");
            self.push(&quote(source));
        }
        self.push(";");
    }

    fn export_default(&mut self, decl: &ExportDefaultDeclaration) {
        self.push("export default ");
        match &decl.declaration {
            ExportDefaultKind::Function(func) => self.function(func),
            ExportDefaultKind::Class(class) => self.class(class),
            ExportDefaultKind::Expression(expr) => {
                if matches!(leftmost(expr), Expression::Function(_) | Expression::Class(_)) {
                    self.parenthesized(expr);
                } else {
                    self.assignment_level(expr);
                }
                self.push(";");
            }
        }
    }

    fn module_export_name(&mut self, name: &ModuleExportName) {
        let text = export_name_text(name);
        self.push(&text);
    }
}

fn export_name_text(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Identifier(id) => id.name.clone(),
        ModuleExportName::String(value) => quote(value),
    }
}

/// The expression that will be printed first, ignoring parentheses.
fn leftmost(expr: &Expression) -> &Expression {
    match expr {
        Expression::Binary(binary) => leftmost(&binary.left),
        Expression::Assignment(assign) => leftmost(&assign.left),
        Expression::Conditional(cond) => leftmost(&cond.test),
        Expression::Call(call) => leftmost(&call.callee),
        Expression::Member(member) => leftmost(&member.object),
        Expression::TaggedTemplate(tagged) => leftmost(&tagged.tag),
        Expression::Sequence(seq) => seq.expressions.first().map_or(expr, leftmost),
        Expression::Update(update) if !update.prefix => leftmost(&update.argument),
        _ => expr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn roundtrip(src: &str) -> String {
        print_program(&parse(src).unwrap())
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
        assert_eq!(quote("\u{1}"), "\"\\x01\"");
        assert_eq!(quote("caf\u{e9}"), "\"caf\u{e9}\"");
    }

    #[test]
    fn test_is_identifier_name() {
        assert!(is_identifier_name("foo"));
        assert!(is_identifier_name("$_bar1"));
        assert!(is_identifier_name("default"));
        assert!(!is_identifier_name("a-b"));
        assert!(!is_identifier_name("1x"));
        assert!(!is_identifier_name(""));
    }

    #[test]
    fn test_statements_one_per_line() {
        assert_eq!(roundtrip("var a = 1; let b\nconst c = a"), "var a = 1;\nlet b;\nconst c = a;\n");
    }

    #[test]
    fn test_blocks_and_control_flow() {
        let out = roundtrip("if (a) { b(); } else if (c) d(); else { e(); }");
        assert_eq!(out, "if (a) {\n  b();\n} else if (c)\n  d();\nelse {\n  e();\n}\n");
    }

    #[test]
    fn test_dangling_else_is_braced() {
        let program = Program {
            body: vec![Statement::If(IfStatement {
                test: Expression::ident("a"),
                consequent: Box::new(Statement::If(IfStatement {
                    test: Expression::ident("b"),
                    consequent: Box::new(Statement::Empty),
                    alternate: None,
                })),
                alternate: Some(Box::new(Statement::Empty)),
            })],
        };
        let out = print_program(&program);
        let reparsed = parse(&out).unwrap();
        assert_eq!(reparsed, program_with_block(program));

        fn program_with_block(mut program: Program) -> Program {
            if let Statement::If(stmt) = &mut program.body[0] {
                let inner = std::mem::replace(&mut *stmt.consequent, Statement::Empty);
                *stmt.consequent = Statement::Block(BlockStatement { body: vec![inner] });
            }
            program
        }
    }

    #[test]
    fn test_loops() {
        assert_eq!(
            roundtrip("for (let i = 0; i < n; i++) {}"),
            "for (let i = 0; i < n; i++) {}\n"
        );
        assert_eq!(roundtrip("for (;;) x();"), "for (;;)\n  x();\n");
        assert_eq!(roundtrip("for (const k in o) {}"), "for (const k in o) {}\n");
        assert_eq!(roundtrip("for await (const x of xs) {}"), "for await (const x of xs) {}\n");
        assert_eq!(roundtrip("do { x(); } while (y)"), "do {\n  x();\n} while (y);\n");
    }

    #[test]
    fn test_in_inside_for_init_is_wrapped() {
        assert_eq!(
            roundtrip("for (var x = (a in b); x; ) {}"),
            "for (var x = (a in b); x;) {}\n"
        );
    }

    #[test]
    fn test_switch_and_try() {
        assert_eq!(
            roundtrip("switch (x) { case 1: a(); break; default: b(); }"),
            "switch (x) {\n  case 1:\n    a();\n    break;\n  default:\n    b();\n}\n"
        );
        assert_eq!(
            roundtrip("try { a(); } catch { } finally { b(); }"),
            "try {\n  a();\n} catch {} finally {\n  b();\n}\n"
        );
    }

    #[test]
    fn test_module_declarations() {
        let src = "import d, { a, b as c, \"x y\" as z } from \"m\";\n\
                   import * as ns from \"n\";\n\
                   import \"side\";\n\
                   export { a, c as \"q r\" };\n\
                   export * as all from \"o\";\n\
                   export { default as e } from \"p\";\n\
                   export default (function () {});\n";
        assert_eq!(roundtrip(src), src);
    }

    #[test]
    fn test_export_declarations() {
        assert_eq!(roundtrip("export const a = 1"), "export const a = 1;\n");
        assert_eq!(roundtrip("export default class {}"), "export default class {}\n");
        assert_eq!(roundtrip("export default 40 + 2"), "export default 40 + 2;\n");
    }

    #[test]
    fn test_statement_position_parens() {
        assert_eq!(roundtrip("({}).toString();"), "({}.toString());\n");
        assert_eq!(roundtrip("(function () {})();"), "(function () {}());\n");
        assert_eq!(roundtrip("({ a } = b);"), "({ a } = b);\n");
    }

    #[test]
    fn test_print_expression() {
        let program = parse("a ? b : c;").unwrap();
        let Statement::Expression(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(print_expression(&stmt.expression), "a ? b : c");
    }
}
