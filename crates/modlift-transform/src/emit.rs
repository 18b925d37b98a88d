// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Emission: turns module records into plain statements against the
//! `require`/`exports` registry.
//!
//! Output order is fixed: hoisted requires and import bindings, the module
//! body, `export *` copies, named exports, the default export, and finally
//! the `__esModule` marker.

use modlift_syntax::ast::{
    AssignmentExpression, AssignmentOperator, BinaryExpression, BinaryOperator,
    CallExpression, Expression, ExpressionStatement, Function, Identifier, IfStatement, Literal,
    MemberExpression, MemberProperty, ObjectExpression, ObjectProperty, Pattern, Property,
    PropertyKey, PropertyKind, ReturnStatement, Statement, VariableDeclaration,
    VariableDeclarator, VariableKind,
};
use modlift_syntax::codegen::is_identifier_name;
use tracing::debug;

use crate::TransformOptions;
use crate::naming::NameGenerator;
use crate::records::{ExportAllRecord, ImportRecord, ImportedName, ModuleRecords};

/// Builds the rewritten statement list. `names` supplies the loop variable
/// for `export *` copies.
pub fn emit(
    records: ModuleRecords,
    options: &TransformOptions,
    names: &mut NameGenerator,
) -> Vec<Statement> {
    let mut out = Vec::with_capacity(records.body.len() + records.imports.len() * 2);

    for import in &records.imports {
        emit_import(&mut out, import, options);
    }
    let import_count = out.len();

    let body_len = records.body.len();
    out.extend(records.body.iter().cloned());

    let export_alls: Vec<&ExportAllRecord> = records.export_alls().collect();
    if !export_alls.is_empty() {
        let key = names.fresh("key");
        out.extend(export_alls.into_iter().map(|all| copy_all(&all.handle, &key)));
    }

    for named in records.named_exports() {
        out.push(assign(
            member(Expression::ident("exports"), &named.exported),
            Expression::ident(named.local.as_str()),
        ));
    }

    if let Some(default) = records.default_export() {
        out.push(assign(
            member(Expression::ident("exports"), "default"),
            Expression::ident(default.local.as_str()),
        ));
    }

    if records.is_es_module {
        out.push(es_module_marker());
    }

    debug!(
        imports = import_count,
        body = body_len,
        total = out.len(),
        "emitted module statements"
    );
    out
}

/// `var _h = require("m");` plus one `var` per binding, or a bare
/// `require("m");` for side-effect imports.
fn emit_import(out: &mut Vec<Statement>, import: &ImportRecord, options: &TransformOptions) {
    let required = require(&import.source, options.enable_resolve);
    let Some(handle) = &import.handle else {
        out.push(expression_statement(required));
        return;
    };

    out.push(var(handle, required));
    for binding in &import.bindings {
        let handle = Expression::ident(handle.as_str());
        let init = match &binding.imported {
            ImportedName::Namespace => {
                call(Expression::ident(options.import_all.as_str()), vec![handle])
            }
            ImportedName::Default => {
                call(Expression::ident(options.import_default.as_str()), vec![handle])
            }
            ImportedName::Named(name) => member(handle, name),
        };
        out.push(var(&binding.local, init));
    }
}

/// `require("m")`, or `require(require.resolve("m"))`.
fn require(source: &str, resolve: bool) -> Expression {
    let mut specifier = Expression::string(source);
    if resolve {
        specifier = call(member(Expression::ident("require"), "resolve"), vec![specifier]);
    }
    call(Expression::ident("require"), vec![specifier])
}

/// ```js
/// Object.keys(_h).forEach(function (_key) {
///   if (_key === "default" || _key === "__esModule")
///     return;
///   exports[_key] = _h[_key];
/// });
/// ```
fn copy_all(handle: &str, key: &str) -> Statement {
    let is_key = |value: &str| {
        Expression::Binary(BinaryExpression {
            operator: BinaryOperator::StrictEqual,
            left: Box::new(Expression::ident(key)),
            right: Box::new(Expression::string(value)),
        })
    };
    let skip = Statement::If(IfStatement {
        test: Expression::Binary(BinaryExpression {
            operator: BinaryOperator::LogicalOr,
            left: Box::new(is_key("default")),
            right: Box::new(is_key("__esModule")),
        }),
        consequent: Box::new(Statement::Return(ReturnStatement { argument: None })),
        alternate: None,
    });
    let copy = assign(
        computed(Expression::ident("exports"), Expression::ident(key)),
        computed(Expression::ident(handle), Expression::ident(key)),
    );
    let callback = Function {
        id: None,
        params: vec![Pattern::Identifier(Identifier::new(key))],
        body: vec![skip, copy],
        is_async: false,
        is_generator: false,
    };

    let keys = call(
        member(Expression::ident("Object"), "keys"),
        vec![Expression::ident(handle)],
    );
    expression_statement(call(
        member(keys, "forEach"),
        vec![Expression::Function(Box::new(callback))],
    ))
}

/// `Object.defineProperty(exports, "__esModule", { value: true });`
fn es_module_marker() -> Statement {
    let descriptor = Expression::Object(ObjectExpression {
        properties: vec![ObjectProperty::Property(Property {
            key: PropertyKey::Identifier(Identifier::new("value")),
            value: Expression::Literal(Literal::Boolean(true)),
            kind: PropertyKind::Init,
            shorthand: false,
        })],
    });
    expression_statement(call(
        member(Expression::ident("Object"), "defineProperty"),
        vec![
            Expression::ident("exports"),
            Expression::string("__esModule"),
            descriptor,
        ],
    ))
}

fn var(name: &str, init: Expression) -> Statement {
    Statement::VariableDeclaration(VariableDeclaration {
        kind: VariableKind::Var,
        declarations: vec![VariableDeclarator {
            id: Pattern::Identifier(Identifier::new(name)),
            init: Some(init),
        }],
    })
}

fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        callee: Box::new(callee),
        arguments,
        optional: false,
    })
}

/// `object.name`, or `object["name"]` when `name` is not an identifier.
fn member(object: Expression, name: &str) -> Expression {
    if is_identifier_name(name) {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property: MemberProperty::Identifier(Identifier::new(name)),
            optional: false,
        })
    } else {
        computed(object, Expression::string(name))
    }
}

fn computed(object: Expression, property: Expression) -> Expression {
    Expression::Member(MemberExpression {
        object: Box::new(object),
        property: MemberProperty::Expression(Box::new(property)),
        optional: false,
    })
}

fn assign(target: Expression, value: Expression) -> Statement {
    expression_statement(Expression::Assignment(AssignmentExpression {
        operator: AssignmentOperator::Assign,
        left: Box::new(target),
        right: Box::new(value),
    }))
}

fn expression_statement(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement { expression })
}
