// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expressions, functions, classes and patterns.

use super::{Printer, leftmost, quote};
use crate::ast::*;

// Binding levels, loosest first. Binary operators occupy
// `BINARY_BASE + precedence()`, which lands in 3..=14.
const SEQUENCE: u8 = 0;
const ASSIGNMENT: u8 = 1;
const CONDITIONAL: u8 = 2;
const BINARY_BASE: u8 = 2;
const UNARY: u8 = 15;
const POSTFIX: u8 = 16;
const CALL: u8 = 17;
const PRIMARY: u8 = 18;

fn binary_level(operator: BinaryOperator) -> u8 {
    BINARY_BASE + operator.precedence()
}

fn level(expr: &Expression) -> u8 {
    match expr {
        Expression::Sequence(_) => SEQUENCE,
        Expression::Assignment(_)
        | Expression::Arrow(_)
        | Expression::Yield(_)
        | Expression::Spread(_) => ASSIGNMENT,
        Expression::Conditional(_) => CONDITIONAL,
        Expression::Binary(binary) => binary_level(binary.operator),
        Expression::Unary(_) | Expression::Await(_) => UNARY,
        Expression::Update(update) if update.prefix => UNARY,
        Expression::Update(_) => POSTFIX,
        Expression::Call(_)
        | Expression::Member(_)
        | Expression::New(_)
        | Expression::TaggedTemplate(_)
        | Expression::Import(_) => CALL,
        _ => PRIMARY,
    }
}

/// `a ?? b || c` is a syntax error without parentheses.
fn mixes_nullish(operator: BinaryOperator, operand: &Expression) -> bool {
    let Expression::Binary(inner) = operand else {
        return false;
    };
    let is_nullish = |op| op == BinaryOperator::NullishCoalescing;
    let is_and_or = |op| matches!(op, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr);
    (is_nullish(operator) && is_and_or(inner.operator))
        || (is_and_or(operator) && is_nullish(inner.operator))
}

/// `new (f())()` must keep the call out of the constructor position.
fn has_call_in_chain(expr: &Expression) -> bool {
    match expr {
        Expression::Call(_) => true,
        Expression::Member(member) => has_call_in_chain(&member.object),
        Expression::TaggedTemplate(tagged) => has_call_in_chain(&tagged.tag),
        _ => false,
    }
}

impl Printer {
    /// Prints an expression at the loosest level.
    pub fn expression(&mut self, expr: &Expression) {
        self.expr(expr, SEQUENCE);
    }

    pub(super) fn assignment_level(&mut self, expr: &Expression) {
        self.expr(expr, ASSIGNMENT);
    }

    pub(super) fn lhs_level(&mut self, expr: &Expression) {
        self.expr(expr, CALL);
    }

    /// An expression statement's expression, wrapped when it would
    /// otherwise read as a block, function or class declaration.
    pub(super) fn statement_expression(&mut self, expr: &Expression) {
        if matches!(
            leftmost(expr),
            Expression::Object(_) | Expression::Function(_) | Expression::Class(_)
        ) {
            self.parenthesized(expr);
        } else {
            self.expression(expr);
        }
    }

    pub(super) fn parenthesized(&mut self, expr: &Expression) {
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        self.push("(");
        self.expr_inner(expr);
        self.push(")");
        self.no_in = saved_no_in;
    }

    fn expr(&mut self, expr: &Expression, min_level: u8) {
        let bare_in = self.no_in
            && matches!(expr, Expression::Binary(b) if b.operator == BinaryOperator::In);
        if level(expr) < min_level || bare_in {
            self.parenthesized(expr);
        } else {
            self.expr_inner(expr);
        }
    }

    fn expr_inner(&mut self, expr: &Expression) {
        match expr {
            Expression::Literal(literal) => self.literal(literal),
            Expression::Identifier(id) => self.push(&id.name),
            Expression::This => self.push("this"),
            Expression::Super => self.push("super"),
            Expression::Array(array) => self.array(array),
            Expression::Object(object) => self.object(object),
            Expression::Template(template) => self.template(template),
            Expression::TaggedTemplate(tagged) => {
                self.expr(&tagged.tag, CALL);
                self.template(&tagged.quasi);
            }
            Expression::Binary(binary) => self.binary(binary),
            Expression::Unary(unary) => {
                self.push(unary.operator.as_str());
                let word = matches!(
                    unary.operator,
                    UnaryOperator::Typeof | UnaryOperator::Void | UnaryOperator::Delete
                );
                if word || sign_would_merge(unary.operator, &unary.argument) {
                    self.push(" ");
                }
                self.expr(&unary.argument, UNARY);
            }
            Expression::Assignment(assign) => {
                self.expr(&assign.left, CALL);
                self.push(" ");
                self.push(assign.operator.as_str());
                self.push(" ");
                self.expr(&assign.right, ASSIGNMENT);
            }
            Expression::Call(call) => {
                self.expr(&call.callee, CALL);
                if call.optional {
                    self.push("?.");
                }
                self.arguments(&call.arguments);
            }
            Expression::Member(member) => self.member(member),
            Expression::Conditional(cond) => {
                self.expr(&cond.test, CONDITIONAL + 1);
                self.push(" ? ");
                self.expr(&cond.consequent, ASSIGNMENT);
                self.push(" : ");
                self.expr(&cond.alternate, ASSIGNMENT);
            }
            Expression::Function(func) => self.function(func),
            Expression::Arrow(arrow) => self.arrow(arrow),
            Expression::Class(class) => self.class(class),
            Expression::New(new) => {
                self.push("new ");
                if has_call_in_chain(&new.callee) {
                    self.parenthesized(&new.callee);
                } else {
                    self.expr(&new.callee, CALL);
                }
                self.arguments(&new.arguments);
            }
            Expression::Update(update) => {
                if update.prefix {
                    self.push(update.operator.as_str());
                    self.expr(&update.argument, UNARY);
                } else {
                    self.expr(&update.argument, POSTFIX);
                    self.push(update.operator.as_str());
                }
            }
            Expression::Sequence(seq) => {
                for (i, expr) in seq.expressions.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expr(expr, ASSIGNMENT);
                }
            }
            Expression::Spread(argument) => {
                self.push("...");
                self.expr(argument, ASSIGNMENT);
            }
            Expression::Await(argument) => {
                self.push("await ");
                self.expr(argument, UNARY);
            }
            Expression::Yield(yield_expr) => {
                self.push(if yield_expr.delegate { "yield*" } else { "yield" });
                if let Some(argument) = &yield_expr.argument {
                    self.push(" ");
                    self.expr(argument, ASSIGNMENT);
                }
            }
            Expression::Import(specifier) => {
                self.push("import(");
                self.expr(specifier, ASSIGNMENT);
                self.push(")");
            }
            Expression::MetaProperty(meta) => {
                self.push(&meta.meta);
                self.push(".");
                self.push(&meta.property);
            }
        }
    }

    fn binary(&mut self, binary: &BinaryExpression) {
        let operator = binary.operator;
        let level = binary_level(operator);
        let (left_min, right_min) = if operator == BinaryOperator::Exponent {
            (level + 1, level)
        } else {
            (level, level + 1)
        };

        // `-a ** b` is a syntax error
        let unary_base = operator == BinaryOperator::Exponent
            && matches!(*binary.left, Expression::Unary(_) | Expression::Await(_));
        if unary_base || mixes_nullish(operator, &binary.left) {
            self.parenthesized(&binary.left);
        } else {
            self.expr(&binary.left, left_min);
        }

        self.push(" ");
        self.push(operator.as_str());
        self.push(" ");

        if mixes_nullish(operator, &binary.right) {
            self.parenthesized(&binary.right);
        } else {
            self.expr(&binary.right, right_min);
        }
    }

    fn member(&mut self, member: &MemberExpression) {
        // `1.toString` would lex as a malformed number
        if matches!(*member.object, Expression::Literal(Literal::Number(_))) {
            self.parenthesized(&member.object);
        } else {
            self.expr(&member.object, CALL);
        }

        match &member.property {
            MemberProperty::Identifier(id) => {
                self.push(if member.optional { "?." } else { "." });
                self.push(&id.name);
            }
            MemberProperty::Expression(property) => {
                self.push(if member.optional { "?.[" } else { "[" });
                let saved_no_in = std::mem::replace(&mut self.no_in, false);
                self.expression(property);
                self.no_in = saved_no_in;
                self.push("]");
            }
            MemberProperty::Private(name) => {
                self.push(if member.optional { "?.#" } else { ".#" });
                self.push(name);
            }
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) {
        self.push("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(argument, ASSIGNMENT);
        }
        self.push(")");
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Number(value) => self.number(*value),
            Literal::String(value) => self.push(&quote(value)),
            Literal::Boolean(true) => self.push("true"),
            Literal::Boolean(false) => self.push("false"),
            Literal::Null => self.push("null"),
            Literal::BigInt(digits) => {
                self.push(digits);
                self.push("n");
            }
            Literal::RegExp { pattern, flags } => {
                self.push("/");
                self.push(pattern);
                self.push("/");
                self.push(flags);
            }
        }
    }

    fn number(&mut self, value: f64) {
        if value.is_nan() {
            self.push("(0 / 0)");
        } else if value.is_infinite() {
            self.push(if value > 0.0 { "(1 / 0)" } else { "(-1 / 0)" });
        } else {
            self.push(&value.to_string());
        }
    }

    fn array(&mut self, array: &ArrayExpression) {
        self.push("[");
        for (i, element) in array.elements.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            if let Some(element) = element {
                self.expr(element, ASSIGNMENT);
            }
        }
        // a trailing hole needs its own comma
        if matches!(array.elements.last(), Some(None)) {
            self.push(",");
        }
        self.push("]");
    }

    fn object(&mut self, object: &ObjectExpression) {
        if object.properties.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{ ");
        for (i, property) in object.properties.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            match property {
                ObjectProperty::Property(property) => self.object_property(property),
                ObjectProperty::Spread(argument) => {
                    self.push("...");
                    self.expr(argument, ASSIGNMENT);
                }
            }
        }
        self.push(" }");
    }

    fn object_property(&mut self, property: &Property) {
        let accessor = match property.kind {
            PropertyKind::Get => Some("get "),
            PropertyKind::Set => Some("set "),
            PropertyKind::Method => Some(""),
            PropertyKind::Init => None,
        };
        if let (Some(prefix), Expression::Function(func)) = (accessor, &property.value) {
            self.method(prefix, &property.key, func);
            return;
        }

        if property.shorthand {
            let key_name = match &property.key {
                PropertyKey::Identifier(id) => Some(id.name.as_str()),
                _ => None,
            };
            match &property.value {
                Expression::Identifier(id) if key_name == Some(id.name.as_str()) => {
                    self.push(&id.name);
                    return;
                }
                Expression::Assignment(assign) if matches!(&*assign.left, Expression::Identifier(id) if key_name == Some(id.name.as_str())) => {
                    self.expr(&assign.left, PRIMARY);
                    self.push(" = ");
                    self.expr(&assign.right, ASSIGNMENT);
                    return;
                }
                _ => {}
            }
        }

        self.property_key(&property.key);
        self.push(": ");
        self.expr(&property.value, ASSIGNMENT);
    }

    fn property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(id) => self.push(&id.name),
            PropertyKey::Computed(expr) => {
                self.push("[");
                self.expr(expr, ASSIGNMENT);
                self.push("]");
            }
            PropertyKey::Literal(literal) => self.literal(literal),
            PropertyKey::Private(name) => {
                self.push("#");
                self.push(name);
            }
        }
    }

    fn template(&mut self, template: &TemplateLiteral) {
        self.push("`");
        for (i, quasi) in template.quasis.iter().enumerate() {
            self.push(quasi);
            if let Some(expr) = template.expressions.get(i) {
                self.push("${");
                let saved_no_in = std::mem::replace(&mut self.no_in, false);
                self.expression(expr);
                self.no_in = saved_no_in;
                self.push("}");
            }
        }
        self.push("`");
    }

    // ==================== Functions and classes ====================

    pub(super) fn function(&mut self, func: &Function) {
        if func.is_async {
            self.push("async ");
        }
        self.push(if func.is_generator { "function* " } else { "function " });
        if let Some(id) = &func.id {
            self.push(&id.name);
        }
        self.params(&func.params);
        self.push(" ");
        self.block(&func.body);
    }

    /// A method in an object literal or class body. `prefix` carries
    /// `static`, `get` or `set`.
    fn method(&mut self, prefix: &str, key: &PropertyKey, func: &Function) {
        self.push(prefix);
        if func.is_async {
            self.push("async ");
        }
        if func.is_generator {
            self.push("*");
        }
        self.property_key(key);
        self.params(&func.params);
        self.push(" ");
        self.block(&func.body);
    }

    fn arrow(&mut self, arrow: &ArrowFunctionExpression) {
        if arrow.is_async {
            self.push("async ");
        }
        self.params(&arrow.params);
        self.push(" => ");
        match &arrow.body {
            ArrowBody::Block(body) => self.block(body),
            ArrowBody::Expression(expr) => {
                if matches!(leftmost(expr), Expression::Object(_)) {
                    self.parenthesized(expr);
                } else {
                    self.expr(expr, ASSIGNMENT);
                }
            }
        }
    }

    fn params(&mut self, params: &[Pattern]) {
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        self.push("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.pattern(param);
        }
        self.push(")");
        self.no_in = saved_no_in;
    }

    pub(super) fn class(&mut self, class: &Class) {
        self.push("class");
        if let Some(id) = &class.id {
            self.push(" ");
            self.push(&id.name);
        }
        if let Some(super_class) = &class.super_class {
            self.push(" extends ");
            self.expr(super_class, CALL);
        }
        self.push(" ");

        if class.body.is_empty() {
            self.push("{}");
            return;
        }

        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        self.push("{\n");
        self.indent += 1;
        for member in &class.body {
            self.write_indent();
            self.class_member(member);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.push("}");
        self.no_in = saved_no_in;
    }

    fn class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Method(method) => {
                let prefix = match (method.is_static, method.kind) {
                    (true, MethodKind::Get) => "static get ",
                    (true, MethodKind::Set) => "static set ",
                    (true, _) => "static ",
                    (false, MethodKind::Get) => "get ",
                    (false, MethodKind::Set) => "set ",
                    (false, _) => "",
                };
                self.method(prefix, &method.key, &method.value);
            }
            ClassMember::Property(field) => {
                if field.is_static {
                    self.push("static ");
                }
                self.property_key(&field.key);
                if let Some(value) = &field.value {
                    self.push(" = ");
                    self.expr(value, ASSIGNMENT);
                }
                self.push(";");
            }
            ClassMember::StaticBlock(body) => {
                self.push("static ");
                self.block(body);
            }
        }
    }

    // ==================== Patterns ====================

    pub(super) fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(id) => self.push(&id.name),
            Pattern::Object(object) => {
                if object.properties.is_empty() && object.rest.is_none() {
                    self.push("{}");
                    return;
                }
                self.push("{ ");
                for (i, property) in object.properties.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.pattern_property(property);
                }
                if let Some(rest) = &object.rest {
                    if !object.properties.is_empty() {
                        self.push(", ");
                    }
                    self.push("...");
                    self.pattern(rest);
                }
                self.push(" }");
            }
            Pattern::Array(array) => {
                self.push("[");
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    if let Some(element) = element {
                        self.pattern(element);
                    }
                }
                if matches!(array.elements.last(), Some(None)) {
                    self.push(",");
                }
                self.push("]");
            }
            Pattern::Assignment(assign) => {
                self.pattern(&assign.left);
                self.push(" = ");
                self.expr(&assign.right, ASSIGNMENT);
            }
            Pattern::Rest(inner) => {
                self.push("...");
                self.pattern(inner);
            }
        }
    }

    fn pattern_property(&mut self, property: &PatternProperty) {
        if property.shorthand {
            let key_name = match &property.key {
                PropertyKey::Identifier(id) => Some(id.name.as_str()),
                _ => None,
            };
            let target = match &property.value {
                Pattern::Assignment(assign) => &*assign.left,
                other => other,
            };
            if matches!(target, Pattern::Identifier(id) if key_name == Some(id.name.as_str())) {
                self.pattern(&property.value);
                return;
            }
        }
        self.property_key(&property.key);
        self.push(": ");
        self.pattern(&property.value);
    }
}

/// `- -x` and `+ ++x` need a space to stay two tokens.
fn sign_would_merge(operator: UnaryOperator, argument: &Expression) -> bool {
    let sign = match operator {
        UnaryOperator::Minus => '-',
        UnaryOperator::Plus => '+',
        _ => return false,
    };
    match argument {
        Expression::Unary(inner) => inner.operator.as_str().starts_with(sign),
        Expression::Update(update) if update.prefix => update.operator.as_str().starts_with(sign),
        _ => false,
    }
}
