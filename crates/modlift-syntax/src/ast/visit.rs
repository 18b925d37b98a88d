// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Source-order traversal of the AST.
//!
//! Implementors override the `visit_*` hooks they care about and call the
//! matching `walk_*` function to continue into children. Returning without
//! walking prunes that subtree.

use super::*;

/// A read-only AST visitor. Every hook defaults to walking its children.
pub trait Visit<'a> {
    /// Called for every statement.
    fn visit_statement(&mut self, stmt: &'a Statement) {
        walk_statement(self, stmt);
    }

    /// Called for every expression.
    fn visit_expression(&mut self, expr: &'a Expression) {
        walk_expression(self, expr);
    }

    /// Called for every binding or assignment pattern.
    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        walk_pattern(self, pattern);
    }

    /// Called for `var`, `let` and `const` declarations.
    fn visit_variable_declaration(&mut self, decl: &'a VariableDeclaration) {
        walk_variable_declaration(self, decl);
    }

    /// Called for function declarations, expressions and methods.
    fn visit_function(&mut self, func: &'a Function) {
        walk_function(self, func);
    }

    /// Called for class declarations and expressions.
    fn visit_class(&mut self, class: &'a Class) {
        walk_class(self, class);
    }

    /// Called for object, pattern and class member keys.
    fn visit_property_key(&mut self, key: &'a PropertyKey) {
        walk_property_key(self, key);
    }

    /// Called for names in import and export lists.
    fn visit_module_export_name(&mut self, name: &'a ModuleExportName) {
        if let ModuleExportName::Identifier(id) = name {
            self.visit_identifier(id);
        }
    }

    /// Called for every identifier: bindings, references, labels and
    /// non-computed property names alike.
    fn visit_identifier(&mut self, _id: &'a Identifier) {}
}

/// Visits every statement in a list.
pub fn walk_body<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, body: &'a [Statement]) {
    for stmt in body {
        visitor.visit_statement(stmt);
    }
}

/// Visits the children of a statement.
pub fn walk_statement<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, stmt: &'a Statement) {
    match stmt {
        Statement::VariableDeclaration(decl) => visitor.visit_variable_declaration(decl),
        Statement::FunctionDeclaration(func) => visitor.visit_function(func),
        Statement::ClassDeclaration(class) => visitor.visit_class(class),
        Statement::Expression(expr) => visitor.visit_expression(&expr.expression),
        Statement::Block(block) => walk_body(visitor, &block.body),
        Statement::If(stmt) => {
            visitor.visit_expression(&stmt.test);
            visitor.visit_statement(&stmt.consequent);
            if let Some(alternate) = &stmt.alternate {
                visitor.visit_statement(alternate);
            }
        }
        Statement::Switch(stmt) => {
            visitor.visit_expression(&stmt.discriminant);
            for case in &stmt.cases {
                if let Some(test) = &case.test {
                    visitor.visit_expression(test);
                }
                walk_body(visitor, &case.consequent);
            }
        }
        Statement::While(stmt) => {
            visitor.visit_expression(&stmt.test);
            visitor.visit_statement(&stmt.body);
        }
        Statement::DoWhile(stmt) => {
            visitor.visit_statement(&stmt.body);
            visitor.visit_expression(&stmt.test);
        }
        Statement::For(stmt) => {
            match &stmt.init {
                Some(ForInit::Declaration(decl)) => visitor.visit_variable_declaration(decl),
                Some(ForInit::Expression(expr)) => visitor.visit_expression(expr),
                None => {}
            }
            if let Some(test) = &stmt.test {
                visitor.visit_expression(test);
            }
            if let Some(update) = &stmt.update {
                visitor.visit_expression(update);
            }
            visitor.visit_statement(&stmt.body);
        }
        Statement::ForIn(stmt) => {
            walk_for_left(visitor, &stmt.left);
            visitor.visit_expression(&stmt.right);
            visitor.visit_statement(&stmt.body);
        }
        Statement::ForOf(stmt) => {
            walk_for_left(visitor, &stmt.left);
            visitor.visit_expression(&stmt.right);
            visitor.visit_statement(&stmt.body);
        }
        Statement::Return(stmt) => {
            if let Some(argument) = &stmt.argument {
                visitor.visit_expression(argument);
            }
        }
        Statement::Break(label) | Statement::Continue(label) => {
            if let Some(label) = label {
                visitor.visit_identifier(label);
            }
        }
        Statement::Throw(stmt) => visitor.visit_expression(&stmt.argument),
        Statement::Try(stmt) => {
            walk_body(visitor, &stmt.block.body);
            if let Some(handler) = &stmt.handler {
                if let Some(param) = &handler.param {
                    visitor.visit_pattern(param);
                }
                walk_body(visitor, &handler.body.body);
            }
            if let Some(finalizer) = &stmt.finalizer {
                walk_body(visitor, &finalizer.body);
            }
        }
        Statement::With(stmt) => {
            visitor.visit_expression(&stmt.object);
            visitor.visit_statement(&stmt.body);
        }
        Statement::Labeled(stmt) => {
            visitor.visit_identifier(&stmt.label);
            visitor.visit_statement(&stmt.body);
        }
        Statement::Debugger | Statement::Empty => {}
        Statement::Import(decl) => {
            for specifier in &decl.specifiers {
                if let ImportSpecifier::Named { imported, .. } = specifier {
                    visitor.visit_module_export_name(imported);
                }
                visitor.visit_identifier(specifier.local());
            }
        }
        Statement::ExportNamed(decl) => {
            match &decl.declaration {
                Some(Declaration::Variable(var)) => visitor.visit_variable_declaration(var),
                Some(Declaration::Function(func)) => visitor.visit_function(func),
                Some(Declaration::Class(class)) => visitor.visit_class(class),
                None => {}
            }
            for specifier in &decl.specifiers {
                visitor.visit_module_export_name(&specifier.local);
                visitor.visit_module_export_name(&specifier.exported);
            }
        }
        Statement::ExportDefault(decl) => match &decl.declaration {
            ExportDefaultKind::Function(func) => visitor.visit_function(func),
            ExportDefaultKind::Class(class) => visitor.visit_class(class),
            ExportDefaultKind::Expression(expr) => visitor.visit_expression(expr),
        },
        Statement::ExportAll(decl) => {
            if let Some(exported) = &decl.exported {
                visitor.visit_module_export_name(exported);
            }
        }
    }
}

fn walk_for_left<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, left: &'a ForInLeft) {
    match left {
        ForInLeft::Declaration(decl) => visitor.visit_variable_declaration(decl),
        ForInLeft::Expression(expr) => visitor.visit_expression(expr),
    }
}

/// Visits the patterns and initializers of a declaration.
pub fn walk_variable_declaration<'a, V: Visit<'a> + ?Sized>(
    visitor: &mut V,
    decl: &'a VariableDeclaration,
) {
    for declarator in &decl.declarations {
        visitor.visit_pattern(&declarator.id);
        if let Some(init) = &declarator.init {
            visitor.visit_expression(init);
        }
    }
}

/// Visits a function's name, parameters and body.
pub fn walk_function<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, func: &'a Function) {
    if let Some(id) = &func.id {
        visitor.visit_identifier(id);
    }
    for param in &func.params {
        visitor.visit_pattern(param);
    }
    walk_body(visitor, &func.body);
}

/// Visits a class's name, superclass and members.
pub fn walk_class<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, class: &'a Class) {
    if let Some(id) = &class.id {
        visitor.visit_identifier(id);
    }
    if let Some(super_class) = &class.super_class {
        visitor.visit_expression(super_class);
    }
    for member in &class.body {
        match member {
            ClassMember::Method(method) => {
                visitor.visit_property_key(&method.key);
                visitor.visit_function(&method.value);
            }
            ClassMember::Property(property) => {
                visitor.visit_property_key(&property.key);
                if let Some(value) = &property.value {
                    visitor.visit_expression(value);
                }
            }
            ClassMember::StaticBlock(body) => walk_body(visitor, body),
        }
    }
}

/// Visits a computed key's expression or an identifier key.
pub fn walk_property_key<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, key: &'a PropertyKey) {
    match key {
        PropertyKey::Identifier(id) => visitor.visit_identifier(id),
        PropertyKey::Computed(expr) => visitor.visit_expression(expr),
        PropertyKey::Literal(_) | PropertyKey::Private(_) => {}
    }
}

/// Visits the targets and defaults of a pattern.
pub fn walk_pattern<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, pattern: &'a Pattern) {
    match pattern {
        Pattern::Identifier(id) => visitor.visit_identifier(id),
        Pattern::Object(object) => {
            for property in &object.properties {
                visitor.visit_property_key(&property.key);
                visitor.visit_pattern(&property.value);
            }
            if let Some(rest) = &object.rest {
                visitor.visit_pattern(rest);
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                visitor.visit_pattern(element);
            }
        }
        Pattern::Assignment(assign) => {
            visitor.visit_pattern(&assign.left);
            visitor.visit_expression(&assign.right);
        }
        Pattern::Rest(inner) => visitor.visit_pattern(inner),
    }
}

/// Visits the children of an expression.
pub fn walk_expression<'a, V: Visit<'a> + ?Sized>(visitor: &mut V, expr: &'a Expression) {
    match expr {
        Expression::Literal(_) | Expression::This | Expression::Super => {}
        Expression::MetaProperty(_) => {}
        Expression::Identifier(id) => visitor.visit_identifier(id),
        Expression::Array(array) => {
            for element in array.elements.iter().flatten() {
                visitor.visit_expression(element);
            }
        }
        Expression::Object(object) => {
            for property in &object.properties {
                match property {
                    ObjectProperty::Property(property) => {
                        visitor.visit_property_key(&property.key);
                        visitor.visit_expression(&property.value);
                    }
                    ObjectProperty::Spread(argument) => visitor.visit_expression(argument),
                }
            }
        }
        Expression::Template(template) => {
            for expr in &template.expressions {
                visitor.visit_expression(expr);
            }
        }
        Expression::TaggedTemplate(tagged) => {
            visitor.visit_expression(&tagged.tag);
            for expr in &tagged.quasi.expressions {
                visitor.visit_expression(expr);
            }
        }
        Expression::Binary(binary) => {
            visitor.visit_expression(&binary.left);
            visitor.visit_expression(&binary.right);
        }
        Expression::Unary(unary) => visitor.visit_expression(&unary.argument),
        Expression::Update(update) => visitor.visit_expression(&update.argument),
        Expression::Assignment(assign) => {
            visitor.visit_expression(&assign.left);
            visitor.visit_expression(&assign.right);
        }
        Expression::Call(call) => {
            visitor.visit_expression(&call.callee);
            for argument in &call.arguments {
                visitor.visit_expression(argument);
            }
        }
        Expression::New(new) => {
            visitor.visit_expression(&new.callee);
            for argument in &new.arguments {
                visitor.visit_expression(argument);
            }
        }
        Expression::Member(member) => {
            visitor.visit_expression(&member.object);
            match &member.property {
                MemberProperty::Identifier(id) => visitor.visit_identifier(id),
                MemberProperty::Expression(expr) => visitor.visit_expression(expr),
                MemberProperty::Private(_) => {}
            }
        }
        Expression::Conditional(cond) => {
            visitor.visit_expression(&cond.test);
            visitor.visit_expression(&cond.consequent);
            visitor.visit_expression(&cond.alternate);
        }
        Expression::Function(func) => visitor.visit_function(func),
        Expression::Arrow(arrow) => {
            for param in &arrow.params {
                visitor.visit_pattern(param);
            }
            match &arrow.body {
                ArrowBody::Expression(body) => visitor.visit_expression(body),
                ArrowBody::Block(body) => walk_body(visitor, body),
            }
        }
        Expression::Class(class) => visitor.visit_class(class),
        Expression::Sequence(seq) => {
            for expr in &seq.expressions {
                visitor.visit_expression(expr);
            }
        }
        Expression::Spread(argument)
        | Expression::Await(argument)
        | Expression::Import(argument) => visitor.visit_expression(argument),
        Expression::Yield(yield_expr) => {
            if let Some(argument) = &yield_expr.argument {
                visitor.visit_expression(argument);
            }
        }
    }
}
