// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Name analysis over a whole program.

use modlift_syntax::ast::visit::{self, Visit};
use modlift_syntax::ast::{
    Class, ExportDefaultKind, Expression, Function, Identifier, Program, Statement,
    VariableDeclaration, VariableKind,
};
use rustc_hash::FxHashSet;

/// Every identifier spelled anywhere in the program, including property
/// names and labels. Synthesized names must avoid all of them.
pub fn all_identifiers(program: &Program) -> FxHashSet<String> {
    let mut collector = IdentifierCollector::default();
    visit::walk_body(&mut collector, &program.body);
    collector.names
}

#[derive(Default)]
struct IdentifierCollector {
    names: FxHashSet<String>,
}

impl<'a> Visit<'a> for IdentifierCollector {
    fn visit_identifier(&mut self, id: &'a Identifier) {
        if !self.names.contains(&id.name) {
            self.names.insert(id.name.clone());
        }
    }
}

/// Names bound at module scope: top-level declarations of every kind,
/// import locals, and `var` declarations hoisted out of nested blocks.
pub fn module_bindings(program: &Program) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for stmt in &program.body {
        match stmt {
            Statement::VariableDeclaration(decl) => add_declared(&mut names, decl),
            Statement::FunctionDeclaration(func) => add_id(&mut names, func.id.as_ref()),
            Statement::ClassDeclaration(class) => add_id(&mut names, class.id.as_ref()),
            Statement::Import(decl) => {
                names.extend(decl.specifiers.iter().map(|s| s.local().name.clone()));
            }
            Statement::ExportNamed(decl) => {
                if let Some(declaration) = &decl.declaration {
                    names.extend(declaration.bound_names().into_iter().map(|id| id.name.clone()));
                }
            }
            Statement::ExportDefault(decl) => match &decl.declaration {
                ExportDefaultKind::Function(func) => add_id(&mut names, func.id.as_ref()),
                ExportDefaultKind::Class(class) => add_id(&mut names, class.id.as_ref()),
                ExportDefaultKind::Expression(_) => {}
            },
            _ => {}
        }
        VarHoisting { names: &mut names }.visit_statement(stmt);
    }
    names
}

fn add_id(names: &mut FxHashSet<String>, id: Option<&Identifier>) {
    if let Some(id) = id {
        names.insert(id.name.clone());
    }
}

fn add_declared(names: &mut FxHashSet<String>, decl: &VariableDeclaration) {
    let mut bound = Vec::new();
    for declarator in &decl.declarations {
        declarator.id.bound_names(&mut bound);
    }
    names.extend(bound.into_iter().map(|id| id.name.clone()));
}

/// Finds `var` declarations that hoist to the enclosing function scope,
/// which at the top level is the module itself.
struct VarHoisting<'n> {
    names: &'n mut FxHashSet<String>,
}

impl<'a> Visit<'a> for VarHoisting<'_> {
    fn visit_variable_declaration(&mut self, decl: &'a VariableDeclaration) {
        if decl.kind == VariableKind::Var {
            add_declared(self.names, decl);
        }
    }

    // Functions, classes and expressions open their own scopes.
    fn visit_function(&mut self, _func: &'a Function) {}

    fn visit_class(&mut self, _class: &'a Class) {}

    fn visit_expression(&mut self, _expr: &'a Expression) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlift_syntax::parse;

    fn sorted(names: FxHashSet<String>) -> Vec<String> {
        let mut names: Vec<_> = names.into_iter().collect();
        names.sort();
        names
    }

    #[test]
    fn test_all_identifiers_includes_properties_and_nested_names() {
        let program = parse("let a = b.c; function f(x) { return { y: x }; }").unwrap();
        assert_eq!(sorted(all_identifiers(&program)), ["a", "b", "c", "f", "x", "y"]);
    }

    #[test]
    fn test_module_bindings_top_level() {
        let program = parse(
            "import d, { e as g } from \"m\";\n\
             const { a, b: [c] } = o;\n\
             function f() { var inner; }\n\
             class K {}\n\
             export let x = 1;\n\
             export default function named() {}",
        )
        .unwrap();
        assert_eq!(
            sorted(module_bindings(&program)),
            ["K", "a", "c", "d", "f", "g", "named", "x"]
        );
    }

    #[test]
    fn test_module_bindings_hoist_nested_var() {
        let program = parse(
            "if (ok) { var a = 1; let b = 2; }\n\
             for (var i = 0; i < 1; i++) {}\n\
             for (var k in o) {}\n\
             try { var t; } catch (err) { var u; }\n\
             const fn = () => { var hidden; };",
        )
        .unwrap();
        assert_eq!(sorted(module_bindings(&program)), ["a", "fn", "i", "k", "t", "u"]);
    }
}
