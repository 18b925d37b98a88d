// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Collection: classifies every top-level statement and records the
//! module's imports and exports.

use modlift_syntax::ast::{
    Class, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultKind,
    ExportNamedDeclaration, Function, Identifier, ImportDeclaration, ImportSpecifier, Pattern,
    Program, Span, Statement, VariableDeclaration, VariableDeclarator, VariableKind,
};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::TransformError;
use crate::naming::NameGenerator;
use crate::records::{
    ExportAllRecord, ExportDefaultRecord, ExportNamedRecord, ExportRecord, ImportBinding,
    ImportRecord, ImportedName, ModuleRecords,
};
use crate::scope;

/// The closed set of statement shapes collection distinguishes.
enum ModuleItem<'a> {
    Import(&'a ImportDeclaration),
    ExportNamed(&'a ExportNamedDeclaration),
    ExportDefault(&'a ExportDefaultDeclaration),
    ExportAll(&'a ExportAllDeclaration),
    Other(&'a Statement),
}

impl<'a> From<&'a Statement> for ModuleItem<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Import(decl) => ModuleItem::Import(decl),
            Statement::ExportNamed(decl) => ModuleItem::ExportNamed(decl),
            Statement::ExportDefault(decl) => ModuleItem::ExportDefault(decl),
            Statement::ExportAll(decl) => ModuleItem::ExportAll(decl),
            other => ModuleItem::Other(other),
        }
    }
}

/// Scans `program` in order and builds its module records. The program is
/// only read; kept statements are cloned into the records.
pub fn collect(
    program: &Program,
    names: &mut NameGenerator,
) -> Result<ModuleRecords, TransformError> {
    let mut collector = Collector {
        names,
        bindings: scope::module_bindings(program),
        exported: FxHashSet::default(),
        records: ModuleRecords::default(),
    };

    for stmt in &program.body {
        match ModuleItem::from(stmt) {
            ModuleItem::Import(decl) => collector.import(decl)?,
            ModuleItem::ExportNamed(decl) => collector.export_named(decl)?,
            ModuleItem::ExportDefault(decl) => collector.export_default(decl)?,
            ModuleItem::ExportAll(decl) => collector.export_all(decl)?,
            ModuleItem::Other(stmt) => collector.records.body.push(stmt.clone()),
        }
    }

    let records = collector.records;
    debug!(
        imports = records.imports.len(),
        exports = records.exports.len(),
        is_es_module = records.is_es_module,
        "collected module records"
    );
    Ok(records)
}

struct Collector<'g> {
    names: &'g mut NameGenerator,
    /// Names bound at module scope, for checking `export { x }`
    bindings: FxHashSet<String>,
    /// Exported names seen so far, excluding `default`
    exported: FxHashSet<String>,
    records: ModuleRecords,
}

impl Collector<'_> {
    fn import(&mut self, decl: &ImportDeclaration) -> Result<(), TransformError> {
        self.records.is_es_module = true;
        check_specifier(&decl.source, decl.span)?;

        if decl.specifiers.is_empty() {
            self.side_effect_import(&decl.source, decl.span);
            return Ok(());
        }

        let bindings = decl
            .specifiers
            .iter()
            .map(|specifier| match specifier {
                ImportSpecifier::Default(local) => ImportBinding {
                    local: local.name.clone(),
                    imported: ImportedName::Default,
                },
                ImportSpecifier::Namespace(local) => ImportBinding {
                    local: local.name.clone(),
                    imported: ImportedName::Namespace,
                },
                ImportSpecifier::Named { imported, local } => ImportBinding {
                    local: local.name.clone(),
                    imported: imported_name(imported.as_str()),
                },
            })
            .collect();

        let handle = self.names.module_handle(&decl.source);
        self.records.imports.push(ImportRecord {
            source: decl.source.clone(),
            handle: Some(handle),
            bindings,
            span: decl.span,
        });
        Ok(())
    }

    fn side_effect_import(&mut self, source: &str, span: Span) {
        self.records.imports.push(ImportRecord {
            source: source.to_string(),
            handle: None,
            bindings: Vec::new(),
            span,
        });
    }

    fn export_named(&mut self, decl: &ExportNamedDeclaration) -> Result<(), TransformError> {
        self.records.is_es_module = true;

        if let Some(declaration) = &decl.declaration {
            for id in declaration.bound_names() {
                self.export(id.name.clone(), id.name.clone(), decl.span)?;
            }
            self.records.body.push(declaration.clone().into_statement());
            return Ok(());
        }

        match &decl.source {
            Some(source) => self.reexport(decl, source),
            None => {
                for specifier in &decl.specifiers {
                    let local = specifier.local.as_str();
                    if !self.bindings.contains(local) {
                        return Err(TransformError::UndefinedExportBinding {
                            name: local.to_string(),
                            span: specifier.span,
                        });
                    }
                    self.export(
                        local.to_string(),
                        specifier.exported.as_str().to_string(),
                        specifier.span,
                    )?;
                }
                Ok(())
            }
        }
    }

    /// `export { a as b } from "m"`: an implicit import of each name under
    /// a fresh alias, then an export of the alias.
    fn reexport(
        &mut self,
        decl: &ExportNamedDeclaration,
        source: &str,
    ) -> Result<(), TransformError> {
        check_specifier(source, decl.span)?;

        if decl.specifiers.is_empty() {
            self.side_effect_import(source, decl.span);
            return Ok(());
        }

        let handle = self.names.module_handle(source);
        let mut bindings = Vec::with_capacity(decl.specifiers.len());
        for specifier in &decl.specifiers {
            let imported = specifier.local.as_str();
            let alias = self.names.fresh(imported);
            self.export(
                alias.clone(),
                specifier.exported.as_str().to_string(),
                specifier.span,
            )?;
            bindings.push(ImportBinding {
                local: alias,
                imported: imported_name(imported),
            });
        }

        self.records.imports.push(ImportRecord {
            source: source.to_string(),
            handle: Some(handle),
            bindings,
            span: decl.span,
        });
        Ok(())
    }

    fn export_default(&mut self, decl: &ExportDefaultDeclaration) -> Result<(), TransformError> {
        self.records.is_es_module = true;

        let (local, stmt) = match &decl.declaration {
            ExportDefaultKind::Function(func) => {
                let (local, id) = self.default_name(func.id.as_ref());
                let func = Function {
                    id: Some(id),
                    ..func.clone()
                };
                (local, Statement::FunctionDeclaration(func))
            }
            ExportDefaultKind::Class(class) => {
                let (local, id) = self.default_name(class.id.as_ref());
                let class = Class {
                    id: Some(id),
                    ..class.clone()
                };
                (local, Statement::ClassDeclaration(class))
            }
            ExportDefaultKind::Expression(expr) => {
                let local = self.names.fresh("default");
                let stmt = Statement::VariableDeclaration(VariableDeclaration {
                    kind: VariableKind::Var,
                    declarations: vec![VariableDeclarator {
                        id: Pattern::Identifier(Identifier::new(local.as_str())),
                        init: Some(expr.clone()),
                    }],
                });
                (local, stmt)
            }
        };

        self.export(local, "default".to_string(), decl.span)?;
        self.records.body.push(stmt);
        Ok(())
    }

    /// The declared name of a default function or class, or a fresh one.
    fn default_name(&mut self, id: Option<&Identifier>) -> (String, Identifier) {
        match id {
            Some(id) => (id.name.clone(), id.clone()),
            None => {
                let local = self.names.fresh("default");
                let id = Identifier::new(local.as_str());
                (local, id)
            }
        }
    }

    fn export_all(&mut self, decl: &ExportAllDeclaration) -> Result<(), TransformError> {
        self.records.is_es_module = true;
        check_specifier(&decl.source, decl.span)?;

        let handle = self.names.module_handle(&decl.source);
        let mut bindings = Vec::new();
        match &decl.exported {
            // `export * as ns from "m"`
            Some(exported) => {
                let alias = self.names.fresh(exported.as_str());
                self.export(alias.clone(), exported.as_str().to_string(), decl.span)?;
                bindings.push(ImportBinding {
                    local: alias,
                    imported: ImportedName::Namespace,
                });
            }
            None => self.records.exports.push(ExportRecord::All(ExportAllRecord {
                source: decl.source.clone(),
                handle: handle.clone(),
                span: decl.span,
            })),
        }

        self.records.imports.push(ImportRecord {
            source: decl.source.clone(),
            handle: Some(handle),
            bindings,
            span: decl.span,
        });
        Ok(())
    }

    /// Records `exports[exported] = local`, routing `default` to the single
    /// default slot.
    fn export(&mut self, local: String, exported: String, span: Span) -> Result<(), TransformError> {
        if exported == "default" {
            if self.records.default_export().is_some() {
                return Err(TransformError::DuplicateDefaultExport { span });
            }
            self.records
                .exports
                .push(ExportRecord::Default(ExportDefaultRecord { local, span }));
            return Ok(());
        }

        if !self.exported.insert(exported.clone()) {
            return Err(TransformError::DuplicateExportName {
                name: exported,
                span,
            });
        }
        self.records
            .exports
            .push(ExportRecord::Named(ExportNamedRecord {
                local,
                exported,
                span,
            }));
        Ok(())
    }
}

fn imported_name(name: &str) -> ImportedName {
    if name == "default" {
        ImportedName::Default
    } else {
        ImportedName::Named(name.to_string())
    }
}

fn check_specifier(source: &str, span: Span) -> Result<(), TransformError> {
    if source.is_empty() {
        return Err(TransformError::InvalidModuleSpecifier { span });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlift_syntax::parse;

    fn collect_src(src: &str) -> Result<ModuleRecords, TransformError> {
        let program = parse(src).unwrap_or_else(|err| panic!("failed to parse: {err}"));
        let mut names = NameGenerator::new(scope::all_identifiers(&program));
        collect(&program, &mut names)
    }

    fn named(records: &ModuleRecords) -> Vec<(String, String)> {
        records
            .named_exports()
            .map(|n| (n.local.clone(), n.exported.clone()))
            .collect()
    }

    #[test]
    fn test_import_bindings_in_source_order() {
        let records = collect_src(
            "import D, { a, b as c, \"x y\" as z, default as e } from \"m\";\n\
             import N, * as NS from \"n\";",
        )
        .unwrap();
        assert!(records.is_es_module);
        assert_eq!(records.imports.len(), 2);

        let first = &records.imports[0];
        assert_eq!(first.handle.as_deref(), Some("_m"));
        let locals: Vec<_> = first.bindings.iter().map(|b| b.local.as_str()).collect();
        assert_eq!(locals, ["D", "a", "c", "z", "e"]);
        assert_eq!(first.bindings[0].imported, ImportedName::Default);
        assert_eq!(first.bindings[2].imported, ImportedName::Named("b".into()));
        assert_eq!(first.bindings[3].imported, ImportedName::Named("x y".into()));
        assert_eq!(first.bindings[4].imported, ImportedName::Default);

        let second = &records.imports[1];
        assert_eq!(second.bindings[1].imported, ImportedName::Namespace);
    }

    #[test]
    fn test_side_effect_import_has_no_handle() {
        let records = collect_src("import \"polyfill\";").unwrap();
        assert_eq!(records.imports[0].handle, None);
        assert!(records.imports[0].bindings.is_empty());
    }

    #[test]
    fn test_non_module_statements_pass_through() {
        let records = collect_src("let a = 1;\nimport b from \"b\";\na += b;").unwrap();
        assert_eq!(records.body.len(), 2);
        assert!(matches!(records.body[0], Statement::VariableDeclaration(_)));
        assert!(matches!(records.body[1], Statement::Expression(_)));
    }

    #[test]
    fn test_export_declarations_keep_statement() {
        let records =
            collect_src("export const { a, b: [c] } = o;\nexport function f() {}\nexport class K {}")
                .unwrap();
        assert_eq!(records.body.len(), 3);
        assert_eq!(
            named(&records),
            [
                ("a".to_string(), "a".to_string()),
                ("c".to_string(), "c".to_string()),
                ("f".to_string(), "f".to_string()),
                ("K".to_string(), "K".to_string()),
            ]
        );
    }

    #[test]
    fn test_export_list_same_local_twice() {
        let records = collect_src("let a = 1;\nexport { a, a as b };").unwrap();
        assert_eq!(
            named(&records),
            [
                ("a".to_string(), "a".to_string()),
                ("a".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_export_list_accepts_hoisted_var() {
        let records = collect_src("export { later };\nif (x) { var later = 1; }").unwrap();
        assert_eq!(named(&records).len(), 1);
    }

    #[test]
    fn test_export_list_undefined_binding() {
        let err = collect_src("let a;\nexport { a, missing };").unwrap_err();
        assert_eq!(
            err,
            TransformError::UndefinedExportBinding {
                name: "missing".into(),
                span: Span::new(19, 26),
            }
        );
    }

    #[test]
    fn test_export_as_default_counts_as_default() {
        let records = collect_src("let a;\nexport { a as default };").unwrap();
        assert_eq!(records.default_export().map(|d| d.local.as_str()), Some("a"));
        assert!(named(&records).is_empty());

        let err = collect_src("let a;\nexport { a as default };\nexport default 1;").unwrap_err();
        assert!(matches!(err, TransformError::DuplicateDefaultExport { .. }));
    }

    #[test]
    fn test_duplicate_export_name() {
        let err = collect_src("let a, b;\nexport { a as x };\nexport { b as x };").unwrap_err();
        assert!(matches!(
            err,
            TransformError::DuplicateExportName { ref name, .. } if name == "x"
        ));
    }

    #[test]
    fn test_default_function_keeps_or_synthesizes_name() {
        let records = collect_src("export default function named() {}").unwrap();
        assert_eq!(records.default_export().map(|d| d.local.as_str()), Some("named"));

        let records = collect_src("export default class {}").unwrap();
        assert_eq!(records.default_export().map(|d| d.local.as_str()), Some("_default"));
        let Statement::ClassDeclaration(class) = &records.body[0] else {
            panic!("expected class declaration");
        };
        assert_eq!(class.id.as_ref().map(|id| id.name.as_str()), Some("_default"));
    }

    #[test]
    fn test_default_expression_avoids_existing_names() {
        let records = collect_src("var _default = 1;\nexport default 42;").unwrap();
        assert_eq!(records.default_export().map(|d| d.local.as_str()), Some("_default2"));
    }

    #[test]
    fn test_reexport_creates_implicit_import() {
        let records =
            collect_src("export { a as b, default, default as c } from \"./dep\";").unwrap();
        assert_eq!(records.imports.len(), 1);
        let import = &records.imports[0];
        assert_eq!(import.handle.as_deref(), Some("_dep"));
        assert_eq!(import.bindings[0].local, "_a");
        assert_eq!(import.bindings[1].imported, ImportedName::Default);
        assert_eq!(import.bindings[2].local, "_default2");
        assert_eq!(named(&records), [
            ("_a".to_string(), "b".to_string()),
            ("_default2".to_string(), "c".to_string()),
        ]);
        assert_eq!(records.default_export().map(|d| d.local.as_str()), Some("_default"));
    }

    #[test]
    fn test_export_all_records() {
        let records = collect_src("export * from \"a\";\nexport * as ns from \"b\";").unwrap();
        assert_eq!(records.imports.len(), 2);
        assert!(records.imports[0].bindings.is_empty());
        assert_eq!(records.imports[1].bindings[0].imported, ImportedName::Namespace);
        assert_eq!(records.export_alls().map(|r| r.handle.as_str()).collect::<Vec<_>>(), ["_a"]);
        assert_eq!(named(&records), [("_ns".to_string(), "ns".to_string())]);
    }

    #[test]
    fn test_empty_specifier_is_rejected() {
        for src in ["import \"\";", "export * from \"\";", "export { a } from \"\";"] {
            let err = collect_src(src).unwrap_err();
            assert_eq!(err, TransformError::InvalidModuleSpecifier {
                span: Span::new(0, src.len()),
            });
        }
    }

    #[test]
    fn test_export_empty_list_is_still_a_module() {
        let records = collect_src("export {};").unwrap();
        assert!(records.is_es_module);
        assert!(records.exports.is_empty());
    }
}
