// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! What collection learns about a module's imports and exports.
//!
//! Records live for a single transform. They are produced in source order
//! and consumed by emission without further mutation.

use modlift_syntax::ast::{Span, Statement};

/// What a single import binding reads from the module handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    /// `import x from "m"`
    Default,
    /// `import * as x from "m"`
    Namespace,
    /// `import { name as x } from "m"`
    Named(String),
}

/// One local binding introduced by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// The name bound in this module
    pub local: String,
    /// What the binding reads
    pub imported: ImportedName,
}

/// One `require` of a source module.
///
/// Side-effect imports have neither a handle nor bindings. Implicit records
/// created for re-exports always have a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// The module specifier
    pub source: String,
    /// Local holding the result of `require`
    pub handle: Option<String>,
    /// Bindings in source order
    pub bindings: Vec<ImportBinding>,
    pub span: Span,
}

/// `export * from "m"`: copies every property of `handle` onto `exports`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAllRecord {
    pub source: String,
    pub handle: String,
    pub span: Span,
}

/// The local binding holding the default export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDefaultRecord {
    pub local: String,
    pub span: Span,
}

/// `exports[exported] = local`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNamedRecord {
    pub local: String,
    pub exported: String,
    pub span: Span,
}

/// An export in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRecord {
    All(ExportAllRecord),
    Default(ExportDefaultRecord),
    Named(ExportNamedRecord),
}

/// Everything collection produced for one program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleRecords {
    /// Imports, explicit and implicit, in source order
    pub imports: Vec<ImportRecord>,
    /// The statements that remain once module syntax is stripped
    pub body: Vec<Statement>,
    /// Exports in source order
    pub exports: Vec<ExportRecord>,
    /// Whether any import or export was seen
    pub is_es_module: bool,
}

impl ModuleRecords {
    /// Every `export *` record, in order.
    pub fn export_alls(&self) -> impl Iterator<Item = &ExportAllRecord> {
        self.exports.iter().filter_map(|record| match record {
            ExportRecord::All(all) => Some(all),
            _ => None,
        })
    }

    /// Every named export record, in order.
    pub fn named_exports(&self) -> impl Iterator<Item = &ExportNamedRecord> {
        self.exports.iter().filter_map(|record| match record {
            ExportRecord::Named(named) => Some(named),
            _ => None,
        })
    }

    /// The default export, if any.
    pub fn default_export(&self) -> Option<&ExportDefaultRecord> {
        self.exports.iter().find_map(|record| match record {
            ExportRecord::Default(default) => Some(default),
            _ => None,
        })
    }

    /// Source modules in first-seen order, without duplicates.
    pub fn dependencies(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for import in &self.imports {
            if !seen.contains(&import.source) {
                seen.push(import.source.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(source: &str, handle: Option<&str>) -> ImportRecord {
        ImportRecord {
            source: source.to_string(),
            handle: handle.map(str::to_string),
            bindings: Vec::new(),
            span: Span::default(),
        }
    }

    #[test]
    fn test_export_groups_keep_source_order() {
        let records = ModuleRecords {
            exports: vec![
                ExportRecord::Named(ExportNamedRecord {
                    local: "a".into(),
                    exported: "a".into(),
                    span: Span::default(),
                }),
                ExportRecord::All(ExportAllRecord {
                    source: "x".into(),
                    handle: "_x".into(),
                    span: Span::default(),
                }),
                ExportRecord::Default(ExportDefaultRecord {
                    local: "_default".into(),
                    span: Span::default(),
                }),
                ExportRecord::Named(ExportNamedRecord {
                    local: "b".into(),
                    exported: "c".into(),
                    span: Span::default(),
                }),
            ],
            ..ModuleRecords::default()
        };
        let named: Vec<_> = records.named_exports().map(|n| n.exported.as_str()).collect();
        assert_eq!(named, ["a", "c"]);
        assert_eq!(records.export_alls().count(), 1);
        assert_eq!(records.default_export().map(|d| d.local.as_str()), Some("_default"));
    }

    #[test]
    fn test_dependencies_are_unique() {
        let records = ModuleRecords {
            imports: vec![
                import("react", Some("_react")),
                import("./polyfill", None),
                import("react", Some("_react2")),
            ],
            ..ModuleRecords::default()
        };
        assert_eq!(records.dependencies(), ["react", "./polyfill"]);
    }
}
