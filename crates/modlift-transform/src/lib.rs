// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # modlift-transform
//!
//! Rewrites ES module `import`/`export` syntax into calls against a
//! CommonJS-style registry: `require`, `exports`, and two interop helpers.
//!
//! The transform runs in two phases. Collection reads the top-level
//! statements and records every import and export in source order.
//! Emission turns those records into a new statement list. The input
//! program is never modified.
//!
//! ## Quick Start
//!
//! ```
//! use modlift_transform::{TransformOptions, transform_source};
//!
//! let output = transform_source(
//!     "import a from \"./a\";\nexport const b = a + 1;",
//!     &TransformOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(output.is_es_module);
//! assert_eq!(
//!     output.code,
//!     "var _a = require(\"./a\");\n\
//!      var a = _$$_IMPORT_DEFAULT(_a);\n\
//!      const b = a + 1;\n\
//!      exports.b = b;\n\
//!      Object.defineProperty(exports, \"__esModule\", { value: true });\n"
//! );
//! ```
//!
//! ## Bindings
//!
//! Exports are assigned once, after the module body has run. A later
//! reassignment of an exported local is not seen by importers, and named
//! imports read the handle's property once.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod collect;
mod emit;
mod error;
mod naming;
mod options;
mod records;
mod scope;

use modlift_syntax::ast::{Program, Statement};
use modlift_syntax::codegen::print_statements;
use tracing::debug;

pub use error::{Error, TransformError};
pub use options::{DEFAULT_IMPORT_ALL, DEFAULT_IMPORT_DEFAULT, TransformOptions};

use naming::NameGenerator;

/// The rewritten program.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    /// True if any `import` or `export` was seen
    pub is_es_module: bool,
    /// The replacement top-level statements
    pub statements: Vec<Statement>,
    /// Required modules in first-seen order, without duplicates
    pub dependencies: Vec<String>,
}

/// Printed output of [`transform_source`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// The rewritten source
    pub code: String,
    /// True if any `import` or `export` was seen
    pub is_es_module: bool,
    /// Required modules in first-seen order, without duplicates
    pub dependencies: Vec<String>,
}

/// Rewrites the module syntax of `program`.
///
/// A program without module syntax comes back unchanged. Malformed module
/// declarations reject the whole program.
pub fn transform(
    program: &Program,
    options: &TransformOptions,
) -> Result<TransformResult, TransformError> {
    let mut names = NameGenerator::new(scope::all_identifiers(program));
    for helper in options.helper_names() {
        names.reserve(helper);
    }

    let records = collect::collect(program, &mut names)?;
    if !records.is_es_module {
        debug!("no module syntax, passing program through");
        return Ok(TransformResult {
            is_es_module: false,
            statements: program.body.clone(),
            dependencies: Vec::new(),
        });
    }

    let dependencies = records.dependencies();
    let statements = emit::emit(records, options, &mut names);
    Ok(TransformResult {
        is_es_module: true,
        statements,
        dependencies,
    })
}

/// Parses, transforms and prints `source`.
pub fn transform_source(
    source: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, Error> {
    let program = modlift_syntax::parse(source)?;
    let result = transform(&program, options)?;
    Ok(TransformOutput {
        code: print_statements(&result.statements),
        is_es_module: result.is_es_module,
        dependencies: result.dependencies,
    })
}
