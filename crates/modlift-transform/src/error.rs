// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the module transform

use modlift_syntax::ast::Span;
use thiserror::Error;

/// A malformed import or export. The whole program is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A second default export
    #[error("Duplicate default export")]
    DuplicateDefaultExport {
        /// Location of the second default export
        span: Span,
    },

    /// `export { x }` where `x` is not bound at module scope
    #[error("Export '{name}' is not defined in this module")]
    UndefinedExportBinding {
        /// The missing local name
        name: String,
        /// Location of the export specifier
        span: Span,
    },

    /// An empty string as a module specifier
    #[error("Module specifier must not be empty")]
    InvalidModuleSpecifier {
        /// Location of the declaration
        span: Span,
    },

    /// Two named exports with the same exported name
    #[error("Duplicate export of '{name}'")]
    DuplicateExportName {
        /// The exported name
        name: String,
        /// Location of the second export
        span: Span,
    },
}

impl TransformError {
    /// The location the error refers to.
    pub fn span(&self) -> Span {
        match self {
            TransformError::DuplicateDefaultExport { span }
            | TransformError::UndefinedExportBinding { span, .. }
            | TransformError::InvalidModuleSpecifier { span }
            | TransformError::DuplicateExportName { span, .. } => *span,
        }
    }
}

/// Errors from [`transform_source`](crate::transform_source): the source
/// either fails to parse or fails to transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source is not valid JavaScript
    #[error(transparent)]
    Syntax(#[from] modlift_syntax::Error),

    /// The module declarations are malformed
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl Error {
    /// The location the error refers to.
    pub fn span(&self) -> Span {
        match self {
            Error::Syntax(err) => err.span(),
            Error::Transform(err) => err.span(),
        }
    }
}
