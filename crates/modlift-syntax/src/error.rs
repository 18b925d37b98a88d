// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for lexing and parsing

use thiserror::Error;

use crate::lexer::Span;

/// Result type for syntax operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while reading JavaScript source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source is not valid JavaScript
    #[error("SyntaxError: {message}")]
    Syntax {
        /// What went wrong
        message: String,
        /// Where it went wrong
        span: Span,
    },
}

impl Error {
    /// Creates a syntax error at the given location.
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Error::Syntax {
            message: message.into(),
            span,
        }
    }

    /// The location the error refers to.
    pub fn span(&self) -> Span {
        match self {
            Error::Syntax { span, .. } => *span,
        }
    }

    /// The message without the `SyntaxError:` prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Syntax { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_prefix() {
        let err = Error::syntax("Unexpected token", Span::new(3, 4));
        assert_eq!(err.to_string(), "SyntaxError: Unexpected token");
        assert_eq!(err.span(), Span::new(3, 4));
        assert_eq!(err.message(), "Unexpected token");
    }
}
