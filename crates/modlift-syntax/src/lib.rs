// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # modlift-syntax
//!
//! JavaScript front and back end for the modlift module transform.
//!
//! ## Overview
//!
//! This crate reads and writes ECMAScript module source:
//! - Lexer with regex and template rescanning
//! - Recursive descent parser producing an ESTree-like AST
//! - A source-order AST visitor
//! - A printer that turns an AST back into JavaScript
//! - Line/column mapping for diagnostics
//!
//! ## Quick Start
//!
//! ```rust
//! use modlift_syntax::{codegen, parse};
//!
//! let program = parse("import { a } from \"./a\";\nexport default a * 2;").unwrap();
//! assert_eq!(program.body.len(), 2);
//! assert_eq!(
//!     codegen::print_program(&program),
//!     "import { a } from \"./a\";\nexport default a * 2;\n"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod source;

mod error;

pub use error::{Error, Result};
pub use parser::{Parser, parse};
pub use source::{LineColumn, LineIndex};
