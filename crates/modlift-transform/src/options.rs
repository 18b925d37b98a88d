// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Transform configuration.

use serde::{Deserialize, Serialize};

/// Default name of the runtime helper that unwraps a default import.
pub const DEFAULT_IMPORT_DEFAULT: &str = "_$$_IMPORT_DEFAULT";

/// Default name of the runtime helper that builds a namespace object.
pub const DEFAULT_IMPORT_ALL: &str = "_$$_IMPORT_ALL";

/// Options fixed before a transform starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Helper applied to a module handle for `import x from "m"`
    #[serde(alias = "importDefault")]
    pub import_default: String,

    /// Helper applied to a module handle for `import * as ns from "m"`
    #[serde(alias = "importAll")]
    pub import_all: String,

    /// Wrap every specifier in `require.resolve(...)`
    #[serde(alias = "resolve")]
    pub enable_resolve: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            import_default: DEFAULT_IMPORT_DEFAULT.to_string(),
            import_all: DEFAULT_IMPORT_ALL.to_string(),
            enable_resolve: false,
        }
    }
}

impl TransformOptions {
    /// Returns the options with `require.resolve` wrapping switched on or off.
    pub fn with_resolve(mut self, enable: bool) -> Self {
        self.enable_resolve = enable;
        self
    }

    /// The helper names, which synthesized names must never shadow.
    pub(crate) fn helper_names(&self) -> [&str; 2] {
        [&self.import_default, &self.import_all]
    }
}
