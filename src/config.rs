// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration loading.
//!
//! Settings are layered: built-in defaults, then `modlift.toml`, then
//! `MODLIFT_*` environment variables, then command line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use modlift_transform::TransformOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::TransformArgs;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "modlift.toml";

/// Contents of `modlift.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options passed to the transform
    pub transform: TransformOptions,

    /// Where results go
    pub output: OutputConfig,
}

/// The `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for transformed files; stdout when unset
    pub out_dir: Option<PathBuf>,

    /// Emit `<file>.meta.json` alongside each output
    pub metadata: bool,
}

impl Config {
    /// Loads the configuration file and applies environment overrides.
    ///
    /// An explicit path must exist; the implicit `modlift.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses the contents of a configuration file.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `MODLIFT_IMPORT_DEFAULT`, `MODLIFT_IMPORT_ALL` and
    /// `MODLIFT_ENABLE_RESOLVE` as read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("MODLIFT_IMPORT_DEFAULT") {
            self.transform.import_default = name;
        }
        if let Some(name) = lookup("MODLIFT_IMPORT_ALL") {
            self.transform.import_all = name;
        }
        if let Some(value) = lookup("MODLIFT_ENABLE_RESOLVE") {
            match parse_bool(&value) {
                Some(enable) => self.transform.enable_resolve = enable,
                None => warn!("Ignoring MODLIFT_ENABLE_RESOLVE={value:?}: expected a boolean"),
            }
        }
    }

    /// Applies `transform` command line flags, which win over everything.
    pub fn apply_args(&mut self, args: &TransformArgs) {
        if let Some(name) = &args.import_default {
            self.transform.import_default = name.clone();
        }
        if let Some(name) = &args.import_all {
            self.transform.import_all = name.clone();
        }
        if args.resolve {
            self.transform.enable_resolve = true;
        }
        if let Some(dir) = &args.out_dir {
            self.output.out_dir = Some(dir.clone());
        }
        if args.metadata {
            self.output.metadata = true;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
            [transform]
            import_default = "interopDefault"
            enable_resolve = true

            [output]
            out_dir = "build"
            metadata = true
            "#,
        )
        .unwrap();
        assert_eq!(config.transform.import_default, "interopDefault");
        assert_eq!(config.transform.import_all, "_$$_IMPORT_ALL");
        assert!(config.transform.enable_resolve);
        assert_eq!(config.output.out_dir, Some(PathBuf::from("build")));
        assert!(config.output.metadata);
    }

    #[test]
    fn test_from_toml_accepts_camel_case() {
        let config = Config::from_toml("[transform]\nimportAll = \"ns\"\nresolve = true\n").unwrap();
        assert_eq!(config.transform.import_all, "ns");
        assert!(config.transform.enable_resolve);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("[transform\n").is_err());
        assert!(Config::from_toml("[transform]\nenable_resolve = \"maybe\"\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("MODLIFT_IMPORT_DEFAULT", "envDefault"),
            ("MODLIFT_ENABLE_RESOLVE", "yes"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.transform.import_default, "envDefault");
        assert_eq!(config.transform.import_all, "_$$_IMPORT_ALL");
        assert!(config.transform.enable_resolve);
    }

    #[test]
    fn test_bad_env_boolean_is_ignored() {
        let mut config = Config::default();
        config.transform.enable_resolve = true;
        config.apply_env(|key| (key == "MODLIFT_ENABLE_RESOLVE").then(|| "sometimes".to_string()));
        assert!(config.transform.enable_resolve);
    }

    #[test]
    fn test_args_win() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "MODLIFT_IMPORT_ALL").then(|| "fromEnv".to_string()));
        config.apply_args(&TransformArgs {
            import_all: Some("fromArgs".to_string()),
            metadata: true,
            ..TransformArgs::default()
        });
        assert_eq!(config.transform.import_all, "fromArgs");
        assert!(config.output.metadata);
        assert!(config.output.out_dir.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/modlift.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
