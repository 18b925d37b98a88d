// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// modlift - rewrite ES module syntax into CommonJS registry calls
#[derive(Parser, Debug)]
#[command(name = "modlift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to ./modlift.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform files and write or print the result
    Transform(TransformArgs),

    /// Parse and transform files, reporting diagnostics only
    Check(CheckArgs),

    /// Preview the transform interactively
    Repl,
}

#[derive(Args, Debug, Default)]
pub struct TransformArgs {
    /// Files to transform
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for transformed files (prints to stdout when unset)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Runtime helper for default imports
    #[arg(long, value_name = "NAME")]
    pub import_default: Option<String>,

    /// Runtime helper for namespace imports
    #[arg(long, value_name = "NAME")]
    pub import_all: Option<String>,

    /// Wrap module specifiers in require.resolve()
    #[arg(long)]
    pub resolve: bool,

    /// Also emit module metadata as JSON
    #[arg(long)]
    pub metadata: bool,
}

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "modlift",
            "-v",
            "transform",
            "a.js",
            "b.js",
            "--out-dir",
            "build",
            "--import-default",
            "interop",
            "--resolve",
        ]);
        assert!(cli.verbose);
        let Some(Commands::Transform(args)) = cli.command else {
            panic!("expected transform");
        };
        assert_eq!(args.files, [PathBuf::from("a.js"), PathBuf::from("b.js")]);
        assert_eq!(args.out_dir, Some(PathBuf::from("build")));
        assert_eq!(args.import_default.as_deref(), Some("interop"));
        assert!(args.resolve);
        assert!(!args.metadata);
    }

    #[test]
    fn test_no_subcommand_defaults_to_repl() {
        let cli = Cli::parse_from(["modlift"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["modlift", "check"]).is_err());
    }
}
