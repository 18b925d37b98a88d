// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! modlift - rewrites ES module syntax into CommonJS registry calls
//!
//! This is the main entry point for the modlift CLI/REPL.
//!
//! ## Features
//!
//! - Batch transformation of files, in parallel with rayon
//! - Diagnostics with source excerpts
//! - Interactive REPL previewing the transform

mod cli;
mod commands;
mod config;
mod diagnostics;
mod repl;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match &cli.command {
        Some(Commands::Transform(args)) => commands::transform::run(args, &cli).await,
        Some(Commands::Check(args)) => commands::check::run(args, &cli).await,
        Some(Commands::Repl) | None => run_repl(&cli),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {:#}", "error".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`/`--quiet`.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_repl(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    let mut repl = repl::Repl::new(config.transform)?;
    repl.run()?;
    Ok(ExitCode::SUCCESS)
}
