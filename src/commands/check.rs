// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! `modlift check`

use std::process::ExitCode;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{read_sources, report_failure, transform_all};
use crate::cli::{CheckArgs, Cli};
use crate::config::Config;

pub async fn run(args: &CheckArgs, cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    let (files, mut failed) = read_sources(&args.files).await;
    let outcomes = transform_all(files, config.transform).await?;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(output) => {
                if !cli.quiet {
                    let kind = if output.is_es_module { "module" } else { "script" };
                    println!(
                        "{} {} {}",
                        "ok".green().bold(),
                        outcome.file.path.display(),
                        format!("({kind})").dimmed()
                    );
                }
            }
            Err(err) => {
                report_failure(&outcome.file, err);
                failed += 1;
            }
        }
    }

    if !cli.quiet {
        let checked = args.files.len();
        let summary = format!("{checked} checked, {failed} failed");
        if failed > 0 {
            eprintln!("{}", summary.red());
        } else {
            eprintln!("{}", summary.dimmed());
        }
    }

    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
