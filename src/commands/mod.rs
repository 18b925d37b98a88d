// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Command implementations.

pub mod check;
pub mod transform;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use modlift_transform::{Error, TransformOptions, TransformOutput, transform_source};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::diagnostics;

/// A file read from disk.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// The result of transforming one file.
#[derive(Debug)]
pub struct Outcome {
    pub file: SourceFile,
    pub result: Result<TransformOutput, Error>,
}

/// Reads every file. Unreadable files are reported and skipped.
pub async fn read_sources(paths: &[PathBuf]) -> (Vec<SourceFile>, usize) {
    let mut files = Vec::with_capacity(paths.len());
    let mut failed = 0;
    for path in paths {
        match read_source(path).await {
            Ok(file) => files.push(file),
            Err(err) => {
                report(&format!("{err:#}"));
                failed += 1;
            }
        }
    }
    (files, failed)
}

async fn read_source(path: &Path) -> Result<SourceFile> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        text,
    })
}

/// Transforms every file in parallel, keeping input order.
pub async fn transform_all(
    files: Vec<SourceFile>,
    options: TransformOptions,
) -> Result<Vec<Outcome>> {
    let outcomes = tokio::task::spawn_blocking(move || {
        files
            .into_par_iter()
            .map(|file| {
                let result = transform_file(&file.path, &file.text, &options);
                Outcome { file, result }
            })
            .collect::<Vec<_>>()
    })
    .await
    .context("transform worker panicked")?;
    Ok(outcomes)
}

#[instrument(skip(source, options), fields(path = %path.display()))]
fn transform_file(
    path: &Path,
    source: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, Error> {
    let output = transform_source(source, options)?;
    debug!(
        is_es_module = output.is_es_module,
        dependencies = output.dependencies.len(),
        "transformed"
    );
    Ok(output)
}

/// Prints the diagnostic for a failed file to stderr.
pub fn report_failure(file: &SourceFile, error: &Error) {
    let color = std::io::stderr().is_terminal();
    eprint!(
        "{}",
        diagnostics::render(&file.path.display().to_string(), &file.text, error, color)
    );
}

fn report(message: &str) {
    eprintln!("{}: {}", "error".red().bold(), message);
}
