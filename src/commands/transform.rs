// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! `modlift transform`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use modlift_transform::TransformOutput;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::info;

use super::{SourceFile, read_sources, report_failure, transform_all};
use crate::cli::{Cli, TransformArgs};
use crate::config::{Config, OutputConfig};

/// What downstream tooling needs to know about a transformed module.
#[derive(Debug, Serialize)]
pub struct ModuleMetadata {
    pub path: String,
    #[serde(rename = "isESModule")]
    pub is_es_module: bool,
    pub dependencies: Vec<String>,
}

impl ModuleMetadata {
    fn new(path: &Path, output: &TransformOutput) -> Self {
        Self {
            path: path.display().to_string(),
            is_es_module: output.is_es_module,
            dependencies: output.dependencies.clone(),
        }
    }
}

pub async fn run(args: &TransformArgs, cli: &Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_args(args);

    let (files, mut failed) = read_sources(&args.files).await;
    let outcomes = transform_all(files, config.transform.clone()).await?;

    if let Some(dir) = &config.output.out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let label_outputs = outcomes.len() > 1;
    let mut written = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(output) => {
                emit(&outcome.file, output, &config.output, label_outputs).await?;
                written += 1;
            }
            Err(err) => {
                report_failure(&outcome.file, err);
                failed += 1;
            }
        }
    }

    if let Some(dir) = &config.output.out_dir {
        info!("Wrote {} file(s) to {}", written, dir.display());
        if !cli.quiet {
            eprintln!(
                "{} {} file(s) into {}",
                "Transformed".green().bold(),
                written,
                dir.display().cyan()
            );
        }
    }

    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Writes the output and metadata of one file, or prints them.
///
/// Without an output directory, `--metadata` prints one JSON object per
/// file instead of the code.
async fn emit(
    file: &SourceFile,
    output: &TransformOutput,
    settings: &OutputConfig,
    label: bool,
) -> Result<()> {
    let metadata = ModuleMetadata::new(&file.path, output);

    let Some(dir) = &settings.out_dir else {
        if settings.metadata {
            println!("{}", serde_json::to_string(&metadata)?);
        } else {
            if label {
                println!("// {}", file.path.display());
            }
            print!("{}", output.code);
        }
        return Ok(());
    };

    let target = output_path(dir, &file.path)?;
    tokio::fs::write(&target, &output.code)
        .await
        .with_context(|| format!("failed to write {}", target.display()))?;

    if settings.metadata {
        let mut meta_path = target.into_os_string();
        meta_path.push(".meta.json");
        let meta_path = PathBuf::from(meta_path);
        let json = serde_json::to_string_pretty(&metadata)?;
        tokio::fs::write(&meta_path, json)
            .await
            .with_context(|| format!("failed to write {}", meta_path.display()))?;
    }
    Ok(())
}

/// `dir/<file name of input>`
fn output_path(dir: &Path, input: &Path) -> Result<PathBuf> {
    let name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?;
    Ok(dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_shape() {
        let metadata = ModuleMetadata {
            path: "src/a.js".to_string(),
            is_es_module: true,
            dependencies: vec!["react".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&metadata).unwrap(),
            r#"{"path":"src/a.js","isESModule":true,"dependencies":["react"]}"#
        );
    }

    #[test]
    fn test_output_path_uses_file_name() {
        let path = output_path(Path::new("build"), Path::new("src/lib/index.js")).unwrap();
        assert_eq!(path, Path::new("build").join("index.js"));
        assert!(output_path(Path::new("build"), Path::new("..")).is_err());
    }
}
