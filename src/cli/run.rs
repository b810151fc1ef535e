// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Run command - build and execute a pipeline's flow

use colored::Colorize;
use miette::Result;

use super::ConfigArgs;
use crate::pipeline::{FlowRunner, PipelineRegistry, RunOptions};

/// Run a pipeline
pub async fn run(
    pipeline_name: String,
    args: ConfigArgs,
    dry_run: bool,
    skip_requirements: bool,
    verbose: bool,
) -> Result<()> {
    let config = args.load()?;

    // Validation happens here, before the runner sees anything
    let flow = PipelineRegistry::builtin().prepare(&pipeline_name, &config)?;

    let runner = FlowRunner::default();

    let missing = runner.missing_executors(&flow);
    if !missing.is_empty() {
        let header = if dry_run {
            "No executor registered for:".yellow().bold()
        } else {
            "No executor registered for:".red().bold()
        };
        eprintln!("{}", header);
        for kind in &missing {
            eprintln!("  {} {}", "✗".red(), kind);
        }
        eprintln!(
            "    Code generation steps need executors from the embedding application; \
             only '{}' runs standalone.",
            "sample".cyan()
        );
    }

    let options = RunOptions {
        dry_run,
        skip_requirements,
        progress: true,
        verbose,
    };

    let result = runner.run(&flow, &options).await?;

    if result.dry_run {
        println!("{}", "Dry run: nothing was executed.".dimmed());
        return Ok(());
    }

    if verbose && !result.requirements.already_installed.is_empty() {
        println!();
        println!(
            "{}: {}",
            "Tools already present".bold(),
            result.requirements.already_installed.join(", ")
        );
    }

    Ok(())
}
