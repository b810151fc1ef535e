// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Plan command - show the flow a pipeline builds

use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use super::{ConfigArgs, OutputFormat};
use crate::pipeline::PipelineRegistry;

/// Run the plan command
pub async fn run(
    pipeline_name: String,
    args: ConfigArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let config = args.load()?;
    let flow = PipelineRegistry::builtin().prepare(&pipeline_name, &config)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&flow).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}: {}", "Flow".bold(), flow.name);
            println!("{}", "═".repeat(50));
            print!("{}", flow.to_text());

            if verbose {
                for step in &flow.steps {
                    println!();
                    println!("{}:", step.name.bold());
                    for (key, value) in step.injection.iter() {
                        println!("    {} = {}", key, value.to_string().dimmed());
                    }
                }
            }
        }
    }

    Ok(())
}
