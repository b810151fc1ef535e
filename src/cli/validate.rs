// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Validate command - check a configuration against a pipeline

use colored::Colorize;
use miette::Result;

use super::ConfigArgs;
use crate::config;
use crate::pipeline::PipelineRegistry;

/// Run the validate command
pub async fn run(pipeline_name: String, args: ConfigArgs, verbose: bool) -> Result<()> {
    println!("{}", "Validating configuration...".bold());
    println!();

    let config = args.load()?;
    let registry = PipelineRegistry::builtin();
    let pipeline = registry.create(&pipeline_name)?;

    println!(
        "  {} Loaded {} parameter{}",
        "✓".green(),
        config.len(),
        if config.len() == 1 { "" } else { "s" }
    );

    if let Err(e) = pipeline.validate(&config) {
        println!("  {} {}", "✗".red(), pipeline_name.bold());
        println!();
        return Err(e.into());
    }

    println!("  {} All required parameters present", "✓".green());

    if verbose {
        println!();
        println!("{}:", "Required parameters".bold());
        for name in pipeline.required_parameters() {
            // The pipeline owns the language tag
            let value = if name == config::LANGUAGE {
                pipeline.language().to_string()
            } else {
                config.get(&name).map(|v| v.to_string()).unwrap_or_default()
            };
            println!("    {} = {}", name, value.dimmed());
        }
    }

    println!();
    println!(
        "{}",
        format!("Configuration is valid for '{}'!", pipeline_name)
            .green()
            .bold()
    );
    Ok(())
}
