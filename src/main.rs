// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! genflow - Code Generation Pipeline Composer
//!
//! Validate, plan and run multi-language code generation pipelines.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genflow::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genflow=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::List { format } => genflow::cli::list::run(format, cli.verbose).await,
        Commands::Validate { pipeline, config } => {
            genflow::cli::validate::run(pipeline, config, cli.verbose).await
        }
        Commands::Plan {
            pipeline,
            config,
            format,
        } => genflow::cli::plan::run(pipeline, config, format, cli.verbose).await,
        Commands::Run {
            pipeline,
            config,
            dry_run,
            skip_requirements,
        } => {
            genflow::cli::run::run(pipeline, config, dry_run, skip_requirements, cli.verbose).await
        }
        Commands::Requirements { action } => {
            genflow::cli::requirements::run(action, cli.verbose).await
        }
    }
}
