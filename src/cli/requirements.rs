// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Requirements command - inspect and install tool requirements

use colored::Colorize;
use miette::Result;

use super::{GraphFormat, RequirementsAction};
use crate::requirements::{self, RequirementGraph, RequirementResolver};
use crate::utils;

/// Run a requirements action
pub async fn run(action: RequirementsAction, verbose: bool) -> Result<()> {
    match action {
        RequirementsAction::Graph { format } => graph(format),
        RequirementsAction::Install { name } => install(&name, verbose).await,
    }
}

fn graph(format: GraphFormat) -> Result<()> {
    let graph = RequirementGraph::build(&requirements::builtin())?;

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Mermaid => graph.to_mermaid(),
    };

    print!("{}", output);
    Ok(())
}

async fn install(name: &str, verbose: bool) -> Result<()> {
    let requirement = requirements::find(name)?;

    let spinner = utils::create_spinner(&format!("Resolving {}...", name));
    let resolver = RequirementResolver::new();
    let outcome = utils::spin_blocking(Some(spinner), move || {
        resolver.ensure_installed(&requirement)
    })
    .await
    .map_err(|e| miette::miette!("Resolution of '{}' did not complete: {}", name, e))?;

    let report = outcome?;

    for installed in &report.installed {
        println!("  {} {} installed", "✓".green(), installed.bold());
    }
    if verbose {
        for present in &report.already_installed {
            println!("  {} {} {}", "○".dimmed(), present, "(already installed)".dimmed());
        }
    }

    if report.installed_anything() {
        println!();
        println!("{}", format!("'{}' is ready.", name).green().bold());
    } else {
        println!("{}", format!("'{}' is already installed.", name).green());
    }

    Ok(())
}
