// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! List command - show the pipeline catalog

use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::OutputFormat;
use crate::pipeline::{catalog, ArtifactKind, Pipeline, PipelineDefinition};

#[derive(Debug, Serialize)]
struct PipelineSummary {
    name: &'static str,
    language: &'static str,
    kind: ArtifactKind,
    steps: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    augmentation: Option<&'static str>,
    required_parameters: Vec<String>,
}

fn summaries() -> Vec<PipelineSummary> {
    catalog::PIPELINES
        .iter()
        .map(|spec| PipelineSummary {
            name: spec.name,
            language: spec.language,
            kind: spec.kind,
            steps: spec.step_templates().map(|t| t.name).collect(),
            augmentation: spec.augmentation.map(|a| a.name),
            required_parameters: Pipeline::from_spec(spec)
                .required_parameters()
                .into_iter()
                .collect(),
        })
        .collect()
}

/// Run the list command
pub async fn run(format: OutputFormat, verbose: bool) -> Result<()> {
    let summaries = summaries();

    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&summaries).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", "Pipelines".bold());
    println!("{}", "═".repeat(50));

    for summary in &summaries {
        let language = if summary.language.is_empty() {
            "-"
        } else {
            summary.language
        };
        println!(
            "  {:<22} {:<8} {}",
            summary.name.bold(),
            language,
            summary.kind.to_string().dimmed()
        );

        if verbose {
            println!("      steps:      {}", summary.steps.join(" → "));
            if let Some(augmentation) = summary.augmentation {
                println!("      augmented:  {}", augmentation);
            }
            println!(
                "      parameters: {}",
                summary.required_parameters.join(", ").dimmed()
            );
        }
    }

    println!();
    println!(
        "{} pipelines. Run '{}' for the parameters each one needs.",
        summaries.len(),
        "genflow list --verbose".cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries_cover_catalog() {
        let summaries = summaries();
        assert_eq!(summaries.len(), catalog::PIPELINES.len());

        let sample = summaries.iter().find(|s| s.name == "sample").unwrap();
        assert_eq!(sample.required_parameters, vec!["sleep_secs"]);
        assert_eq!(sample.steps, vec!["SampleTask"]);
        assert_eq!(sample.augmentation, None);

        let go = summaries.iter().find(|s| s.name == "go-core-proto").unwrap();
        assert_eq!(go.augmentation, Some("go-import-rewrite"));
        assert_eq!(go.steps.last(), Some(&"UpdateImports"));
    }
}
