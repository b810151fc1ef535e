// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Error types
//!
//! Every admission failure is raised before a single step runs, so the
//! messages here have to be complete enough to fix the input in one pass.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for genflow operations
pub type GenflowResult<T> = Result<T, GenflowError>;

/// Main error type for genflow
#[derive(Error, Debug, Diagnostic)]
pub enum GenflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Admission Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Missing required parameter(s): {}", .missing.join(", "))]
    #[diagnostic(
        code(genflow::missing_parameters),
        help("Add the missing keys to the pipeline configuration")
    )]
    MissingParameters { missing: Vec<String> },

    #[error("Invalid tooling path '{path}': {reason}")]
    #[diagnostic(
        code(genflow::invalid_tooling_path),
        help("gapi_tools_path must point at a checkout containing `gradlew` and `build.gradle`")
    )]
    InvalidToolingPath { path: PathBuf, reason: String },

    #[error("Parameter '{name}' is invalid: {reason}")]
    #[diagnostic(code(genflow::invalid_parameter))]
    InvalidParameter { name: String, reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Requirement Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to install requirement '{requirement}': {error}")]
    #[diagnostic(
        code(genflow::installation_failed),
        help("Fix the problem and re-run; already installed requirements are skipped")
    )]
    Installation { requirement: String, error: String },

    #[error("Circular requirement: {}", .chain.join(" → "))]
    #[diagnostic(
        code(genflow::circular_requirement),
        help("A requirement must not depend on itself, directly or transitively")
    )]
    CircularRequirement { chain: Vec<String> },

    #[error("Requirement '{name}' not found")]
    #[diagnostic(code(genflow::requirement_not_found))]
    RequirementNotFound {
        name: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline '{name}' not found")]
    #[diagnostic(code(genflow::pipeline_not_found))]
    PipelineNotFound {
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("Pipeline '{name}' is already registered")]
    #[diagnostic(code(genflow::duplicate_pipeline))]
    DuplicatePipeline { name: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Execution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("No executor registered for step kind: {kind}")]
    #[diagnostic(
        code(genflow::executor_not_found),
        help("Register a step executor for '{kind}' before running this flow")
    )]
    ExecutorNotFound { kind: String },

    #[error("Step '{step}' failed: {error}")]
    #[diagnostic(code(genflow::step_failed))]
    StepFailed {
        step: String,
        error: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(genflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Unsupported configuration format: {path}")]
    #[diagnostic(
        code(genflow::unsupported_config_format),
        help("Supported formats: YAML (.yaml, .yml), JSON (.json), TOML (.toml)")
    )]
    UnsupportedConfigFormat { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────────
    // Parse Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(genflow::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(genflow::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(genflow::toml_error))]
    Toml { message: String },
}

impl From<serde_yaml::Error> for GenflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for GenflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for GenflowError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl GenflowError {
    /// Create a missing parameters error; names are sorted and deduplicated
    pub fn missing_parameters<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut missing: Vec<String> = names.into_iter().map(Into::into).collect();
        missing.sort();
        missing.dedup();
        Self::MissingParameters { missing }
    }

    /// Create a pipeline not found error listing what is available
    pub fn pipeline_not_found(name: &str, available: &[&str]) -> Self {
        let help = if available.is_empty() {
            None
        } else {
            Some(format!("Available pipelines: {}", available.join(", ")))
        };

        Self::PipelineNotFound {
            name: name.to_string(),
            help,
        }
    }

    /// Create a requirement not found error listing what is available
    pub fn requirement_not_found(name: &str, available: &[&str]) -> Self {
        Self::RequirementNotFound {
            name: name.to_string(),
            help: Some(format!("Known requirements: {}", available.join(", "))),
        }
    }

    /// Wrap an installer failure, naming the node that failed
    pub fn installation(requirement: &str, error: &anyhow::Error) -> Self {
        Self::Installation {
            requirement: requirement.to_string(),
            error: format!("{:#}", error),
        }
    }
}
