// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for genflow.

pub mod list;
pub mod plan;
pub mod requirements;
pub mod run;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use std::path::{Path, PathBuf};

use crate::config::{Config, ParamValue};

/// Code generation pipeline composer
///
/// Validate configurations, build flows and install the tools they need.
#[derive(Parser, Debug)]
#[clap(
    name = "genflow",
    version,
    about = "Compose and run multi-language code generation pipelines",
    long_about = None,
    after_help = "Examples:\n\
        genflow list                                  Show the pipeline catalog\n\
        genflow validate java-core -c genflow.yaml    Check a configuration\n\
        genflow plan go-grpc-client                   Show the steps a pipeline would run\n\
        genflow run sample --set sleep_secs=1         Run a pipeline\n\n\
        See 'genflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

/// Where a pipeline invocation gets its parameters from
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file (YAML, JSON or TOML)
    #[clap(short, long, default_value = "genflow.yaml", value_name = "FILE")]
    pub config: PathBuf,

    /// Set a parameter, overriding the configuration file
    #[clap(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl ConfigArgs {
    /// Load the configuration file (if present) and apply `--set` overrides.
    ///
    /// A missing file is only an error when it was named explicitly.
    pub fn load(&self) -> Result<Config> {
        let mut config = if self.config.exists() {
            Config::from_file(&self.config)?
        } else if self.config == Path::new("genflow.yaml") {
            tracing::debug!("no genflow.yaml found, starting from an empty configuration");
            Config::new()
        } else {
            return Err(miette::miette!(
                "Configuration file not found: {}",
                self.config.display()
            ));
        };

        for assignment in &self.set {
            let (key, value) = parse_assignment(assignment)?;
            config = config.with_param(&key, value);
        }

        Ok(config)
    }
}

/// Parse `key=value`.
///
/// Booleans and numbers keep their type only when they print back exactly as
/// written; anything else (`0x10`, `1e3`, `a: b`) stays a string.
fn parse_assignment(assignment: &str) -> Result<(String, ParamValue)> {
    let (key, raw) = assignment.split_once('=').ok_or_else(|| {
        miette::miette!("Invalid parameter '{}': expected KEY=VALUE", assignment)
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(miette::miette!(
            "Invalid parameter '{}': key is empty",
            assignment
        ));
    }

    Ok((key.to_string(), parse_scalar(raw)))
}

fn parse_scalar(raw: &str) -> ParamValue {
    if let Ok(b) = raw.parse::<bool>() {
        return ParamValue::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        if i.to_string() == raw {
            return ParamValue::Integer(i);
        }
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() && f.to_string() == raw {
            return ParamValue::Float(f);
        }
    }
    ParamValue::String(raw.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in pipelines
    List {
        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a configuration against a pipeline
    Validate {
        /// Pipeline name
        pipeline: String,

        #[clap(flatten)]
        config: ConfigArgs,
    },

    /// Show the flow a pipeline would run
    Plan {
        /// Pipeline name
        pipeline: String,

        #[clap(flatten)]
        config: ConfigArgs,

        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run a pipeline
    Run {
        /// Pipeline name
        pipeline: String,

        #[clap(flatten)]
        config: ConfigArgs,

        /// Dry run (show what would be done)
        #[clap(long)]
        dry_run: bool,

        /// Do not install step requirements
        #[clap(long)]
        skip_requirements: bool,
    },

    /// Tool requirements
    Requirements {
        #[clap(subcommand)]
        action: RequirementsAction,
    },
}

/// Requirement actions
#[derive(Subcommand, Debug, Clone)]
pub enum RequirementsAction {
    /// Show the requirement dependency graph
    Graph {
        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: GraphFormat,
    },

    /// Install a requirement and everything it depends on
    Install {
        /// Requirement name
        name: String,
    },
}

/// Output format for list and plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "genflow",
            "run",
            "sample",
            "--set",
            "sleep_secs=2",
            "--dry-run",
        ]);

        match cli.command {
            Commands::Run {
                pipeline,
                config,
                dry_run,
                skip_requirements,
            } => {
                assert_eq!(pipeline, "sample");
                assert_eq!(config.set, vec!["sleep_secs=2"]);
                assert!(dry_run);
                assert!(!skip_requirements);
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignment_keeps_types() {
        assert_eq!(
            parse_assignment("sleep_secs=2").unwrap(),
            ("sleep_secs".to_string(), ParamValue::Integer(2))
        );
        assert_eq!(
            parse_assignment("auto_merge=true").unwrap().1,
            ParamValue::Bool(true)
        );
        assert_eq!(
            parse_assignment("output_dir=/tmp/out").unwrap().1,
            ParamValue::String("/tmp/out".to_string())
        );
        assert_eq!(
            parse_assignment("sleep_secs=0.5").unwrap().1,
            ParamValue::Float(0.5)
        );
        assert_eq!(
            parse_assignment("api_name=").unwrap().1,
            ParamValue::String(String::new())
        );
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_parse_assignment_does_not_reinterpret_strings() {
        for raw in ["0x10", "1e3", "007", "+5", "2.50", "inf", "NaN", "yes", "True", "~"] {
            assert_eq!(parse_scalar(raw), ParamValue::String(raw.to_string()), "{}", raw);
        }

        // Structured YAML syntax is not expanded
        assert_eq!(
            parse_assignment("api_name=library: v1").unwrap().1,
            ParamValue::String("library: v1".to_string())
        );
        assert_eq!(
            parse_assignment("src_proto_path=[a, b]").unwrap().1,
            ParamValue::String("[a, b]".to_string())
        );
    }

    #[test]
    fn test_config_args_apply_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("params.yaml");
        std::fs::write(&file, "api_name: library\nsleep_secs: 1\n").unwrap();

        let args = ConfigArgs {
            config: file,
            set: vec!["sleep_secs=3".to_string()],
        };
        let config = args.load().unwrap();
        assert_eq!(config.get_str("api_name"), Some("library"));
        assert_eq!(config.get("sleep_secs"), Some(&ParamValue::Integer(3)));
    }

    #[test]
    fn test_named_config_must_exist() {
        let args = ConfigArgs {
            config: PathBuf::from("/nonexistent/params.yaml"),
            set: vec![],
        };
        assert!(args.load().is_err());
    }
}
