// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! # genflow - Code Generation Pipeline Composer
//!
//! `genflow` composes multi-language code generation pipelines out of
//! reusable steps, validates their configuration up front and installs the
//! external tools each step needs.
//!
//! ## Features
//!
//! - **Pipeline catalog** - 13 built-in pipelines across Java, Python, Go and C#
//! - **Early validation** - every missing parameter reported before anything runs
//! - **Requirement resolution** - tools installed dependencies-first, once
//! - **Pluggable execution** - register executors per step kind
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the catalog
//! genflow list
//!
//! # Check a configuration
//! genflow validate java-core -c genflow.yaml
//!
//! # Show the steps a pipeline would run
//! genflow plan java-vkit-client -c genflow.yaml
//!
//! # Run the sample pipeline
//! genflow run sample --set sleep_secs=1
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod executors;
pub mod pipeline;
pub mod requirements;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ParamValue};
pub use errors::{GenflowError, GenflowResult};
pub use pipeline::{Flow, FlowRunner, Pipeline, PipelineDefinition, PipelineRegistry, Step, StepKind};
pub use requirements::{Requirement, RequirementRef, RequirementResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
