// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Pipeline definitions and flows
//!
//! This module holds the pipeline contract, the built-in pipeline catalog,
//! parameter validation, the flows pipelines produce and the runner that
//! executes them.

pub mod catalog;
mod definition;
mod executor;
mod flow;
mod registry;
pub(crate) mod validation;

pub use definition::*;
pub use executor::{FlowResult, FlowRunner, RunOptions};
pub use flow::{Flow, Step, StepKind};
pub use registry::{PipelineFactory, PipelineRegistry};
pub use validation::{ParameterContract, ParameterValidator};
