// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Step executors
//!
//! Executors do the actual work of a step. The crate only ships the sample
//! executor; code generation executors are registered by the embedding
//! application, one per step kind.

mod sample;

pub use sample::SampleExecutor;

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::GenflowError;
use crate::pipeline::{Step, StepKind};

/// Result of executing one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    /// Name of the step that ran
    pub step: String,

    /// Human readable summary
    pub message: String,

    /// Execution duration
    pub duration: Duration,
}

impl StepOutput {
    pub fn new(step: &Step, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            step: step.name.clone(),
            message: message.into(),
            duration,
        }
    }
}

/// Trait for step executors
#[async_trait]
pub trait StepExecutor: Send + Sync {
    /// The step kind this executor handles
    fn kind(&self) -> StepKind;

    /// Execute a step with its injected configuration
    async fn execute(&self, step: &Step) -> Result<StepOutput, GenflowError>;
}

/// Create the built-in executors, keyed by the kind they handle
pub fn create_default_executors() -> HashMap<StepKind, Box<dyn StepExecutor>> {
    let mut executors: HashMap<StepKind, Box<dyn StepExecutor>> = HashMap::new();

    let sample = SampleExecutor::new();
    executors.insert(sample.kind(), Box::new(sample));

    executors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_executors_cover_sample_only() {
        let executors = create_default_executors();
        assert_eq!(executors.len(), 1);
        assert!(executors.contains_key(&StepKind::Sample));
    }
}
