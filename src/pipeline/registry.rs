// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Pipeline registry
//!
//! Maps pipeline names to factories. Every lookup builds a fresh pipeline
//! instance so nothing leaks from one invocation into the next.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::errors::{GenflowError, GenflowResult};
use crate::pipeline::{catalog, Flow, Pipeline, PipelineDefinition};

/// Builds a new pipeline instance
pub type PipelineFactory = Box<dyn Fn() -> Box<dyn PipelineDefinition> + Send + Sync>;

/// Registry of named pipelines
pub struct PipelineRegistry {
    factories: BTreeMap<String, PipelineFactory>,
}

impl PipelineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry holding every built-in pipeline
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for spec in &catalog::PIPELINES {
            let factory = move || -> Box<dyn PipelineDefinition> {
                Box::new(Pipeline::from_spec(spec))
            };
            registry.factories.insert(spec.name.to_string(), Box::new(factory));
        }
        registry
    }

    /// Register an additional pipeline; names must be unique
    pub fn register<F>(&mut self, name: &str, factory: F) -> GenflowResult<()>
    where
        F: Fn() -> Box<dyn PipelineDefinition> + Send + Sync + 'static,
    {
        if self.factories.contains_key(name) {
            return Err(GenflowError::DuplicatePipeline {
                name: name.to_string(),
            });
        }
        self.factories.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Create a fresh instance of the named pipeline
    pub fn create(&self, name: &str) -> GenflowResult<Box<dyn PipelineDefinition>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| GenflowError::pipeline_not_found(name, &self.names()))
    }

    /// Instantiate, validate and build the flow of the named pipeline
    pub fn prepare(&self, name: &str, config: &Config) -> GenflowResult<Flow> {
        let pipeline = self.create(name)?;
        pipeline.validate(config)?;
        let flow = pipeline.build_flow(config)?;

        tracing::info!(
            pipeline = name,
            language = pipeline.language(),
            steps = flow.len(),
            "pipeline prepared"
        );
        Ok(flow)
    }

    /// Registered pipeline names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for PipelineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
