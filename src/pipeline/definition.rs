// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Pipeline definitions
//!
//! A pipeline is the intersection of a target language and an artifact kind.
//! Rather than one type per pipeline, each pipeline is a [`PipelineSpec`]
//! table entry interpreted by the generic [`Pipeline`].

use std::collections::BTreeSet;

use crate::config::{self, Config};
use crate::errors::GenflowResult;
use crate::pipeline::validation::{ParameterContract, ParameterValidator};
use crate::pipeline::{Flow, Step, StepKind};

/// The uniform contract every pipeline exposes to a driver
pub trait PipelineDefinition: Send + Sync {
    /// Unique pipeline name
    fn name(&self) -> &str;

    /// Target language tag; empty for language-agnostic pipelines
    fn language(&self) -> &str;

    /// Every parameter name the configuration must contain
    fn required_parameters(&self) -> BTreeSet<String>;

    /// Check a configuration before anything runs
    fn validate(&self, config: &Config) -> GenflowResult<()>;

    /// Build the ordered flow for a configuration.
    ///
    /// Must be deterministic and free of side effects.
    fn build_flow(&self, config: &Config) -> GenflowResult<Flow>;
}

/// What a pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Veneer configuration derived from a descriptor set
    VeneerConfig,
    /// Bare proto messages
    Core,
    /// Proto messages plus gRPC stubs
    GrpcClient,
    /// High-level veneer client, merged into an existing repository
    VeneerClient,
    /// Demonstration flow
    Sample,
}

impl ArtifactKind {
    /// The parameter contract shared by every pipeline of this kind
    pub fn contract(&self) -> &'static ParameterContract {
        match self {
            Self::VeneerConfig | Self::Core | Self::GrpcClient => &ParameterContract::CODEGEN,
            Self::VeneerClient => &ParameterContract::VENEER,
            Self::Sample => &ParameterContract::SAMPLE,
        }
    }

    /// Whether generated code may be merged into a hand-maintained repository
    pub fn is_merge_capable(&self) -> bool {
        matches!(self, Self::VeneerClient)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeneerConfig => write!(f, "veneer-config"),
            Self::Core => write!(f, "core"),
            Self::GrpcClient => write!(f, "grpc-client"),
            Self::VeneerClient => write!(f, "veneer-client"),
            Self::Sample => write!(f, "sample"),
        }
    }
}

/// Which part of the configuration a step receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The whole effective configuration
    Full,
    /// Only the named keys
    Keys(&'static [&'static str]),
}

impl Injection {
    fn apply(&self, config: &Config) -> Config {
        match self {
            Self::Full => config.clone(),
            Self::Keys(keys) => config.subset(keys),
        }
    }
}

/// One step of a flow template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub name: &'static str,
    pub kind: StepKind,
    pub injection: Injection,
}

impl StepTemplate {
    /// A step receiving the full configuration
    pub const fn full(name: &'static str, kind: StepKind) -> Self {
        Self {
            name,
            kind,
            injection: Injection::Full,
        }
    }

    fn instantiate(&self, config: &Config) -> Step {
        Step {
            name: self.name.to_string(),
            kind: self.kind,
            injection: self.injection.apply(config),
        }
    }
}

/// Extra steps and parameters a language bolts onto specific pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepAugmentation {
    /// Shown in verbose listings
    pub name: &'static str,
    /// Appended after the pipeline's own steps
    pub post_steps: &'static [StepTemplate],
    pub extra_parameters: &'static [&'static str],
}

/// A pipeline table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSpec {
    pub name: &'static str,
    pub language: &'static str,
    pub kind: ArtifactKind,
    pub flow_name: &'static str,
    pub steps: &'static [StepTemplate],
    pub augmentation: Option<&'static StepAugmentation>,
}

impl PipelineSpec {
    /// Extra parameters on top of the artifact kind's contract
    pub fn extra_parameters(&self) -> &'static [&'static str] {
        self.augmentation.map(|a| a.extra_parameters).unwrap_or(&[])
    }

    /// Own steps followed by augmentation post-steps
    pub fn step_templates(&self) -> impl Iterator<Item = &'static StepTemplate> {
        let post: &'static [StepTemplate] = self.augmentation.map(|a| a.post_steps).unwrap_or(&[]);
        self.steps.iter().chain(post.iter())
    }
}

/// Generic pipeline interpreting one table entry.
///
/// Created fresh for each invocation; holds no state between runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    spec: &'static PipelineSpec,
    language: String,
}

impl Pipeline {
    /// Create a pipeline for `spec` with its language tag fixed to `language`
    pub fn new(spec: &'static PipelineSpec, language: impl Into<String>) -> Self {
        Self {
            spec,
            language: language.into(),
        }
    }

    /// Create a pipeline using the language declared by its table entry
    pub fn from_spec(spec: &'static PipelineSpec) -> Self {
        Self::new(spec, spec.language)
    }

    pub fn spec(&self) -> &'static PipelineSpec {
        self.spec
    }

    /// The caller's configuration with the pipeline's language tag applied.
    ///
    /// The tag always wins over any `language` key the caller supplied.
    pub fn effective_config(&self, config: &Config) -> Config {
        if let Some(supplied) = config.get_str(config::LANGUAGE) {
            if supplied != self.language {
                tracing::debug!(
                    pipeline = self.spec.name,
                    supplied,
                    language = %self.language,
                    "ignoring caller-supplied language"
                );
            }
        }
        config.with_param(config::LANGUAGE, self.language.as_str())
    }
}

impl PipelineDefinition for Pipeline {
    fn name(&self) -> &str {
        self.spec.name
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn required_parameters(&self) -> BTreeSet<String> {
        self.spec
            .kind
            .contract()
            .required_parameters(self.spec.extra_parameters())
    }

    fn validate(&self, config: &Config) -> GenflowResult<()> {
        let effective = self.effective_config(config);
        ParameterValidator::validate(
            self.spec.kind.contract(),
            self.spec.extra_parameters(),
            &effective,
        )?;

        tracing::debug!(pipeline = self.spec.name, "configuration is valid");
        Ok(())
    }

    fn build_flow(&self, config: &Config) -> GenflowResult<Flow> {
        let effective = self.effective_config(config);

        let mut flow = Flow::new(self.spec.flow_name);
        for template in self.spec.step_templates() {
            flow.add(template.instantiate(&effective));
        }

        tracing::debug!(
            pipeline = self.spec.name,
            flow = %flow.name,
            steps = flow.len(),
            "built flow"
        );
        Ok(flow)
    }
}
