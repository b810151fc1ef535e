// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Flows and steps
//!
//! A flow is the linear sequence of steps a pipeline hands to the runner.
//! Steps are opaque: the flow only records what kind of work a step is and
//! which slice of the configuration it receives.

use serde::Serialize;

use crate::config::Config;
use crate::requirements::{self, RequirementRef};

/// The kinds of work a step can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Compile protos into a descriptor set
    ProtoDescGen,
    /// Compile protos into language sources
    ProtoCodeGen,
    /// Generate gRPC stubs
    GrpcCodeGen,
    /// Protos and gRPC stubs in a single compiler run
    ProtoAndGrpcCodeGen,
    /// Generate and package gRPC stubs with packman
    GrpcPackman,
    VeneerConfigGen,
    VeneerConfigMove,
    VeneerCodeGen,
    /// Merge generated veneer code into the final repository
    VeneerMerge,
    PythonFormat,
    JavaFormat,
    GoFormat,
    /// Read the Go import base from the veneer API yaml
    GoExtractImportBase,
    /// Rewrite proto imports relative to the Go install root
    GoUpdateImports,
    /// Sleep for `sleep_secs`
    Sample,
}

impl StepKind {
    pub const ALL: [StepKind; 15] = [
        Self::ProtoDescGen,
        Self::ProtoCodeGen,
        Self::GrpcCodeGen,
        Self::ProtoAndGrpcCodeGen,
        Self::GrpcPackman,
        Self::VeneerConfigGen,
        Self::VeneerConfigMove,
        Self::VeneerCodeGen,
        Self::VeneerMerge,
        Self::PythonFormat,
        Self::JavaFormat,
        Self::GoFormat,
        Self::GoExtractImportBase,
        Self::GoUpdateImports,
        Self::Sample,
    ];

    /// Tools that must be installed before a step of this kind runs
    pub fn requirements(&self) -> Vec<RequirementRef> {
        match self {
            Self::JavaFormat => vec![requirements::google_java_format()],
            Self::PythonFormat => vec![requirements::yapf()],
            Self::GoFormat => vec![requirements::gofmt()],
            _ => vec![],
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ProtoDescGen => "proto-desc-gen",
            Self::ProtoCodeGen => "proto-code-gen",
            Self::GrpcCodeGen => "grpc-code-gen",
            Self::ProtoAndGrpcCodeGen => "proto-and-grpc-code-gen",
            Self::GrpcPackman => "grpc-packman",
            Self::VeneerConfigGen => "veneer-config-gen",
            Self::VeneerConfigMove => "veneer-config-move",
            Self::VeneerCodeGen => "veneer-code-gen",
            Self::VeneerMerge => "veneer-merge",
            Self::PythonFormat => "python-format",
            Self::JavaFormat => "java-format",
            Self::GoFormat => "go-format",
            Self::GoExtractImportBase => "go-extract-import-base",
            Self::GoUpdateImports => "go-update-imports",
            Self::Sample => "sample",
        };
        write!(f, "{}", name)
    }
}

/// One unit of work in a flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// Step name, unique within its flow
    pub name: String,

    /// What the step does
    pub kind: StepKind,

    /// The configuration subset this step receives
    pub injection: Config,
}

/// An ordered sequence of steps; executed strictly in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Flow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn add(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn get_step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Text representation of the execution order
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}. {} ({})", i + 1, step.name, step.kind));

            let tools: Vec<String> = step
                .kind
                .requirements()
                .iter()
                .map(|r| r.name().to_string())
                .collect();
            if !tools.is_empty() {
                out.push_str(&format!(" [requires: {}]", tools.join(", ")));
            }

            out.push('\n');
        }

        out
    }
}
