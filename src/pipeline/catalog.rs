// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Built-in pipeline table
//!
//! Each entry is one (language, artifact kind) pair with its ordered step
//! template. Parameter contracts come from the artifact kind.

use crate::config;
use crate::pipeline::definition::{
    ArtifactKind, Injection, PipelineSpec, StepAugmentation, StepTemplate,
};
use crate::pipeline::StepKind;

use StepKind::*;

/// The Go compiler resolves imports relative to `$GOPATH/src`, so generated
/// protos need their package name extracted and their imports rewritten.
///
/// `veneer_api_yaml` carries the import base. `final_repo_dir` has no step
/// consuming it yet but is still demanded of both Go proto pipelines.
pub static GO_IMPORT_REWRITE: StepAugmentation = StepAugmentation {
    name: "go-import-rewrite",
    post_steps: &[
        StepTemplate::full("ExtractGoPackageName", GoExtractImportBase),
        StepTemplate::full("UpdateImports", GoUpdateImports),
    ],
    extra_parameters: &[config::VENEER_API_YAML, config::FINAL_REPO_DIR],
};

pub static PIPELINES: [PipelineSpec; 13] = [
    PipelineSpec {
        name: "vkit-config",
        language: "",
        kind: ArtifactKind::VeneerConfig,
        flow_name: "vkit-configgen",
        steps: &[
            StepTemplate::full("ProtoDesc", ProtoDescGen),
            StepTemplate::full("VeneerConfigGen", VeneerConfigGen),
            StepTemplate::full("VeneerConfigMove", VeneerConfigMove),
        ],
        augmentation: None,
    },
    // Python
    PipelineSpec {
        name: "python-grpc-client",
        language: "python",
        kind: ArtifactKind::GrpcClient,
        flow_name: "grpc-codegen",
        steps: &[StepTemplate::full("Packman", GrpcPackman)],
        augmentation: None,
    },
    PipelineSpec {
        name: "python-vkit-client",
        language: "python",
        kind: ArtifactKind::VeneerClient,
        flow_name: "vkit-codegen",
        // TODO: append a VeneerMerge step once merging supports Python output
        steps: &[
            StepTemplate::full("ProtoDesc", ProtoDescGen),
            StepTemplate::full("VeneerCodegen", VeneerCodeGen),
            StepTemplate::full("PythonFormat", PythonFormat),
        ],
        augmentation: None,
    },
    // Java
    PipelineSpec {
        name: "java-core",
        language: "java",
        kind: ArtifactKind::Core,
        flow_name: "core-codegen",
        steps: &[StepTemplate::full("ProtoGen", ProtoCodeGen)],
        augmentation: None,
    },
    PipelineSpec {
        name: "java-grpc-client",
        language: "java",
        kind: ArtifactKind::GrpcClient,
        flow_name: "grpc-codegen",
        steps: &[
            StepTemplate::full("ProtoGen", ProtoCodeGen),
            StepTemplate::full("GrpcCodegen", GrpcCodeGen),
        ],
        augmentation: None,
    },
    PipelineSpec {
        name: "java-vkit-client",
        language: "java",
        kind: ArtifactKind::VeneerClient,
        flow_name: "vkit-codegen",
        steps: &[
            StepTemplate::full("ProtoDesc", ProtoDescGen),
            StepTemplate::full("VeneerCodegen", VeneerCodeGen),
            StepTemplate::full("JavaFormat", JavaFormat),
            StepTemplate::full("VeneerMerge", VeneerMerge),
        ],
        augmentation: None,
    },
    // Go
    PipelineSpec {
        name: "go-core-proto",
        language: "go",
        kind: ArtifactKind::Core,
        flow_name: "core-protogen",
        steps: &[StepTemplate::full("CoreProtoGen", ProtoCodeGen)],
        augmentation: Some(&GO_IMPORT_REWRITE),
    },
    PipelineSpec {
        name: "go-grpc-client",
        language: "go",
        kind: ArtifactKind::GrpcClient,
        flow_name: "grpc-protogen",
        steps: &[StepTemplate::full("GrpcCodegen", ProtoAndGrpcCodeGen)],
        augmentation: Some(&GO_IMPORT_REWRITE),
    },
    PipelineSpec {
        name: "go-vkit-client",
        language: "go",
        kind: ArtifactKind::VeneerClient,
        flow_name: "vkit-codegen",
        steps: &[
            StepTemplate::full("ProtoDescGen", ProtoDescGen),
            StepTemplate::full("VeneerCodegen", VeneerCodeGen),
            StepTemplate::full("GoFormat", GoFormat),
            StepTemplate::full("VeneerMerge", VeneerMerge),
        ],
        augmentation: None,
    },
    // C#
    PipelineSpec {
        name: "csharp-core",
        language: "csharp",
        kind: ArtifactKind::Core,
        flow_name: "core-codegen",
        steps: &[StepTemplate::full("ProtoGen", ProtoCodeGen)],
        augmentation: None,
    },
    PipelineSpec {
        name: "csharp-grpc-client",
        language: "csharp",
        kind: ArtifactKind::GrpcClient,
        flow_name: "grpc-codegen",
        steps: &[
            StepTemplate::full("ProtoGen", ProtoCodeGen),
            StepTemplate::full("GrpcCodegen", GrpcCodeGen),
        ],
        augmentation: None,
    },
    PipelineSpec {
        name: "csharp-vkit-client",
        language: "csharp",
        kind: ArtifactKind::VeneerClient,
        flow_name: "vkit-codegen",
        steps: &[
            StepTemplate::full("ProtoDesc", ProtoDescGen),
            StepTemplate::full("VeneerCodegen", VeneerCodeGen),
        ],
        augmentation: None,
    },
    PipelineSpec {
        name: "sample",
        language: "",
        kind: ArtifactKind::Sample,
        flow_name: "sample-flow",
        steps: &[StepTemplate {
            name: "SampleTask",
            kind: Sample,
            injection: Injection::Keys(&[config::SLEEP_SECS]),
        }],
        augmentation: None,
    },
];

/// Look up a table entry by pipeline name
pub fn find(name: &str) -> Option<&'static PipelineSpec> {
    PIPELINES.iter().find(|spec| spec.name == name)
}
