// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Tool requirements
//!
//! A requirement describes one externally installable tool: how to tell
//! whether it is present, how to install it, and which other requirements
//! must be installed first.

mod graph;
mod resolver;
mod tools;

pub use graph::RequirementGraph;
pub use resolver::{InstallReport, RequirementResolver};
pub use tools::{CommandRequirement, DownloadRequirement};

use std::sync::Arc;

use crate::errors::{GenflowError, GenflowResult};

/// Shared handle to a requirement
pub type RequirementRef = Arc<dyn Requirement>;

/// Trait for installable tool dependencies.
///
/// Implementations are stateless descriptors: `is_installed` is asked again
/// on every resolution because the outside world changes between runs.
pub trait Requirement: Send + Sync {
    /// Unique requirement name
    fn name(&self) -> &str;

    /// Check whether the tool is present
    fn is_installed(&self) -> bool;

    /// Install the tool
    fn install(&self) -> anyhow::Result<()>;

    /// Direct dependencies, in installation order.
    ///
    /// Must not lead back to this requirement.
    fn require(&self) -> Vec<RequirementRef>;
}

const GOOGLE_JAVA_FORMAT_JAR: &str = "google-java-format-0.1-alpha.jar";

/// Java runtime; installed by hand
pub fn java() -> RequirementRef {
    Arc::new(CommandRequirement::manual("java", "java"))
}

/// google-java-format jar, downloaded next to the other local binaries
pub fn google_java_format() -> RequirementRef {
    Arc::new(
        DownloadRequirement::new(
            "google-java-format",
            format!(
                "https://github.com/google/google-java-format/releases/download/\
                 google-java-format-0.1-alpha/{}",
                GOOGLE_JAVA_FORMAT_JAR
            ),
            "/usr/local/bin/",
            GOOGLE_JAVA_FORMAT_JAR,
        )
        .requires(java()),
    )
}

/// Python package installer; installed by hand
pub fn pip() -> RequirementRef {
    Arc::new(CommandRequirement::manual("pip", "pip"))
}

/// yapf Python formatter
pub fn yapf() -> RequirementRef {
    Arc::new(CommandRequirement::new("yapf", "yapf", ["pip", "install", "yapf"]).requires(pip()))
}

/// gofmt ships with the Go toolchain
pub fn gofmt() -> RequirementRef {
    Arc::new(CommandRequirement::manual("gofmt", "gofmt"))
}

/// Every built-in requirement
pub fn builtin() -> Vec<RequirementRef> {
    vec![java(), google_java_format(), pip(), yapf(), gofmt()]
}

/// Look up a built-in requirement by name
pub fn find(name: &str) -> GenflowResult<RequirementRef> {
    let all = builtin();
    if let Some(found) = all.iter().find(|r| r.name() == name) {
        return Ok(found.clone());
    }

    let names: Vec<&str> = all.iter().map(|r| r.name()).collect();
    Err(GenflowError::requirement_not_found(name, &names))
}
