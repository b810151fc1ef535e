// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Requirement resolution
//!
//! Walks a requirement's dependencies depth first and installs whatever is
//! missing, dependencies before dependents.

use std::collections::HashSet;

use crate::errors::{GenflowError, GenflowResult};
use crate::requirements::RequirementRef;

/// What a resolution did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Requirements installed by this call, in order
    pub installed: Vec<String>,
    /// Requirements that were already present
    pub already_installed: Vec<String>,
}

impl InstallReport {
    /// Fold another report into this one
    pub fn merge(&mut self, other: InstallReport) {
        self.installed.extend(other.installed);
        self.already_installed.extend(other.already_installed);
    }

    pub fn installed_anything(&self) -> bool {
        !self.installed.is_empty()
    }
}

/// Installs requirements in dependency order.
///
/// Installation is serial and stops at the first failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementResolver;

impl RequirementResolver {
    pub fn new() -> Self {
        Self
    }

    /// Dependencies-first order over the transitive closure of `node`,
    /// ending with `node` itself. Each requirement appears once.
    pub fn install_order(&self, node: &RequirementRef) -> GenflowResult<Vec<RequirementRef>> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut path = Vec::new();

        Self::visit(node, &mut path, &mut visited, &mut order)?;
        Ok(order)
    }

    fn visit(
        node: &RequirementRef,
        path: &mut Vec<String>,
        visited: &mut HashSet<String>,
        order: &mut Vec<RequirementRef>,
    ) -> GenflowResult<()> {
        let name = node.name().to_string();
        if visited.contains(&name) {
            return Ok(());
        }

        if let Some(start) = path.iter().position(|n| *n == name) {
            let mut chain = path[start..].to_vec();
            chain.push(name);
            return Err(GenflowError::CircularRequirement { chain });
        }

        path.push(name.clone());
        for dep in node.require() {
            Self::visit(&dep, path, visited, order)?;
        }
        path.pop();

        visited.insert(name);
        order.push(node.clone());
        Ok(())
    }

    /// Make sure `node` and everything it requires is installed.
    ///
    /// A cycle is reported before anything gets installed.
    pub fn ensure_installed(&self, node: &RequirementRef) -> GenflowResult<InstallReport> {
        let order = self.install_order(node)?;
        let mut report = InstallReport::default();

        for requirement in order {
            let name = requirement.name();

            if requirement.is_installed() {
                tracing::debug!(requirement = name, "already installed");
                report.already_installed.push(name.to_string());
                continue;
            }

            tracing::info!(requirement = name, "installing");
            requirement
                .install()
                .map_err(|e| GenflowError::installation(name, &e))?;
            report.installed.push(name.to_string());
        }

        Ok(report)
    }

    /// Resolve several requirements in the order given
    pub fn ensure_all(&self, nodes: &[RequirementRef]) -> GenflowResult<InstallReport> {
        let mut report = InstallReport::default();
        for node in nodes {
            report.merge(self.ensure_installed(node)?);
        }
        Ok(report)
    }
}
