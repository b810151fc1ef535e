// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Flow runner
//!
//! Runs the steps of a flow strictly in order. Before each step, the tools
//! that step needs are installed through the requirement resolver.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use colored::Colorize;

use crate::errors::GenflowError;
use crate::executors::{StepExecutor, StepOutput};
use crate::pipeline::{Flow, Step, StepKind};
use crate::requirements::{InstallReport, RequirementRef, RequirementResolver};
use crate::utils;

/// Flow run options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Only show what would be done
    pub dry_run: bool,
    /// Do not install step requirements
    pub skip_requirements: bool,
    /// Print progress to the terminal
    pub progress: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Result of running a flow
#[derive(Debug, Clone)]
pub struct FlowResult {
    /// Name of the flow
    pub flow: String,
    /// Outputs of the steps that ran, in order
    pub outputs: Vec<StepOutput>,
    /// Requirements installed or found while running
    pub requirements: InstallReport,
    /// Total execution time
    pub duration: Duration,
    /// Nothing was executed
    pub dry_run: bool,
}

impl FlowResult {
    pub fn executed_steps(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.step.as_str()).collect()
    }
}

/// Sequential flow runner
pub struct FlowRunner {
    /// Registered executors by step kind
    executors: HashMap<StepKind, Box<dyn StepExecutor>>,
    /// Requirement overrides by step kind
    requirements: HashMap<StepKind, Vec<RequirementRef>>,
    resolver: RequirementResolver,
}

impl FlowRunner {
    /// Create a runner with no executors
    pub fn new() -> Self {
        Self {
            executors: HashMap::new(),
            requirements: HashMap::new(),
            resolver: RequirementResolver::new(),
        }
    }

    /// Register an executor for the step kind it reports
    pub fn register_executor(&mut self, executor: Box<dyn StepExecutor>) {
        self.executors.insert(executor.kind(), executor);
    }

    /// Replace the requirements of a step kind
    pub fn set_requirements(&mut self, kind: StepKind, requirements: Vec<RequirementRef>) {
        self.requirements.insert(kind, requirements);
    }

    /// Requirements installed before a step of `kind` runs
    pub fn requirements_for(&self, kind: StepKind) -> Vec<RequirementRef> {
        self.requirements
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.requirements())
    }

    /// Step kinds in `flow` with no registered executor, in flow order
    pub fn missing_executors(&self, flow: &Flow) -> Vec<StepKind> {
        let mut missing = Vec::new();
        for step in &flow.steps {
            if !self.executors.contains_key(&step.kind) && !missing.contains(&step.kind) {
                missing.push(step.kind);
            }
        }
        missing
    }

    /// Run a flow
    pub async fn run(&self, flow: &Flow, options: &RunOptions) -> Result<FlowResult, GenflowError> {
        let start = Instant::now();

        if options.progress {
            self.print_plan(flow);
        }

        let mut result = FlowResult {
            flow: flow.name.clone(),
            outputs: Vec::new(),
            requirements: InstallReport::default(),
            duration: Duration::ZERO,
            dry_run: options.dry_run,
        };

        if options.dry_run {
            result.duration = start.elapsed();
            return Ok(result);
        }

        // Every executor must exist before the first step changes anything
        if let Some(kind) = self.missing_executors(flow).first() {
            return Err(GenflowError::ExecutorNotFound {
                kind: kind.to_string(),
            });
        }

        tracing::info!(flow = %flow.name, steps = flow.len(), "running flow");

        for step in &flow.steps {
            if !options.skip_requirements {
                let report = self.resolve_requirements(step, options).await?;
                result.requirements.merge(report);
            }

            let output = self.execute_step(step, options).await?;
            result.outputs.push(output);
        }

        result.duration = start.elapsed();

        if options.progress {
            println!();
            println!(
                "{}",
                format!(
                    "Flow completed successfully in {:.2}s",
                    result.duration.as_secs_f64()
                )
                .green()
            );
        }

        Ok(result)
    }

    /// Install the step's requirements on the blocking pool
    async fn resolve_requirements(
        &self,
        step: &Step,
        options: &RunOptions,
    ) -> Result<InstallReport, GenflowError> {
        let requirements = self.requirements_for(step.kind);
        if requirements.is_empty() {
            return Ok(InstallReport::default());
        }

        let spinner = options
            .progress
            .then(|| utils::create_spinner(&format!("Checking tools for {}", step.name)));

        let resolver = self.resolver;
        let resolved = utils::spin_blocking(spinner, move || resolver.ensure_all(&requirements))
            .await
            .map_err(|e| GenflowError::StepFailed {
                step: step.name.clone(),
                error: format!("requirement resolution did not complete: {}", e),
                help: None,
            })?;

        let report = resolved?;
        if options.progress && options.verbose {
            for name in &report.installed {
                println!("  {} installed {}", "+".green(), name.bold());
            }
        }
        Ok(report)
    }

    async fn execute_step(
        &self,
        step: &Step,
        options: &RunOptions,
    ) -> Result<StepOutput, GenflowError> {
        let executor = self
            .executors
            .get(&step.kind)
            .ok_or_else(|| GenflowError::ExecutorNotFound {
                kind: step.kind.to_string(),
            })?;

        tracing::debug!(step = %step.name, kind = %step.kind, "executing step");

        let spinner = options
            .progress
            .then(|| utils::create_spinner(&format!("{}...", step.name)));

        let outcome = executor.execute(step).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
            match &outcome {
                Ok(output) => println!(
                    "  {} {} ({:.2}s)",
                    "✓".green(),
                    step.name.bold(),
                    output.duration.as_secs_f64()
                ),
                Err(_) => println!("  {} {} failed", "✗".red(), step.name.bold()),
            }
        }

        outcome
    }

    fn print_plan(&self, flow: &Flow) {
        println!();
        println!("{}: {}", "Flow".bold(), flow.name);
        println!("{}", "═".repeat(50));
        println!(
            "Execution plan ({} step{}):",
            flow.len(),
            if flow.len() == 1 { "" } else { "s" }
        );
        println!();
        for line in flow.to_text().lines() {
            println!("  {}", line);
        }
        println!();
    }
}

impl Default for FlowRunner {
    fn default() -> Self {
        let mut runner = Self::new();
        for (_, executor) in crate::executors::create_default_executors() {
            runner.register_executor(executor);
        }
        runner
    }
}
