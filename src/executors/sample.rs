// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Sample executor - sleeps for a configured number of seconds

use async_trait::async_trait;
use std::time::{Duration, Instant};

use super::{StepExecutor, StepOutput};
use crate::config;
use crate::errors::GenflowError;
use crate::pipeline::{Step, StepKind};

/// Executor for [`StepKind::Sample`] steps
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleExecutor;

impl SampleExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Read `sleep_secs` from the step injection
    fn sleep_duration(step: &Step) -> Result<Duration, GenflowError> {
        let value = step
            .injection
            .get(config::SLEEP_SECS)
            .ok_or_else(|| GenflowError::missing_parameters([config::SLEEP_SECS]))?;

        let secs = value.as_f64().ok_or_else(|| GenflowError::InvalidParameter {
            name: config::SLEEP_SECS.to_string(),
            reason: format!("expected a number, got {}", value.type_name()),
        })?;

        Duration::try_from_secs_f64(secs).map_err(|_| GenflowError::InvalidParameter {
            name: config::SLEEP_SECS.to_string(),
            reason: format!("{} is not a valid number of seconds", secs),
        })
    }
}

#[async_trait]
impl StepExecutor for SampleExecutor {
    fn kind(&self) -> StepKind {
        StepKind::Sample
    }

    async fn execute(&self, step: &Step) -> Result<StepOutput, GenflowError> {
        let duration = Self::sleep_duration(step)?;
        let start = Instant::now();

        tracing::debug!(step = %step.name, secs = duration.as_secs_f64(), "sleeping");
        tokio::time::sleep(duration).await;

        Ok(StepOutput::new(
            step,
            format!("slept {:.2}s", duration.as_secs_f64()),
            start.elapsed(),
        ))
    }
}
