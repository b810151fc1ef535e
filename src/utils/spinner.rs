// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Progress spinner for steps and installs

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::task::JoinError;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Run `work` on the blocking pool and clear `spinner` once it ends,
/// whether it returned or panicked
pub async fn spin_blocking<T, F>(spinner: Option<ProgressBar>, work: F) -> Result<T, JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let joined = tokio::task::spawn_blocking(work).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    joined
}
