// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Terminal helpers shared by the CLI and the flow runner

pub mod spinner;

pub use spinner::{create_spinner, spin_blocking};
