// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Catena transform chain.
//!
//! This crate provides the error taxonomy, the plugin descriptor with its
//! tagged transform variant, and the task contract used by streaming
//! plugins. The registry, the built-in plugins and the chain engine all
//! build on the types defined here.

pub mod descriptor;
pub mod error;
pub mod task;
pub mod types;

pub use descriptor::{PluginDescriptor, SyncFn, Transform};
pub use error::{CatenaError, TransformError};
pub use task::{Task, TaskHandle, TaskOutcome, TaskTransform};
pub use types::{Direction, ExecutionMode};
