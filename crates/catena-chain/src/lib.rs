// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chain model, execution engine and front-end command interface.
//!
//! A [`Chain`] is an ordered list of stages, each holding content and
//! optionally a selected plugin. The [`ChainEngine`] re-executes a chain
//! from a mutated stage to its tail, and the [`Workbench`] wraps both behind
//! explicit commands that publish a [`ChainSnapshot`] after every change.

pub mod chain;
pub mod engine;
pub mod snapshot;
pub mod workbench;

pub use chain::{Chain, Stage, StageId, StageState};
pub use engine::{ChainEngine, DEFAULT_TASK_TIMEOUT, EngineOptions, ExecutionReport};
pub use snapshot::{ChainSnapshot, StageSnapshot};
pub use workbench::Workbench;
