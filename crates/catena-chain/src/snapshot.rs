// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only views of a chain published to front ends.

use catena_core::Direction;
use serde::Serialize;

use crate::chain::{Chain, StageId, StageState};

/// One stage as a front end renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSnapshot {
    pub index: StageId,
    pub content: Vec<u8>,
    pub plugin: Option<String>,
    pub direction: Direction,
    pub state: StageState,
    pub focused: bool,
}

/// The whole chain after a command completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainSnapshot {
    /// Incremented on every published change.
    pub revision: u64,
    pub stages: Vec<StageSnapshot>,
    pub focused: StageId,
    /// Applied plugin names, inverse applications prefixed with `.`.
    pub history: Vec<String>,
    /// Message of the last failed re-execution, cleared by the next success.
    pub last_error: Option<String>,
}

impl ChainSnapshot {
    pub fn capture(chain: &Chain, revision: u64, last_error: Option<String>) -> Self {
        let stages = chain
            .stages()
            .iter()
            .enumerate()
            .map(|(index, stage)| StageSnapshot {
                index,
                content: stage.content().to_vec(),
                plugin: stage.descriptor().map(|d| d.name().to_string()),
                direction: stage.direction(),
                state: stage.state(),
                focused: stage.is_focused(),
            })
            .collect();
        Self {
            revision,
            stages,
            focused: chain.focused(),
            history: chain.history(),
            last_error,
        }
    }

    /// Content of the last stage, i.e. the chain's current result.
    pub fn output(&self) -> &[u8] {
        self.stages.last().map(|s| s.content.as_slice()).unwrap_or_default()
    }
}
