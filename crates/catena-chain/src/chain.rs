// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered list of stages a user builds.
//!
//! Stage 0 (the root) always exists and receives the user's input. Every
//! other stage holds the output of its predecessor's transform. A stage is
//! only trusted as executed until its own content or descriptor changes;
//! any such change invalidates it and everything downstream.

use std::sync::Arc;

use catena_core::{CatenaError, Direction, PluginDescriptor};
use serde::Serialize;
use strum::Display;

/// Index of a stage within its chain.
pub type StageId = usize;

/// Observable lifecycle of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    /// No content and no descriptor.
    Empty,
    /// Holds content but no descriptor is selected.
    Seeded,
    /// A descriptor is selected but its output is not (or no longer) current.
    Configured,
    /// The descriptor ran on the current content and its output is
    /// downstream.
    Executed,
}

/// One step of the chain.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    content: Vec<u8>,
    descriptor: Option<Arc<PluginDescriptor>>,
    direction: Direction,
    focused: bool,
    executed: bool,
}

impl Stage {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn descriptor(&self) -> Option<&Arc<PluginDescriptor>> {
        self.descriptor.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn state(&self) -> StageState {
        match (&self.descriptor, self.executed) {
            (Some(_), true) => StageState::Executed,
            (Some(_), false) => StageState::Configured,
            (None, _) if self.content.is_empty() => StageState::Empty,
            (None, _) => StageState::Seeded,
        }
    }
}

/// An ordered, never-empty list of stages.
#[derive(Debug, Clone)]
pub struct Chain {
    stages: Vec<Stage>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// Creates a chain holding only the focused, empty root stage.
    pub fn new() -> Self {
        let root = Stage {
            focused: true,
            ..Stage::default()
        };
        Self { stages: vec![root] }
    }

    /// Number of stages, including the root. Always at least one.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Index of the last stage.
    pub fn tail(&self) -> StageId {
        self.stages.len() - 1
    }

    pub fn stage(&self, index: StageId) -> Result<&Stage, CatenaError> {
        self.stages.get(index).ok_or(CatenaError::StageOutOfRange {
            index,
            len: self.stages.len(),
        })
    }

    fn stage_mut(&mut self, index: StageId) -> Result<&mut Stage, CatenaError> {
        let len = self.stages.len();
        self.stages
            .get_mut(index)
            .ok_or(CatenaError::StageOutOfRange { index, len })
    }

    /// Appends an empty stage and returns its index.
    pub fn append_stage(&mut self) -> StageId {
        self.stages.push(Stage::default());
        self.tail()
    }

    /// Index of the stage that currently has focus.
    pub fn focused(&self) -> StageId {
        self.stages.iter().position(|s| s.focused).unwrap_or(0)
    }

    /// Moves focus to `index`. Exactly one stage is focused at a time.
    pub fn set_focus(&mut self, index: StageId) -> Result<(), CatenaError> {
        self.stage(index)?;
        for (i, stage) in self.stages.iter_mut().enumerate() {
            stage.focused = i == index;
        }
        Ok(())
    }

    /// Replaces the content of `index` and invalidates it and all
    /// downstream stages.
    pub fn set_stage_content(
        &mut self,
        index: StageId,
        content: Vec<u8>,
    ) -> Result<(), CatenaError> {
        self.stage_mut(index)?.content = content;
        self.invalidate_from(index);
        Ok(())
    }

    /// Empties the content of `index`.
    pub fn clear_content(&mut self, index: StageId) -> Result<(), CatenaError> {
        self.set_stage_content(index, Vec::new())
    }

    /// Selects `descriptor` for `index` in the given direction.
    ///
    /// Selecting on the tail appends a fresh empty stage to receive the
    /// output. Requesting the inverse of a one-way descriptor is rejected
    /// and leaves the stage unchanged.
    pub fn set_stage_descriptor(
        &mut self,
        index: StageId,
        descriptor: Arc<PluginDescriptor>,
        direction: Direction,
    ) -> Result<(), CatenaError> {
        if direction.is_inverse() && descriptor.is_one_way() {
            return Err(CatenaError::NotInvertible {
                plugin: descriptor.name().to_string(),
            });
        }
        let stage = self.stage_mut(index)?;
        stage.descriptor = Some(descriptor);
        stage.direction = direction;
        self.invalidate_from(index);
        if index == self.tail() {
            self.append_stage();
        }
        Ok(())
    }

    /// Removes the descriptor from `index`. Downstream stages keep their
    /// (now stale) content.
    pub fn clear_stage_descriptor(&mut self, index: StageId) -> Result<(), CatenaError> {
        let stage = self.stage_mut(index)?;
        stage.descriptor = None;
        stage.direction = Direction::Forward;
        self.invalidate_from(index);
        Ok(())
    }

    /// Stores the output of stage `index` into its successor and marks
    /// `index` as executed. The successor's own output is now stale.
    pub(crate) fn commit_output(
        &mut self,
        index: StageId,
        output: Vec<u8>,
    ) -> Result<(), CatenaError> {
        let next = index + 1;
        self.stage_mut(next)?.content = output;
        self.invalidate_from(next);
        self.stage_mut(index)?.executed = true;
        Ok(())
    }

    /// Names of the applied descriptors from the root down, skipping stages
    /// without one. Inverse applications are prefixed with `.`.
    pub fn history(&self) -> Vec<String> {
        self.stages
            .iter()
            .filter_map(|s| s.descriptor.as_ref().map(|d| d.history_name(s.direction)))
            .collect()
    }

    fn invalidate_from(&mut self, index: StageId) {
        for stage in self.stages.iter_mut().skip(index) {
            stage.executed = false;
        }
    }
}
