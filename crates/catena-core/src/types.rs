// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the engine and front ends.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Processing direction of a stage.
///
/// `Inverse` is the "unprocess" direction: decode for an encoder, decompress
/// for a compressor.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Inverse,
}

impl Direction {
    /// Maps the boolean "unprocess" flag used at call sites.
    pub fn from_unprocess(unprocess: bool) -> Self {
        if unprocess {
            Direction::Inverse
        } else {
            Direction::Forward
        }
    }

    /// Returns `true` for the inverse direction.
    pub fn is_inverse(self) -> bool {
        self == Direction::Inverse
    }

    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

/// How a descriptor's transform is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Runs inline on the caller with the full input buffer.
    Synchronous,
    /// Runs as an independently scheduled task with one-shot completion.
    Streaming,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn direction_display_and_parse_agree() {
        for direction in [Direction::Forward, Direction::Inverse] {
            let parsed = Direction::from_str(&direction.to_string()).expect("should parse back");
            assert_eq!(parsed, direction);
        }
        assert_eq!(Direction::Inverse.to_string(), "inverse");
    }

    #[test]
    fn unprocess_flag_selects_inverse() {
        assert_eq!(Direction::from_unprocess(true), Direction::Inverse);
        assert_eq!(Direction::from_unprocess(false), Direction::Forward);
        assert!(Direction::Forward.flipped().is_inverse());
    }

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Inverse).expect("should serialize");
        assert_eq!(json, "\"inverse\"");
    }
}
