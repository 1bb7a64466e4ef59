// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Catena transform chain.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure reported by a transform's own logic (malformed input,
/// algorithm-specific failure).
///
/// Plugins only know about their input, so this error carries no plugin
/// name. The engine wraps it into [`CatenaError::Transform`] together with
/// the name of the descriptor that produced it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransformError {
    /// Creates a transform error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transform error that wraps an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the message without the source chain.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The primary error type used by the registry, the chain engine and the
/// front-end command interface.
#[derive(Debug, Error)]
pub enum CatenaError {
    /// A stage invocation was attempted with no descriptor configured.
    #[error("no plugin selected for stage {stage}")]
    NoPluginSelected { stage: usize },

    /// The descriptor's own logic reported an error.
    #[error("plugin '{plugin}' failed: {source}")]
    Transform {
        plugin: String,
        #[source]
        source: TransformError,
    },

    /// A requested plugin name or alias does not exist in the registry.
    #[error("plugin not found: {name}")]
    PluginNotFound { name: String },

    /// A descriptor was rejected at registration time.
    #[error("cannot register plugin '{name}': {message}")]
    Registration { name: String, message: String },

    /// The inverse direction was requested from a one-way descriptor.
    #[error("plugin '{plugin}' has no inverse transform")]
    NotInvertible { plugin: String },

    /// A streaming task was cancelled by the caller before it completed.
    #[error("task for plugin '{plugin}' was cancelled")]
    TaskCancelled { plugin: String },

    /// A streaming task did not complete within the configured timeout.
    #[error("task for plugin '{plugin}' timed out after {duration:?}")]
    TaskTimeout { plugin: String, duration: Duration },

    /// A streaming task was dropped (or panicked) without signalling.
    #[error("task for plugin '{plugin}' ended without signalling completion")]
    TaskAbandoned { plugin: String },

    /// A stage index does not address an existing stage.
    #[error("stage index {index} out of range (chain has {len} stages)")]
    StageOutOfRange { index: usize, len: usize },

    /// Re-execution aborted at the given stage.
    #[error("stage {index} failed: {source}")]
    StageFailed {
        index: usize,
        #[source]
        source: Box<CatenaError>,
    },

    /// Reading or writing an input file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatenaError {
    /// Wraps this error as the failure of stage `index` during re-execution.
    pub fn at_stage(self, index: usize) -> Self {
        CatenaError::StageFailed {
            index,
            source: Box::new(self),
        }
    }

    /// Returns the stage index at which a re-execution failed, if any.
    pub fn failed_stage(&self) -> Option<usize> {
        match self {
            CatenaError::StageFailed { index, .. } => Some(*index),
            CatenaError::NoPluginSelected { stage } => Some(*stage),
            _ => None,
        }
    }

    /// Strips any [`StageFailed`](CatenaError::StageFailed) wrappers.
    pub fn root(&self) -> &CatenaError {
        match self {
            CatenaError::StageFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_error_keeps_source_chain() {
        let io = std::io::Error::other("short read");
        let err = TransformError::with_source("invalid gzip header", io);
        assert_eq!(err.message(), "invalid gzip header");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn stage_failure_exposes_index_and_root() {
        let err = CatenaError::Transform {
            plugin: "base64".into(),
            source: TransformError::new("invalid padding"),
        }
        .at_stage(3);

        assert_eq!(err.failed_stage(), Some(3));
        assert!(matches!(err.root(), CatenaError::Transform { plugin, .. } if plugin == "base64"));
        assert_eq!(
            err.to_string(),
            "stage 3 failed: plugin 'base64' failed: invalid padding"
        );
    }

    #[test]
    fn lookup_failure_has_no_stage() {
        let err = CatenaError::PluginNotFound {
            name: "rot13".into(),
        };
        assert_eq!(err.failed_stage(), None);
        assert_eq!(err.to_string(), "plugin not found: rot13");
    }
}
