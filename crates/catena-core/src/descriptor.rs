// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors: static metadata plus the transform they execute.
//!
//! A descriptor carries exactly one [`Transform`] variant, either a pair of
//! synchronous byte-buffer functions or a pair of task functions. The
//! inverse half is optional; descriptors without one are one-way (hashes).

use std::fmt;
use std::sync::Arc;

use crate::error::TransformError;
use crate::task::TaskTransform;
use crate::types::{Direction, ExecutionMode};

/// A synchronous transform over a complete input buffer.
pub type SyncFn = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>, TransformError> + Send + Sync>;

/// The executable part of a descriptor.
#[derive(Clone)]
pub enum Transform {
    /// Inline transforms called with the full stage content.
    Synchronous {
        process: SyncFn,
        unprocess: Option<SyncFn>,
    },
    /// Task functions scheduled independently of the caller.
    Streaming {
        process: Arc<dyn TaskTransform>,
        unprocess: Option<Arc<dyn TaskTransform>>,
    },
}

impl Transform {
    /// A one-way synchronous transform.
    pub fn synchronous<F>(process: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, TransformError> + Send + Sync + 'static,
    {
        Transform::Synchronous {
            process: Arc::new(process),
            unprocess: None,
        }
    }

    /// A reversible synchronous transform.
    pub fn synchronous_pair<F, G>(process: F, unprocess: G) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, TransformError> + Send + Sync + 'static,
        G: Fn(&[u8]) -> Result<Vec<u8>, TransformError> + Send + Sync + 'static,
    {
        Transform::Synchronous {
            process: Arc::new(process),
            unprocess: Some(Arc::new(unprocess)),
        }
    }

    /// A one-way streaming transform.
    pub fn streaming(process: impl TaskTransform + 'static) -> Self {
        Transform::Streaming {
            process: Arc::new(process),
            unprocess: None,
        }
    }

    /// A reversible streaming transform.
    pub fn streaming_pair(
        process: impl TaskTransform + 'static,
        unprocess: impl TaskTransform + 'static,
    ) -> Self {
        Transform::Streaming {
            process: Arc::new(process),
            unprocess: Some(Arc::new(unprocess)),
        }
    }

    /// Returns the execution contract this transform follows.
    pub fn mode(&self) -> ExecutionMode {
        match self {
            Transform::Synchronous { .. } => ExecutionMode::Synchronous,
            Transform::Streaming { .. } => ExecutionMode::Streaming,
        }
    }

    /// Returns `true` when an inverse function is present.
    pub fn is_invertible(&self) -> bool {
        match self {
            Transform::Synchronous { unprocess, .. } => unprocess.is_some(),
            Transform::Streaming { unprocess, .. } => unprocess.is_some(),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("mode", &self.mode())
            .field("invertible", &self.is_invertible())
            .finish()
    }
}

/// Registration record for one pluggable transform.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    name: String,
    aliases: Vec<String>,
    category: Option<String>,
    description: String,
    default_direction: Direction,
    transform: Transform,
}

impl PluginDescriptor {
    /// Creates a descriptor with no category, aliases or description.
    ///
    /// A category must be set with [`with_category`](Self::with_category)
    /// before the descriptor can be registered.
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            category: None,
            description: String::new(),
            default_direction: Direction::Forward,
            transform,
        }
    }

    /// Sets the grouping tag used for registry enumeration.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds an alternate lookup name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the one-line description shown by front ends.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the direction front ends preselect for this descriptor.
    pub fn with_default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_direction(&self) -> Direction {
        self.default_direction
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn mode(&self) -> ExecutionMode {
        self.transform.mode()
    }

    /// Returns `true` for descriptors without an inverse (e.g. hashes).
    pub fn is_one_way(&self) -> bool {
        !self.transform.is_invertible()
    }

    /// Returns `true` if `name` is this descriptor's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    /// The canonical name followed by all aliases.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Name as shown in the chain history: inverse applications are
    /// prefixed with a dot (`.base64` decodes).
    pub fn history_name(&self, direction: Direction) -> String {
        match direction {
            Direction::Forward => self.name.clone(),
            Direction::Inverse => format!(".{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use async_trait::async_trait;

    struct Passthrough;

    #[async_trait]
    impl TaskTransform for Passthrough {
        async fn run(&self, mut task: Task) {
            if let Some(input) = task.take_input() {
                task.write_output(&input);
            }
            task.done();
        }
    }

    fn reverse(input: &[u8]) -> Result<Vec<u8>, TransformError> {
        Ok(input.iter().rev().copied().collect())
    }

    #[test]
    fn synchronous_pair_is_invertible() {
        let d = PluginDescriptor::new("reverse", Transform::synchronous_pair(reverse, reverse))
            .with_category("test");
        assert_eq!(d.mode(), ExecutionMode::Synchronous);
        assert!(!d.is_one_way());
        assert_eq!(d.category(), Some("test"));
    }

    #[test]
    fn single_function_is_one_way() {
        let d = PluginDescriptor::new("digest", Transform::synchronous(reverse));
        assert!(d.is_one_way());
        assert_eq!(d.category(), None);
    }

    #[test]
    fn streaming_mode_is_reported() {
        let d = PluginDescriptor::new("pass", Transform::streaming_pair(Passthrough, Passthrough));
        assert_eq!(d.mode(), ExecutionMode::Streaming);
        assert!(d.transform().is_invertible());
        assert!(format!("{:?}", d.transform()).contains("Streaming"));
    }

    #[test]
    fn aliases_answer_lookups() {
        let d = PluginDescriptor::new("base64", Transform::synchronous(reverse))
            .with_alias("b64")
            .with_alias("base-64");
        assert!(d.answers_to("base64"));
        assert!(d.answers_to("b64"));
        assert!(!d.answers_to("base32"));
        assert_eq!(
            d.all_names().collect::<Vec<_>>(),
            vec!["base64", "b64", "base-64"]
        );
    }

    #[test]
    fn history_name_marks_inverse_with_dot() {
        let d = PluginDescriptor::new("hex", Transform::synchronous(reverse));
        assert_eq!(d.history_name(Direction::Forward), "hex");
        assert_eq!(d.history_name(Direction::Inverse), ".hex");
    }
}
