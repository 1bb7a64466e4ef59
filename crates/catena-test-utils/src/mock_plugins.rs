// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin descriptors for deterministic testing.
//!
//! Every mock registers under [`MOCK_CATEGORY`]. Streaming mocks exercise
//! each way a task can end: completing, failing, hanging until cancelled,
//! and being dropped without signalling.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catena_core::{PluginDescriptor, Task, TaskTransform, Transform, TransformError};
use tokio::sync::Notify;
use tracing::debug;

/// Category shared by all mock descriptors.
pub const MOCK_CATEGORY: &str = "mock";

/// Shared invocation counter for the counting mocks.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn reverse_bytes(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    Ok(input.iter().rev().copied().collect())
}

/// Synchronous, self-inverse: reverses the byte order.
pub fn reverse() -> PluginDescriptor {
    PluginDescriptor::new(
        "reverse",
        Transform::synchronous_pair(reverse_bytes, reverse_bytes),
    )
    .with_category(MOCK_CATEGORY)
    .with_alias("rev")
    .with_description("Reverse byte order")
}

/// Synchronous, one-way: appends `suffix` to its input.
pub fn append(name: &str, suffix: &'static [u8]) -> PluginDescriptor {
    PluginDescriptor::new(
        name,
        Transform::synchronous(move |input| {
            let mut out = input.to_vec();
            out.extend_from_slice(suffix);
            Ok(out)
        }),
    )
    .with_category(MOCK_CATEGORY)
}

/// Synchronous, one-way: always fails with `message`.
pub fn failing(name: &str, message: &'static str) -> PluginDescriptor {
    PluginDescriptor::new(
        name,
        Transform::synchronous(move |_| Err(TransformError::new(message))),
    )
    .with_category(MOCK_CATEGORY)
}

/// Synchronous, one-way identity that counts its invocations.
pub fn counting(name: &str, counter: &CallCounter) -> PluginDescriptor {
    let counter = counter.clone();
    PluginDescriptor::new(
        name,
        Transform::synchronous(move |input| {
            counter.bump();
            Ok(input.to_vec())
        }),
    )
    .with_category(MOCK_CATEGORY)
}

/// Streaming echo that records whether it saw an input at all.
struct Echo {
    delay: Duration,
    saw_input: Option<Arc<AtomicUsize>>,
}

#[async_trait]
impl TaskTransform for Echo {
    async fn run(&self, mut task: Task) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match task.take_input() {
            Some(input) => {
                if let Some(seen) = &self.saw_input {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
                task.write_output(&input);
            }
            None => debug!("echo task started without input"),
        }
        task.done();
    }
}

/// Streaming, invertible: copies input to output after `delay`.
pub fn streaming_echo(name: &str, delay: Duration) -> PluginDescriptor {
    PluginDescriptor::new(
        name,
        Transform::streaming_pair(
            Echo {
                delay,
                saw_input: None,
            },
            Echo {
                delay,
                saw_input: None,
            },
        ),
    )
    .with_category(MOCK_CATEGORY)
}

/// Streaming echo whose counter is bumped only when an input is present.
pub fn input_probe(name: &str, counter: &CallCounter) -> PluginDescriptor {
    PluginDescriptor::new(
        name,
        Transform::streaming(Echo {
            delay: Duration::ZERO,
            saw_input: Some(Arc::clone(&counter.0)),
        }),
    )
    .with_category(MOCK_CATEGORY)
}

/// Streaming task that fails after writing partial output.
struct Fail;

#[async_trait]
impl TaskTransform for Fail {
    async fn run(&self, mut task: Task) {
        task.write_output(b"partial");
        task.fail(TransformError::new("mock stream failure"));
    }
}

pub fn streaming_failing(name: &str) -> PluginDescriptor {
    PluginDescriptor::new(name, Transform::streaming(Fail)).with_category(MOCK_CATEGORY)
}

/// Streaming task that only ends once cancelled, then notifies `cancelled`.
struct Hang {
    cancelled: Arc<Notify>,
}

#[async_trait]
impl TaskTransform for Hang {
    async fn run(&self, task: Task) {
        task.cancellation().cancelled().await;
        self.cancelled.notify_one();
        task.fail(TransformError::new("stopped after cancellation"));
    }
}

/// Streaming, never completes on its own. `cancelled` is notified when the
/// engine cancels it.
pub fn never_completes(name: &str, cancelled: Arc<Notify>) -> PluginDescriptor {
    PluginDescriptor::new(name, Transform::streaming(Hang { cancelled }))
        .with_category(MOCK_CATEGORY)
}

/// Streaming task dropped without calling `done` or `fail`.
struct Abandon;

#[async_trait]
impl TaskTransform for Abandon {
    async fn run(&self, task: Task) {
        drop(task);
    }
}

pub fn abandoning(name: &str) -> PluginDescriptor {
    PluginDescriptor::new(name, Transform::streaming(Abandon)).with_category(MOCK_CATEGORY)
}

/// Streaming task that panics before signalling.
struct Panic;

#[async_trait]
impl TaskTransform for Panic {
    async fn run(&self, _task: Task) {
        panic!("mock task panicked");
    }
}

pub fn panicking(name: &str) -> PluginDescriptor {
    PluginDescriptor::new(name, Transform::streaming(Panic)).with_category(MOCK_CATEGORY)
}
