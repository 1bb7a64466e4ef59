// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution context for streaming plugin invocations.
//!
//! A [`Task`] carries a single-use input, an output sink owned exclusively by
//! the invocation, and a [`CancellationToken`]. Completion is delivered
//! through one oneshot channel: [`Task::done`] and [`Task::fail`] both consume
//! the task, so at most one outcome can ever be sent. If the task is dropped
//! without either call (early return, panic), the paired [`TaskHandle`]
//! observes [`TaskOutcome::Abandoned`] instead of waiting forever.

use std::io;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::TransformError;

/// The result a streaming invocation resolves to.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The task called [`Task::done`]; carries the accumulated output.
    Done(Vec<u8>),
    /// The task called [`Task::fail`]; any partial output was discarded.
    Failed(TransformError),
    /// The task was dropped without signalling completion.
    Abandoned,
}

/// A task function implemented by streaming plugins.
///
/// Implementations read the input (if present), write results to the task's
/// output and finish with exactly one of [`Task::done`] or [`Task::fail`].
/// Long-running implementations should poll [`Task::is_cancelled`] between
/// units of work.
#[async_trait]
pub trait TaskTransform: Send + Sync {
    /// Runs the transform to completion on the given task.
    async fn run(&self, task: Task);
}

/// Execution context handed to a [`TaskTransform`].
#[derive(Debug)]
pub struct Task {
    input: Option<Vec<u8>>,
    output: Vec<u8>,
    cancel: CancellationToken,
    completion: oneshot::Sender<Result<Vec<u8>, TransformError>>,
}

/// The creator's side of a [`Task`].
#[derive(Debug)]
pub struct TaskHandle {
    receiver: oneshot::Receiver<Result<Vec<u8>, TransformError>>,
    cancel: CancellationToken,
}

impl Task {
    /// Creates a task over `input` (absent for empty stage content) and
    /// returns it together with the handle its creator waits on.
    pub fn new(input: Option<Vec<u8>>, cancel: CancellationToken) -> (Self, TaskHandle) {
        let (completion, receiver) = oneshot::channel();
        let handle = TaskHandle {
            receiver,
            cancel: cancel.clone(),
        };
        let task = Self {
            input,
            output: Vec::new(),
            cancel,
            completion,
        };
        (task, handle)
    }

    /// Returns `true` if an input is present and has not been consumed yet.
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Consumes the input. Subsequent calls return `None`.
    pub fn take_input(&mut self) -> Option<Vec<u8>> {
        self.input.take()
    }

    /// Appends bytes to the output sink.
    pub fn write_output(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// The token the engine cancels on timeout or caller cancellation.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Returns `true` once the invocation has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Signals successful completion, handing the output to the creator.
    pub fn done(self) {
        let len = self.output.len();
        if self.completion.send(Ok(self.output)).is_err() {
            trace!(len, "task completed after its handle was dropped");
        }
    }

    /// Signals failure; the partially written output is discarded.
    pub fn fail(self, error: TransformError) {
        if self.completion.send(Err(error)).is_err() {
            trace!("task failed after its handle was dropped");
        }
    }
}

impl io::Write for Task {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_output(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TaskHandle {
    /// Waits for the task's single outcome.
    pub async fn outcome(self) -> TaskOutcome {
        match self.receiver.await {
            Ok(Ok(output)) => TaskOutcome::Done(output),
            Ok(Err(error)) => TaskOutcome::Failed(error),
            Err(_) => TaskOutcome::Abandoned,
        }
    }

    /// Requests cancellation of the running task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}
