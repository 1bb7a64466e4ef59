// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage invocation and suffix re-execution.
//!
//! The engine resolves each stage's descriptor and direction to a concrete
//! function and runs it under the contract its transform variant declares:
//! synchronous functions inline on the caller, streaming functions as a
//! spawned task whose single completion is raced against the configured
//! timeout and the caller's cancellation token.
//!
//! Stages inside one re-execution run strictly in order; stage `i + 1`
//! starts only after stage `i` has produced its output.

use std::sync::Arc;
use std::time::Duration;

use catena_core::{
    CatenaError, Direction, PluginDescriptor, Task, TaskOutcome, Transform, TransformError,
};
use catena_plugin::PluginRegistry;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chain::{Chain, StageId};

/// Default upper bound on a single streaming invocation.
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for the chain engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// How long a streaming task may run before it is cancelled.
    pub task_timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }
}

impl EngineOptions {
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }
}

/// What a call to [`ChainEngine::re_execute_from`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    /// The stage re-execution was requested from.
    pub start: StageId,
    /// Stages whose transform ran, in order.
    pub executed: Vec<StageId>,
    /// `true` when the root has no descriptor and nothing ran.
    pub idle: bool,
    /// The first stage without a descriptor, if propagation stopped there.
    pub stopped_at: Option<StageId>,
}

impl ExecutionReport {
    fn new(start: StageId) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }
}

/// Runs stage transforms against a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct ChainEngine {
    registry: Arc<PluginRegistry>,
    options: EngineOptions,
}

impl ChainEngine {
    pub fn new(registry: Arc<PluginRegistry>, options: EngineOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Looks up `name` and selects it for stage `index`.
    pub fn set_stage_descriptor(
        &self,
        chain: &mut Chain,
        index: StageId,
        name: &str,
        direction: Direction,
    ) -> Result<(), CatenaError> {
        let descriptor = self.registry.lookup(name)?;
        chain.set_stage_descriptor(index, descriptor, direction)
    }

    /// Runs stage `index`'s transform on its current content without
    /// modifying the chain.
    pub async fn invoke_stage(&self, chain: &Chain, index: StageId) -> Result<Vec<u8>, CatenaError> {
        self.invoke_stage_with_cancel(chain, index, &CancellationToken::new())
            .await
    }

    /// Like [`invoke_stage`](Self::invoke_stage), aborting a streaming task
    /// when `cancel` fires.
    pub async fn invoke_stage_with_cancel(
        &self,
        chain: &Chain,
        index: StageId,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, CatenaError> {
        let stage = chain.stage(index)?;
        let descriptor = stage
            .descriptor()
            .ok_or(CatenaError::NoPluginSelected { stage: index })?;
        self.invoke(descriptor, stage.direction(), stage.content(), cancel)
            .await
    }

    /// Recomputes every stage from `index` to the tail.
    ///
    /// Stages before `index` are never touched. Propagation stops silently
    /// at the first stage without a descriptor. A failing stage aborts the
    /// run with [`CatenaError::StageFailed`]; stages after it keep their
    /// previous, now stale, content.
    pub async fn re_execute_from(
        &self,
        chain: &mut Chain,
        index: StageId,
    ) -> Result<ExecutionReport, CatenaError> {
        self.re_execute_from_with_cancel(chain, index, &CancellationToken::new())
            .await
    }

    /// Like [`re_execute_from`](Self::re_execute_from) with a caller-owned
    /// cancellation token covering every stage of the run. Once the token
    /// fires no further stage starts.
    pub async fn re_execute_from_with_cancel(
        &self,
        chain: &mut Chain,
        index: StageId,
        cancel: &CancellationToken,
    ) -> Result<ExecutionReport, CatenaError> {
        chain.stage(index)?;
        let mut report = ExecutionReport::new(index);

        if chain.stage(0)?.descriptor().is_none() {
            debug!(start = index, "root stage has no plugin, chain is idle");
            report.idle = true;
            return Ok(report);
        }

        for i in index..chain.tail() {
            let output = {
                let stage = chain.stage(i)?;
                let Some(descriptor) = stage.descriptor() else {
                    debug!(stage = i, "no plugin selected, propagation stops");
                    report.stopped_at = Some(i);
                    break;
                };
                debug!(
                    stage = i,
                    plugin = descriptor.name(),
                    direction = %stage.direction(),
                    input_len = stage.content().len(),
                    "executing stage"
                );
                self.invoke(descriptor, stage.direction(), stage.content(), cancel)
                    .await
            };

            match output {
                Ok(output) => {
                    chain.commit_output(i, output)?;
                    report.executed.push(i);
                }
                Err(e) => {
                    warn!(stage = i, error = %e, "stage failed, downstream stages left stale");
                    return Err(e.at_stage(i));
                }
            }
        }

        info!(
            start = index,
            executed = report.executed.len(),
            stopped_at = ?report.stopped_at,
            "chain re-executed"
        );
        Ok(report)
    }

    /// Runs one descriptor in one direction over `input`.
    ///
    /// Fails with [`CatenaError::TaskCancelled`] without running anything
    /// when `cancel` has already fired.
    pub async fn invoke(
        &self,
        descriptor: &PluginDescriptor,
        direction: Direction,
        input: &[u8],
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, CatenaError> {
        let plugin = descriptor.name();
        if cancel.is_cancelled() {
            return Err(CatenaError::TaskCancelled {
                plugin: plugin.to_string(),
            });
        }
        match descriptor.transform() {
            Transform::Synchronous { process, unprocess } => {
                let function = select(plugin, direction, process, unprocess.as_ref())?;
                function(input).map_err(|source| transform_failed(plugin, source))
            }
            Transform::Streaming { process, unprocess } => {
                let function = Arc::clone(select(plugin, direction, process, unprocess.as_ref())?);
                let token = cancel.child_token();
                let input = (!input.is_empty()).then(|| input.to_vec());
                let (task, handle) = Task::new(input, token.clone());
                tokio::spawn(async move { function.run(task).await });

                let timeout = self.options.task_timeout;
                let outcome = tokio::select! {
                    biased;
                    outcome = handle.outcome() => outcome,
                    () = cancel.cancelled() => {
                        token.cancel();
                        return Err(CatenaError::TaskCancelled { plugin: plugin.to_string() });
                    }
                    () = tokio::time::sleep(timeout) => {
                        token.cancel();
                        return Err(CatenaError::TaskTimeout {
                            plugin: plugin.to_string(),
                            duration: timeout,
                        });
                    }
                };

                match outcome {
                    TaskOutcome::Done(output) => Ok(output),
                    TaskOutcome::Failed(source) => Err(transform_failed(plugin, source)),
                    TaskOutcome::Abandoned => Err(CatenaError::TaskAbandoned {
                        plugin: plugin.to_string(),
                    }),
                }
            }
        }
    }
}

/// Picks the function for `direction`, failing before anything runs when
/// the inverse is requested from a one-way descriptor.
fn select<'a, F: ?Sized>(
    plugin: &str,
    direction: Direction,
    process: &'a Arc<F>,
    unprocess: Option<&'a Arc<F>>,
) -> Result<&'a Arc<F>, CatenaError> {
    match direction {
        Direction::Forward => Ok(process),
        Direction::Inverse => unprocess.ok_or_else(|| CatenaError::NotInvertible {
            plugin: plugin.to_string(),
        }),
    }
}

fn transform_failed(plugin: &str, source: TransformError) -> CatenaError {
    CatenaError::Transform {
        plugin: plugin.to_string(),
        source,
    }
}
