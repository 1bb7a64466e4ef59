// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command interface for front ends.
//!
//! A `Workbench` owns one chain and the engine that runs it. Front ends
//! issue explicit commands and observe results through [`ChainSnapshot`]s,
//! either returned directly or delivered over a watch channel after every
//! command that changes the chain.

use std::path::Path;

use catena_core::{CatenaError, Direction};
use catena_plugin::SearchHit;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::chain::{Chain, StageId};
use crate::engine::{ChainEngine, ExecutionReport};
use crate::snapshot::ChainSnapshot;

/// Maximum number of hits returned by [`Workbench::search`].
pub const SEARCH_LIMIT: usize = 10;

pub struct Workbench {
    engine: ChainEngine,
    chain: Chain,
    revision: u64,
    last_error: Option<String>,
    snapshots: watch::Sender<ChainSnapshot>,
}

impl Workbench {
    pub fn new(engine: ChainEngine) -> Self {
        let chain = Chain::new();
        let (snapshots, _) = watch::channel(ChainSnapshot::capture(&chain, 0, None));
        Self {
            engine,
            chain,
            revision: 0,
            last_error: None,
            snapshots,
        }
    }

    pub fn engine(&self) -> &ChainEngine {
        &self.engine
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn categories(&self) -> Vec<&str> {
        self.engine.registry().categories()
    }

    pub fn list_by_category(&self, category: &str, include_aliases: bool) -> Vec<&str> {
        self.engine
            .registry()
            .list_by_category(category, include_aliases)
    }

    /// Fuzzy plugin search over names and aliases.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.engine.registry().search(query, SEARCH_LIMIT)
    }

    pub fn append_stage(&mut self) -> StageId {
        let id = self.chain.append_stage();
        self.publish();
        id
    }

    /// Replaces the content of stage `index`. Call
    /// [`re_execute_from`](Self::re_execute_from) to propagate it.
    pub fn set_stage_content(&mut self, index: StageId, content: Vec<u8>) -> Result<(), CatenaError> {
        self.chain.set_stage_content(index, content)?;
        self.publish();
        Ok(())
    }

    pub fn clear_content(&mut self, index: StageId) -> Result<(), CatenaError> {
        self.chain.clear_content(index)?;
        self.publish();
        Ok(())
    }

    pub fn set_stage_descriptor(
        &mut self,
        index: StageId,
        name: &str,
        direction: Direction,
    ) -> Result<(), CatenaError> {
        self.engine
            .set_stage_descriptor(&mut self.chain, index, name, direction)?;
        self.publish();
        Ok(())
    }

    pub fn clear_stage_descriptor(&mut self, index: StageId) -> Result<(), CatenaError> {
        self.chain.clear_stage_descriptor(index)?;
        self.publish();
        Ok(())
    }

    pub fn set_focus(&mut self, index: StageId) -> Result<(), CatenaError> {
        self.chain.set_focus(index)?;
        self.publish();
        Ok(())
    }

    pub async fn re_execute_from(&mut self, index: StageId) -> Result<ExecutionReport, CatenaError> {
        self.re_execute_from_with_cancel(index, &CancellationToken::new())
            .await
    }

    /// Re-executes from `index`, publishing a snapshot whether it succeeds
    /// or fails.
    pub async fn re_execute_from_with_cancel(
        &mut self,
        index: StageId,
        cancel: &CancellationToken,
    ) -> Result<ExecutionReport, CatenaError> {
        let result = self
            .engine
            .re_execute_from_with_cancel(&mut self.chain, index, cancel)
            .await;
        self.last_error = result.as_ref().err().map(ToString::to_string);
        self.publish();
        result
    }

    /// Applies `name` to the focused stage, re-runs the chain from there and
    /// moves focus to the stage holding the new output. An idle chain runs
    /// nothing, so focus stays put.
    pub async fn run_plugin(
        &mut self,
        name: &str,
        direction: Direction,
    ) -> Result<ExecutionReport, CatenaError> {
        let index = self.chain.focused();
        self.engine
            .set_stage_descriptor(&mut self.chain, index, name, direction)?;
        let report = self.re_execute_from(index).await?;
        if !report.idle {
            self.chain.set_focus(index + 1)?;
            self.publish();
        }
        Ok(report)
    }

    /// Reads `path` into the root stage and re-runs the whole chain.
    pub async fn load_file(&mut self, path: &Path) -> Result<ExecutionReport, CatenaError> {
        let content = tokio::fs::read(path).await.map_err(|source| CatenaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), len = content.len(), "loaded input file");
        self.chain.set_stage_content(0, content)?;
        self.re_execute_from(0).await
    }

    pub fn history(&self) -> Vec<String> {
        self.chain.history()
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Returns a receiver that is notified after every change.
    pub fn subscribe(&self) -> watch::Receiver<ChainSnapshot> {
        self.snapshots.subscribe()
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = ChainSnapshot::capture(&self.chain, self.revision, self.last_error.clone());
        self.snapshots.send_replace(snapshot);
    }
}
