// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builder assembling a registry, an engine and a workbench.

use std::sync::Arc;
use std::time::Duration;

use catena_chain::{ChainEngine, EngineOptions, Workbench};
use catena_core::{CatenaError, PluginDescriptor};
use catena_plugin::{PluginRegistry, register_builtins};

/// Builder for test environments.
pub struct ChainFixtureBuilder {
    builtins: bool,
    disabled: Vec<String>,
    descriptors: Vec<PluginDescriptor>,
    options: EngineOptions,
}

impl ChainFixtureBuilder {
    fn new() -> Self {
        Self {
            builtins: false,
            disabled: Vec::new(),
            descriptors: Vec::new(),
            options: EngineOptions::default(),
        }
    }

    /// Register the built-in catalog before any mocks.
    pub fn with_builtins(mut self) -> Self {
        self.builtins = true;
        self
    }

    /// Skip the named built-ins.
    pub fn without_builtin(mut self, name: &str) -> Self {
        self.disabled.push(name.to_string());
        self
    }

    /// Register an extra descriptor (typically a mock).
    pub fn with_plugin(mut self, descriptor: PluginDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Set the streaming task timeout.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_task_timeout(timeout);
        self
    }

    pub fn build(self) -> Result<ChainFixture, CatenaError> {
        let mut registry = PluginRegistry::new();
        if self.builtins {
            register_builtins(&mut registry, &self.disabled)?;
        }
        for descriptor in self.descriptors {
            registry.register(descriptor)?;
        }
        let registry = Arc::new(registry);
        Ok(ChainFixture {
            engine: ChainEngine::new(Arc::clone(&registry), self.options),
            registry,
        })
    }
}

/// A ready-to-use engine over a test registry.
pub struct ChainFixture {
    pub registry: Arc<PluginRegistry>,
    pub engine: ChainEngine,
}

impl ChainFixture {
    pub fn builder() -> ChainFixtureBuilder {
        ChainFixtureBuilder::new()
    }

    /// A fixture with only the built-in catalog.
    pub fn builtins() -> Result<Self, CatenaError> {
        Self::builder().with_builtins().build()
    }

    /// A fresh workbench sharing this fixture's registry.
    pub fn workbench(&self) -> Workbench {
        Workbench::new(self.engine.clone())
    }
}
