// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Catena integration tests.
//!
//! Provides mock plugin descriptors covering both execution contracts and
//! their failure modes, plus a fixture builder that assembles a registry,
//! an engine and a workbench around them.
//!
//! # Components
//!
//! - [`mock_plugins`] - Deterministic synchronous and streaming mock transforms
//! - [`ChainFixture`] - Builder for a ready-to-use engine or workbench

pub mod fixture;
pub mod mock_plugins;

pub use fixture::{ChainFixture, ChainFixtureBuilder};
pub use mock_plugins::{CallCounter, MOCK_CATEGORY};
