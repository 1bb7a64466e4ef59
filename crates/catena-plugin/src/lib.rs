// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry and built-in transform catalog.
//!
//! Transforms are compiled in and registered once at startup. Each
//! descriptor belongs to one category; front ends enumerate categories and
//! the names within them, and the engine resolves names to descriptors.

pub mod builtin;
pub mod registry;

pub use builtin::{builtin_catalog, register_builtins};
pub use registry::{PluginRegistry, SearchHit};
