// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in transforms compiled into every Catena binary.
//!
//! These are leaf functions delegating to standard algorithm crates; the
//! interesting part is only which execution contract each one uses.

pub mod codec;
pub mod compression;
pub mod format;
pub mod hash;

use catena_core::{CatenaError, PluginDescriptor};
use tracing::{debug, info};

use crate::PluginRegistry;

/// Category of base encodings.
pub const CODEC: &str = "codec";
/// Category of compression formats.
pub const COMPRESSION: &str = "compression";
/// Category of one-way digests.
pub const HASH: &str = "hash";
/// Category of structured-text formatters.
pub const FORMAT: &str = "format";

/// Returns descriptors for all built-in transforms.
///
/// The order defines the category display order: codec, compression, hash,
/// format.
pub fn builtin_catalog() -> Vec<PluginDescriptor> {
    vec![
        codec::base64(),
        codec::base64url(),
        codec::hex(),
        compression::gzip(),
        compression::zlib(),
        compression::deflate(),
        hash::sha1(),
        hash::sha224(),
        hash::sha256(),
        hash::sha384(),
        hash::sha512(),
        hash::sha3_224(),
        hash::sha3_256(),
        hash::sha3_384(),
        hash::sha3_512(),
        format::json_pretty(),
        format::json_minify(),
    ]
}

/// Registers all built-in transforms except those named in `disabled`.
///
/// Returns the number of descriptors registered.
pub fn register_builtins(
    registry: &mut PluginRegistry,
    disabled: &[String],
) -> Result<usize, CatenaError> {
    let mut count = 0;
    for descriptor in builtin_catalog() {
        if disabled.iter().any(|d| descriptor.answers_to(d)) {
            debug!(plugin = descriptor.name(), "built-in plugin disabled by configuration");
            continue;
        }
        registry.register(descriptor)?;
        count += 1;
    }
    info!(count, "built-in plugins registered");
    Ok(count)
}
