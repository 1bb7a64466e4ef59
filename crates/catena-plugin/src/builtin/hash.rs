// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-way digests rendered as lowercase hex.

use catena_core::{PluginDescriptor, Transform};
use sha2::Digest;

use super::HASH;

/// Builds a hash descriptor for any RustCrypto digest.
fn digest_plugin<D>(name: &str, description: &str) -> PluginDescriptor
where
    D: Digest + Send + Sync + 'static,
{
    PluginDescriptor::new(
        name,
        Transform::synchronous(|input| Ok(hex::encode(D::digest(input)).into_bytes())),
    )
    .with_category(HASH)
    .with_description(description)
}

pub fn sha1() -> PluginDescriptor {
    digest_plugin::<sha1::Sha1>("sha1", "SHA-1 digest (160 bit)").with_alias("sha-1")
}

pub fn sha224() -> PluginDescriptor {
    digest_plugin::<sha2::Sha224>("sha224", "SHA-2 digest (224 bit)").with_alias("sha-224")
}

pub fn sha256() -> PluginDescriptor {
    digest_plugin::<sha2::Sha256>("sha256", "SHA-2 digest (256 bit)").with_alias("sha-256")
}

pub fn sha384() -> PluginDescriptor {
    digest_plugin::<sha2::Sha384>("sha384", "SHA-2 digest (384 bit)").with_alias("sha-384")
}

pub fn sha512() -> PluginDescriptor {
    digest_plugin::<sha2::Sha512>("sha512", "SHA-2 digest (512 bit)").with_alias("sha-512")
}

pub fn sha3_224() -> PluginDescriptor {
    digest_plugin::<sha3::Sha3_224>("sha3-224", "SHA-3 digest (224 bit)")
}

pub fn sha3_256() -> PluginDescriptor {
    digest_plugin::<sha3::Sha3_256>("sha3-256", "SHA-3 digest (256 bit)")
}

pub fn sha3_384() -> PluginDescriptor {
    digest_plugin::<sha3::Sha3_384>("sha3-384", "SHA-3 digest (384 bit)")
}

pub fn sha3_512() -> PluginDescriptor {
    digest_plugin::<sha3::Sha3_512>("sha3-512", "SHA-3 digest (512 bit)")
}
