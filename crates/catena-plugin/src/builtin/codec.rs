// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base encodings: base64, URL-safe base64 and hex.
//!
//! Decoders ignore leading and trailing ASCII whitespace so that content
//! pasted with a trailing newline still decodes.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use catena_core::{PluginDescriptor, Transform, TransformError};

use super::CODEC;

pub fn base64() -> PluginDescriptor {
    PluginDescriptor::new(
        "base64",
        Transform::synchronous_pair(
            |input| Ok(STANDARD.encode(input).into_bytes()),
            |input| decode_base64(&STANDARD, input),
        ),
    )
    .with_category(CODEC)
    .with_alias("b64")
    .with_description("Base64 encoding (RFC 4648, standard alphabet)")
}

pub fn base64url() -> PluginDescriptor {
    PluginDescriptor::new(
        "base64url",
        Transform::synchronous_pair(
            |input| Ok(URL_SAFE.encode(input).into_bytes()),
            |input| decode_base64(&URL_SAFE, input),
        ),
    )
    .with_category(CODEC)
    .with_alias("b64url")
    .with_description("Base64 encoding with the URL- and filename-safe alphabet")
}

pub fn hex() -> PluginDescriptor {
    PluginDescriptor::new(
        "hex",
        Transform::synchronous_pair(
            |input| Ok(hex::encode(input).into_bytes()),
            |input| {
                hex::decode(input.trim_ascii())
                    .map_err(|e| TransformError::with_source("invalid hex input", e))
            },
        ),
    )
    .with_category(CODEC)
    .with_alias("base16")
    .with_description("Lowercase hexadecimal encoding")
}

fn decode_base64(engine: &impl Engine, input: &[u8]) -> Result<Vec<u8>, TransformError> {
    engine
        .decode(input.trim_ascii())
        .map_err(|e| TransformError::with_source("invalid base64 input", e))
}

#[cfg(test)]
mod tests {
    use catena_core::Direction;

    use super::*;
    use crate::builtin::tests::{apply, apply_inverse, try_apply};

    #[test]
    fn base64_decodes_hello() {
        assert_eq!(apply_inverse(&base64(), b"SGVsbG8="), b"Hello");
    }

    #[test]
    fn base64_decode_ignores_trailing_newline() {
        assert_eq!(apply_inverse(&base64(), b"SGVsbG8=\n"), b"Hello");
    }

    #[test]
    fn base64_rejects_garbage() {
        let err = try_apply(&base64(), Direction::Inverse, b"not base64!").unwrap_err();
        assert_eq!(err.message(), "invalid base64 input");
    }

    #[test]
    fn base64url_uses_url_alphabet() {
        assert_eq!(apply(&base64url(), &[0xfb, 0xff]), b"-_8=");
        assert_eq!(apply(&base64(), &[0xfb, 0xff]), b"+/8=");
    }

    #[test]
    fn hex_encodes_lowercase() {
        assert_eq!(apply(&hex(), b"\x01\xab"), b"01ab");
        assert_eq!(apply_inverse(&hex(), b"01AB\r\n"), b"\x01\xab");
    }

    #[test]
    fn empty_input_encodes_to_empty() {
        assert!(apply(&base64(), b"").is_empty());
        assert!(apply(&hex(), b"").is_empty());
    }
}
