// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON formatters.
//!
//! Reformatting loses the original whitespace, so neither direction can be
//! inverted byte-for-byte; both are registered as one-way descriptors.

use catena_core::{PluginDescriptor, Transform, TransformError};

use super::FORMAT;

pub fn json_pretty() -> PluginDescriptor {
    PluginDescriptor::new(
        "json-pretty",
        Transform::synchronous(|input| {
            let value = parse(input)?;
            serde_json::to_vec_pretty(&value)
                .map_err(|e| TransformError::with_source("cannot render JSON", e))
        }),
    )
    .with_category(FORMAT)
    .with_alias("json")
    .with_description("Pretty-print a JSON document")
}

pub fn json_minify() -> PluginDescriptor {
    PluginDescriptor::new(
        "json-minify",
        Transform::synchronous(|input| {
            let value = parse(input)?;
            serde_json::to_vec(&value)
                .map_err(|e| TransformError::with_source("cannot render JSON", e))
        }),
    )
    .with_category(FORMAT)
    .with_description("Strip insignificant whitespace from a JSON document")
}

fn parse(input: &[u8]) -> Result<serde_json::Value, TransformError> {
    serde_json::from_slice(input).map_err(|e| TransformError::with_source("invalid JSON input", e))
}

#[cfg(test)]
mod tests {
    use catena_core::Direction;

    use super::*;
    use crate::builtin::tests::{apply, try_apply};

    #[test]
    fn pretty_then_minify_normalises() {
        let pretty = apply(&json_pretty(), br#"{"a":[1,2],"b":null}"#);
        assert_eq!(
            String::from_utf8(pretty.clone()).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": null\n}"
        );
        assert_eq!(apply(&json_minify(), &pretty), br#"{"a":[1,2],"b":null}"#);
    }

    #[test]
    fn invalid_json_is_a_transform_failure() {
        let err = try_apply(&json_minify(), Direction::Forward, b"{oops").unwrap_err();
        assert_eq!(err.message(), "invalid JSON input");
    }

    #[test]
    fn formatters_have_no_inverse() {
        assert!(json_pretty().is_one_way());
        assert!(json_minify().is_one_way());
    }
}
