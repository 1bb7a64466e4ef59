// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gzip, zlib and raw deflate as streaming transforms.
//!
//! The codecs are CPU-bound, so each task moves its work onto the blocking
//! thread pool and processes the input in fixed-size chunks, checking the
//! task's cancellation token between chunks. Compressed output is written
//! straight into the task's sink as the encoder produces it.

use std::io::{self, Read, Write};

use async_trait::async_trait;
use catena_core::{PluginDescriptor, Task, TaskTransform, Transform, TransformError};
use flate2::Compression;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::COMPRESSION;

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy)]
enum Format {
    Gzip,
    Zlib,
    Deflate,
}

impl Format {
    fn name(self) -> &'static str {
        match self {
            Format::Gzip => "gzip",
            Format::Zlib => "zlib",
            Format::Deflate => "deflate",
        }
    }
}

struct Compress(Format);

struct Decompress(Format);

#[async_trait]
impl TaskTransform for Compress {
    async fn run(&self, task: Task) {
        let format = self.0;
        offload(format, task, move |task| compress(format, task)).await;
    }
}

#[async_trait]
impl TaskTransform for Decompress {
    async fn run(&self, task: Task) {
        let format = self.0;
        offload(format, task, move |task| decompress(format, task)).await;
    }
}

pub fn gzip() -> PluginDescriptor {
    plugin(Format::Gzip, "Gzip compression (RFC 1952)").with_alias("gz")
}

pub fn zlib() -> PluginDescriptor {
    plugin(Format::Zlib, "Zlib compression (RFC 1950)")
}

pub fn deflate() -> PluginDescriptor {
    plugin(Format::Deflate, "Raw deflate compression (RFC 1951)").with_alias("flate")
}

fn plugin(format: Format, description: &str) -> PluginDescriptor {
    PluginDescriptor::new(
        format.name(),
        Transform::streaming_pair(Compress(format), Decompress(format)),
    )
    .with_category(COMPRESSION)
    .with_description(description)
}

/// Runs `work` on the blocking pool. A panicking worker drops its task,
/// which the waiting side observes as an abandoned task.
async fn offload(format: Format, task: Task, work: impl FnOnce(Task) + Send + 'static) {
    if let Err(e) = tokio::task::spawn_blocking(move || work(task)).await {
        warn!(format = format.name(), error = %e, "compression worker did not finish");
    }
}

/// Encoders that can flush their trailer into the wrapped writer.
trait Encoder: Write {
    fn finish_stream(self) -> io::Result<()>;
}

impl<W: Write> Encoder for GzEncoder<W> {
    fn finish_stream(self) -> io::Result<()> {
        self.finish().map(drop)
    }
}

impl<W: Write> Encoder for ZlibEncoder<W> {
    fn finish_stream(self) -> io::Result<()> {
        self.finish().map(drop)
    }
}

impl<W: Write> Encoder for DeflateEncoder<W> {
    fn finish_stream(self) -> io::Result<()> {
        self.finish().map(drop)
    }
}

fn compress(format: Format, mut task: Task) {
    let input = task.take_input().unwrap_or_default();
    let cancel = task.cancellation().clone();
    let level = Compression::default();
    let result = match format {
        Format::Gzip => encode(GzEncoder::new(&mut task, level), &input, &cancel),
        Format::Zlib => encode(ZlibEncoder::new(&mut task, level), &input, &cancel),
        Format::Deflate => encode(DeflateEncoder::new(&mut task, level), &input, &cancel),
    };
    match result {
        Ok(()) => task.done(),
        Err(err) => task.fail(err),
    }
}

fn encode(
    mut encoder: impl Encoder,
    input: &[u8],
    cancel: &CancellationToken,
) -> Result<(), TransformError> {
    for chunk in input.chunks(CHUNK_SIZE) {
        if cancel.is_cancelled() {
            return Err(TransformError::new("compression cancelled"));
        }
        encoder
            .write_all(chunk)
            .map_err(|e| TransformError::with_source("compression failed", e))?;
    }
    encoder
        .finish_stream()
        .map_err(|e| TransformError::with_source("compression could not be finalised", e))
}

fn decompress(format: Format, mut task: Task) {
    // Empty stage content decompresses to nothing.
    let Some(input) = task.take_input() else {
        return task.done();
    };
    match format {
        Format::Gzip => decode(format, GzDecoder::new(input.as_slice()), task),
        Format::Zlib => decode(format, ZlibDecoder::new(input.as_slice()), task),
        Format::Deflate => decode(format, DeflateDecoder::new(input.as_slice()), task),
    }
}

fn decode(format: Format, mut decoder: impl Read, mut task: Task) {
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        if task.is_cancelled() {
            return task.fail(TransformError::new("decompression cancelled"));
        }
        match decoder.read(&mut buf) {
            Ok(0) => return task.done(),
            Ok(n) => task.write_output(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                let message = format!("invalid {} stream", format.name());
                return task.fail(TransformError::with_source(message, e));
            }
        }
    }
}
