// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `catena run` command implementation.
//!
//! Builds a chain from the given steps, seeds the root with the input file
//! (or stdin) and prints every stage, or only the final output with
//! `--last`. Ctrl-C cancels a running streaming stage.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use catena_chain::{ChainEngine, ChainSnapshot, Workbench};
use catena_core::{CatenaError, Direction};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Bytes of a non-text stage shown in the stage listing.
const PREVIEW_BYTES: usize = 64;

/// One `run` argument: a plugin name, dot-prefixed for the inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    name: String,
    direction: Direction,
}

impl Step {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, direction) = match s.strip_prefix('.') {
            Some(rest) => (rest, Direction::Inverse),
            None => (s, Direction::Forward),
        };
        if name.trim().is_empty() {
            return Err(format!("`{s}` does not name a plugin"));
        }
        Ok(Self {
            name: name.to_string(),
            direction,
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Forward => write!(f, "{}", self.name),
            Direction::Inverse => write!(f, ".{}", self.name),
        }
    }
}

/// Run the `catena run` command.
pub async fn run_chain(
    engine: ChainEngine,
    steps: &[Step],
    input: Option<&Path>,
    last: bool,
    use_color: bool,
) -> Result<(), CatenaError> {
    let mut bench = Workbench::new(engine);
    for (i, step) in steps.iter().enumerate() {
        bench.set_stage_descriptor(i, step.name(), step.direction())?;
    }

    let content = match input {
        Some(path) => tokio::fs::read(path).await.map_err(|source| CatenaError::Io {
            path: path.to_path_buf(),
            source,
        })?,
        None => read_stdin().await?,
    };
    bench.set_stage_content(0, content)?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    let listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling chain");
            interrupt.cancel();
        }
    });
    let result = bench.re_execute_from_with_cancel(0, &cancel).await;
    listener.abort();
    result?;

    let snapshot = bench.snapshot();
    if last {
        write_raw(snapshot.output())
    } else {
        print_stages(&snapshot, use_color);
        Ok(())
    }
}

async fn read_stdin() -> Result<Vec<u8>, CatenaError> {
    let mut buf = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut buf)
        .await
        .map_err(|source| CatenaError::Io {
            path: "<stdin>".into(),
            source,
        })?;
    Ok(buf)
}

fn write_raw(bytes: &[u8]) -> Result<(), CatenaError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|source| CatenaError::Io {
            path: "<stdout>".into(),
            source,
        })
}

fn print_stages(snapshot: &ChainSnapshot, use_color: bool) {
    for stage in &snapshot.stages {
        let label = match &stage.plugin {
            Some(name) if stage.direction.is_inverse() => format!(".{name}"),
            Some(name) => name.clone(),
            None => "output".to_string(),
        };
        let header = format!("[{}] {} ({} bytes)", stage.index, label, stage.content.len());
        if use_color {
            use colored::Colorize;
            println!("{}", header.as_str().bold());
        } else {
            println!("{header}");
        }
        println!("{}", render(&stage.content));
    }
}

/// Text content is shown as-is; anything else as a hex preview.
fn render(content: &[u8]) -> String {
    match std::str::from_utf8(content) {
        Ok(text) if !text.chars().any(|c| c.is_control() && !c.is_whitespace()) => {
            text.to_string()
        }
        _ => {
            let shown = &content[..content.len().min(PREVIEW_BYTES)];
            let hex: Vec<String> = shown.iter().map(|b| format!("{b:02x}")).collect();
            let ellipsis = if content.len() > PREVIEW_BYTES { " ..." } else { "" };
            format!("{}{ellipsis}", hex.join(" "))
        }
    }
}
