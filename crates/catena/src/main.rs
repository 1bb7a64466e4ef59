// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catena - chain byte-stream transforms and inspect every intermediate
//! result.
//!
//! This is the binary entry point.

mod list;
mod run;
mod search;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use catena_chain::{ChainEngine, EngineOptions};
use catena_config::CatenaConfig;
use catena_core::CatenaError;
use catena_plugin::{PluginRegistry, register_builtins};
use clap::{Parser, Subcommand};
use tracing::warn;

/// Catena - chain byte-stream transforms.
#[derive(Parser, Debug)]
#[command(name = "catena", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List available plugins grouped by category.
    List {
        /// Show aliases after each plugin name.
        #[arg(long)]
        aliases: bool,
        /// Only list this category.
        category: Option<String>,
    },
    /// Fuzzy-search plugin names and aliases.
    Search {
        query: String,
    },
    /// Apply a chain of plugins to an input. Prefix a step with `.` to run
    /// it in the inverse direction (`.base64` decodes).
    Run {
        /// Plugin names, applied in order.
        #[arg(required = true, num_args = 1..)]
        steps: Vec<run::Step>,
        /// Read the input from a file instead of stdin.
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Write only the final output, as raw bytes.
        #[arg(long)]
        last: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => catena_config::load_and_validate_path(path),
        None => catena_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            catena_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let use_color = !cli.plain && std::io::stdout().is_terminal();
    let result = match build_engine(&config) {
        Ok(engine) => match cli.command {
            Commands::List { aliases, category } => {
                list::run_list(engine.registry(), category.as_deref(), aliases, use_color);
                Ok(())
            }
            Commands::Search { query } => {
                search::run_search(engine.registry(), &query, use_color);
                Ok(())
            }
            Commands::Run { steps, input, last } => {
                run::run_chain(engine, &steps, input.as_deref(), last, use_color).await
            }
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("catena: {e}");
        std::process::exit(1);
    }
}

/// Registers the built-in catalog minus `plugins.disabled` and wraps it in
/// an engine.
fn build_engine(config: &CatenaConfig) -> Result<ChainEngine, CatenaError> {
    let mut registry = PluginRegistry::new();
    register_builtins(&mut registry, &config.plugins.disabled)?;

    for name in &config.plugins.disabled {
        if !catena_plugin::builtin_catalog()
            .iter()
            .any(|d| d.answers_to(name))
        {
            warn!(plugin = %name, "plugins.disabled names an unknown plugin");
        }
    }

    let options = EngineOptions::default().with_task_timeout(config.engine.task_timeout());
    Ok(ChainEngine::new(Arc::new(registry), options))
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("catena={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
