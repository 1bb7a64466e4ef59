// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy `./catena.toml` > `~/.config/catena/catena.toml`
//! > `/etc/catena/catena.toml`, with environment variable overrides via the
//! `CATENA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::debug;

use crate::model::CatenaConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/catena/catena.toml";
pub(crate) const LOCAL_CONFIG: &str = "catena.toml";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/catena/catena.toml` (system-wide)
/// 3. `~/.config/catena/catena.toml` (user XDG config)
/// 4. `./catena.toml` (local directory)
/// 5. `CATENA_*` environment variables
pub fn load_config() -> Result<CatenaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<CatenaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CatenaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the standard hierarchy, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<CatenaConfig, figment::Error> {
    if !path.is_file() {
        return Err(figment::Error::from(format!(
            "config file {} not found",
            path.display()
        )));
    }
    debug!(path = %path.display(), "loading explicit config file");
    Figment::new()
        .merge(Serialized::defaults(CatenaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    let user = user_config_path().unwrap_or_default();
    let mut figment = Figment::new().merge(Serialized::defaults(CatenaConfig::default()));
    for path in [Path::new(SYSTEM_CONFIG), user.as_path(), Path::new(LOCAL_CONFIG)] {
        if path.is_file() {
            debug!(path = %path.display(), "merging config file");
        }
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// `$XDG_CONFIG_HOME/catena/catena.toml`, if a config dir is known.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("catena").join("catena.toml"))
}

/// Environment provider mapping `CATENA_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys such as
/// `task_timeout_ms` contain underscores themselves.
fn env_provider() -> Env {
    Env::prefixed("CATENA_").map(|key| {
        key.as_str()
            .replacen("engine_", "engine.", 1)
            .replacen("log_", "log.", 1)
            .replacen("plugins_", "plugins.", 1)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CATENA_ENGINE_TASK_TIMEOUT_MS", "1500");
            jail.set_env("CATENA_LOG_LEVEL", "debug");
            let config: CatenaConfig = Figment::new()
                .merge(Serialized::defaults(CatenaConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.engine.task_timeout_ms, 1500);
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG, "[plugins]\ndisabled = [\"sha1\"]\n")?;
            let config = load_config()?;
            assert_eq!(config.plugins.disabled, vec!["sha1"]);
            assert_eq!(config.engine.task_timeout_ms, 30_000);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_must_exist() {
        figment::Jail::expect_with(|jail| {
            let err = load_config_from_path(&jail.directory().join("typo.toml")).unwrap_err();
            assert!(err.to_string().contains("typo.toml"), "{err}");
            Ok(())
        });
    }
}
