// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod compile;
pub mod list;

use std::path::Path;

use anyhow::Result;
use cx_core::Config;

/// Load the config named by `--config`, or the default location.
///
/// An explicit path (flag or `CX_CONFIG`) must exist. A missing default
/// config file means no compilers are configured.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }
    let path = cx_core::env::config_path();
    if std::env::var_os("CX_CONFIG").is_none() && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    Ok(Config::load(&path)?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
