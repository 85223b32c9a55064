// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;
use std::time::Duration;

/// Default tracing filter when `CX_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolve the config file: CX_CONFIG > XDG_CONFIG_HOME/cx/cx.toml > ./cx.toml
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CX_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .map(|dir| dir.join("cx").join("cx.toml"))
        .unwrap_or_else(|| PathBuf::from("cx.toml"))
}

/// Artifact root override from `CX_ARTIFACT_ROOT`.
pub fn artifact_root_override() -> Option<PathBuf> {
    std::env::var("CX_ARTIFACT_ROOT").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Fallback artifact root under the system temp directory.
pub fn default_artifact_root() -> PathBuf {
    std::env::temp_dir().join("cx")
}

/// Stage timeout override from `CX_TIMEOUT_MS`.
pub fn timeout_override() -> Option<Duration> {
    std::env::var("CX_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Tracing filter directive: CX_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var("CX_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
