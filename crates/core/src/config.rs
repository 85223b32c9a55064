// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiler configuration loaded from `cx.toml`.
//!
//! Every tool location and artifact directory comes from here; nothing in
//! the orchestrators names a path literally.

use crate::instruction_set::DEFAULT_INSTRUCTION_SET;
use crate::ExecEnv;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Values of a compiler entry's `kind`, shared with the registry.
pub mod kind {
    /// Two-stage compile-then-interpret orchestrator.
    pub const PIPELINE: &str = "vcalc";
    /// Single-stage generator.
    pub const GENERATOR: &str = "generator";
}

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("compiler `{id}` of kind `vcalc` needs a `runner`")]
    MissingRunner { id: String },
    #[error("compiler `{id}` has unknown kind `{kind}`")]
    UnknownKind { id: String, kind: String },
    #[error("no compiler named `{0}`")]
    UnknownCompiler(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub compilers: BTreeMap<String, CompilerConfig>,
}

/// Settings shared by every compiler unless overridden.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub timeout_ms: Option<u64>,
    pub max_output_bytes: Option<usize>,
    pub instruction_set: String,
    pub artifact_root: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            max_output_bytes: None,
            instruction_set: DEFAULT_INSTRUCTION_SET.to_string(),
            artifact_root: None,
        }
    }
}

/// One `[compilers.<id>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Registry key of the orchestrator variant.
    pub kind: String,
    /// Compiler (or generator) executable.
    pub exe: PathBuf,
    /// Interpreter run against the intermediate artifact.
    #[serde(default)]
    pub runner: Option<PathBuf>,
    /// Directory added to the runner's library search path.
    #[serde(default)]
    pub lib_dir: Option<PathBuf>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instruction_set: Option<String>,
    /// Extra environment for every stage.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Paths the two-stage orchestrator is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub compiler: PathBuf,
    pub runner: PathBuf,
    pub lib_dir: Option<PathBuf>,
    /// Per-run artifact directories are created under this root.
    pub artifact_root: PathBuf,
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&content)
    }

    /// Parse and validate config text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (id, compiler) in &self.compilers {
            if compiler.kind == kind::PIPELINE && compiler.runner.is_none() {
                return Err(ConfigError::MissingRunner { id: id.clone() });
            }
        }
        Ok(())
    }

    pub fn compiler(&self, id: &str) -> Result<&CompilerConfig, ConfigError> {
        self.compilers.get(id).ok_or_else(|| ConfigError::UnknownCompiler(id.to_string()))
    }

    /// Artifact root: `CX_ARTIFACT_ROOT` > `defaults.artifact_root` > `$TMPDIR/cx`.
    pub fn artifact_root(&self) -> PathBuf {
        crate::env::artifact_root_override()
            .or_else(|| self.defaults.artifact_root.clone())
            .unwrap_or_else(crate::env::default_artifact_root)
    }

    /// Stage timeout: `CX_TIMEOUT_MS` > `defaults.timeout_ms`.
    pub fn timeout(&self) -> Option<Duration> {
        crate::env::timeout_override().or_else(|| self.defaults.timeout_ms.map(Duration::from_millis))
    }

    /// Base execution environment for a compiler's stages.
    pub fn exec_env(&self, compiler: &CompilerConfig) -> ExecEnv {
        ExecEnv {
            env: compiler.env.clone(),
            ld_path: Vec::new(),
            cwd: None,
            timeout: self.timeout(),
            max_output: self.defaults.max_output_bytes,
        }
    }

    /// Default instruction set for `compiler`.
    pub fn instruction_set<'a>(&'a self, compiler: &'a CompilerConfig) -> &'a str {
        compiler.instruction_set.as_deref().unwrap_or(&self.defaults.instruction_set)
    }
}

impl CompilerConfig {
    /// Paths for the two-stage orchestrator.
    pub fn pipeline(&self, id: &str, artifact_root: &Path) -> Result<PipelineConfig, ConfigError> {
        let runner =
            self.runner.clone().ok_or_else(|| ConfigError::MissingRunner { id: id.to_string() })?;
        Ok(PipelineConfig {
            compiler: self.exe.clone(),
            runner,
            lib_dir: self.lib_dir.clone(),
            artifact_root: artifact_root.to_path_buf(),
        })
    }

    /// Display name, falling back to the id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(id)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
