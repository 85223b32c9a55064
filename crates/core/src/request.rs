// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compilation request and execution environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Filter and output options chosen by the host.
///
/// Every compiler accepts them. Whether they turn into command-line
/// arguments is up to the compiler's `prepare_arguments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileFilters {
    pub binary: bool,
    pub execute: bool,
    pub demangle: bool,
    pub intel: bool,
    pub comment_only: bool,
    pub directives: bool,
    pub labels: bool,
    pub trim: bool,
}

/// Environment a stage's subprocess runs under.
///
/// `env` entries are layered on top of the inherited process environment.
/// `ld_path` entries are prepended to the dynamic-library search path in
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecEnv {
    pub env: BTreeMap<String, String>,
    pub ld_path: Vec<PathBuf>,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub max_output: Option<usize>,
}

impl ExecEnv {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        option {
            cwd: PathBuf,
            timeout: Duration,
            max_output: usize,
        }
    }

    /// Add one environment variable.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// A copy of this environment with `dir` appended to the library search path.
    pub fn with_ld_path(&self, dir: impl Into<PathBuf>) -> Self {
        let mut next = self.clone();
        next.ld_path.push(dir.into());
        next
    }

    /// A copy of this environment running in `dir`.
    pub fn with_cwd(&self, dir: impl Into<PathBuf>) -> Self {
        let mut next = self.clone();
        next.cwd = Some(dir.into());
        next
    }
}

/// One request from the host: compile these source bytes with these flags.
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub input: PathBuf,
    pub flags: Vec<String>,
    pub filters: CompileFilters,
    pub env: ExecEnv,
    /// Caller-selected directory for the persisted output file.
    pub output_dir: PathBuf,
    /// Base name offered by the caller. Compilers may ignore it.
    pub output_base: String,
}

impl CompileRequest {
    /// Request compiling `input`, persisting output next to it.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output_dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            input,
            flags: Vec::new(),
            filters: CompileFilters::default(),
            env: ExecEnv::default(),
            output_dir,
            output_base: "output".to_string(),
        }
    }

    crate::setters! {
        into {
            output_dir: PathBuf,
            output_base: String,
        }
        set {
            filters: CompileFilters,
            env: ExecEnv,
        }
    }

    /// Append compiler flags.
    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
