// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability set every orchestrator variant implements.

use crate::context::RunContext;
use async_trait::async_trait;
use cx_core::{CompilationResult, CompileFilters, CompileRequest};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Infrastructure failures of a run.
///
/// A failing compile or a failing execution is a normal
/// [`CompilationResult`], never one of these.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Exec(#[from] cx_adapters::ExecError),
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io { action, path: path.to_path_buf(), source }
    }
}

/// Result of one run plus the run-scoped context it used.
#[derive(Debug)]
pub struct CompileOutcome {
    pub result: CompilationResult,
    pub context: RunContext,
}

/// A compiler orchestrator the host can look up by key.
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Stable registry key of this variant.
    fn key(&self) -> &'static str;

    /// Language tag attached to results, used by the host to route rendering.
    fn language_id(&self) -> Option<&str>;

    /// Command-line arguments contributed by the host's filter options.
    fn prepare_arguments(&self, filters: &CompileFilters, output: &Path) -> Vec<String>;

    /// Name of the persisted output file inside the caller-selected `dir`.
    fn output_filename(&self, dir: &Path, base: &str) -> PathBuf;

    /// Run every stage for `request` and build its single result.
    async fn run_stages(&self, request: &CompileRequest) -> Result<CompileOutcome, CompileError>;
}
