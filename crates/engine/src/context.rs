// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-scoped paths.
//!
//! Every run gets its own artifact directory named by a fresh [`RunId`], so
//! runs sharing one orchestrator never touch each other's intermediate files.

use crate::compiler::CompileError;
use cx_core::RunId;
use std::path::{Path, PathBuf};

/// File name of the intermediate artifact inside a run directory.
pub const IR_FILE_NAME: &str = "example.ll";

/// Paths used by a single run, threaded through the stages and handed back
/// with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub run_id: RunId,
    /// Directory holding the run's intermediate files.
    pub run_dir: PathBuf,
    /// Where the persisted output is written. Chosen once per run.
    pub output_file: PathBuf,
    owns_run_dir: bool,
}

impl RunContext {
    /// Context for a run with no intermediate files of its own.
    ///
    /// The run directory is the output file's directory and is never removed.
    pub fn new(output_file: PathBuf) -> Self {
        let run_dir = output_file.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { run_id: RunId::new(), run_dir, output_file, owns_run_dir: false }
    }

    /// Context with a fresh artifact directory under `artifact_root`.
    pub async fn with_artifact_dir(
        artifact_root: &Path,
        output_file: PathBuf,
    ) -> Result<Self, CompileError> {
        let run_id = RunId::new();
        let run_dir = artifact_root.join(&run_id);
        tokio::fs::create_dir_all(&run_dir)
            .await
            .map_err(|e| CompileError::io("failed to create run dir", &run_dir, e))?;
        Ok(Self { run_id, run_dir, output_file, owns_run_dir: true })
    }

    /// Whether `run_dir` was created for this run alone.
    pub fn owns_run_dir(&self) -> bool {
        self.owns_run_dir
    }

    /// Intermediate artifact path.
    pub fn artifact(&self) -> PathBuf {
        self.run_dir.join(IR_FILE_NAME)
    }

    /// Remove the run's artifact directory, if the run created one.
    ///
    /// The persisted output file lives in the caller's directory and is kept.
    pub async fn cleanup(&self) -> Result<(), CompileError> {
        if !self.owns_run_dir {
            return Ok(());
        }
        match tokio::fs::remove_dir_all(&self.run_dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CompileError::io("failed to remove run dir", &self.run_dir, e)),
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
