// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-stage generator: one binary, result passed through unchanged.

use crate::compiler::{CompileError, CompileOutcome, Compiler};
use crate::context::RunContext;
use async_trait::async_trait;
use cx_adapters::ProcessExecutor;
use cx_core::{transform, CompileFilters, CompileRequest};
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// Registry key of this variant.
pub const KEY: &str = cx_core::kind::GENERATOR;
/// Language tag attached to results.
pub const LANGUAGE_ID: &str = "gen";
/// Persisted output file name, whatever base name the caller offers.
pub const OUTPUT_FILE_NAME: &str = "example.gen";

/// Generator writing `<output_file>` from `<input_file>`.
#[derive(Clone)]
pub struct GeneratorCompiler<E> {
    exe: PathBuf,
    executor: E,
}

impl<E: ProcessExecutor> GeneratorCompiler<E> {
    pub fn new(exe: impl Into<PathBuf>, executor: E) -> Self {
        Self { exe: exe.into(), executor }
    }
}

#[async_trait]
impl<E: ProcessExecutor> Compiler for GeneratorCompiler<E> {
    fn key(&self) -> &'static str {
        KEY
    }

    fn language_id(&self) -> Option<&str> {
        Some(LANGUAGE_ID)
    }

    /// The input file is positional, so only the output file is added.
    fn prepare_arguments(&self, _filters: &CompileFilters, output: &Path) -> Vec<String> {
        vec![output.display().to_string()]
    }

    fn output_filename(&self, dir: &Path, _base: &str) -> PathBuf {
        dir.join(OUTPUT_FILE_NAME)
    }

    async fn run_stages(&self, request: &CompileRequest) -> Result<CompileOutcome, CompileError> {
        let context =
            RunContext::new(self.output_filename(&request.output_dir, &request.output_base));
        let span = tracing::info_span!(
            "generator.run",
            run_id = %context.run_id,
            exe = %self.exe.display(),
        );

        let mut args = request.flags.clone();
        args.push(request.input.display().to_string());
        args.extend(self.prepare_arguments(&request.filters, &context.output_file));

        let record = self
            .executor
            .exec(&self.exe, &args, &request.env)
            .instrument(span)
            .await?;
        tracing::debug!(run_id = %context.run_id, exit_code = record.exit_code, "generator finished");

        let mut result = transform(&record, &request.input);
        result.language_id = self.language_id().map(str::to_string);
        Ok(CompileOutcome { result, context })
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
