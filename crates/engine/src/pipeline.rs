// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-stage pipeline: compile the source to IR, then run the IR.
//!
//! Stage 1 invokes the compiler as `<compiler> <input> <ir>`. Only when it
//! exits 0 does stage 2 run `<runner> <ir>` from the run directory with the
//! runtime library directory on the loader path. Stage 2's stdout is
//! persisted to the output file when it succeeds; otherwise the file is left
//! untouched. Both stages are merged into one result.

use crate::compiler::{CompileError, CompileOutcome, Compiler};
use crate::context::RunContext;
use async_trait::async_trait;
use cx_adapters::ProcessExecutor;
use cx_core::{instruction_set, transform, CompilationResult, CompileFilters, CompileRequest};
use cx_core::{PipelineConfig, StageRecord};
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// Registry key of this variant.
pub const KEY: &str = cx_core::kind::PIPELINE;
/// Language tag attached to results.
pub const LANGUAGE_ID: &str = "vcalc";
/// Persisted output file name, whatever base name the caller offers.
pub const OUTPUT_FILE_NAME: &str = "output.vcalc";

/// Compile-then-execute orchestrator.
#[derive(Clone)]
pub struct PipelineCompiler<E> {
    paths: PipelineConfig,
    default_instruction_set: String,
    executor: E,
}

impl<E: ProcessExecutor> PipelineCompiler<E> {
    pub fn new(
        paths: PipelineConfig,
        default_instruction_set: impl Into<String>,
        executor: E,
    ) -> Self {
        Self { paths, default_instruction_set: default_instruction_set.into(), executor }
    }

    pub fn paths(&self) -> &PipelineConfig {
        &self.paths
    }

    async fn compile(
        &self,
        request: &CompileRequest,
        ctx: &RunContext,
    ) -> Result<StageRecord, CompileError> {
        let args =
            vec![request.input.display().to_string(), ctx.artifact().display().to_string()];
        let span = tracing::info_span!("pipeline.stage", stage = %cx_core::Stage::Compile);
        Ok(self.executor.exec(&self.paths.compiler, &args, &request.env).instrument(span).await?)
    }

    async fn execute(
        &self,
        request: &CompileRequest,
        ctx: &RunContext,
    ) -> Result<StageRecord, CompileError> {
        let args = vec![ctx.artifact().display().to_string()];
        let mut env = request.env.clone();
        if let Some(lib_dir) = &self.paths.lib_dir {
            env = env.with_ld_path(lib_dir);
        }
        let env = env.with_cwd(&ctx.run_dir);
        let span = tracing::info_span!("pipeline.stage", stage = %cx_core::Stage::Execute);
        Ok(self.executor.exec(&self.paths.runner, &args, &env).instrument(span).await?)
    }

    fn finish(&self, record: &StageRecord, request: &CompileRequest) -> CompilationResult {
        let isa = instruction_set::from_flags(&request.flags, &self.default_instruction_set);
        transform(record, &request.input).with_metadata(self.language_id(), isa)
    }
}

#[async_trait]
impl<E: ProcessExecutor> Compiler for PipelineCompiler<E> {
    fn key(&self) -> &'static str {
        KEY
    }

    fn language_id(&self) -> Option<&str> {
        Some(LANGUAGE_ID)
    }

    /// Host filter options contribute nothing to either stage.
    fn prepare_arguments(&self, _filters: &CompileFilters, _output: &Path) -> Vec<String> {
        Vec::new()
    }

    fn output_filename(&self, dir: &Path, _base: &str) -> PathBuf {
        dir.join(OUTPUT_FILE_NAME)
    }

    async fn run_stages(&self, request: &CompileRequest) -> Result<CompileOutcome, CompileError> {
        let output_file = self.output_filename(&request.output_dir, &request.output_base);
        let context = RunContext::with_artifact_dir(&self.paths.artifact_root, output_file).await?;
        let span = tracing::info_span!(
            "pipeline.run",
            run_id = %context.run_id,
            compiler = %self.paths.compiler.display(),
            exit_code = tracing::field::Empty,
        );

        let result = async {
            let compiled = self.compile(request, &context).await?;
            if !compiled.succeeded() {
                tracing::info!(exit_code = compiled.exit_code, "compile failed, skipping execution");
                tracing::Span::current().record("exit_code", compiled.exit_code);
                return Ok::<_, CompileError>(self.finish(&compiled, request));
            }

            let executed = self.execute(request, &context).await?;
            if executed.succeeded() {
                tokio::fs::write(&context.output_file, &executed.stdout).await.map_err(|e| {
                    CompileError::io("failed to write output", &context.output_file, e)
                })?;
                tracing::info!(output = %context.output_file.display(), "persisted output");
            } else {
                tracing::info!(
                    exit_code = executed.exit_code,
                    timed_out = executed.timed_out,
                    "execution failed"
                );
            }
            tracing::Span::current().record("exit_code", executed.exit_code);
            Ok(self.finish(&compiled.then(&executed), request))
        }
        .instrument(span)
        .await;

        match result {
            Ok(result) => Ok(CompileOutcome { result, context }),
            Err(e) => {
                if let Err(cleanup) = context.cleanup().await {
                    tracing::warn!(error = %cleanup, "failed to clean up run directory");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
