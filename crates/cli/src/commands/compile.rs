// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cx compile`: run one configured compiler over a source file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use cx_adapters::LocalExecutor;
use cx_core::{CompilationResult, CompileRequest, Config, ConfigError};
use cx_engine::{CompileOutcome, CompilerRegistry};

use crate::exit_error::ExitError;
use crate::output::{self, CompileReport, OutputFormat};

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Configured compiler id
    #[arg(long, short = 'c')]
    pub compiler: String,

    /// Directory for the persisted output file [default: the input's directory]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Leave the run's artifact directory in place
    #[arg(long)]
    pub keep_artifacts: bool,

    /// Source file
    pub input: PathBuf,

    /// Extra compiler flags
    #[arg(last = true)]
    pub flags: Vec<String>,
}

/// Build the request the configured compiler `id` runs.
pub fn build_request(config: &Config, id: &str, args: &CompileArgs) -> Result<CompileRequest> {
    let entry = config.compiler(id)?;
    let input = std::path::absolute(&args.input)
        .with_context(|| format!("invalid input path {}", args.input.display()))?;
    if !input.is_file() {
        bail!("input file not found: {}", args.input.display());
    }

    let mut request =
        CompileRequest::new(&input).flags(args.flags.iter().cloned()).env(config.exec_env(entry));
    if let Some(dir) = &args.output_dir {
        request = request.output_dir(std::path::absolute(dir)?);
    }
    Ok(request)
}

pub async fn handle(config: &Config, args: CompileArgs, format: OutputFormat) -> Result<()> {
    let registry = CompilerRegistry::from_config(config, LocalExecutor)?;
    let compiler =
        registry.get(&args.compiler).ok_or_else(|| ConfigError::UnknownCompiler(args.compiler.clone()))?;
    let request = build_request(config, &args.compiler, &args)?;

    tokio::fs::create_dir_all(&request.output_dir)
        .await
        .with_context(|| format!("failed to create {}", request.output_dir.display()))?;

    let CompileOutcome { result, context } = compiler.run_stages(&request).await?;

    let artifact_dir = if !context.owns_run_dir() {
        None
    } else if args.keep_artifacts {
        Some(context.run_dir.as_path())
    } else {
        if let Err(e) = context.cleanup().await {
            tracing::warn!(error = %e, "failed to clean up run directory");
        }
        None
    };

    let report = CompileReport {
        compiler: &args.compiler,
        run_id: context.run_id.as_str(),
        result: &result,
        output_file: persisted(&context.output_file, &result),
        artifact_dir,
    };
    output::print_compile(&report, format)?;

    if !result.succeeded() {
        return Err(ExitError::from_result_code(result.code).into());
    }
    Ok(())
}

/// The output file, if this run produced it. A failed run may leave an
/// earlier run's file in place.
fn persisted<'a>(path: &'a Path, result: &CompilationResult) -> Option<&'a Path> {
    (result.succeeded() && path.is_file()).then_some(path)
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod tests;
