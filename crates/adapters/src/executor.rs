// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process executor: spawn a binary under an execution environment and
//! return its raw stage record.

use crate::subprocess::{run_with_timeout, truncate_output, Completion};
use async_trait::async_trait;
use cx_core::{ExecEnv, StageRecord, NO_EXIT_CODE};
use std::ffi::OsString;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::Instrument;

/// Variable the dynamic loader searches for shared libraries.
pub const LD_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

/// Infrastructure failures from running a subprocess.
///
/// A non-zero exit is never one of these; it is a normal [`StageRecord`].
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid library search path entry for `{program}`: {message}")]
    LdPath { program: String, message: String },
}

/// Adapter for running stage subprocesses
#[async_trait]
pub trait ProcessExecutor: Send + Sync + 'static {
    /// Run `program` with `args` under `env`.
    ///
    /// Always returns a record for a process that ran, whatever its exit
    /// code, signal or timeout.
    async fn exec(
        &self,
        program: &Path,
        args: &[String],
        env: &ExecEnv,
    ) -> Result<StageRecord, ExecError>;
}

/// Executor that spawns real processes with tokio.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalExecutor;

impl LocalExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessExecutor for LocalExecutor {
    async fn exec(
        &self,
        program: &Path,
        args: &[String],
        env: &ExecEnv,
    ) -> Result<StageRecord, ExecError> {
        let span = tracing::info_span!(
            "exec.cmd",
            program = %program.display(),
            ?args,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        async {
            let start = Instant::now();
            let cmd = build_command(program, args, env)?;
            let completion = run_with_timeout(cmd, env.timeout, &program.display().to_string())
                .await
                .map_err(|source| ExecError::SpawnFailed {
                    program: program.display().to_string(),
                    source,
                })?;
            let duration = start.elapsed();

            let record = match completion {
                Completion::Exited(output) => {
                    let (stdout, stdout_cut) = truncate_output(output.stdout, env.max_output);
                    let (stderr, stderr_cut) = truncate_output(output.stderr, env.max_output);
                    StageRecord {
                        exit_code: output.status.code().unwrap_or(NO_EXIT_CODE),
                        stdout,
                        stderr,
                        duration,
                        truncated: stdout_cut || stderr_cut,
                        timed_out: false,
                    }
                }
                Completion::TimedOut => StageRecord {
                    exit_code: NO_EXIT_CODE,
                    duration,
                    timed_out: true,
                    ..StageRecord::default()
                },
            };

            let current = tracing::Span::current();
            current.record("exit_code", record.exit_code);
            current.record("duration_ms", duration.as_millis() as u64);
            tracing::debug!(
                stdout_bytes = record.stdout.len(),
                stderr_bytes = record.stderr.len(),
                timed_out = record.timed_out,
                "process finished"
            );
            Ok::<StageRecord, ExecError>(record)
        }
        .instrument(span)
        .await
    }
}

/// Build the tokio command for one invocation.
fn build_command(
    program: &Path,
    args: &[String],
    env: &ExecEnv,
) -> Result<tokio::process::Command, ExecError> {
    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args);
    cmd.envs(&env.env);
    if let Some(ld) = library_path(env).map_err(|message| ExecError::LdPath {
        program: program.display().to_string(),
        message,
    })? {
        cmd.env(LD_LIBRARY_PATH, ld);
    }
    if let Some(cwd) = &env.cwd {
        cmd.current_dir(cwd);
    }
    cmd.stdin(std::process::Stdio::null());
    cmd.stdout(std::process::Stdio::piped());
    cmd.stderr(std::process::Stdio::piped());
    Ok(cmd)
}

/// Search path with `env.ld_path` prepended to any existing value.
///
/// The existing value is taken from `env.env` first, then the inherited
/// environment. Returns `None` when there is nothing to add.
pub fn library_path(env: &ExecEnv) -> Result<Option<OsString>, String> {
    if env.ld_path.is_empty() {
        return Ok(None);
    }
    let existing: Option<OsString> = env
        .env
        .get(LD_LIBRARY_PATH)
        .map(OsString::from)
        .or_else(|| std::env::var_os(LD_LIBRARY_PATH));

    let mut entries: Vec<std::path::PathBuf> = env.ld_path.clone();
    if let Some(existing) = existing.filter(|v| !v.is_empty()) {
        entries.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(entries).map(Some).map_err(|e| e.to_string())
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ExecError, ProcessExecutor};
    use async_trait::async_trait;
    use cx_core::{ExecEnv, StageRecord};
    use parking_lot::Mutex;
    use std::collections::{HashMap, VecDeque};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Recorded invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ExecCall {
        pub program: PathBuf,
        pub args: Vec<String>,
        pub env: ExecEnv,
    }

    enum Scripted {
        Record(StageRecord),
        SpawnFailure,
    }

    #[derive(Default)]
    struct FakeExecutorState {
        calls: Vec<ExecCall>,
        responses: HashMap<PathBuf, VecDeque<Scripted>>,
    }

    /// Fake executor for testing.
    ///
    /// Programs without a scripted response exit 0 with no output.
    #[derive(Clone, Default)]
    pub struct FakeExecutor {
        inner: Arc<Mutex<FakeExecutorState>>,
    }

    impl FakeExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the record the next call to `program` returns.
        pub fn respond(&self, program: impl Into<PathBuf>, record: StageRecord) -> &Self {
            self.inner
                .lock()
                .responses
                .entry(program.into())
                .or_default()
                .push_back(Scripted::Record(record));
            self
        }

        /// Make the next call to `program` fail to spawn.
        pub fn fail_spawn(&self, program: impl Into<PathBuf>) -> &Self {
            self.inner
                .lock()
                .responses
                .entry(program.into())
                .or_default()
                .push_back(Scripted::SpawnFailure);
            self
        }

        /// Get all recorded invocations, in order
        pub fn calls(&self) -> Vec<ExecCall> {
            self.inner.lock().calls.clone()
        }

        /// Recorded invocations of `program`
        pub fn calls_to(&self, program: &Path) -> Vec<ExecCall> {
            self.inner.lock().calls.iter().filter(|c| c.program == program).cloned().collect()
        }
    }

    #[async_trait]
    impl ProcessExecutor for FakeExecutor {
        async fn exec(
            &self,
            program: &Path,
            args: &[String],
            env: &ExecEnv,
        ) -> Result<StageRecord, ExecError> {
            let mut inner = self.inner.lock();
            inner.calls.push(ExecCall {
                program: program.to_path_buf(),
                args: args.to_vec(),
                env: env.clone(),
            });
            let scripted = inner.responses.get_mut(program).and_then(VecDeque::pop_front);
            match scripted {
                Some(Scripted::Record(record)) => Ok(record),
                Some(Scripted::SpawnFailure) => Err(ExecError::SpawnFailed {
                    program: program.display().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted failure"),
                }),
                None => Ok(StageRecord::default()),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecCall, FakeExecutor};

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
