// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess helpers shared by executors.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// How a bounded subprocess run ended.
#[derive(Debug)]
pub enum Completion {
    /// The process exited (possibly by signal) and its output was collected.
    Exited(Output),
    /// The deadline passed first; the child was killed.
    TimedOut,
}

/// Spawn `cmd`, collect its output, and kill it if `timeout` elapses first.
///
/// Only spawn and wait failures are errors. Exit status, signals and timeouts
/// are reported through [`Completion`].
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Option<Duration>,
    description: &str,
) -> std::io::Result<Completion> {
    // Dropping the wait future on timeout kills the child.
    cmd.kill_on_drop(true);
    let child = cmd.spawn()?;
    let wait = child.wait_with_output();

    let Some(limit) = timeout else {
        return wait.await.map(Completion::Exited);
    };

    match tokio::time::timeout(limit, wait).await {
        Ok(output) => output.map(Completion::Exited),
        Err(_) => {
            tracing::warn!(
                description,
                timeout_ms = limit.as_millis() as u64,
                "subprocess timed out"
            );
            Ok(Completion::TimedOut)
        }
    }
}

/// Cut `bytes` to at most `limit` bytes.
///
/// A cut that would split a UTF-8 sequence backs up to the sequence start.
/// Returns the kept bytes and whether anything was dropped.
pub fn truncate_output(mut bytes: Vec<u8>, limit: Option<usize>) -> (Vec<u8>, bool) {
    let Some(limit) = limit else {
        return (bytes, false);
    };
    if bytes.len() <= limit {
        return (bytes, false);
    }
    let mut end = limit;
    // Continuation bytes look like 0b10xx_xxxx.
    while end > 0 && (bytes[end] & 0xC0) == 0x80 {
        end -= 1;
    }
    bytes.truncate(end);
    (bytes, true)
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
