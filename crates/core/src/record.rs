// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw record of one stage's subprocess invocation.

use std::time::Duration;

/// Exit code recorded when a process ended without one (signal, timeout).
pub const NO_EXIT_CODE: i32 = -1;

/// Which subprocess of a run produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Source to intermediate artifact (or the single generator stage).
    Compile,
    /// Interpreter run against the intermediate artifact.
    Execute,
}

crate::simple_display! {
    Stage {
        Compile => "compile",
        Execute => "execute",
    }
}

/// Outcome of a single subprocess invocation.
///
/// Produced once per stage and never mutated afterwards; merging two
/// records builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageRecord {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Wall-clock duration.
    pub duration: Duration,
    /// Either stream was cut at the output limit.
    pub truncated: bool,
    pub timed_out: bool,
}

impl StageRecord {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Merge `next` after `self`, in stage order.
    ///
    /// The exit code comes from `next`, the stage attempted last. Output
    /// streams are concatenated byte for byte with no separator.
    pub fn then(&self, next: &StageRecord) -> StageRecord {
        StageRecord {
            exit_code: next.exit_code,
            stdout: [self.stdout.as_slice(), next.stdout.as_slice()].concat(),
            stderr: [self.stderr.as_slice(), next.stderr.as_slice()].concat(),
            duration: self.duration + next.duration,
            truncated: self.truncated || next.truncated,
            timed_out: self.timed_out || next.timed_out,
        }
    }
}

crate::builder! {
    pub struct StageRecordBuilder => StageRecord {
        into {
            stdout: Vec<u8> = Vec::<u8>::new(),
            stderr: Vec<u8> = Vec::<u8>::new(),
        }
        set {
            exit_code: i32 = 0,
            duration: Duration = Duration::from_millis(1),
            truncated: bool = false,
            timed_out: bool = false,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
