// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::StageRecord;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for stage records.
pub mod strategies {
    use crate::StageRecord;
    use proptest::prelude::*;
    use std::time::Duration;

    pub fn arb_stage_record() -> impl Strategy<Value = StageRecord> {
        (
            -1i32..256,
            proptest::collection::vec(any::<u8>(), 0..64),
            proptest::collection::vec(any::<u8>(), 0..64),
            0u64..10_000,
            any::<bool>(),
        )
            .prop_map(|(exit_code, stdout, stderr, ms, truncated)| StageRecord {
                exit_code,
                stdout,
                stderr,
                duration: Duration::from_millis(ms),
                truncated,
                timed_out: false,
            })
    }
}

// ── Record factory functions ────────────────────────────────────────────

pub fn success(stdout: &str) -> StageRecord {
    StageRecord::builder().exit_code(0).stdout(stdout).build()
}

pub fn failure(exit_code: i32, stderr: &str) -> StageRecord {
    StageRecord::builder().exit_code(exit_code).stderr(stderr).build()
}
