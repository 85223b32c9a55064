// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cx-core: data model shared by the cx orchestrators

pub mod macros;

pub mod config;
pub mod env;
pub mod id;
pub mod instruction_set;
pub mod record;
pub mod request;
pub mod result;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{kind, CompilerConfig, Config, ConfigError, Defaults, PipelineConfig};
pub use id::RunId;
pub use record::{Stage, StageRecord, NO_EXIT_CODE};
#[cfg(any(test, feature = "test-support"))]
pub use record::StageRecordBuilder;
pub use request::{CompileFilters, CompileRequest, ExecEnv};
pub use result::{transform, CompilationResult, LineTag, ResultLine, SOURCE_PLACEHOLDER};
