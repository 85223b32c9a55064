// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cx-engine: compiler orchestrators and the registry that hands them out

mod compiler;
mod context;
pub mod generator;
pub mod pipeline;
mod registry;

pub use compiler::{CompileError, CompileOutcome, Compiler};
pub use context::{RunContext, IR_FILE_NAME};
pub use generator::GeneratorCompiler;
pub use pipeline::PipelineCompiler;
pub use registry::CompilerRegistry;
