// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cx list`: show the configured compilers.

use anyhow::Result;
use cx_adapters::LocalExecutor;
use cx_core::Config;
use cx_engine::CompilerRegistry;

use crate::output::{self, CompilerSummary, OutputFormat};

/// One summary per registered compiler, sorted by id.
pub fn summaries(config: &Config) -> Result<Vec<CompilerSummary>> {
    let registry = CompilerRegistry::from_config(config, LocalExecutor)?;
    let mut rows = Vec::with_capacity(registry.len());
    for id in registry.ids() {
        let Some(compiler) = registry.get(id) else { continue };
        let name = config.compiler(id).map(|entry| entry.display_name(id)).unwrap_or(id);
        rows.push(CompilerSummary {
            id: id.to_string(),
            kind: compiler.key().to_string(),
            name: name.to_string(),
            language_id: compiler.language_id().map(str::to_string),
        });
    }
    Ok(rows)
}

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    output::print_compilers(&summaries(config)?, format)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
