// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String-keyed lookup of configured compilers.

use crate::compiler::Compiler;
use crate::generator::{self, GeneratorCompiler};
use crate::pipeline::{self, PipelineCompiler};
use cx_adapters::ProcessExecutor;
use cx_core::{Config, ConfigError};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Compilers by configured id.
#[derive(Default, Clone)]
pub struct CompilerRegistry {
    compilers: BTreeMap<String, Arc<dyn Compiler>>,
}

impl std::fmt::Debug for CompilerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilerRegistry").field("ids", &self.compilers.keys()).finish()
    }
}

impl CompilerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one compiler per `[compilers.<id>]` entry, choosing the variant
    /// by its `kind`.
    pub fn from_config<E>(config: &Config, executor: E) -> Result<Self, ConfigError>
    where
        E: ProcessExecutor + Clone,
    {
        let artifact_root = config.artifact_root();
        let mut registry = Self::new();
        for (id, entry) in &config.compilers {
            let compiler: Arc<dyn Compiler> = match entry.kind.as_str() {
                pipeline::KEY => Arc::new(PipelineCompiler::new(
                    entry.pipeline(id, &artifact_root)?,
                    config.instruction_set(entry),
                    executor.clone(),
                )),
                generator::KEY => Arc::new(GeneratorCompiler::new(&entry.exe, executor.clone())),
                other => {
                    return Err(ConfigError::UnknownKind { id: id.clone(), kind: other.to_string() })
                }
            };
            registry.register(id.clone(), compiler);
        }
        Ok(registry)
    }

    /// Register `compiler` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<String>, compiler: Arc<dyn Compiler>) {
        self.compilers.insert(id.into(), compiler);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Compiler>> {
        self.compilers.get(id).cloned()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.compilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilers.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
