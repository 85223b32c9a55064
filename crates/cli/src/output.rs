// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use cx_core::CompilationResult;
use serde::Serialize;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything `cx compile` reports about one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileReport<'a> {
    pub compiler: &'a str,
    pub run_id: &'a str,
    pub result: &'a CompilationResult,
    /// Persisted output, when the run wrote one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<&'a Path>,
    /// Artifact directory left behind with `--keep-artifacts`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_dir: Option<&'a Path>,
}

/// One row of `cx list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerSummary {
    pub id: String,
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
}

/// Notes about a run that are not part of the tools' own output.
pub fn run_notes(report: &CompileReport<'_>) -> Vec<String> {
    let mut notes = Vec::new();
    if report.result.timed_out {
        notes.push("execution timed out".to_string());
    }
    if report.result.truncated {
        notes.push("output truncated".to_string());
    }
    if let Some(dir) = report.artifact_dir {
        notes.push(format!("artifacts kept in {}", dir.display()));
    }
    notes
}

pub fn print_compile(report: &CompileReport<'_>, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", report.result.stdout_text());
            std::io::stdout().flush()?;
            let mut stderr = std::io::stderr().lock();
            write!(stderr, "{}", report.result.stderr_text())?;
            for note in run_notes(report) {
                writeln!(stderr, "{}", color::muted(&format!("cx: {note}")))?;
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

/// Aligned `ID  KIND  NAME` table, header included.
pub fn format_compiler_table(rows: &[CompilerSummary]) -> String {
    let id_w = rows.iter().map(|r| r.id.len()).max().unwrap_or(0).max(2);
    let kind_w = rows.iter().map(|r| r.kind.len()).max().unwrap_or(0).max(4);

    let mut out = format!(
        "{}  {}  {}\n",
        color::header(&format!("{:<id_w$}", "ID")),
        color::header(&format!("{:<kind_w$}", "KIND")),
        color::header("NAME"),
    );
    for row in rows {
        out.push_str(&format!(
            "{:<id_w$}  {}  {}\n",
            row.id,
            color::context(&format!("{:<kind_w$}", row.kind)),
            row.name,
        ));
    }
    out
}

pub fn print_compilers(rows: &[CompilerSummary], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No compilers configured");
                return Ok(());
            }
            print!("{}", format_compiler_table(rows));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
    }
    Ok(())
}
