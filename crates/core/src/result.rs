// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host-facing compilation result and the record → result transformer.

use crate::StageRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Placeholder substituted for the input path in tool output.
pub const SOURCE_PLACEHOLDER: &str = "<source>";

/// Regex for `<source>:LINE[:COL]: message` diagnostics.
///
/// Also accepts the `<source>(LINE,COL): message` form.
#[allow(clippy::expect_used)]
static SOURCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<source>[(:](\d+)(?::?,?(\d+):?)?[):]*\s*(.*)")
        .expect("constant regex pattern is valid")
});

/// Regex for ANSI colour escape sequences.
#[allow(clippy::expect_used)]
static ANSI_COLOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[mK]").expect("constant regex pattern is valid"));

/// Source location parsed out of a diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTag {
    pub line: u32,
    pub column: u32,
    pub text: String,
}

/// One line of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<LineTag>,
}

impl ResultLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), tag: None }
    }
}

/// The single outcome returned to the host for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationResult {
    pub code: i32,
    pub stdout: Vec<ResultLine>,
    pub stderr: Vec<ResultLine>,
    pub truncated: bool,
    pub timed_out: bool,
    #[serde(rename = "execTime")]
    pub exec_time_ms: u64,
    pub input_filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_set: Option<String>,
}

impl CompilationResult {
    /// Attach the result-language identifier and instruction-set tag.
    pub fn with_metadata(
        mut self,
        language_id: Option<&str>,
        instruction_set: impl Into<String>,
    ) -> Self {
        self.language_id = language_id.map(str::to_string);
        self.instruction_set = Some(instruction_set.into());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.code == 0
    }

    /// Stdout lines joined back into text, one `\n` after each line.
    pub fn stdout_text(&self) -> String {
        join_lines(&self.stdout)
    }

    /// Stderr lines joined back into text, one `\n` after each line.
    pub fn stderr_text(&self) -> String {
        join_lines(&self.stderr)
    }
}

/// Convert a raw stage record into the host's result shape.
///
/// Pure: the same record and input path always give the same result.
/// Usable per stage or on an already-merged record.
pub fn transform(record: &StageRecord, input: &Path) -> CompilationResult {
    let input_filename = input.to_string_lossy();
    CompilationResult {
        code: record.exit_code,
        stdout: parse_output(&record.stdout, &input_filename),
        stderr: parse_output(&record.stderr, &input_filename),
        truncated: record.truncated,
        timed_out: record.timed_out,
        exec_time_ms: record.duration.as_millis() as u64,
        input_filename: input_filename.into_owned(),
        language_id: None,
        instruction_set: None,
    }
}

/// Split tool output into lines, masking the input path and tagging
/// diagnostics that point into the source.
///
/// Blank lines are kept; only wine-style `fixme:` noise is dropped. A
/// trailing newline does not start another line.
pub fn parse_output(bytes: &[u8], input_filename: &str) -> Vec<ResultLine> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_suffix('\n').unwrap_or(&text);
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let line = if input_filename.is_empty() {
            raw.to_string()
        } else {
            raw.replace(input_filename, SOURCE_PLACEHOLDER)
        };
        if line.starts_with("fixme:") {
            continue;
        }
        let tag = parse_tag(&line);
        lines.push(ResultLine { text: line, tag });
    }
    lines
}

fn parse_tag(line: &str) -> Option<LineTag> {
    let plain = ANSI_COLOUR.replace_all(line, "");
    let caps = SOURCE_LINE.captures(&plain)?;
    let line = caps.get(1)?.as_str().parse().ok()?;
    let column = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
    let text = caps.get(3).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
    Some(LineTag { line, column, text })
}

fn join_lines(lines: &[ResultLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
