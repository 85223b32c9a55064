// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a fluent wrapper around the `cx` binary and a scratch
//! toolchain of shell scripts.

use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// Compiler stand-in: `vcalc <input> <ir>`. A line starting `oops` fails.
const VCALC: &str = r#"#!/bin/sh
if grep -q "^oops" "$1"; then
  echo "$1:3:1: syntax error on line 3" >&2
  exit 1
fi
echo "; compiled from $1" > "$2"
cat "$1" >> "$2"
"#;

/// Runner stand-in: `lli <ir>`. Prints every `print X` line as `X`.
const LLI: &str = r#"#!/bin/sh
if grep -q '/ 0' "$1"; then
  echo "division by zero" >&2
  exit 2
fi
if grep -q '^spin' "$1"; then
  exec sleep 5
fi
if grep -q '^dump env' "$1"; then
  echo "ld=$LD_LIBRARY_PATH"
  echo "cwd=$(pwd)"
  echo "ir=$1"
  exit 0
fi
sed -n 's/^print //p' "$1"
"#;

/// Generator stand-in: `gen [flags] <input> <output>`. Upper-cases the input;
/// a line starting `oops` fails.
const GEN: &str = r#"#!/bin/sh
for arg; do in="$out"; out="$arg"; done
if grep -q "^oops" "$in"; then
  echo "$in:1:1: bad rule" >&2
  exit 3
fi
tr a-z A-Z < "$in" > "$out"
echo "generated $(basename "$out")"
"#;

pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_cx"));
    cmd.env("NO_COLOR", "1")
        .env_remove("COLOR")
        .env_remove("CX_CONFIG")
        .env_remove("CX_ARTIFACT_ROOT")
        .env_remove("CX_TIMEOUT_MS")
        .env_remove("CX_LOG");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Run and require a nonzero exit code.
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(!run.output.status.success(), "expected failure\n{}", run.describe());
        run
    }

    pub fn exits(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert_eq!(run.output.status.code(), Some(code), "unexpected exit code\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }

    fn describe(&self) -> String {
        format!("--- stdout\n{}--- stderr\n{}", self.stdout(), self.stderr())
    }
}

/// Scratch directory with stand-in tools and a `cx.toml` naming them.
pub struct Toolchain {
    dir: TempDir,
}

impl Toolchain {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let toolchain = Self { dir };
        for (name, script) in [("vcalc", VCALC), ("lli", LLI), ("gen", GEN)] {
            toolchain.script(name, script);
        }
        std::fs::create_dir_all(toolchain.lib_dir()).unwrap();
        std::fs::create_dir_all(toolchain.path().join("src")).unwrap();

        let config = format!(
            r#"
[defaults]
timeout_ms = 10000
artifact_root = "{artifacts}"

[compilers.vcalc]
kind = "vcalc"
exe = "{bin}/vcalc"
runner = "{bin}/lli"
lib_dir = "{lib}"
name = "VCalc (trunk)"

[compilers.gen]
kind = "generator"
exe = "{bin}/gen"
"#,
            artifacts = toolchain.artifacts().display(),
            bin = toolchain.path().join("bin").display(),
            lib = toolchain.lib_dir().display(),
        );
        std::fs::write(toolchain.config(), config).unwrap();
        toolchain
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> PathBuf {
        self.path().join("cx.toml")
    }

    pub fn artifacts(&self) -> PathBuf {
        self.path().join("artifacts")
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.path().join("lib")
    }

    /// Write a source file under `src/`.
    pub fn source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join("src").join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Run directories left under the artifact root.
    pub fn run_dirs(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.artifacts()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// `cx --config <this toolchain's config>`
    pub fn cx(&self) -> CliBuilder {
        cli().arg("--config").arg(self.config())
    }

    fn script(&self, name: &str, body: &str) {
        let bin = self.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let path = bin.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
