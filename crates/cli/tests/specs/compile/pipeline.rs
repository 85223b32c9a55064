// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cx compile` with the two-stage vcalc pipeline.

use crate::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn successful_run_prints_and_persists_output() {
    let tc = Toolchain::new();
    let src = tc.source("answer.vc", "print 42\n");

    tc.cx().args(&["compile", "--compiler", "vcalc"]).arg(&src).passes().stdout_eq("42\n");

    let output = tc.path().join("src/output.vcalc");
    assert_eq!(std::fs::read_to_string(output).unwrap(), "42\n");
    assert!(tc.run_dirs().is_empty(), "run dir should be cleaned up");
}

#[test]
#[serial]
fn compile_error_stops_before_execution() {
    let tc = Toolchain::new();
    let src = tc.source("broken.vc", "print 1\noops\n");

    tc.cx()
        .args(&["compile", "--compiler", "vcalc"])
        .arg(&src)
        .exits(1)
        .stdout_eq("")
        .stderr_has("<source>:3:1: syntax error on line 3");

    assert!(!tc.path().join("src/output.vcalc").exists());
}

#[test]
#[serial]
fn runtime_error_reports_runner_exit_code() {
    let tc = Toolchain::new();
    let src = tc.source("divide.vc", "print 1 / 0\n");

    tc.cx()
        .args(&["compile", "--compiler", "vcalc"])
        .arg(&src)
        .exits(2)
        .stderr_has("division by zero");

    assert!(!tc.path().join("src/output.vcalc").exists());
}

#[test]
#[serial]
fn runner_sees_lib_dir_and_run_dir() {
    let tc = Toolchain::new();
    let src = tc.source("env.vc", "dump env\n");

    let run = tc
        .cx()
        .args(&["compile", "--compiler", "vcalc", "--keep-artifacts"])
        .arg(&src)
        .passes()
        .stdout_has(&format!("ld={}", tc.lib_dir().display()))
        .stdout_has(&format!("cwd={}/run-", tc.artifacts().display()))
        .stderr_has("artifacts kept in");

    let dirs = tc.run_dirs();
    assert_eq!(dirs.len(), 1);
    let ir = dirs[0].join("example.ll");
    assert!(run.stdout().contains(&format!("ir={}", ir.display())));
    let ir_text = std::fs::read_to_string(ir).unwrap();
    assert!(ir_text.contains("dump env"));
}

#[test]
#[serial]
fn json_report_carries_result_metadata() {
    let tc = Toolchain::new();
    let src = tc.source("answer.vc", "print 42\n");

    let run = tc
        .cx()
        .args(&["-o", "json", "compile", "--compiler", "vcalc"])
        .arg(&src)
        .args(&["--", "--target=aarch64-linux-gnu"])
        .passes();
    let json = run.json();

    assert_eq!(json["compiler"], "vcalc");
    assert_eq!(json["result"]["code"], 0);
    assert_eq!(json["result"]["stdout"][0]["text"], "42");
    assert_eq!(json["result"]["languageId"], "vcalc");
    assert_eq!(json["result"]["instructionSet"], "aarch64");
    assert!(json["outputFile"].as_str().unwrap().ends_with("output.vcalc"));
    assert!(json["runId"].as_str().unwrap().starts_with("run-"));
}

#[test]
#[serial]
fn output_dir_flag_moves_persisted_output() {
    let tc = Toolchain::new();
    let src = tc.source("answer.vc", "print 7\n");
    let out = tc.path().join("out/nested");

    tc.cx()
        .args(&["compile", "--compiler", "vcalc", "--output-dir"])
        .arg(&out)
        .arg(&src)
        .passes();

    assert_eq!(std::fs::read_to_string(out.join("output.vcalc")).unwrap(), "7\n");
    assert!(!tc.path().join("src/output.vcalc").exists());
}

#[test]
#[serial]
fn repeated_runs_give_the_same_output() {
    let tc = Toolchain::new();
    let src = tc.source("answer.vc", "print 1\nprint 2\n");

    let first = tc.cx().args(&["compile", "--compiler", "vcalc"]).arg(&src).passes().stdout();
    let second = tc.cx().args(&["compile", "--compiler", "vcalc"]).arg(&src).passes().stdout();

    assert_eq!(first, "1\n2\n");
    assert_eq!(first, second);
}

#[test]
#[serial]
fn failed_runs_leave_previous_output_untouched() {
    let tc = Toolchain::new();
    let src = tc.source("answer.vc", "print 42\n");
    let output = tc.path().join("src/output.vcalc");
    tc.cx().args(&["compile", "--compiler", "vcalc"]).arg(&src).passes();

    std::fs::write(&src, "oops\n").unwrap();
    let run = tc.cx().args(&["-o", "json", "compile", "--compiler", "vcalc"]).arg(&src).exits(1);
    assert!(run.json().get("outputFile").is_none());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "42\n");

    std::fs::write(&src, "print x / 0\n").unwrap();
    tc.cx().args(&["compile", "--compiler", "vcalc"]).arg(&src).exits(2);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "42\n");
    assert!(tc.run_dirs().is_empty());
}

#[test]
#[serial]
fn blank_lines_in_program_output_are_kept() {
    let tc = Toolchain::new();
    let src = tc.source("gaps.vc", "print 1\nprint \nprint 2\n");

    tc.cx().args(&["compile", "--compiler", "vcalc"]).arg(&src).passes().stdout_eq("1\n\n2\n");
}

#[test]
#[serial]
fn runner_timeout_is_reported() {
    let tc = Toolchain::new();
    let src = tc.source("slow.vc", "spin\n");

    tc.cx()
        .env("CX_TIMEOUT_MS", "300")
        .args(&["compile", "--compiler", "vcalc"])
        .arg(&src)
        .exits(1)
        .stderr_has("execution timed out");
}

#[test]
#[serial]
fn unknown_compiler_is_an_error() {
    let tc = Toolchain::new();
    let src = tc.source("answer.vc", "print 42\n");

    tc.cx()
        .args(&["compile", "--compiler", "nope"])
        .arg(&src)
        .exits(1)
        .stderr_has("no compiler named `nope`");
}

#[test]
#[serial]
fn missing_input_is_an_error() {
    let tc = Toolchain::new();

    tc.cx()
        .args(&["compile", "--compiler", "vcalc", "missing.vc"])
        .fails()
        .stderr_has("input file not found");
}

#[test]
#[serial]
fn missing_compiler_binary_is_an_error() {
    let tc = Toolchain::new();
    std::fs::remove_file(tc.path().join("bin/vcalc")).unwrap();
    let src = tc.source("answer.vc", "print 42\n");

    tc.cx()
        .args(&["compile", "--compiler", "vcalc"])
        .arg(&src)
        .exits(1)
        .stderr_has("failed to spawn");
}
