// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cx compile` with a single-stage generator.

use crate::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn generator_writes_its_output_file() {
    let tc = Toolchain::new();
    let src = tc.source("rules.gen", "hello\n");

    tc.cx()
        .args(&["compile", "--compiler", "gen"])
        .arg(&src)
        .passes()
        .stdout_eq("generated example.gen\n");

    assert_eq!(std::fs::read_to_string(tc.path().join("src/example.gen")).unwrap(), "HELLO\n");
    assert!(tc.run_dirs().is_empty());
}

#[test]
#[serial]
fn generator_json_has_language_but_no_instruction_set() {
    let tc = Toolchain::new();
    let src = tc.source("rules.gen", "hello\n");

    let run = tc.cx().args(&["-o", "json", "compile", "-c", "gen"]).arg(&src).passes();
    let json = run.json();

    assert_eq!(json["result"]["languageId"], "gen");
    assert!(json["result"].get("instructionSet").is_none());
    assert!(json.get("artifactDir").is_none());
}

#[test]
#[serial]
fn keep_artifacts_leaves_source_dir_alone() {
    let tc = Toolchain::new();
    let src = tc.source("rules.gen", "hello\n");

    tc.cx().args(&["compile", "-c", "gen", "--keep-artifacts"]).arg(&src).passes();

    assert!(src.exists());
    assert!(tc.path().join("src/example.gen").exists());
}

#[test]
#[serial]
fn failed_generation_does_not_report_an_earlier_file() {
    let tc = Toolchain::new();
    let src = tc.source("rules.gen", "hello\n");
    tc.cx().args(&["compile", "-c", "gen"]).arg(&src).passes();

    std::fs::write(&src, "oops\n").unwrap();
    let run = tc.cx().args(&["-o", "json", "compile", "-c", "gen"]).arg(&src).exits(3);

    assert_eq!(run.json()["result"]["code"], 3);
    assert!(run.json().get("outputFile").is_none());
    assert_eq!(std::fs::read_to_string(tc.path().join("src/example.gen")).unwrap(), "HELLO\n");
}
