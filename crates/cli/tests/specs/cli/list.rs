// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cx list`

use crate::prelude::*;

#[test]
fn lists_configured_compilers() {
    let tc = Toolchain::new();
    tc.cx()
        .args(&["list"])
        .passes()
        .stdout_has("ID     KIND       NAME")
        .stdout_has("vcalc  vcalc      VCalc (trunk)")
        .stdout_has("gen    generator  gen");
}

#[test]
fn lists_as_json() {
    let tc = Toolchain::new();
    let run = tc.cx().args(&["-o", "json", "list"]).passes();
    let json = run.json();
    assert_eq!(json[0]["id"], "gen");
    assert_eq!(json[1]["kind"], "vcalc");
    assert_eq!(json[1]["languageId"], "vcalc");
}

#[test]
fn missing_default_config_lists_nothing() {
    let home = tempfile::TempDir::new().unwrap();
    cli()
        .env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .args(&["list"])
        .passes()
        .stdout_has("No compilers configured");
}

#[test]
fn bad_config_is_reported() {
    let tc = Toolchain::new();
    std::fs::write(tc.config(), "[compilers.x]\nkind = \"vcalc\"\nexe = \"/bin/true\"\n").unwrap();
    tc.cx().args(&["list"]).exits(1).stderr_has("needs a `runner`");
}
