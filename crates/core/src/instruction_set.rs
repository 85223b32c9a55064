// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instruction-set detection from compiler flags.

/// Instruction set assumed when no flag names a target.
pub const DEFAULT_INSTRUCTION_SET: &str = "amd64";

/// Derive the instruction-set tag from the request's compiler flags.
///
/// Looks at `--target=T`, `--target T`, `-target T`, `-march=A` and
/// `--march=A`. The last recognised flag wins. Unknown architectures and
/// flag lists naming no target give `default`.
pub fn from_flags(flags: &[String], default: &str) -> String {
    let mut arch: Option<&str> = None;
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        if let Some(triple) = flag.strip_prefix("--target=") {
            arch = Some(triple);
        } else if flag == "--target" || flag == "-target" {
            if let Some(next) = iter.next() {
                arch = Some(next.as_str());
            }
        } else if let Some(march) =
            flag.strip_prefix("-march=").or_else(|| flag.strip_prefix("--march="))
        {
            arch = Some(march);
        }
    }

    arch.and_then(classify).unwrap_or(default).to_string()
}

/// Map a target triple (or bare architecture) to an instruction-set tag.
fn classify(triple: &str) -> Option<&'static str> {
    let lower = triple.to_ascii_lowercase();
    if lower.starts_with("x86-64") {
        return Some("amd64");
    }
    let arch = lower.split('-').next().unwrap_or_default();
    let tag = match arch {
        "x86_64" | "amd64" => "amd64",
        "i386" | "i486" | "i586" | "i686" | "x86" => "x86",
        "aarch64" | "arm64" => "aarch64",
        "s390x" => "s390x",
        "wasm32" => "wasm32",
        "wasm64" => "wasm64",
        a if a.starts_with("arm") || a.starts_with("thumb") => "arm32",
        a if a.starts_with("riscv64") => "riscv64",
        a if a.starts_with("riscv32") => "riscv32",
        a if a.starts_with("powerpc64") || a.starts_with("ppc64") => "powerpc",
        a if a.starts_with("mips") => "mips",
        _ => return None,
    };
    Some(tag)
}

#[cfg(test)]
#[path = "instruction_set_tests.rs"]
mod tests;
