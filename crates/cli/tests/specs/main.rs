// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for the `cx` binary.
//!
//! Each spec runs the real binary against shell-script stand-ins for the
//! compiler, the IR runner and the generator.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg(unix)]

mod prelude;

mod cli;
mod compile;
