// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line argument specs

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--tree <FILE>")
        .stdout_has("--debug");
}

#[test]
fn unknown_flag_fails() {
    cli()
        .args(&["--bogus"])
        .fails()
        .stderr_has("unexpected argument '--bogus'");
}

#[test]
fn empty_input_exits_cleanly() {
    cli().passes().stdout_eq("").stderr_eq("");
}
