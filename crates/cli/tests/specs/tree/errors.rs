// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--tree` error specs
//!
//! Verify that bad tree files fail before the shell starts.

use crate::prelude::*;

#[test]
fn missing_file() {
    let dir = TreeDir::new();
    dir.nosh("absent.toml")
        .fails()
        .stderr_has("Error: failed to read ")
        .stderr_has("absent.toml");
}

#[test]
fn unsupported_extension() {
    let dir = TreeDir::new();
    dir.file("shell.yaml", "children: []");
    dir.nosh("shell.yaml")
        .fails()
        .stderr_has("expected .toml, .json or .hcl");
}

#[test]
fn unknown_action() {
    let dir = TreeDir::new();
    dir.file(
        "shell.toml",
        r#"
[[children]]
literal = "reload"
action = "frobnicate"
"#,
    );
    dir.nosh("shell.toml")
        .fails()
        .stderr_has("Error: unknown action 'frobnicate' at reload");
}

#[test]
fn invalid_token() {
    let dir = TreeDir::new();
    dir.file(
        "shell.toml",
        r#"
[[children]]
literal = "set"

[[children.children]]
kind = "string"
action = "print-args"
"#,
    );
    dir.nosh("shell.toml")
        .fails()
        .stderr_has("Error: invalid token at set string: string token requires a mark");
}

#[test]
fn parse_error() {
    let dir = TreeDir::new();
    dir.file("shell.toml", "[[children]\nliteral = ");
    dir.nosh("shell.toml")
        .fails()
        .stderr_has("Error: TOML parse error");
}
