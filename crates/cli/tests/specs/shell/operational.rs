// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operational shell specs
//!
//! Verify command execution and diagnostics in operational mode.

use crate::prelude::*;

#[test]
fn show_interfaces_lists_configured_names() {
    cli()
        .line("show interfaces")
        .passes()
        .stdout_eq("  eth0\n  eth1\n  lo\n");
}

#[test]
fn invalid_syntax_is_reported_and_shell_continues() {
    cli()
        .lines(&["bogus", "show interfaces"])
        .passes()
        .stdout_eq("  bogus < invalid syntax (unexpected 'bogus')\n  eth0\n  eth1\n  lo\n");
}

#[test]
fn incomplete_command_is_reported() {
    cli()
        .line("show ip")
        .passes()
        .stdout_eq("  show ip < invalid syntax (incomplete command 'show ip')\n");
}

#[test]
fn unknown_interface_is_reported() {
    cli()
        .line("show interfaces eth9")
        .passes()
        .stdout_eq(
            "  show interfaces eth9 < invalid syntax (unexpected 'eth9' after 'show interfaces')\n",
        );
}

#[test]
fn ping_options_are_range_checked() {
    cli()
        .line("ping count 0 example.com")
        .passes()
        .stdout_eq("  ping count 0 example.com < invalid syntax (unexpected '0' after 'ping count')\n");
}

#[test]
fn blank_lines_are_ignored() {
    cli().lines(&["", "   ", "exit"]).passes().stdout_eq("");
}

#[test]
fn exit_stops_reading() {
    cli()
        .lines(&["exit", "show interfaces"])
        .passes()
        .stdout_eq("");
}
