// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configure shell specs
//!
//! Verify the candidate configuration, edit mode, and mode switching.

use crate::prelude::*;

#[test]
fn set_commands_are_shown_back() {
    cli()
        .lines(&[
            "configure",
            "set router-id 10.0.0.1",
            "set route-map rm1 permit",
            "set interface eth0 address 192.0.2.1/24",
            "set interface eth0 mtu 9000",
            "set static-route 10.0.0.0/8 next-hop 192.0.2.254",
            "show",
        ])
        .passes()
        .stdout_eq(
            "set router-id 10.0.0.1\n\
             set route-map rm1 permit\n\
             set interface eth0 address 192.0.2.1/24\n\
             set interface eth0 mtu 9000\n\
             set static-route 10.0.0.0/8 next-hop 192.0.2.254\n",
        );
}

#[test]
fn empty_candidate() {
    cli()
        .lines(&["configure", "show"])
        .passes()
        .stdout_eq("  no configuration\n");
}

#[test]
fn edit_interface_scopes_set_commands() {
    cli()
        .lines(&[
            "configure",
            "edit interface eth1",
            "set mtu 1400",
            "set description uplink",
            "top",
            "show",
        ])
        .passes()
        .stdout_eq("set interface eth1 mtu 1400\nset interface eth1 description uplink\n");
}

#[test]
fn delete_missing_setting_reports_error() {
    cli()
        .lines(&["configure", "delete router-id"])
        .passes()
        .stdout_eq("  error: router-id is not configured\n");
}

#[test]
fn invalid_value_is_rejected() {
    cli()
        .lines(&["configure", "set interface eth0 mtu 20", "show"])
        .passes()
        .stdout_eq(
            "  set interface eth0 mtu 20 < invalid syntax (unexpected '20' after 'set interface eth0 mtu')\n  \
             no configuration\n",
        );
}

#[test]
fn exit_returns_to_operational_mode() {
    cli()
        .lines(&[
            "configure",
            "set router-id 10.0.0.1",
            "exit",
            "show interfaces",
            "configure",
            "show",
        ])
        .passes()
        .stdout_eq("  eth0\n  eth1\n  lo\nset router-id 10.0.0.1\n");
}

#[test]
fn operational_commands_are_not_available() {
    cli()
        .lines(&["configure", "ping example.com"])
        .passes()
        .stdout_eq("  ping example.com < invalid syntax (unexpected 'ping')\n");
}
