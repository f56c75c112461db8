// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--tree` specs
//!
//! Verify that declarative trees in each format serve the same commands.

use crate::prelude::*;

#[test]
fn toml_tree_runs_print_args() {
    let dir = TreeDir::new();
    dir.file("shell.toml", ROUTE_MAP_TOML);
    dir.nosh("shell.toml")
        .lines(&["set route-map myrm", "set mtu 1500"])
        .passes()
        .stdout_eq("execute command: set route-map myrm\nexecute command: set mtu 1500\n");
}

#[test]
fn tree_interfaces_come_from_the_device() {
    let dir = TreeDir::new();
    dir.file("shell.toml", ROUTE_MAP_TOML);
    dir.nosh("shell.toml")
        .lines(&["show eth1", "show eth7"])
        .passes()
        .stdout_eq(
            "execute command: show eth1\n  show eth7 < invalid syntax (unexpected 'eth7' after 'show')\n",
        );
}

#[test]
fn tree_exit_action_stops_the_shell() {
    let dir = TreeDir::new();
    dir.file("shell.toml", ROUTE_MAP_TOML);
    dir.nosh("shell.toml")
        .lines(&["exit", "set route-map myrm"])
        .passes()
        .stdout_eq("");
}

#[test]
fn json_tree() {
    let dir = TreeDir::new();
    dir.file(
        "shell.json",
        r#"{
  "children": [
    {
      "text": "set",
      "desc": "Set configuration parameters",
      "leaves": [
        {
          "literal": "router-id",
          "children": [{ "kind": "ipv4-address", "action": "print-args" }]
        }
      ]
    }
  ]
}"#,
    );
    dir.nosh("shell.json")
        .lines(&["set router-id 10.0.0.1", "set router-id 10.0.0"])
        .passes()
        .stdout_eq(
            "execute command: set router-id 10.0.0.1\n  \
             set router-id 10.0.0 < invalid syntax (unexpected '10.0.0' after 'set router-id')\n",
        );
}

#[test]
fn hcl_tree() {
    let dir = TreeDir::new();
    dir.file(
        "shell.hcl",
        r#"
children = [
  {
    literal = "ping"
    children = [
      { kind = "string", mark = "<host>", action = "print-args" }
    ]
  }
]
"#,
    );
    dir.nosh("shell.hcl")
        .line("ping example.com")
        .passes()
        .stdout_eq("execute command: ping example.com\n");
}
