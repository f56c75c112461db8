// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the nosh binary over piped stdin.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

/// Interfaces every spec sees, in place of the host's.
pub const INTERFACES: &str = "eth0,eth1,lo";

/// Create a CLI builder for nosh
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: String,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![
                ("NOSH_INTERFACES".into(), INTERFACES.into()),
                ("NOSH_PROMPT".into(), "r1".into()),
                ("USER".into(), "admin".into()),
                // Keep the line editor on its plain path
                ("TERM".into(), "xterm".into()),
            ],
            stdin: String::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Feed one line of input
    pub fn line(mut self, line: &str) -> Self {
        self.stdin.push_str(line);
        self.stdin.push('\n');
        self
    }

    /// Feed several lines of input
    pub fn lines(self, lines: &[&str]) -> Self {
        lines.iter().fold(self, |builder, line| builder.line(line))
    }

    fn run(self) -> Output {
        let mut cmd = assert_cmd::Command::cargo_bin("nosh").expect("nosh binary should build");
        cmd.args(&self.args);

        // Prevent parent log filters from leaking into stderr assertions.
        cmd.env_remove("NOSH_LOG");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd.write_stdin(self.stdin);
        cmd.output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.run();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.run();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Tree files
// =============================================================================

/// Temporary directory holding command tree files.
pub struct TreeDir {
    dir: tempfile::TempDir,
}

impl TreeDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write a file and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// CLI builder serving the tree file `name`
    pub fn nosh(&self, name: &str) -> CliBuilder {
        let path = self.dir.path().join(name);
        cli().args(&["--tree", path.to_str().unwrap()])
    }
}

/// Route-map commands echoed by `print-args`.
pub const ROUTE_MAP_TOML: &str = r#"
[[children]]
literal = "set"
description = "Set configuration parameters"

[[children.children]]
literal = "route-map"
description = "Set route-map"

[[children.children.children]]
kind = "string"
mark = "<route-map>"
description = "Name to identify a route-map"
action = "print-args"

[[children.children]]
literal = "mtu"
description = "Set MTU"

[[children.children.children]]
kind = "integer"
range = [68, 9216]
action = "print-args"

[[children]]
literal = "show"
description = "Show interface"

[[children.children]]
kind = "interface"
action = "print-args"

[[children]]
literal = "exit"
description = "Exit from CLI"
action = "exit"
"#;
