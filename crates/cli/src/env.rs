// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the nosh binary.

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

// --- Logging ---

/// `EnvFilter` directive, e.g. `nosh_core=trace`.
pub fn log_filter() -> Option<String> {
    non_empty("NOSH_LOG")
}

// --- Device identity ---

/// Comma-separated interface names that replace OS enumeration.
pub fn interfaces() -> Option<String> {
    non_empty("NOSH_INTERFACES")
}

/// Host part of the prompt.
pub fn prompt_host() -> Option<String> {
    non_empty("NOSH_PROMPT")
}

pub fn user() -> Option<String> {
    non_empty("USER").or_else(|| non_empty("LOGNAME"))
}

pub fn hostname() -> Option<String> {
    non_empty("HOSTNAME")
}
