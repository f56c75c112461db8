// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What actions see while they run.

use std::fmt;
use std::io::{self, Write};

/// Action context: user state, the edit prefix, and the session output.
pub struct Context<S> {
    state: S,
    prefix: Vec<String>,
    out: Box<dyn Write>,
    exit: bool,
}

impl<S> Context<S> {
    /// Context writing to stdout.
    pub fn new(state: S) -> Self {
        Self {
            state,
            prefix: Vec::new(),
            out: Box::new(io::stdout()),
            exit: false,
        }
    }

    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// Current edit prefix; empty when not in edit mode.
    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// Enter edit mode: later input behaves as if `words` followed its
    /// first word.
    pub fn set_prefix<I, W>(&mut self, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.prefix = words.into_iter().map(Into::into).collect();
        tracing::debug!(prefix = ?self.prefix, "edit prefix set");
    }

    pub fn clear_prefix(&mut self) {
        if !self.prefix.is_empty() {
            tracing::debug!(prefix = ?self.prefix, "edit prefix cleared");
        }
        self.prefix.clear();
    }

    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    /// Ask the REPL loop to stop once the current line is done.
    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }

    /// Clear and return the exit request.
    pub(crate) fn take_exit(&mut self) -> bool {
        std::mem::take(&mut self.exit)
    }
}

impl<S: fmt::Debug> fmt::Debug for Context<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("prefix", &self.prefix)
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}
