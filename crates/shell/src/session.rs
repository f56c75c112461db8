// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A command graph bound to a context, prompt, and output.
//!
//! [`Session::complete`] adapts the candidate engine to the readline
//! completion contract, and [`Session::execute`] runs a submitted line.

use crate::context::Context;
use nosh_core::{
    matcher, splice_prefix, split_command, split_line, ActionRegistry, Candidate, CommandTree,
    Graph, GraphError, PathKey, SyntaxError, Token, TokenId, TreeBuilder, TreeError,
};
use std::fmt;
use std::io::Write;
use thiserror::Error;

/// Prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = ">";

const NO_COMPLETION: &str = "no valid completion";

/// Builds the prompt from the current context.
pub type Prompt<S> = Box<dyn Fn(&Context<S>) -> String>;

/// Outcome of a submitted line that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing but whitespace was entered.
    Empty,
    Executed,
}

/// Errors from [`Session::execute`].
#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The action ran and failed.
    #[error("{error}")]
    Action { line: String, error: anyhow::Error },
}

pub struct Session<S> {
    graph: Graph<Context<S>>,
    root: TokenId,
    context: Context<S>,
    prompt: Option<Prompt<S>>,
    debug: bool,
}

impl<S> Session<S> {
    pub fn new(state: S) -> Self {
        let mut graph = Graph::new();
        let root = graph.add(Token::root());
        Self {
            graph,
            root,
            context: Context::new(state),
            prompt: None,
            debug: false,
        }
    }

    /// Send listings, diagnostics, and action output to `out`.
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.context = self.context.with_output(out);
        self
    }

    pub fn with_prompt<F>(mut self, prompt: F) -> Self
    where
        F: Fn(&Context<S>) -> String + 'static,
    {
        self.prompt = Some(Box::new(prompt));
        self
    }

    /// Report full error chains instead of the outermost message.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn graph(&self) -> &Graph<Context<S>> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph<Context<S>> {
        &mut self.graph
    }

    pub fn root(&self) -> TokenId {
        self.root
    }

    pub fn context(&self) -> &Context<S> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context<S> {
        &mut self.context
    }

    pub fn state(&self) -> &S {
        self.context.state()
    }

    pub fn state_mut(&mut self) -> &mut S {
        self.context.state_mut()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Add a top-level command.
    pub fn append(&mut self, token: Token<Context<S>>) -> TokenId {
        self.graph.add_child(self.root, token)
    }

    /// Add `token` under the command reached by `path`.
    pub fn insert(
        &mut self,
        path: &[PathKey],
        token: Token<Context<S>>,
    ) -> Result<TokenId, GraphError> {
        self.graph.insert(self.root, path, token)
    }

    /// Add every command of a declarative tree.
    pub fn attach(
        &mut self,
        tree: &CommandTree,
        registry: &ActionRegistry<Context<S>>,
    ) -> Result<(), TreeError> {
        TreeBuilder::new(registry).attach(&mut self.graph, self.root, tree)
    }

    pub fn prefix(&self) -> &[String] {
        self.context.prefix()
    }

    pub fn set_prefix<I, W>(&mut self, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.context.set_prefix(words);
    }

    pub fn clear_prefix(&mut self) {
        self.context.clear_prefix();
    }

    pub fn prompt(&self) -> String {
        match &self.prompt {
            Some(prompt) => prompt(&self.context),
            None => DEFAULT_PROMPT.to_string(),
        }
    }

    /// Candidates for the last word of `line`, with the edit prefix applied.
    pub fn candidates(&self, line: &str) -> Result<Vec<Candidate>, SyntaxError> {
        let path = splice_prefix(split_line(line), self.context.prefix());
        matcher::complete(&self.graph, self.root, &path)
    }

    /// Readline completion hook.
    ///
    /// `line` is the input up to the cursor and `partial` its last word.
    /// Called with `state` 0, 1, 2, ... until it returns `None`. Listings
    /// are written to the session output on the first call only.
    pub fn complete(&mut self, line: &str, partial: &str, state: usize) -> Option<String> {
        let candidates = match self.candidates(line) {
            Ok(candidates) => candidates,
            Err(e) => {
                if state == 0 {
                    self.write_message(line, &e.to_string());
                }
                return None;
            }
        };

        if partial.is_empty() {
            if state == 0 {
                self.write_listing(line, &candidates);
            }
            return None;
        }

        let cycle: Vec<&Candidate> = candidates.iter().filter(|c| !c.is_mark()).collect();
        if cycle.is_empty() {
            if state == 0 {
                if candidates.is_empty() {
                    self.write_message(line, NO_COMPLETION);
                } else {
                    // Only placeholders fit: show them as hints
                    self.write_listing(line, &candidates);
                }
            }
            return None;
        }
        cycle.get(state).map(|c| format!("{} ", c.value))
    }

    /// Run a submitted line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, ExecError> {
        let words = split_command(line);
        if words.is_empty() {
            return Ok(Outcome::Empty);
        }
        let words = splice_prefix(words, self.context.prefix());
        let resolved = matcher::resolve(&self.graph, self.root, &words)?;
        tracing::debug!(command = %words.join(" "), "executing");
        (resolved.action)(&mut self.context, &words).map_err(|error| ExecError::Action {
            line: line.trim().to_string(),
            error,
        })?;
        Ok(Outcome::Executed)
    }

    /// Listings are sorted by value; the cycle list keeps match order.
    fn write_listing(&mut self, line: &str, candidates: &[Candidate]) {
        let mut sorted: Vec<&Candidate> = candidates.iter().collect();
        sorted.sort_by(|a, b| a.value.cmp(&b.value));

        let mut listing = String::from("\n\nCompletions:\n");
        for candidate in sorted {
            listing.push_str(&format!(
                "  {:16} {}\n",
                candidate.value, candidate.description
            ));
        }
        self.write_redraw(listing, line);
    }

    fn write_message(&mut self, line: &str, message: &str) {
        self.write_redraw(format!("\n\n  {message}\n"), line);
    }

    /// Write `text`, then redraw the prompt and input below it.
    fn write_redraw(&mut self, mut text: String, line: &str) {
        text.push_str(&format!("\n{} {}", self.prompt(), line));
        let out = self.context.out();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "failed to write completion listing");
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.root)
            .field("context", &self.context)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
