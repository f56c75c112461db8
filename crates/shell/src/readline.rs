// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal line editing with `rustyline`.
//!
//! Tab and `?` both trigger completion. The helper shares the session
//! with the REPL loop; the loop never holds a borrow while reading.

use crate::repl::{LineReader, ReadError, ReadLine};
use crate::session::Session;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Cmd, CompletionType, Config, Editor, EventHandler, Helper, KeyEvent, Modifiers};
use std::cell::RefCell;
use std::rc::Rc;

/// Feeds session candidates to rustyline.
pub struct CompletionHelper<S> {
    session: Rc<RefCell<Session<S>>>,
}

impl<S> CompletionHelper<S> {
    pub fn new(session: Rc<RefCell<Session<S>>>) -> Self {
        Self { session }
    }
}

impl<S> Completer for CompletionHelper<S> {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let partial = &head[start..];

        let Ok(mut session) = self.session.try_borrow_mut() else {
            tracing::warn!("session busy, skipping completion");
            return Ok((start, Vec::new()));
        };
        let mut pairs = Vec::new();
        for state in 0.. {
            let Some(replacement) = session.complete(head, partial, state) else {
                break;
            };
            pairs.push(Pair {
                display: replacement.trim_end().to_string(),
                replacement,
            });
        }
        Ok((start, pairs))
    }
}

impl<S> Hinter for CompletionHelper<S> {
    type Hint = String;
}

impl<S> Highlighter for CompletionHelper<S> {}

impl<S> Validator for CompletionHelper<S> {}

impl<S> Helper for CompletionHelper<S> {}

/// [`LineReader`] backed by a rustyline editor.
pub struct RustylineReader<S> {
    editor: Editor<CompletionHelper<S>, DefaultHistory>,
}

impl<S> RustylineReader<S> {
    pub fn new(session: Rc<RefCell<Session<S>>>) -> Result<Self, ReadError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CompletionHelper::new(session)));
        editor.bind_sequence(
            KeyEvent::new('?', Modifiers::NONE),
            EventHandler::Simple(Cmd::Complete),
        );
        Ok(Self { editor })
    }
}

impl<S> LineReader for RustylineReader<S> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReadError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadLine::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "readline_tests.rs"]
mod tests;
