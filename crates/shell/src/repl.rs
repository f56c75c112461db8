// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The read-execute loop.

use crate::session::{ExecError, Outcome, Session};
use std::cell::RefCell;
use std::io::Write;
use thiserror::Error;

/// One result of reading from the line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    Line(String),
    /// The user pressed Ctrl-C.
    Interrupted,
    /// End of input.
    Eof,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of input lines.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReadError>;
}

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Eof,
    /// An action called [`Context::exit`](crate::Context::exit).
    Exit,
}

/// Prompt, read, and execute until end of input or an exit request.
///
/// The session is only borrowed while a line executes, so a reader may
/// borrow it during `read_line` (for completion).
pub fn run<S, R>(session: &RefCell<Session<S>>, reader: &mut R) -> Result<Stop, ReadError>
where
    R: LineReader + ?Sized,
{
    loop {
        let prompt = format!("{} ", session.borrow().prompt());
        let line = match reader.read_line(&prompt)? {
            ReadLine::Line(line) => line,
            ReadLine::Interrupted => continue,
            ReadLine::Eof => {
                tracing::debug!("end of input");
                return Ok(Stop::Eof);
            }
        };

        let mut session = session.borrow_mut();
        let result = session.execute(&line);
        report(&mut session, &line, result);
        if session.context_mut().take_exit() {
            tracing::debug!("exit requested");
            return Ok(Stop::Exit);
        }
    }
}

/// Write the diagnostic for a failed line; successes print nothing.
fn report<S>(session: &mut Session<S>, line: &str, result: Result<Outcome, ExecError>) {
    let message = match result {
        Ok(_) => return,
        Err(ExecError::Syntax(e)) => {
            tracing::debug!(line, error = %e, "syntax error");
            format!("  {} < invalid syntax ({e})", line.trim())
        }
        Err(ExecError::Action { line, error }) => {
            tracing::debug!(line = %line, error = %error, "action failed");
            if session.is_debug() {
                format!("  error: {error:#}")
            } else {
                format!("  error: {error}")
            }
        }
    };
    let out = session.context_mut().out();
    if let Err(e) = writeln!(out, "{message}").and_then(|()| out.flush()) {
        tracing::warn!(error = %e, "failed to write diagnostic");
    }
}

#[cfg(test)]
#[path = "repl_tests.rs"]
mod tests;
