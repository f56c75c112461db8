// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Interactive sessions over a nosh command graph.
//!
//! A [`Session`] owns the graph, the [`Context`] its actions receive, and
//! the prompt. [`run`] drives it from any [`LineReader`]; the terminal
//! reader is [`RustylineReader`].
//!
//! ```ignore
//! use nosh_core::TokenDef;
//! use nosh_shell::{run, RustylineReader, Session};
//! use std::{cell::RefCell, rc::Rc};
//!
//! let mut session = Session::new(()).with_prompt(|_| "router>".into());
//! session.append(TokenDef::literal("exit").action(|ctx, _| {
//!     ctx.exit();
//!     Ok(())
//! }).build()?);
//!
//! let session = Rc::new(RefCell::new(session));
//! let mut reader = RustylineReader::new(Rc::clone(&session))?;
//! run(&session, &mut reader)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod context;
mod readline;
mod repl;
mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::Context;
pub use readline::{CompletionHelper, RustylineReader};
pub use repl::{run, LineReader, ReadError, ReadLine, Stop};
pub use session::{ExecError, Outcome, Prompt, Session, DEFAULT_PROMPT};
