// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Token graph and completion engine for hierarchical command shells.
//!
//! A command set is described as a graph of [`Token`]s held in a [`Graph`]
//! arena. Literal tokens match one exact word; value tokens (integers,
//! addresses, interface names, ...) match a class of words and are shown
//! with a bracketed mark such as `<ipv4-address>`.
//!
//! # Quick Start
//!
//! ```ignore
//! use nosh_core::{matcher, Graph, Token, TokenDef};
//!
//! let mut graph: Graph<()> = Graph::new();
//! let root = graph.add(Token::root());
//! let show = graph.add_child(root, TokenDef::literal("show").description("Show").build()?);
//! graph.add_child(show, TokenDef::literal("system").action(|_, _| Ok(())).build()?);
//!
//! let candidates = matcher::complete(&graph, root, &["show", "sys"])?;
//! assert_eq!(candidates[0].value, "system");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Graph shape
//!
//! Children are stored as [`TokenId`] handles, so one token may sit under
//! several parents. Matching keeps a visited list per input path and never
//! selects a token twice, which lets option tokens be offered in any order
//! while still converging on a common continuation:
//!
//! ```text
//! ping ─┬─ count ── <count> ─┬─ wait ...
//!       ├─ wait  ── <wait>  ─┼─ count ...
//!       └──────── <host> ◄───┘
//! ```

mod addr;
pub mod graph;
pub mod iface;
pub mod matcher;
pub mod token;
pub mod tree;
pub mod words;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use graph::{path, Graph, GraphError, PathKey, TokenId};
pub use iface::{InterfaceSource, StaticInterfaces, SystemInterfaces};
pub use matcher::{Match, Resolved, SyntaxError, EXECUTE_HINT, EXECUTE_HINT_DESCRIPTION};
pub use token::{is_mark, Action, Candidate, Token, TokenDef, TokenError, TokenKind, TokenTag};
pub use tree::{
    instantiate, load_tree, parse_tree, parse_tree_with_format, ActionRegistry, CommandTree,
    Format, NodeSpec, TreeBuilder, TreeError,
};
pub use words::{splice_prefix, split_command, split_line};
