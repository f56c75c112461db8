// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Longest-match walk, completion candidates, and command resolution.
//!
//! All three operations walk the graph greedily, one word at a time, with no
//! backtracking. Each token the walk passes through is recorded in a visited
//! list, and a visited token is never selected or offered again in the same
//! path. This keeps walks over shared tokens finite and stops an option that
//! was already given from being offered twice.

use crate::graph::{Graph, TokenId};
use crate::token::{Action, Candidate};
use std::fmt;
use thiserror::Error;

/// Synthetic candidate offered when the command typed so far can run.
pub const EXECUTE_HINT: &str = "<[Enter]>";
pub const EXECUTE_HINT_DESCRIPTION: &str = "Execute this command";

/// Input that the graph cannot consume.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// `word` matched no child of the token reached by `prefix`.
    #[error("unexpected '{word}'{}", after(prefix))]
    Unmatched { prefix: Vec<String>, word: String },
    /// Every word matched, but the last token has no action.
    #[error("incomplete command '{}'", words.join(" "))]
    Incomplete { words: Vec<String> },
}

fn after(prefix: &[String]) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!(" after '{}'", prefix.join(" "))
    }
}

impl SyntaxError {
    /// The longest leading sequence of words the graph accepted.
    pub fn prefix(&self) -> &[String] {
        match self {
            SyntaxError::Unmatched { prefix, .. } => prefix,
            SyntaxError::Incomplete { words } => words,
        }
    }
}

/// Result of a successful longest match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Deepest token reached.
    pub token: TokenId,
    /// Tokens passed through, in order. The final token is only included if
    /// a further word was attempted from it.
    pub visited: Vec<TokenId>,
}

/// A command ready to run.
pub struct Resolved<C> {
    pub token: TokenId,
    pub action: Action<C>,
}

impl<C> fmt::Debug for Resolved<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

struct Walk {
    token: TokenId,
    visited: Vec<TokenId>,
    consumed: usize,
}

fn walk<C, W: AsRef<str>>(graph: &Graph<C>, root: TokenId, path: &[W]) -> Walk {
    let mut token = root;
    let mut visited = Vec::new();
    let mut consumed = 0;

    for word in path {
        let word = word.as_ref();
        visited.push(token);
        match match_child(graph, token, word, &visited) {
            Some(next) => {
                tracing::trace!(word, token = %graph.describe(next), "matched");
                token = next;
                consumed += 1;
            }
            None => {
                tracing::trace!(word, at = %graph.describe(token), "no match");
                break;
            }
        }
    }

    Walk {
        token,
        visited,
        consumed,
    }
}

/// First child, in priority order, that matches `word` and was not visited.
fn match_child<C>(
    graph: &Graph<C>,
    parent: TokenId,
    word: &str,
    visited: &[TokenId],
) -> Option<TokenId> {
    graph
        .token(parent)
        .children()
        .iter()
        .copied()
        .find(|id| !visited.contains(id) && graph.token(*id).matches(word))
}

fn unmatched<W: AsRef<str>>(path: &[W], consumed: usize) -> SyntaxError {
    SyntaxError::Unmatched {
        prefix: owned(&path[..consumed]),
        word: path
            .get(consumed)
            .map(|w| w.as_ref().to_string())
            .unwrap_or_default(),
    }
}

fn owned<W: AsRef<str>>(words: &[W]) -> Vec<String> {
    words.iter().map(|w| w.as_ref().to_string()).collect()
}

/// Match every word of `path`, starting below `root`.
pub fn longest_match<C, W: AsRef<str>>(
    graph: &Graph<C>,
    root: TokenId,
    path: &[W],
) -> Result<Match, SyntaxError> {
    let walk = walk(graph, root, path);
    if walk.consumed < path.len() {
        return Err(unmatched(path, walk.consumed));
    }
    Ok(Match {
        token: walk.token,
        visited: walk.visited,
    })
}

/// Completion candidates for `path`, whose last word is the one being typed.
///
/// Every word before the last must match. If the last word already matches
/// the token it reached, that word is the only candidate. Otherwise the
/// candidates of every unvisited child are collected, preceded by the
/// execute hint when nothing has been typed and the command could run.
pub fn complete<C, W: AsRef<str>>(
    graph: &Graph<C>,
    root: TokenId,
    path: &[W],
) -> Result<Vec<Candidate>, SyntaxError> {
    let partial = path.last().map(|w| w.as_ref()).unwrap_or("");
    let walk = walk(graph, root, path);
    if walk.consumed + 1 < path.len() {
        return Err(unmatched(path, walk.consumed));
    }

    let token = graph.token(walk.token);
    if token.matches(partial) && !walk.visited.contains(&walk.token) {
        return Ok(vec![Candidate::new(partial, token.description())]);
    }

    let mut candidates = Vec::new();
    if partial.is_empty() && token.action().is_some() {
        candidates.push(Candidate::new(EXECUTE_HINT, EXECUTE_HINT_DESCRIPTION));
    }
    for child in token.children() {
        if walk.visited.contains(child) {
            continue;
        }
        candidates.extend(graph.token(*child).candidates(partial));
    }
    tracing::trace!(
        partial,
        at = %graph.describe(walk.token),
        count = candidates.len(),
        "completion candidates"
    );
    Ok(candidates)
}

/// Resolve a submitted command to the action that should run.
///
/// The whole input must match and the final token must carry an action.
pub fn resolve<C, W: AsRef<str>>(
    graph: &Graph<C>,
    root: TokenId,
    words: &[W],
) -> Result<Resolved<C>, SyntaxError> {
    let found = longest_match(graph, root, words)?;
    let token = graph.token(found.token);
    let runnable = words.last().is_some_and(|last| token.matches(last.as_ref()));
    match token.action() {
        Some(action) if runnable => {
            tracing::debug!(token = %graph.describe(found.token), "resolved command");
            Ok(Resolved {
                token: found.token,
                action: action.clone(),
            })
        }
        _ => Err(SyntaxError::Incomplete {
            words: owned(words),
        }),
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
