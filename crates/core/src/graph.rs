// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Arena of tokens connected by child handles.
//!
//! A token may be the child of any number of parents, so the structure is a
//! directed graph rather than an owned tree. Tokens are never removed.

use crate::token::{Token, TokenTag};
use std::fmt;
use thiserror::Error;

/// Handle to a token inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One segment of a lookup path: a literal word, or the kind of a value
/// token (value tokens have no literal to address them by).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKey {
    Literal(String),
    Tag(TokenTag),
}

impl From<&str> for PathKey {
    fn from(literal: &str) -> Self {
        PathKey::Literal(literal.to_string())
    }
}

impl From<String> for PathKey {
    fn from(literal: String) -> Self {
        PathKey::Literal(literal)
    }
}

impl From<TokenTag> for PathKey {
    fn from(tag: TokenTag) -> Self {
        PathKey::Tag(tag)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Literal(literal) => f.write_str(literal),
            PathKey::Tag(tag) => write!(f, "<{tag}>"),
        }
    }
}

/// Build a path of literal keys, e.g. `path(["show", "ip"])`.
pub fn path<I, S>(keys: I) -> Vec<PathKey>
where
    I: IntoIterator<Item = S>,
    S: Into<PathKey>,
{
    keys.into_iter().map(Into::into).collect()
}

/// Errors raised while building a graph programmatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("no such path '{path}': '{segment}' not found")]
    UnknownPath { path: String, segment: String },
}

/// Token arena. `C` is the context type passed to token actions.
pub struct Graph<C> {
    tokens: Vec<Token<C>>,
}

impl<C> Default for Graph<C> {
    fn default() -> Self {
        Self { tokens: Vec::new() }
    }
}

impl<C> Graph<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: Token<C>) -> TokenId {
        self.tokens.push(token);
        TokenId(self.tokens.len() - 1)
    }

    /// Look up a token.
    ///
    /// # Panics
    ///
    /// If `id` was minted by a different graph and is out of range.
    pub fn token(&self, id: TokenId) -> &Token<C> {
        &self.tokens[id.0]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append children to `parent`, keeping children ordered by priority.
    ///
    /// The sort is stable, so siblings of equal priority stay in insertion
    /// order. A child already under `parent` is not added twice.
    pub fn append(&mut self, parent: TokenId, children: &[TokenId]) {
        let mut list = std::mem::take(&mut self.tokens[parent.0].children);
        for child in children {
            if !list.contains(child) {
                list.push(*child);
            }
        }
        list.sort_by_key(|id| self.tokens[id.0].priority());
        self.tokens[parent.0].children = list;
    }

    /// Add `token` and append it under `parent`.
    pub fn add_child(&mut self, parent: TokenId, token: Token<C>) -> TokenId {
        let id = self.add(token);
        self.append(parent, &[id]);
        id
    }

    /// First child of `parent` addressed by `key`.
    pub fn find_child(&self, parent: TokenId, key: &PathKey) -> Option<TokenId> {
        self.token(parent)
            .children()
            .iter()
            .copied()
            .find(|id| {
                let child = self.token(*id);
                match key {
                    PathKey::Literal(literal) => child.literal() == Some(literal.as_str()),
                    PathKey::Tag(tag) => child.tag() == *tag,
                }
            })
    }

    /// Walk `path` from `from` with [`Graph::find_child`].
    ///
    /// An unresolved intermediate segment is an error; an unresolved final
    /// segment is not, and the deepest resolved token is returned. This lets
    /// callers point at the exact place a new token should be inserted.
    pub fn find_path(&self, from: TokenId, path: &[PathKey]) -> Result<TokenId, GraphError> {
        let mut current = from;
        for (idx, key) in path.iter().enumerate() {
            match self.find_child(current, key) {
                Some(next) => current = next,
                None if idx + 1 < path.len() => {
                    return Err(GraphError::UnknownPath {
                        path: path
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" "),
                        segment: key.to_string(),
                    });
                }
                None => break,
            }
        }
        Ok(current)
    }

    /// Resolve `path` and add `token` as a child of the token found there.
    pub fn insert(
        &mut self,
        from: TokenId,
        path: &[PathKey],
        token: Token<C>,
    ) -> Result<TokenId, GraphError> {
        let parent = self.find_path(from, path)?;
        Ok(self.add_child(parent, token))
    }

    /// Resolve `path` and append already-added tokens there.
    pub fn insert_shared(
        &mut self,
        from: TokenId,
        path: &[PathKey],
        children: &[TokenId],
    ) -> Result<TokenId, GraphError> {
        let parent = self.find_path(from, path)?;
        self.append(parent, children);
        Ok(parent)
    }

    /// Short name for logs: literal, mark, or kind.
    pub fn describe(&self, id: TokenId) -> String {
        self.token(id).label().to_string()
    }
}

impl<C> fmt::Debug for Graph<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("tokens", &self.tokens)
            .finish()
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
