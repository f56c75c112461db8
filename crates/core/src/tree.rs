// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative command trees (TOML, JSON, and HCL).
//!
//! A tree is a nested description of tokens. Actions are referenced by
//! name and resolved through an [`ActionRegistry`]. A node may declare an
//! `id`, and a node elsewhere may `link` to that id to reuse the same token
//! under another parent:
//!
//! ```toml
//! [[children]]
//! literal = "ping"
//! description = "Ping remote host"
//!
//! [[children.children]]
//! literal = "count"
//! id = "count"
//!
//! [[children.children.children]]
//! kind = "integer"
//! mark = "<count>"
//! range = [1, 100]
//!
//! [[children.children.children.children]]
//! link = "target"
//! ```

use crate::graph::{Graph, TokenId};
use crate::iface::InterfaceSource;
use crate::token::{Action, TokenDef, TokenError, TokenTag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Tree file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Hcl,
    Json,
}

impl Format {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "hcl" => Some(Format::Hcl),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Errors that can occur while loading or instantiating a tree
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HCL parse error: {0}")]
    Hcl(#[from] hcl::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported tree file {}: expected .toml, .json or .hcl", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid token at {location}: {source}")]
    Token {
        location: String,
        source: TokenError,
    },

    #[error("unknown action '{name}' at {location}")]
    UnknownAction { location: String, name: String },

    #[error("unknown link '{name}' at {location}")]
    UnknownLink { location: String, name: String },

    #[error("duplicate id '{name}' at {location}")]
    DuplicateId { location: String, name: String },

    #[error("link at {location} must not define token fields or children")]
    InvalidLink { location: String },
}

/// Description of one token and its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub kind: TokenTag,
    #[serde(alias = "text", skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[i64; 2]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Name other nodes can `link` to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reuse the token declared with this `id` instead of creating one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(alias = "leaves", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn of(kind: TokenTag) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn literal(literal: impl Into<String>) -> Self {
        Self {
            literal: Some(literal.into()),
            ..Self::default()
        }
    }

    pub fn value(kind: TokenTag, mark: impl Into<String>) -> Self {
        Self {
            kind,
            mark: Some(mark.into()),
            ..Self::default()
        }
    }

    pub fn link_to(id: impl Into<String>) -> Self {
        Self {
            link: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.action = Some(name.into());
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some([min, max]);
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I: IntoIterator<Item = NodeSpec>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    fn label(&self) -> String {
        self.literal
            .clone()
            .or_else(|| self.mark.clone())
            .or_else(|| self.link.as_ref().map(|id| format!("@{id}")))
            .unwrap_or_else(|| self.kind.to_string())
    }

    /// A link node carries nothing but the link itself.
    fn is_bare_link(&self) -> bool {
        let bare = NodeSpec {
            link: self.link.clone(),
            ..NodeSpec::default()
        };
        *self == bare
    }
}

/// Top-level tree: nodes attached under an existing parent (usually a
/// session root).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandTree {
    #[serde(default, alias = "leaves")]
    pub children: Vec<NodeSpec>,
}

/// Parse a tree from TOML content
pub fn parse_tree(content: &str) -> Result<CommandTree, TreeError> {
    parse_tree_with_format(content, Format::Toml)
}

/// Parse a tree from content in the specified format
pub fn parse_tree_with_format(content: &str, format: Format) -> Result<CommandTree, TreeError> {
    let tree = match format {
        Format::Toml => toml::from_str(content)?,
        Format::Hcl => hcl::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    Ok(tree)
}

/// Load a tree file, choosing the format from its extension.
pub fn load_tree(path: &Path) -> Result<CommandTree, TreeError> {
    let format = Format::from_path(path).ok_or_else(|| TreeError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tree_with_format(&content, format)
}

/// Named actions available to declarative trees.
pub struct ActionRegistry<C> {
    actions: HashMap<String, Action<C>>,
}

impl<C> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<C> ActionRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: Fn(&mut C, &[String]) -> anyhow::Result<()> + 'static,
    {
        self.actions.insert(name.into(), Rc::new(action));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut C, &[String]) -> anyhow::Result<()> + 'static,
    {
        self.register(name, action);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Action<C>> {
        self.actions.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<C> fmt::Debug for ActionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

/// Instantiate `spec` into `graph` and return its root token.
pub fn instantiate<C>(
    graph: &mut Graph<C>,
    spec: &NodeSpec,
    registry: &ActionRegistry<C>,
) -> Result<TokenId, TreeError> {
    TreeBuilder::new(registry).instantiate(graph, spec)
}

/// Turns tree descriptions into live tokens.
pub struct TreeBuilder<'a, C> {
    registry: &'a ActionRegistry<C>,
    interfaces: Option<Rc<dyn InterfaceSource>>,
}

/// First pass result: tokens created, children not wired yet.
enum Built {
    Token { id: TokenId, children: Vec<Built> },
    Link { name: String, location: String },
}

impl<'a, C> TreeBuilder<'a, C> {
    pub fn new(registry: &'a ActionRegistry<C>) -> Self {
        Self {
            registry,
            interfaces: None,
        }
    }

    /// Interface name source for every interface token in the tree.
    pub fn interfaces(mut self, source: Rc<dyn InterfaceSource>) -> Self {
        self.interfaces = Some(source);
        self
    }

    /// Instantiate `spec` and return its root token.
    pub fn instantiate(&self, graph: &mut Graph<C>, spec: &NodeSpec) -> Result<TokenId, TreeError> {
        let mut ids = HashMap::new();
        let location = spec.label();
        let built = self.build(graph, spec, location.clone(), &mut ids)?;
        let Built::Token { id, .. } = &built else {
            return Err(TreeError::InvalidLink { location });
        };
        let root = *id;
        wire(graph, &built, &ids)?;
        Ok(root)
    }

    /// Instantiate every top-level node of `tree` and append them under
    /// `parent`. Ids are shared across the whole tree.
    pub fn attach(
        &self,
        graph: &mut Graph<C>,
        parent: TokenId,
        tree: &CommandTree,
    ) -> Result<(), TreeError> {
        let mut ids = HashMap::new();
        let mut built = Vec::with_capacity(tree.children.len());
        for spec in &tree.children {
            built.push(self.build(graph, spec, spec.label(), &mut ids)?);
        }
        let mut top = Vec::with_capacity(built.len());
        for node in &built {
            top.push(resolve(node, &ids)?);
            wire(graph, node, &ids)?;
        }
        graph.append(parent, &top);
        Ok(())
    }

    fn build(
        &self,
        graph: &mut Graph<C>,
        spec: &NodeSpec,
        location: String,
        ids: &mut HashMap<String, TokenId>,
    ) -> Result<Built, TreeError> {
        if let Some(name) = &spec.link {
            if !spec.is_bare_link() {
                return Err(TreeError::InvalidLink { location });
            }
            return Ok(Built::Link {
                name: name.clone(),
                location,
            });
        }

        let token = self.token(spec, &location)?;
        let id = graph.add(token);
        if let Some(name) = &spec.id {
            if ids.insert(name.clone(), id).is_some() {
                return Err(TreeError::DuplicateId {
                    location,
                    name: name.clone(),
                });
            }
        }

        let mut children = Vec::with_capacity(spec.children.len());
        for child in &spec.children {
            let child_location = format!("{location} {}", child.label());
            children.push(self.build(graph, child, child_location, ids)?);
        }
        Ok(Built::Token { id, children })
    }

    fn token(&self, spec: &NodeSpec, location: &str) -> Result<crate::Token<C>, TreeError> {
        let mut def = TokenDef::new(spec.kind);
        if let Some(literal) = &spec.literal {
            def = def.text(literal);
        }
        if let Some(mark) = &spec.mark {
            def = def.mark(mark);
        }
        if let Some(description) = &spec.description {
            def = def.description(description);
        }
        if let Some(pattern) = &spec.pattern {
            def = def.pattern(pattern);
        }
        if let Some([min, max]) = spec.range {
            def = def.range(min, max);
        }
        if !spec.choices.is_empty() {
            def = def.choices(spec.choices.iter().cloned());
        }
        if let (TokenTag::Interface, Some(source)) = (spec.kind, &self.interfaces) {
            def = def.interfaces(Rc::clone(source));
        }
        if let Some(name) = &spec.action {
            let action = self
                .registry
                .get(name)
                .ok_or_else(|| TreeError::UnknownAction {
                    location: location.to_string(),
                    name: name.clone(),
                })?;
            def = def.shared_action(Rc::clone(action));
        }
        def.build().map_err(|source| TreeError::Token {
            location: location.to_string(),
            source,
        })
    }
}

fn resolve(node: &Built, ids: &HashMap<String, TokenId>) -> Result<TokenId, TreeError> {
    match node {
        Built::Token { id, .. } => Ok(*id),
        Built::Link { name, location } => {
            ids.get(name)
                .copied()
                .ok_or_else(|| TreeError::UnknownLink {
                    location: location.clone(),
                    name: name.clone(),
                })
        }
    }
}

/// Second pass: append children in declaration order.
fn wire<C>(
    graph: &mut Graph<C>,
    node: &Built,
    ids: &HashMap<String, TokenId>,
) -> Result<(), TreeError> {
    if let Built::Token { id, children } = node {
        let mut resolved = Vec::with_capacity(children.len());
        for child in children {
            resolved.push(resolve(child, ids)?);
            wire(graph, child, ids)?;
        }
        graph.append(*id, &resolved);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
