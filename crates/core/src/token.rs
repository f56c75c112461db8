// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command tokens: the nodes of a command graph.
//!
//! Every token has a [`TokenKind`] that decides which words it accepts.
//! Tokens are only ever created through [`TokenDef::build`], which enforces
//! the literal/mark rules of each kind.

use crate::addr;
use crate::graph::TokenId;
use crate::iface::{InterfaceSource, SystemInterfaces};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Callback invoked when a command terminates on a token.
///
/// Receives the caller-supplied context and the full word sequence of the
/// matched command. The words are only valid for the duration of the call.
pub type Action<C> = Rc<dyn Fn(&mut C, &[String]) -> anyhow::Result<()>>;

/// Default pattern accepted by [`TokenTag::String`] tokens.
pub const DEFAULT_STRING_PATTERN: &str = r"[0-9A-Za-z_\-./@:]+";

/// Literal of the synthetic root token created by [`Token::root`].
pub const ROOT_LITERAL: &str = "__root__";

/// Returns true if `value` is a bracketed placeholder such as `<int>`.
pub fn is_mark(value: &str) -> bool {
    value.len() > 2 && value.starts_with('<') && value.ends_with('>')
}

/// Errors raised while defining a token (invalid token definitions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("literal token requires a non-empty literal")]
    MissingLiteral,
    #[error("{tag} token must not have a literal")]
    UnexpectedLiteral { tag: TokenTag },
    #[error("literal token '{literal}' must not have a mark")]
    UnexpectedMark { literal: String },
    #[error("{tag} token requires a mark")]
    MissingMark { tag: TokenTag },
    #[error("mark must look like <MARK>, got '{0}'")]
    InvalidMark(String),
    #[error("choice token requires at least one choice")]
    MissingChoices,
    #[error("invalid integer range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("invalid string pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("option '{option}' does not apply to {tag} tokens")]
    OptionNotApplicable { option: &'static str, tag: TokenTag },
}

/// Closed set of token kinds, used to address value tokens by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenTag {
    #[default]
    Literal,
    String,
    Integer,
    Choice,
    Interface,
    Ipv4Address,
    Ipv6Address,
    Ipv4Network,
    Ipv6Network,
    AddressPrefix,
}

impl TokenTag {
    /// Evaluation order among siblings; lower is tried first.
    ///
    /// Permissive kinds sort after strict ones so they cannot swallow a
    /// word meant for a literal sibling.
    pub fn priority(self) -> u8 {
        match self {
            TokenTag::Literal => 0,
            TokenTag::Choice => 1,
            TokenTag::Interface => 2,
            TokenTag::Integer => 3,
            TokenTag::Ipv4Address
            | TokenTag::Ipv6Address
            | TokenTag::Ipv4Network
            | TokenTag::Ipv6Network
            | TokenTag::AddressPrefix => 4,
            TokenTag::String => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenTag::Literal => "literal",
            TokenTag::String => "string",
            TokenTag::Integer => "integer",
            TokenTag::Choice => "choice",
            TokenTag::Interface => "interface",
            TokenTag::Ipv4Address => "ipv4-address",
            TokenTag::Ipv6Address => "ipv6-address",
            TokenTag::Ipv4Network => "ipv4-network",
            TokenTag::Ipv6Network => "ipv6-network",
            TokenTag::AddressPrefix => "address-prefix",
        }
    }

    /// Default (mark, description) for value kinds that have one.
    fn default_mark(self) -> Option<(&'static str, &'static str)> {
        match self {
            TokenTag::Literal | TokenTag::String | TokenTag::Choice => None,
            TokenTag::Interface => Some(("<interface-name>", "Name of interface")),
            TokenTag::Integer => Some(("<int>", "Integer")),
            TokenTag::Ipv4Address => Some(("<ipv4-address>", "IPv4 Address")),
            TokenTag::Ipv6Address => Some(("<ipv6-address>", "IPv6 Address")),
            TokenTag::Ipv4Network => Some(("<ipv4-network>", "IPv4 network/prefix length")),
            TokenTag::Ipv6Network => Some(("<ipv6-network>", "IPv6 network/prefix length")),
            TokenTag::AddressPrefix => Some(("<address>", "Interface address/prefix length")),
        }
    }
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Matching data for each kind of token.
pub enum TokenKind {
    Literal,
    String { pattern: Regex },
    /// Optional inclusive `(min, max)` range.
    Integer { range: Option<(i64, i64)> },
    Choice { choices: Vec<String> },
    Interface { source: Rc<dyn InterfaceSource> },
    Ipv4Address,
    Ipv6Address,
    Ipv4Network,
    Ipv6Network,
    AddressPrefix,
}

impl TokenKind {
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Literal => TokenTag::Literal,
            TokenKind::String { .. } => TokenTag::String,
            TokenKind::Integer { .. } => TokenTag::Integer,
            TokenKind::Choice { .. } => TokenTag::Choice,
            TokenKind::Interface { .. } => TokenTag::Interface,
            TokenKind::Ipv4Address => TokenTag::Ipv4Address,
            TokenKind::Ipv6Address => TokenTag::Ipv6Address,
            TokenKind::Ipv4Network => TokenTag::Ipv4Network,
            TokenKind::Ipv6Network => TokenTag::Ipv6Network,
            TokenKind::AddressPrefix => TokenTag::AddressPrefix,
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::String { pattern } => f
                .debug_struct("String")
                .field("pattern", &pattern.as_str())
                .finish(),
            TokenKind::Integer { range } => {
                f.debug_struct("Integer").field("range", range).finish()
            }
            TokenKind::Choice { choices } => {
                f.debug_struct("Choice").field("choices", choices).finish()
            }
            TokenKind::Interface { source } => {
                f.debug_struct("Interface").field("source", source).finish()
            }
            other => f.write_str(other.tag().name()),
        }
    }
}

/// A completion candidate: the value to offer and its help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub description: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }

    /// Placeholders are listed as hints but can never be accepted as input.
    pub fn is_mark(&self) -> bool {
        is_mark(&self.value)
    }
}

/// A node of the command graph.
pub struct Token<C> {
    kind: TokenKind,
    literal: Option<String>,
    mark: Option<String>,
    description: String,
    action: Option<Action<C>>,
    pub(crate) children: Vec<TokenId>,
}

impl<C> Token<C> {
    /// The root token of a command graph. It is never matched itself; only
    /// its children are.
    pub fn root() -> Self {
        Self {
            kind: TokenKind::Literal,
            literal: Some(ROOT_LITERAL.to_string()),
            mark: None,
            description: "Root Token".to_string(),
            action: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }

    pub fn priority(&self) -> u8 {
        self.tag().priority()
    }

    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    pub fn mark(&self) -> Option<&str> {
        self.mark.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn action(&self) -> Option<&Action<C>> {
        self.action.as_ref()
    }

    pub fn children(&self) -> &[TokenId] {
        &self.children
    }

    /// Human-readable name: the literal, the mark, or the kind.
    pub fn label(&self) -> &str {
        self.literal
            .as_deref()
            .or(self.mark.as_deref())
            .unwrap_or_else(|| self.tag().name())
    }

    /// Returns true if `word` exactly matches this token.
    pub fn matches(&self, word: &str) -> bool {
        match &self.kind {
            TokenKind::Literal => self.literal.as_deref() == Some(word),
            TokenKind::String { pattern } => pattern.is_match(word),
            TokenKind::Integer { range } => match word.parse::<i64>() {
                Ok(n) => range.map_or(true, |(min, max)| (min..=max).contains(&n)),
                Err(_) => false,
            },
            TokenKind::Choice { choices } => choices.iter().any(|c| c == word),
            TokenKind::Interface { source } => {
                source.interface_names().iter().any(|name| name == word)
            }
            TokenKind::Ipv4Address => word.parse::<std::net::Ipv4Addr>().is_ok(),
            TokenKind::Ipv6Address => word.parse::<std::net::Ipv6Addr>().is_ok(),
            TokenKind::Ipv4Network => addr::parse_ipv4_network(word).is_some(),
            TokenKind::Ipv6Network => addr::parse_ipv6_network(word).is_some(),
            TokenKind::AddressPrefix => addr::parse_address_prefix(word).is_some(),
        }
    }

    /// Candidates this token offers for the partially typed `partial`.
    pub fn candidates(&self, partial: &str) -> Vec<Candidate> {
        match (&self.kind, &self.literal) {
            (TokenKind::Literal, Some(literal)) => {
                if literal.starts_with(partial) {
                    vec![Candidate::new(literal, &self.description)]
                } else {
                    Vec::new()
                }
            }
            (TokenKind::Choice { choices }, _) => {
                let mut matching = choices.iter().filter(|c| c.starts_with(partial));
                match (matching.next(), matching.next()) {
                    (Some(only), None) => vec![Candidate::new(only, &self.description)],
                    _ => self.mark_candidate(),
                }
            }
            (TokenKind::Interface { source }, _) => {
                let mut candidates = self.mark_candidate();
                candidates.extend(
                    source
                        .interface_names()
                        .into_iter()
                        .filter(|name| name.starts_with(partial))
                        .map(|name| Candidate::new(name, "")),
                );
                candidates
            }
            _ => self.mark_candidate(),
        }
    }

    fn mark_candidate(&self) -> Vec<Candidate> {
        self.mark
            .as_ref()
            .map(|mark| vec![Candidate::new(mark, &self.description)])
            .unwrap_or_default()
    }
}

impl<C> fmt::Debug for Token<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("literal", &self.literal)
            .field("mark", &self.mark)
            .field("description", &self.description)
            .field("action", &self.action.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Definition of a token, validated by [`TokenDef::build`].
///
/// # Examples
///
/// ```ignore
/// use nosh_core::{TokenDef, TokenTag};
///
/// let show = TokenDef::<()>::literal("show").description("Show information").build()?;
/// let mtu = TokenDef::<()>::integer().mark("<mtu>").range(68, 9216).build()?;
/// let name = TokenDef::<()>::string("<route-map>").build()?;
///
/// assert!(TokenDef::<()>::new(TokenTag::String).build().is_err()); // needs a mark
/// # Ok::<(), nosh_core::TokenError>(())
/// ```
pub struct TokenDef<C> {
    tag: TokenTag,
    literal: Option<String>,
    mark: Option<String>,
    description: Option<String>,
    action: Option<Action<C>>,
    pattern: Option<String>,
    range: Option<(i64, i64)>,
    choices: Vec<String>,
    interfaces: Option<Rc<dyn InterfaceSource>>,
}

impl<C> TokenDef<C> {
    pub fn new(tag: TokenTag) -> Self {
        Self {
            tag,
            literal: None,
            mark: None,
            description: None,
            action: None,
            pattern: None,
            range: None,
            choices: Vec::new(),
            interfaces: None,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(TokenTag::Literal).text(text)
    }

    pub fn string(mark: impl Into<String>) -> Self {
        Self::new(TokenTag::String).mark(mark)
    }

    pub fn integer() -> Self {
        Self::new(TokenTag::Integer)
    }

    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TokenTag::Choice).choices(choices)
    }

    pub fn interface() -> Self {
        Self::new(TokenTag::Interface)
    }

    /// Set the literal text. Only valid for literal tokens.
    pub fn text(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    pub fn mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action<F>(self, action: F) -> Self
    where
        F: Fn(&mut C, &[String]) -> anyhow::Result<()> + 'static,
    {
        self.shared_action(Rc::new(action))
    }

    pub fn shared_action(mut self, action: Action<C>) -> Self {
        self.action = Some(action);
        self
    }

    /// Regex for string tokens; anchored to the whole word.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Inclusive range for integer tokens.
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
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

    /// Interface name source for interface tokens (defaults to the OS).
    pub fn interfaces(mut self, source: Rc<dyn InterfaceSource>) -> Self {
        self.interfaces = Some(source);
        self
    }

    pub fn build(self) -> Result<Token<C>, TokenError> {
        self.check_options()?;
        let tag = self.tag;

        if tag == TokenTag::Literal {
            let literal = self
                .literal
                .filter(|l| !l.is_empty())
                .ok_or(TokenError::MissingLiteral)?;
            if self.mark.is_some() {
                return Err(TokenError::UnexpectedMark { literal });
            }
            return Ok(Token {
                kind: TokenKind::Literal,
                literal: Some(literal),
                mark: None,
                description: self.description.unwrap_or_default(),
                action: self.action,
                children: Vec::new(),
            });
        }

        if self.literal.is_some() {
            return Err(TokenError::UnexpectedLiteral { tag });
        }
        if let Some(mark) = &self.mark {
            if !is_mark(mark) {
                return Err(TokenError::InvalidMark(mark.clone()));
            }
        }

        let default = tag.default_mark();
        let mark = match (self.mark, default) {
            (Some(mark), _) => mark,
            (None, Some((mark, _))) => mark.to_string(),
            (None, None) if tag == TokenTag::Choice => "<choice>".to_string(),
            (None, None) => return Err(TokenError::MissingMark { tag }),
        };
        let description = self
            .description
            .or_else(|| default.map(|(_, desc)| desc.to_string()));

        let kind = match tag {
            TokenTag::Literal => TokenKind::Literal,
            TokenTag::String => {
                let source = self.pattern.as_deref().unwrap_or(DEFAULT_STRING_PATTERN);
                let pattern = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
                    TokenError::InvalidPattern {
                        pattern: source.to_string(),
                        message: e.to_string(),
                    }
                })?;
                TokenKind::String { pattern }
            }
            TokenTag::Integer => {
                if let Some((min, max)) = self.range {
                    if min > max {
                        return Err(TokenError::InvalidRange { min, max });
                    }
                }
                TokenKind::Integer { range: self.range }
            }
            TokenTag::Choice => {
                if self.choices.is_empty() {
                    return Err(TokenError::MissingChoices);
                }
                TokenKind::Choice {
                    choices: self.choices,
                }
            }
            TokenTag::Interface => TokenKind::Interface {
                source: self
                    .interfaces
                    .unwrap_or_else(|| Rc::new(SystemInterfaces)),
            },
            TokenTag::Ipv4Address => TokenKind::Ipv4Address,
            TokenTag::Ipv6Address => TokenKind::Ipv6Address,
            TokenTag::Ipv4Network => TokenKind::Ipv4Network,
            TokenTag::Ipv6Network => TokenKind::Ipv6Network,
            TokenTag::AddressPrefix => TokenKind::AddressPrefix,
        };

        let description = description.unwrap_or_else(|| match &kind {
            TokenKind::Choice { choices } => format!("One of: {}", choices.join(", ")),
            _ => String::new(),
        });

        Ok(Token {
            kind,
            literal: None,
            mark: Some(mark),
            description,
            action: self.action,
            children: Vec::new(),
        })
    }

    /// Kind-specific options must only be set on their own kind.
    fn check_options(&self) -> Result<(), TokenError> {
        let tag = self.tag;
        let misplaced = [
            ("pattern", self.pattern.is_some(), TokenTag::String),
            ("range", self.range.is_some(), TokenTag::Integer),
            ("choices", !self.choices.is_empty(), TokenTag::Choice),
            ("interfaces", self.interfaces.is_some(), TokenTag::Interface),
        ];
        for (option, set, owner) in misplaced {
            if set && tag != owner {
                return Err(TokenError::OptionNotApplicable { option, tag });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
