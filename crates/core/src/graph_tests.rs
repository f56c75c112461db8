// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::token::TokenDef;
use proptest::prelude::*;

fn literal(text: &str) -> Token<()> {
    TokenDef::literal(text).build().unwrap()
}

fn value(tag: TokenTag, mark: &str) -> Token<()> {
    TokenDef::new(tag).mark(mark).build().unwrap()
}

fn labels(graph: &Graph<()>, parent: TokenId) -> Vec<String> {
    graph
        .token(parent)
        .children()
        .iter()
        .map(|id| graph.describe(*id))
        .collect()
}

#[test]
fn append_orders_by_priority() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let name = graph.add(value(TokenTag::String, "<name>"));
    let count = graph.add(value(TokenTag::Integer, "<count>"));
    let show = graph.add(literal("show"));
    graph.append(root, &[name, count, show]);
    assert_eq!(labels(&graph, root), vec!["show", "<count>", "<name>"]);
}

#[test]
fn append_keeps_insertion_order_within_priority() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    for word in ["show", "set", "delete"] {
        graph.add_child(root, literal(word));
    }
    let text = graph.add(value(TokenTag::String, "<text>"));
    let exit = graph.add(literal("exit"));
    graph.append(root, &[text, exit]);
    assert_eq!(
        labels(&graph, root),
        vec!["show", "set", "delete", "exit", "<text>"]
    );
}

#[test]
fn append_ignores_existing_children() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let show = graph.add_child(root, literal("show"));
    graph.append(root, &[show, show]);
    assert_eq!(graph.token(root).children(), &[show]);
}

#[test]
fn token_may_have_several_parents() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let count = graph.add_child(root, literal("count"));
    let wait = graph.add_child(root, literal("wait"));
    let host = graph.add(value(TokenTag::String, "<host>"));
    graph.append(count, &[host]);
    graph.append(wait, &[host]);
    assert_eq!(graph.token(count).children(), &[host]);
    assert_eq!(graph.token(wait).children(), &[host]);
    assert_eq!(graph.len(), 4);
}

#[test]
fn find_child_by_literal_and_tag() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let set = graph.add_child(root, literal("set"));
    let rm = graph.add_child(set, value(TokenTag::String, "<route-map>"));

    assert_eq!(graph.find_child(root, &"set".into()), Some(set));
    assert_eq!(graph.find_child(set, &TokenTag::String.into()), Some(rm));
    assert_eq!(graph.find_child(set, &TokenTag::Integer.into()), None);
    assert_eq!(graph.find_child(root, &"show".into()), None);
}

#[test]
fn find_path_returns_deepest_token() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let show = graph.add_child(root, literal("show"));
    let ip = graph.add_child(show, literal("ip"));

    assert_eq!(graph.find_path(root, &path(["show", "ip"])), Ok(ip));
    assert_eq!(graph.find_path(root, &[]), Ok(root));
    // An unknown last segment stops at its parent
    assert_eq!(graph.find_path(root, &path(["show", "route"])), Ok(show));
}

#[test]
fn find_path_rejects_unknown_intermediate_segment() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    graph.add_child(root, literal("show"));

    let err = graph
        .find_path(root, &path(["set", "route-map"]))
        .unwrap_err();
    assert_eq!(
        err,
        GraphError::UnknownPath {
            path: "set route-map".into(),
            segment: "set".into(),
        }
    );
    assert_eq!(err.to_string(), "no such path 'set route-map': 'set' not found");
}

#[test]
fn insert_under_value_token() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let set = graph.add_child(root, literal("set"));
    let rm = graph.add_child(set, value(TokenTag::String, "<route-map>"));

    let keys = vec![PathKey::from("set"), PathKey::from(TokenTag::String)];
    let text = graph.insert(root, &keys, literal("text")).unwrap();
    assert_eq!(graph.token(rm).children(), &[text]);
}

#[test]
fn insert_shared_appends_existing_tokens() {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let ping = graph.add_child(root, literal("ping"));
    let count = graph.add_child(ping, literal("count"));
    let host = graph.add(value(TokenTag::String, "<host>"));

    let parent = graph
        .insert_shared(root, &path(["ping", "count"]), &[host])
        .unwrap();
    assert_eq!(parent, count);
    assert_eq!(graph.token(count).children(), &[host]);
}

#[test]
fn path_key_display() {
    assert_eq!(PathKey::from("show").to_string(), "show");
    assert_eq!(PathKey::from(TokenTag::Ipv4Address).to_string(), "<ipv4-address>");
}

const TAGS: [TokenTag; 5] = [
    TokenTag::Literal,
    TokenTag::String,
    TokenTag::Integer,
    TokenTag::Ipv4Address,
    TokenTag::Choice,
];

proptest! {
    #[test]
    fn children_are_always_sorted(picks in proptest::collection::vec(0usize..TAGS.len(), 0..12)) {
        let mut graph = Graph::new();
        let root = graph.add(Token::root());
        for (n, pick) in picks.iter().enumerate() {
            let token = match TAGS[*pick] {
                TokenTag::Literal => literal(&format!("w{n}")),
                TokenTag::Choice => TokenDef::choice(["a", "b"]).build().unwrap(),
                tag => value(tag, "<v>"),
            };
            graph.add_child(root, token);
        }
        let priorities: Vec<u8> = graph
            .token(root)
            .children()
            .iter()
            .map(|id| graph.token(*id).priority())
            .collect();
        prop_assert_eq!(priorities.len(), picks.len());
        prop_assert!(priorities.windows(2).all(|w| w[0] <= w[1]));
    }
}
