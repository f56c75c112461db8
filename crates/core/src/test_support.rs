// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sample graphs and fixtures shared by tests across the workspace.

#![allow(clippy::expect_used)]

use crate::graph::{Graph, TokenId};
use crate::iface::{InterfaceSource, StaticInterfaces};
use crate::token::{Action, Token, TokenDef, TokenTag};
use std::rc::Rc;

/// Action log for graphs whose context records every call.
pub type Calls = Vec<Vec<String>>;

/// Action that appends the matched words to a [`Calls`] log.
pub fn recorder() -> Action<Calls> {
    Rc::new(|calls: &mut Calls, words: &[String]| {
        calls.push(words.to_vec());
        Ok(())
    })
}

pub fn interfaces<const N: usize>(names: [&str; N]) -> Rc<dyn InterfaceSource> {
    Rc::new(StaticInterfaces::new(names))
}

pub fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn token<C>(def: TokenDef<C>) -> Token<C> {
    def.build().expect("fixture token is valid")
}

/// `set route-map {text, <route-map> permit}` with the action on `permit`.
pub fn route_map_graph<C>(action: Action<C>) -> (Graph<C>, TokenId) {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let set = graph.add_child(root, token(TokenDef::literal("set").description("Set a value")));
    let route_map = graph.add_child(
        set,
        token(TokenDef::literal("route-map").description("Route map configuration")),
    );
    let name = graph.add_child(
        route_map,
        token(TokenDef::string("<route-map>").description("Route map name")),
    );
    graph.add_child(route_map, token(TokenDef::literal("text").description("Text")));
    graph.add_child(
        name,
        token(
            TokenDef::literal("permit")
                .description("Permit matching routes")
                .shared_action(action),
        ),
    );
    (graph, root)
}

/// `ping` with `count <n>` and `wait <secs>` options in any order, each at
/// most once, followed by `<host>` which carries the action.
pub fn ping_graph<C>(action: Action<C>) -> (Graph<C>, TokenId) {
    let mut graph = Graph::new();
    let root = graph.add(Token::root());
    let ping = graph.add_child(root, token(TokenDef::literal("ping").description("Ping remote host")));

    let count = graph.add(token(TokenDef::literal("count").description("Number of requests")));
    let count_value = graph.add(token(TokenDef::integer().mark("<count>").range(1, 100)));
    let wait = graph.add(token(TokenDef::literal("wait").description("Seconds between requests")));
    let wait_value = graph.add(token(TokenDef::integer().mark("<wait>").range(1, 60)));
    let host = graph.add(token(
        TokenDef::new(TokenTag::String)
            .mark("<host>")
            .description("Target host")
            .shared_action(action),
    ));

    let options = [count, wait, host];
    graph.append(ping, &options);
    graph.append(count, &[count_value]);
    graph.append(wait, &[wait_value]);
    graph.append(count_value, &options);
    graph.append(wait_value, &options);
    (graph, root)
}
