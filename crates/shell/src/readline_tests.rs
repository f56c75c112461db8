// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{recording_session, SharedBuffer};
use rustyline::completion::Completer;

type Shared = Rc<RefCell<Session<Vec<String>>>>;

fn fixture() -> (CompletionHelper<Vec<String>>, Shared, SharedBuffer) {
    let (session, out) = recording_session();
    let session = Rc::new(RefCell::new(session));
    (CompletionHelper::new(Rc::clone(&session)), session, out)
}

/// Start offset plus `(display, replacement)` for each pair.
fn complete(
    helper: &CompletionHelper<Vec<String>>,
    line: &str,
    pos: usize,
) -> (usize, Vec<(String, String)>) {
    let history = DefaultHistory::new();
    let ctx = rustyline::Context::new(&history);
    let (start, pairs) = helper.complete(line, pos, &ctx).unwrap();
    let pairs = pairs
        .into_iter()
        .map(|pair| (pair.display, pair.replacement))
        .collect();
    (start, pairs)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(display, replacement)| (display.to_string(), replacement.to_string()))
        .collect()
}

#[test]
fn completes_the_word_under_the_cursor() {
    let (helper, _, out) = fixture();
    assert_eq!(
        complete(&helper, "set r", 5),
        (4, pairs(&[("route-map", "route-map ")]))
    );
    assert_eq!(out.contents(), "");
}

#[test]
fn first_word_starts_at_zero() {
    let (helper, _, _) = fixture();
    assert_eq!(
        complete(&helper, "e", 1),
        (0, pairs(&[("edit", "edit "), ("exit", "exit ")]))
    );
}

#[test]
fn ignores_text_after_the_cursor() {
    let (helper, _, _) = fixture();
    assert_eq!(
        complete(&helper, "set r myrm permit", 5),
        (4, pairs(&[("route-map", "route-map ")]))
    );
}

#[test]
fn empty_word_lists_instead_of_replacing() {
    let (helper, _, out) = fixture();
    assert_eq!(complete(&helper, "set route-map ", 14), (14, Vec::new()));
    assert!(out.contents().starts_with("\n\nCompletions:\n  <route-map>"));
}

#[test]
fn busy_session_offers_nothing() {
    let (helper, session, out) = fixture();
    let _held = session.borrow_mut();
    assert_eq!(complete(&helper, "set r", 5), (4, Vec::new()));
    assert_eq!(out.contents(), "");
}
