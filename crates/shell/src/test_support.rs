// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured output, scripted input, and a sample session for tests.

#![allow(clippy::panic)]

use crate::repl::{LineReader, ReadError, ReadLine};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

/// Cloneable in-memory writer; every clone sees the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Return the contents and empty the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replays a fixed script, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    script: VecDeque<ReadLine>,
    /// Prompts seen, in order.
    pub prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_events(lines.into_iter().map(|line| ReadLine::Line(line.into())))
    }

    pub fn from_events<I: IntoIterator<Item = ReadLine>>(events: I) -> Self {
        Self {
            script: events.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReadError> {
        self.prompts.push(prompt.to_string());
        Ok(self.script.pop_front().unwrap_or(ReadLine::Eof))
    }
}

/// Session whose state logs every executed command, writing to the
/// returned buffer.
///
/// ```text
/// set route-map {text, <route-map> permit}
/// set <iface> address <address>
/// edit <iface>      enter edit mode for <iface>
/// top               leave edit mode
/// fail              action error
/// exit
/// ```
pub fn recording_session() -> (crate::Session<Vec<String>>, SharedBuffer) {
    use crate::{Context, Session};
    use nosh_core::{path, PathKey, TokenDef, TokenTag};

    type Ctx = Context<Vec<String>>;

    fn record(ctx: &mut Ctx, words: &[String]) -> anyhow::Result<()> {
        ctx.state_mut().push(words.join(" "));
        Ok(())
    }

    fn token(def: TokenDef<Ctx>) -> nosh_core::Token<Ctx> {
        match def.build() {
            Ok(token) => token,
            Err(e) => panic!("fixture token is invalid: {e}"),
        }
    }

    fn graft(session: &mut Session<Vec<String>>, at: &[&str], def: TokenDef<Ctx>) {
        if let Err(e) = session.insert(&path(at.iter().copied()), token(def)) {
            panic!("fixture path is invalid: {e}");
        }
    }

    let out = SharedBuffer::new();
    let mut session = Session::new(Vec::new()).with_output(out.clone());

    session.append(token(TokenDef::literal("set").description("Set a value")));
    graft(
        &mut session,
        &["set"],
        TokenDef::literal("route-map").description("Route map configuration"),
    );
    graft(
        &mut session,
        &["set", "route-map"],
        TokenDef::string("<route-map>").description("Route map name"),
    );
    graft(
        &mut session,
        &["set", "route-map"],
        TokenDef::literal("text").description("Text"),
    );
    let name = session
        .graph()
        .find_path(
            session.root(),
            &[
                PathKey::from("set"),
                PathKey::from("route-map"),
                PathKey::from(TokenTag::String),
            ],
        )
        .unwrap_or_else(|e| panic!("fixture path is invalid: {e}"));
    session.graph_mut().add_child(
        name,
        token(TokenDef::literal("permit").description("Permit routes").action(record)),
    );

    let iface = session.graph_mut().add(token(
        TokenDef::string("<iface>").description("Interface name"),
    ));
    let address = session
        .graph_mut()
        .add(token(TokenDef::literal("address").description("Interface address")));
    let prefix = session.graph_mut().add(token(
        TokenDef::new(TokenTag::AddressPrefix).action(record),
    ));
    let root = session.root();
    if let Err(e) = session.graph_mut().insert_shared(root, &path(["set"]), &[iface]) {
        panic!("fixture path is invalid: {e}");
    }
    session.graph_mut().append(iface, &[address]);
    session.graph_mut().append(address, &[prefix]);

    session.append(token(TokenDef::literal("edit").description("Edit an interface")));
    graft(
        &mut session,
        &["edit"],
        TokenDef::string("<iface>")
            .description("Interface name")
            .action(|ctx: &mut Ctx, words: &[String]| {
                ctx.set_prefix(words[1..].iter().cloned());
                Ok(())
            }),
    );
    session.append(token(TokenDef::literal("top").description("Leave edit mode").action(
        |ctx: &mut Ctx, _: &[String]| {
            ctx.clear_prefix();
            Ok(())
        },
    )));
    session.append(token(TokenDef::literal("fail").description("Always fails").action(
        |_: &mut Ctx, _: &[String]| {
            Err(anyhow::anyhow!("disk full").context("write failed"))
        },
    )));
    session.append(token(TokenDef::literal("exit").description("Leave the shell").action(
        |ctx: &mut Ctx, _: &[String]| {
            ctx.exit();
            Ok(())
        },
    )));

    (session, out)
}
