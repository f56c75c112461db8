// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operational mode: show commands, ping, and the way into configure mode.

use crate::actions::{exit, run_program};
use crate::device::Device;
use anyhow::Result;
use nosh_core::{path, InterfaceSource, Token, TokenDef};
use nosh_shell::{Context, Session};
use std::io::Write;
use std::rc::Rc;

/// Requests sent when none is given, so `ping` always terminates.
const DEFAULT_PING_COUNT: &str = "5";

pub struct Operational {
    interfaces: Rc<dyn InterfaceSource>,
    /// Set by `configure`; the caller switches shells when the loop exits.
    pub configure: bool,
}

type Ctx = Context<Operational>;

pub fn session(device: &Device) -> Result<Session<Operational>> {
    let state = Operational {
        interfaces: Rc::clone(&device.interfaces),
        configure: false,
    };
    let prompt = device.prompt('>');
    let mut session = Session::new(state).with_prompt(move |_| prompt.clone());

    session.append(
        TokenDef::literal("show")
            .description("Show running system information")
            .build()?,
    );
    session.insert(
        &path(["show"]),
        TokenDef::literal("system")
            .description("Show system information")
            .action(show_system)
            .build()?,
    )?;
    session.insert(
        &path(["show"]),
        TokenDef::literal("interfaces")
            .description("Show interface information")
            .action(show_interfaces)
            .build()?,
    )?;
    session.insert(
        &path(["show", "interfaces"]),
        TokenDef::interface()
            .interfaces(Rc::clone(&device.interfaces))
            .action(show_interface)
            .build()?,
    )?;
    session.insert(
        &path(["show"]),
        TokenDef::literal("ip")
            .description("Show IP information")
            .build()?,
    )?;
    session.insert(
        &path(["show", "ip"]),
        TokenDef::literal("route")
            .description("Show IP routing table")
            .action(show_ip_route)
            .build()?,
    )?;

    add_ping(&mut session)?;

    session.append(
        TokenDef::literal("configure")
            .description("Enter configuration mode")
            .action(|ctx: &mut Ctx, _: &[String]| {
                ctx.state_mut().configure = true;
                ctx.exit();
                Ok(())
            })
            .build()?,
    );
    session.append(
        TokenDef::literal("exit")
            .description("Exit from CLI")
            .action(exit::<Operational>)
            .build()?,
    );
    Ok(session)
}

/// `ping [count <count>] [wait <wait>] <host>`, options in any order and
/// each at most once.
fn add_ping(session: &mut Session<Operational>) -> Result<()> {
    let ping = session.append(
        TokenDef::literal("ping")
            .description("Ping remote host")
            .build()?,
    );
    let graph = session.graph_mut();
    let count = graph.add(
        TokenDef::literal("count")
            .description("Number of ping requests")
            .build()?,
    );
    let count_value = graph.add(TokenDef::integer().mark("<count>").range(1, 100).build()?);
    let wait = graph.add(
        TokenDef::literal("wait")
            .description("Seconds between ping requests")
            .build()?,
    );
    let wait_value = graph.add(TokenDef::integer().mark("<wait>").range(1, 60).build()?);
    let host: Token<Ctx> = TokenDef::string("<host>")
        .description("Hostname or IP address of remote host")
        .action(ping_host)
        .build()?;
    let host = graph.add(host);

    let options = [count, wait, host];
    graph.append(ping, &options);
    graph.append(count, &[count_value]);
    graph.append(wait, &[wait_value]);
    graph.append(count_value, &options);
    graph.append(wait_value, &options);
    Ok(())
}

fn show_system(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    run_program(ctx, "uname", ["-a"])
}

fn show_interfaces(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    let names = ctx.state().interfaces.interface_names();
    let out = ctx.out();
    for name in names {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

fn show_interface(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let Some(name) = words.last() else {
        return Ok(());
    };
    if cfg!(target_os = "linux") {
        run_program(ctx, "ip", ["addr", "show", "dev", name.as_str()])
    } else {
        run_program(ctx, "ifconfig", [name.as_str()])
    }
}

fn show_ip_route(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    if cfg!(target_os = "linux") {
        run_program(ctx, "ip", ["route", "show"])
    } else {
        run_program(ctx, "netstat", ["-rn", "-f", "inet"])
    }
}

fn ping_host(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    run_program(ctx, "ping", ping_args(words))
}

/// Arguments for the system `ping` from a matched `ping ...` command.
pub fn ping_args(words: &[String]) -> Vec<String> {
    let mut count = DEFAULT_PING_COUNT.to_string();
    let mut wait = None;
    let mut host = None;

    let mut rest = words.iter().skip(1);
    while let Some(word) = rest.next() {
        match word.as_str() {
            "count" => count = rest.next().cloned().unwrap_or(count),
            "wait" => wait = rest.next().cloned(),
            _ => host = Some(word.clone()),
        }
    }

    let mut args = vec!["-c".to_string(), count];
    if let Some(wait) = wait {
        args.push("-i".to_string());
        args.push(wait);
    }
    args.extend(host);
    args
}

#[cfg(test)]
#[path = "operational_tests.rs"]
mod tests;
