// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configure mode: edits an in-memory candidate configuration.
//!
//! The command tree lives in `configure.toml`; this module supplies the
//! actions it names. Inside `edit interface <name>` the words
//! `interface <name>` are spliced after the first word of every command,
//! so `set mtu 1500` sets the MTU of the edited interface.

use crate::candidate::{CandidateConfig, InterfaceField, RouteMapAction};
use crate::device::Device;
use anyhow::{anyhow, bail, Context as _, Result};
use nosh_core::{parse_tree, ActionRegistry, TreeBuilder};
use nosh_shell::{Context, Session};
use std::io::Write;
use std::net::Ipv4Addr;

const TREE: &str = include_str!("configure.toml");

#[derive(Debug, Default)]
pub struct Configure {
    pub candidate: CandidateConfig,
}

type Ctx = Context<Configure>;

pub fn session(device: &Device) -> Result<Session<Configure>> {
    let prompt = device.prompt('#');
    let mut session = Session::new(Configure::default()).with_prompt(move |ctx| {
        if ctx.prefix().is_empty() {
            prompt.clone()
        } else {
            format!("[edit {}]\n{prompt}", ctx.prefix().join(" "))
        }
    });

    let tree = parse_tree(TREE).context("invalid configure command tree")?;
    let registry = registry();
    let root = session.root();
    TreeBuilder::new(&registry)
        .interfaces(device.interfaces.clone())
        .attach(session.graph_mut(), root, &tree)
        .context("invalid configure command tree")?;
    Ok(session)
}

fn registry() -> ActionRegistry<Ctx> {
    ActionRegistry::new()
        .with("set-router-id", set_router_id)
        .with("set-route-map", set_route_map)
        .with("set-interface", set_interface)
        .with("set-static-route", set_static_route)
        .with("delete-router-id", delete_router_id)
        .with("delete-route-map", delete_route_map)
        .with("delete-interface", delete_interface)
        .with("delete-static-route", delete_static_route)
        .with("edit-interface", edit_interface)
        .with("top", top)
        .with("show", show)
        .with("exit", exit)
}

/// Word `index` of a matched command.
fn arg(words: &[String], index: usize) -> Result<&str> {
    words
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument in '{}'", words.join(" ")))
}

fn candidate(ctx: &mut Ctx) -> &mut CandidateConfig {
    &mut ctx.state_mut().candidate
}

// set router-id <ipv4-address>
fn set_router_id(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let id: Ipv4Addr = arg(words, 2)?.parse().context("invalid router-id")?;
    candidate(ctx).router_id = Some(id);
    Ok(())
}

// set route-map <route-map> [permit|deny]
fn set_route_map(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let name = arg(words, 2)?;
    let action = match words.get(3) {
        Some(word) => RouteMapAction::parse(word)
            .ok_or_else(|| anyhow!("unknown route-map action '{word}'"))?,
        None => RouteMapAction::Permit,
    };
    candidate(ctx).route_maps.insert(name.to_string(), action);
    Ok(())
}

// set interface <interface-name> {address|mtu|description} <value>
fn set_interface(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let name = arg(words, 2)?;
    let field = interface_field(arg(words, 3)?)?;
    let value = arg(words, 4)?;
    let interface = candidate(ctx).interface_mut(name);
    match field {
        InterfaceField::Address => interface.address = Some(value.to_string()),
        InterfaceField::Mtu => interface.mtu = Some(value.parse().context("invalid mtu")?),
        InterfaceField::Description => interface.description = Some(value.to_string()),
    }
    Ok(())
}

// set static-route <ipv4-network> next-hop <ipv4-address>
fn set_static_route(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let network = arg(words, 2)?;
    let next_hop: Ipv4Addr = arg(words, 4)?.parse().context("invalid next-hop")?;
    candidate(ctx)
        .static_routes
        .insert(network.to_string(), next_hop);
    Ok(())
}

fn delete_router_id(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    if candidate(ctx).router_id.take().is_none() {
        bail!("router-id is not configured");
    }
    Ok(())
}

fn delete_route_map(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let name = arg(words, 2)?;
    if candidate(ctx).route_maps.remove(name).is_none() {
        bail!("route-map '{name}' is not configured");
    }
    Ok(())
}

// delete interface <interface-name> [address|mtu|description]
fn delete_interface(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let name = arg(words, 2)?;
    let Some(word) = words.get(3) else {
        if candidate(ctx).interfaces.remove(name).is_none() {
            bail!("interface '{name}' is not configured");
        }
        return Ok(());
    };
    if !candidate(ctx).delete_interface_field(name, interface_field(word)?) {
        bail!("interface '{name}' has no {word} configured");
    }
    Ok(())
}

fn delete_static_route(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let network = arg(words, 2)?;
    if candidate(ctx).static_routes.remove(network).is_none() {
        bail!("static-route '{network}' is not configured");
    }
    Ok(())
}

fn interface_field(word: &str) -> Result<InterfaceField> {
    InterfaceField::parse(word).ok_or_else(|| anyhow!("unknown interface setting '{word}'"))
}

// edit interface <interface-name>
fn edit_interface(ctx: &mut Ctx, words: &[String]) -> Result<()> {
    let name = arg(words, 2)?.to_string();
    ctx.set_prefix(["interface".to_string(), name]);
    Ok(())
}

fn top(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    ctx.clear_prefix();
    Ok(())
}

fn show(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    let candidate = &ctx.state().candidate;
    let lines = if candidate.is_empty() {
        vec!["  no configuration".to_string()]
    } else {
        candidate.set_commands()
    };
    let out = ctx.out();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn exit(ctx: &mut Ctx, _words: &[String]) -> Result<()> {
    ctx.clear_prefix();
    ctx.exit();
    Ok(())
}

#[cfg(test)]
#[path = "configure_tests.rs"]
mod tests;
