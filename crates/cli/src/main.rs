// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nosh - network-device style shell

mod actions;
mod candidate;
mod configure;
mod device;
mod env;
mod operational;

use anyhow::Result;
use clap::Parser;
use device::Device;
use nosh_core::{load_tree, TreeBuilder};
use nosh_shell::{run, LineReader, ReadError, RustylineReader, Session, Stop};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(
    name = "nosh",
    version,
    about = "Network-device style shell with tab completion"
)]
struct Cli {
    /// Log at debug level and show full error chains
    #[arg(short, long)]
    debug: bool,

    /// Serve the commands of a TOML, JSON or HCL tree instead of the device shell
    #[arg(long, value_name = "FILE")]
    tree: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run_cli() {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid duplicate output (common when thiserror
/// variants use `#[error("... {0}")]` with `#[from]`).
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Logs go to stderr so they never interleave with completion listings.
fn init_logging(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match env::log_filter() {
        Some(directives) => EnvFilter::new(directives),
        None if debug => EnvFilter::new("debug"),
        None => EnvFilter::new("warn"),
    };

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let device = Device::from_env();
    tracing::debug!(user = %device.user, host = %device.host, "starting");
    match &cli.tree {
        Some(path) => run_tree(path, &device, cli.debug),
        None => run_device(&device, cli.debug),
    }
}

/// Single shell over a user-supplied tree, with the built-in actions.
fn run_tree(path: &Path, device: &Device, debug: bool) -> Result<()> {
    let tree = load_tree(path)?;
    let registry = actions::builtin();

    let prompt = device.prompt('>');
    let mut session = Session::new(())
        .with_prompt(move |_| prompt.clone())
        .with_debug(debug);
    let root = session.root();
    TreeBuilder::new(&registry)
        .interfaces(Rc::clone(&device.interfaces))
        .attach(session.graph_mut(), root, &tree)?;
    tracing::info!(path = %path.display(), "loaded command tree");

    let session = Rc::new(RefCell::new(session));
    let mut reader = RustylineReader::new(Rc::clone(&session))?;
    run(&session, &mut reader)?;
    Ok(())
}

/// Operational shell, switching to the configure shell on `configure`.
fn run_device(device: &Device, debug: bool) -> Result<()> {
    let operational = Rc::new(RefCell::new(
        operational::session(device)?.with_debug(debug),
    ));
    let configure = Rc::new(RefCell::new(configure::session(device)?.with_debug(debug)));
    let mut operational_reader = RustylineReader::new(Rc::clone(&operational))?;
    let mut configure_reader = RustylineReader::new(Rc::clone(&configure))?;

    alternate(
        &operational,
        &mut operational_reader,
        &configure,
        &mut configure_reader,
    )?;
    Ok(())
}

/// Run the operational shell until it exits; after `configure`, run the
/// configure shell and return to operational mode when it exits.
///
/// End of input in either shell ends both.
fn alternate<O, C>(
    operational: &RefCell<Session<operational::Operational>>,
    operational_reader: &mut O,
    configure: &RefCell<Session<configure::Configure>>,
    configure_reader: &mut C,
) -> Result<(), ReadError>
where
    O: LineReader + ?Sized,
    C: LineReader + ?Sized,
{
    loop {
        if run(operational, operational_reader)? == Stop::Eof {
            return Ok(());
        }
        let enter = std::mem::take(&mut operational.borrow_mut().state_mut().configure);
        if !enter {
            return Ok(());
        }

        tracing::debug!("entering configure mode");
        if run(configure, configure_reader)? == Stop::Eof {
            return Ok(());
        }
        tracing::debug!("leaving configure mode");
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
