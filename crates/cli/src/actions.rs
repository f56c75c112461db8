// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions shared by both shells.

use anyhow::{bail, Context as _};
use nosh_core::ActionRegistry;
use nosh_shell::Context;
use std::ffi::OsStr;
use std::io::Write;
use std::process::Command;

/// Actions available to `--tree` files.
pub fn builtin<S: 'static>() -> ActionRegistry<Context<S>> {
    ActionRegistry::new()
        .with("print-args", print_args::<S>)
        .with("exit", exit::<S>)
}

/// Echo the matched command.
pub fn print_args<S>(ctx: &mut Context<S>, words: &[String]) -> anyhow::Result<()> {
    writeln!(ctx.out(), "execute command: {}", words.join(" "))?;
    Ok(())
}

pub fn exit<S>(ctx: &mut Context<S>, _words: &[String]) -> anyhow::Result<()> {
    ctx.exit();
    Ok(())
}

/// Run `program` and copy its stdout to the session output.
pub fn run_program<S, I, A>(ctx: &mut Context<S>, program: &str, args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    tracing::debug!(?command, "running");

    let output = command
        .output()
        .with_context(|| format!("failed to run {program}"))?;
    ctx.out().write_all(&output.stdout)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{program} exited with {}: {}", output.status, stderr.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nosh_shell::test_support::SharedBuffer;

    #[test]
    fn print_args_echoes_words() {
        let out = SharedBuffer::new();
        let mut ctx = Context::new(()).with_output(out.clone());
        print_args(&mut ctx, &["set".to_string(), "x".to_string()]).unwrap();
        assert_eq!(out.contents(), "execute command: set x\n");
    }

    #[test]
    fn builtin_names() {
        assert_eq!(builtin::<()>().names(), vec!["exit", "print-args"]);
    }

    #[test]
    fn missing_program_is_an_error() {
        let mut ctx = Context::new(()).with_output(SharedBuffer::new());
        let err = run_program(&mut ctx, "nosh-no-such-program", ["x"]).unwrap_err();
        assert_eq!(err.to_string(), "failed to run nosh-no-such-program");
    }
}
