// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Network interface name sources for interface tokens.

use std::fmt;

/// Supplies the live set of interface names.
///
/// Interface tokens query this on every match and completion, so the set
/// may change while a shell is running.
pub trait InterfaceSource: fmt::Debug {
    fn interface_names(&self) -> Vec<String>;
}

/// Enumerates the interfaces of the running system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interface_names(&self) -> Vec<String> {
        match if_addrs::get_if_addrs() {
            Ok(interfaces) => {
                // One entry per address; keep the first occurrence of each name
                let mut names: Vec<String> = Vec::new();
                for interface in interfaces {
                    if !names.contains(&interface.name) {
                        names.push(interface.name);
                    }
                }
                names
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to enumerate network interfaces");
                Vec::new()
            }
        }
    }
}

/// A fixed list of interface names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticInterfaces {
    names: Vec<String>,
}

impl StaticInterfaces {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list such as `eth0, eth1,lo`.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }
}

impl InterfaceSource for StaticInterfaces {
    fn interface_names(&self) -> Vec<String> {
        self.names.clone()
    }
}
