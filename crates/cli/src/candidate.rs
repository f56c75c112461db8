// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory candidate configuration edited by the configure shell.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMapAction {
    Permit,
    Deny,
}

impl RouteMapAction {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "permit" => Some(RouteMapAction::Permit),
            "deny" => Some(RouteMapAction::Deny),
            _ => None,
        }
    }
}

impl fmt::Display for RouteMapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteMapAction::Permit => "permit",
            RouteMapAction::Deny => "deny",
        })
    }
}

/// Settings of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub address: Option<String>,
    pub mtu: Option<u32>,
    pub description: Option<String>,
}

impl InterfaceConfig {
    fn is_empty(&self) -> bool {
        self.address.is_none() && self.mtu.is_none() && self.description.is_none()
    }
}

/// An interface setting that can be deleted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceField {
    Address,
    Mtu,
    Description,
}

impl InterfaceField {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "address" => Some(InterfaceField::Address),
            "mtu" => Some(InterfaceField::Mtu),
            "description" => Some(InterfaceField::Description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateConfig {
    pub router_id: Option<Ipv4Addr>,
    pub route_maps: BTreeMap<String, RouteMapAction>,
    pub interfaces: BTreeMap<String, InterfaceConfig>,
    /// Destination network to next hop.
    pub static_routes: BTreeMap<String, Ipv4Addr>,
}

impl CandidateConfig {
    pub fn interface_mut(&mut self, name: &str) -> &mut InterfaceConfig {
        self.interfaces.entry(name.to_string()).or_default()
    }

    /// Remove one setting, dropping the interface once nothing is left.
    /// Returns false if there was nothing to delete.
    pub fn delete_interface_field(&mut self, name: &str, field: InterfaceField) -> bool {
        let Some(interface) = self.interfaces.get_mut(name) else {
            return false;
        };
        let removed = match field {
            InterfaceField::Address => interface.address.take().is_some(),
            InterfaceField::Mtu => interface.mtu.take().is_some(),
            InterfaceField::Description => interface.description.take().is_some(),
        };
        if interface.is_empty() {
            self.interfaces.remove(name);
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.router_id.is_none()
            && self.route_maps.is_empty()
            && self.interfaces.is_empty()
            && self.static_routes.is_empty()
    }

    /// Configuration as the `set` commands that would recreate it.
    pub fn set_commands(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(id) = self.router_id {
            lines.push(format!("set router-id {id}"));
        }
        for (name, action) in &self.route_maps {
            lines.push(format!("set route-map {name} {action}"));
        }
        for (name, interface) in &self.interfaces {
            if let Some(address) = &interface.address {
                lines.push(format!("set interface {name} address {address}"));
            }
            if let Some(mtu) = interface.mtu {
                lines.push(format!("set interface {name} mtu {mtu}"));
            }
            if let Some(description) = &interface.description {
                lines.push(format!("set interface {name} description {description}"));
            }
        }
        for (network, next_hop) in &self.static_routes {
            lines.push(format!("set static-route {network} next-hop {next_hop}"));
        }
        lines
    }
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod tests;
