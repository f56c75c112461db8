// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Address and network parsing for value tokens.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Prefix length written as plain decimal digits.
fn decimal_len(len: &str) -> Option<u8> {
    if len.is_empty() || len.len() > 3 || !len.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    len.parse().ok()
}

/// Split `addr/len` into its parts.
fn split_prefix(word: &str) -> Option<(&str, u8)> {
    let (addr, len) = word.split_once('/')?;
    Some((addr, decimal_len(len)?))
}

/// Prefix length of a netmask (`255.255.255.0`) or, failing that, of a
/// host mask (`0.0.0.255`).
fn ipv4_mask_len(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits.leading_ones() + bits.trailing_zeros() == 32 {
        return u8::try_from(bits.leading_ones()).ok();
    }
    let inverse = !bits;
    (inverse.leading_ones() + inverse.trailing_zeros() == 32)
        .then(|| u8::try_from(inverse.leading_ones()).ok())
        .flatten()
}

/// Split an IPv4 `addr/len`, `addr/netmask` or `addr/hostmask`.
fn split_ipv4_prefix(word: &str) -> Option<(Ipv4Addr, u8)> {
    let (addr, mask) = word.split_once('/')?;
    let addr: Ipv4Addr = addr.parse().ok()?;
    let len = match mask.parse::<Ipv4Addr>() {
        Ok(mask) => ipv4_mask_len(mask)?,
        Err(_) => decimal_len(mask)?,
    };
    (len <= 32).then_some((addr, len))
}

/// Parse a strict IPv4 network: host bits below the prefix must be zero.
pub(crate) fn parse_ipv4_network(word: &str) -> Option<(Ipv4Addr, u8)> {
    let (addr, len) = split_ipv4_prefix(word)?;
    let host_mask = u32::MAX.checked_shr(u32::from(len)).unwrap_or(0);
    (u32::from(addr) & host_mask == 0).then_some((addr, len))
}

/// Parse a strict IPv6 network: host bits below the prefix must be zero.
pub(crate) fn parse_ipv6_network(word: &str) -> Option<(Ipv6Addr, u8)> {
    let (addr, len) = split_prefix(word)?;
    if len > 128 {
        return None;
    }
    let addr: Ipv6Addr = addr.parse().ok()?;
    let host_mask = u128::MAX.checked_shr(u32::from(len)).unwrap_or(0);
    (u128::from(addr) & host_mask == 0).then_some((addr, len))
}

/// Parse an interface address (`192.0.2.1/24`, `2001:db8::1/64`); host bits
/// may be set.
pub(crate) fn parse_address_prefix(word: &str) -> Option<(IpAddr, u8)> {
    if let Some((addr, len)) = split_ipv4_prefix(word) {
        return Some((IpAddr::V4(addr), len));
    }
    let (addr, len) = split_prefix(word)?;
    let addr: Ipv6Addr = addr.parse().ok()?;
    (len <= 128).then_some((IpAddr::V6(addr), len))
}

#[cfg(test)]
#[path = "addr_tests.rs"]
mod tests;
