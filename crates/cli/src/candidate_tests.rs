// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn set_commands_are_ordered_by_section() {
    let mut config = CandidateConfig::default();
    config
        .static_routes
        .insert("10.0.0.0/8".into(), Ipv4Addr::new(192, 0, 2, 254));
    config.interface_mut("eth1").mtu = Some(9000);
    config.interface_mut("eth0").address = Some("192.0.2.1/24".into());
    config.interface_mut("eth0").description = Some("uplink".into());
    config.route_maps.insert("rm1".into(), RouteMapAction::Deny);
    config.router_id = Some(Ipv4Addr::new(192, 0, 2, 1));

    assert_eq!(
        config.set_commands(),
        vec![
            "set router-id 192.0.2.1",
            "set route-map rm1 deny",
            "set interface eth0 address 192.0.2.1/24",
            "set interface eth0 description uplink",
            "set interface eth1 mtu 9000",
            "set static-route 10.0.0.0/8 next-hop 192.0.2.254",
        ]
    );
}

#[test]
fn deleting_last_field_drops_interface() {
    let mut config = CandidateConfig::default();
    config.interface_mut("eth0").mtu = Some(1500);
    config.interface_mut("eth0").description = Some("lan".into());

    assert!(config.delete_interface_field("eth0", InterfaceField::Mtu));
    assert!(!config.delete_interface_field("eth0", InterfaceField::Mtu));
    assert!(config.interfaces.contains_key("eth0"));

    assert!(config.delete_interface_field("eth0", InterfaceField::Description));
    assert!(!config.interfaces.contains_key("eth0"));
    assert!(config.is_empty());
}

#[test]
fn delete_on_unknown_interface() {
    let mut config = CandidateConfig::default();
    assert!(!config.delete_interface_field("eth9", InterfaceField::Address));
}

#[yare::parameterized(
    permit  = { "permit", Some(RouteMapAction::Permit) },
    deny    = { "deny", Some(RouteMapAction::Deny) },
    unknown = { "allow", None },
)]
fn route_map_action(word: &str, expected: Option<RouteMapAction>) {
    assert_eq!(RouteMapAction::parse(word), expected);
}

#[yare::parameterized(
    address     = { "address", Some(InterfaceField::Address) },
    mtu         = { "mtu", Some(InterfaceField::Mtu) },
    description = { "description", Some(InterfaceField::Description) },
    unknown     = { "speed", None },
)]
fn interface_field(word: &str, expected: Option<InterfaceField>) {
    assert_eq!(InterfaceField::parse(word), expected);
}
