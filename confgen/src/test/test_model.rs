// Confgen: Compiling Network Designs into Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Test the network model and its overlays.

use crate::model::*;
use lazy_static::lazy_static;
use maplit::btreemap;
use pretty_assertions::assert_eq;

lazy_static! {
    static ref R1: DeviceId = 0.into();
    static ref R2: DeviceId = 1.into();
    static ref R3: DeviceId = 2.into();
    static ref SW: DeviceId = 3.into();
    static ref L12: LinkId = 0.into();
    static ref L13: LinkId = 1.into();
    static ref L23: LinkId = 2.into();
    static ref L1S: LinkId = 3.into();
    static ref L12B: LinkId = 4.into();
}

/// # Test model
///
/// ```text
///  R1 ====== R2     (two parallel links)
///  | \      /
///  |  \    /
///  SW   R3
/// ```
fn get_test_model() -> NetworkModel {
    let mut model = NetworkModel::new();

    assert_eq!(*R1, model.add_device(PhyNode::router("r1").with_asn(AsId(100)).on_host("h1")));
    assert_eq!(*R2, model.add_device(PhyNode::router("r2").with_asn(AsId(100)).on_host("h2")));
    assert_eq!(*R3, model.add_device(PhyNode::router("r3").with_asn(AsId(200)).on_host("h1")));
    assert_eq!(*SW, model.add_device(PhyNode::switch("sw")));

    assert_eq!(*L12, model.add_link(*R1, *R2).unwrap());
    assert_eq!(*L13, model.add_link(*R1, *R3).unwrap());
    assert_eq!(*L23, model.add_link(*R2, *R3).unwrap());
    assert_eq!(*L1S, model.add_link(*SW, *R1).unwrap());
    assert_eq!(*L12B, model.add_link(*R2, *R1).unwrap());

    model
}

#[test]
fn test_device_lookup() {
    let model = get_test_model();

    assert_eq!(model.device_id("r1"), Ok(*R1));
    assert_eq!(model.device_id("sw"), Ok(*SW));
    assert_eq!(model.device_id("r9"), Err(ModelError::DeviceNameNotFound("r9".to_string())));
    assert_eq!(model.label(*R3), Ok("r3"));
    assert_eq!(model.devices(), vec![*R1, *R2, *R3, *SW]);
    assert!(model.phy_node(*R1).unwrap().is_router());
    assert!(!model.phy_node(*SW).unwrap().is_router());
    assert!(!model.phy_node(*SW).unwrap().is_l3device());
}

#[test]
fn test_duplicate_name() {
    let mut model = get_test_model();
    assert_eq!(
        model.try_add_device(PhyNode::router("r1")),
        Err(ModelError::DuplicateDeviceName("r1".to_string()))
    );
    assert!(model.try_add_device(PhyNode::router("r4")).is_ok());
}

#[test]
fn test_links() {
    let model = get_test_model();

    assert_eq!(model.links_of(*R1), vec![*L12, *L13, *L1S, *L12B]);
    assert_eq!(model.links_of(*R3), vec![*L13, *L23]);
    assert_eq!(model.links_between(*R1, *R2), vec![*L12, *L12B]);
    assert_eq!(model.links_between(*R2, *R1), vec![*L12, *L12B]);
    assert_eq!(model.links_between(*R3, *SW), Vec::<LinkId>::new());

    assert_eq!(model.neighbor(*R1, *L1S), Ok(*SW));
    assert_eq!(model.neighbor(*SW, *L1S), Ok(*R1));
    assert_eq!(model.neighbor(*R3, *L12), Err(ModelError::NotAnEndpoint(*R3, *L12)));
}

#[test]
fn test_hosts() {
    let model = get_test_model();
    assert_eq!(model.hosts(), vec!["h1", "h2"]);
}

#[test]
fn test_overlay_membership() {
    let mut model = get_test_model();

    model.set_loopback(*R1, "192.168.0.1".parse().unwrap()).unwrap();
    model.add_ip_node(*SW).unwrap();
    model.add_ospf_node(*R1).unwrap();
    model.add_ospf_link(*L13, OspfArea(0), 10).unwrap();
    model.add_isis_node(*R3, 1, "49.0001.0000.0000.0003.00").unwrap();
    model.add_isis_link(*L23).unwrap();

    for id in OverlayId::ALL.iter() {
        assert_eq!(model.has_node(*id, *R1), *id != OverlayId::Bgp && *id != OverlayId::Isis);
    }
    assert!(model.has_node(OverlayId::Ip, *SW));
    assert!(model.has_node(OverlayId::Isis, *R3));
    assert!(model.overlay(OverlayId::Ospf).has_edge(*L13));
    assert!(!model.overlay(OverlayId::Ospf).has_edge(*L12));
    assert!(model.overlay(OverlayId::Isis).has_edge(*L23));
    assert!(model.overlay(OverlayId::Physical).has_edge(*L12B));

    assert_eq!(model.ip().node(*R1).unwrap().loopback, Some("192.168.0.1".parse().unwrap()));
    assert_eq!(model.ip().node(*SW).unwrap().loopback, None);
    assert_eq!(model.ospf().edge(*L13), Some(&OspfLink { area: OspfArea(0), cost: 10 }));
    assert_eq!(model.isis().node(*R3).unwrap().process_id, 1);
}

#[test]
fn test_ip_link() {
    let mut model = get_test_model();
    let subnet: ipnet::Ipv4Net = "10.0.0.0/24".parse().unwrap();

    model
        .add_ip_link(*L1S, subnet, &[(*R1, "10.0.0.1".parse().unwrap())])
        .unwrap();
    let ip_link = model.ip().edge(*L1S).unwrap();
    assert_eq!(ip_link.subnet, subnet);
    assert_eq!(ip_link.addresses, btreemap! {*R1 => "10.0.0.1".parse().unwrap()});
    assert_eq!(ip_link.address_of(*SW), None);

    // address of a device which is not an endpoint
    assert_eq!(
        model.add_ip_link(*L23, subnet, &[(*R1, "10.0.0.5".parse().unwrap())]),
        Err(ModelError::NotAnEndpoint(*R1, *L23))
    );
}

#[test]
fn test_single_edge_per_link() {
    let mut model = get_test_model();
    let subnet: ipnet::Ipv4Net = "10.0.0.0/30".parse().unwrap();

    model.add_ip_link(*L12, subnet, &[]).unwrap();
    assert_eq!(
        model.add_ip_link(*L12, subnet, &[]),
        Err(ModelError::DuplicateOverlayEdge(OverlayId::Ip, *L12))
    );

    model.add_ospf_link(*L12, OspfArea(0), 1).unwrap();
    assert_eq!(
        model.add_ospf_link(*L12, OspfArea(1), 1),
        Err(ModelError::DuplicateOverlayEdge(OverlayId::Ospf, *L12))
    );
}

#[test]
fn test_bgp_sessions() {
    let mut model = get_test_model();

    model.add_bgp_session(BgpSession::ibgp(*R1, *R2, Some(RrDirection::Down))).unwrap();
    model.add_bgp_session(BgpSession::ebgp(*R1, *R3).via(*L13)).unwrap();
    model.add_bgp_session(BgpSession::ibgp(*R2, *R1, Some(RrDirection::Up))).unwrap();

    assert!(model.has_node(OverlayId::Bgp, *R1));
    assert!(model.has_node(OverlayId::Bgp, *R3));
    assert!(!model.has_node(OverlayId::Bgp, *SW));
    assert!(model.overlay(OverlayId::Bgp).has_edge(*L13));

    let targets: Vec<DeviceId> = model.bgp().sessions_of(*R1).map(|s| s.target).collect();
    assert_eq!(targets, vec![*R2, *R3]);
    assert_eq!(model.bgp().sessions().len(), 3);

    assert_eq!(
        model.add_bgp_session(BgpSession::ebgp(*R1, *R1)),
        Err(ModelError::BgpSessionToSelf(*R1))
    );
    assert_eq!(
        model.add_bgp_session(BgpSession::ebgp(*R1, *R3).via(*L23)),
        Err(ModelError::NotAnEndpoint(*R1, *L23))
    );
}
