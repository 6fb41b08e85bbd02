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

//! Test the device compilers on single devices.

use crate::compiler::*;
use crate::config::CompilerConfig;
use crate::model::*;
use crate::platform::{allocate_interfaces, InterfaceAllocator, InterfaceScheme};
use crate::store::*;
use ipnet::Ipv4Net;
use lazy_static::lazy_static;
use pretty_assertions::assert_eq;
use std::net::Ipv4Addr;

lazy_static! {
    static ref R1: DeviceId = 0.into();
    static ref R2: DeviceId = 1.into();
    static ref R3: DeviceId = 2.into();
    static ref R4: DeviceId = 3.into();
    static ref R5: DeviceId = 4.into();
    static ref E3: DeviceId = 5.into();
    static ref E2B: DeviceId = 6.into();
    static ref E2A: DeviceId = 7.into();
}

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn net(s: &str) -> Ipv4Net {
    s.parse().unwrap()
}

fn scheme(syntax: Syntax) -> InterfaceScheme {
    match syntax {
        Syntax::Quagga => InterfaceScheme::Netkit,
        Syntax::Ios => InterfaceScheme::Ios,
        Syntax::Ios2 => InterfaceScheme::Ios2,
        Syntax::Junos => InterfaceScheme::Junosphere,
    }
}

/// Allocate the interfaces of the device and compile it with the given configuration.
fn compile_with(
    model: &NetworkModel,
    device: DeviceId,
    syntax: Syntax,
    config: &CompilerConfig,
) -> (Result<CompiledDevice, CompileError>, Vec<CompileWarning>) {
    let mut node = CompiledDevice::new(device, model.phy_node(device).unwrap().name.clone());
    allocate_interfaces(model, &mut node, &mut InterfaceAllocator::new(scheme(syntax))).unwrap();
    let mut warnings = Vec::new();
    let result = compile_device(device_compiler(syntax), model, config, &mut node, &mut warnings)
        .map(|_| node);
    (result, warnings)
}

fn compile(
    model: &NetworkModel,
    device: DeviceId,
    syntax: Syntax,
) -> (Result<CompiledDevice, CompileError>, Vec<CompileWarning>) {
    compile_with(model, device, syntax, &CompilerConfig::default())
}

/// # BGP test model
///
/// All routers `r*` are in AS 100, and peer with `r1` over iBGP (no physical links needed). `r2`
/// is a route-reflector of `r1`, `r3` is a client of `r1`, `r4` has no loopback. The external
/// routers are connected to `r1` by a single addressed link each.
///
/// ```text
///   e3 (AS 300)    e2b (AS 200)    e2a (AS 200)
///     \  10.0.3.0/30  |  10.0.2.0/30  /  10.0.1.0/30
///      '------------- r1 ------------'
///
///   r2 (up), r3 (down), r4 (no loopback), r5: iBGP peers of r1
/// ```
///
/// The sessions of `r1` are configured in the order: r2, r3, r4, r5, e3, e2b, e2a.
fn get_bgp_model() -> NetworkModel {
    let mut model = NetworkModel::new();

    assert_eq!(*R1, model.add_device(PhyNode::router("r1").with_asn(AsId(100))));
    assert_eq!(*R2, model.add_device(PhyNode::router("r2").with_asn(AsId(100))));
    assert_eq!(*R3, model.add_device(PhyNode::router("r3").with_asn(AsId(100))));
    assert_eq!(*R4, model.add_device(PhyNode::router("r4").with_asn(AsId(100))));
    assert_eq!(*R5, model.add_device(PhyNode::router("r5").with_asn(AsId(100))));
    assert_eq!(*E3, model.add_device(PhyNode::router("e3").with_asn(AsId(300))));
    assert_eq!(*E2B, model.add_device(PhyNode::router("e2b").with_asn(AsId(200))));
    assert_eq!(*E2A, model.add_device(PhyNode::router("e2a").with_asn(AsId(200))));

    model.set_loopback(*R1, ip("192.168.0.1")).unwrap();
    model.set_loopback(*R2, ip("192.168.0.2")).unwrap();
    model.set_loopback(*R3, ip("192.168.0.3")).unwrap();
    model.add_ip_node(*R4).unwrap();
    model.set_loopback(*R5, ip("192.168.0.5")).unwrap();
    model.set_loopback(*E3, ip("192.168.3.1")).unwrap();

    for (peer, i) in [(*E3, 3), (*E2B, 2), (*E2A, 1)].iter().copied() {
        let link = model.add_link(*R1, peer).unwrap();
        model
            .add_ip_link(
                link,
                net(&format!("10.0.{}.0/30", i)),
                &[(*R1, ip(&format!("10.0.{}.1", i))), (peer, ip(&format!("10.0.{}.2", i)))],
            )
            .unwrap();
    }

    model.set_asn_blocks(AsId(100), vec![net("10.100.0.0/16")]);

    model.add_bgp_session(BgpSession::ibgp(*R1, *R2, Some(RrDirection::Up))).unwrap();
    model.add_bgp_session(BgpSession::ibgp(*R1, *R3, Some(RrDirection::Down))).unwrap();
    model.add_bgp_session(BgpSession::ibgp(*R1, *R4, None)).unwrap();
    model.add_bgp_session(BgpSession::ibgp(*R1, *R5, None)).unwrap();
    model.add_bgp_session(BgpSession::ebgp(*R1, *E3)).unwrap();
    model.add_bgp_session(BgpSession::ebgp(*R1, *E2B)).unwrap();
    model.add_bgp_session(BgpSession::ebgp(*R1, *E2A)).unwrap();

    model
}

fn ibgp(label: &str, loopback: &str) -> BgpNeighbor {
    BgpNeighbor {
        neighbor: label.to_string(),
        asn: AsId(100),
        loopback: ip(loopback),
        update_source: "loopback 0".to_string(),
    }
}

#[test]
fn test_bgp_classification() {
    let model = get_bgp_model();
    let (result, warnings) = compile(&model, *R1, Syntax::Quagga);
    let node = result.unwrap();
    let bgp = node.bgp.unwrap();

    assert_eq!(bgp.asn, AsId(100));
    assert_eq!(bgp.advertise_subnets, vec![net("10.100.0.0/16")]);
    assert_eq!(bgp.ibgp_rr_parents, vec![ibgp("r2", "192.168.0.2")]);
    assert_eq!(bgp.ibgp_rr_clients, vec![ibgp("r3", "192.168.0.3")]);
    assert_eq!(bgp.ibgp_neighbors, vec![ibgp("r5", "192.168.0.5")]);
    assert_eq!(bgp.lo_interface, None);

    // r4 has no loopback
    assert_eq!(
        warnings,
        vec![CompileWarning {
            device: *R1,
            step: CompileStep::Bgp,
            kind: WarningKind::MissingPeerLoopback("r4".to_string())
        }]
    );

    // r1 is not part of the OSPF overlay
    assert_eq!(node.ospf, None);
    assert_eq!(node.isis, None);
}

#[test]
fn test_ebgp_sorted_by_asn() {
    let model = get_bgp_model();
    let bgp = compile(&model, *R1, Syntax::Quagga).0.unwrap().bgp.unwrap();

    let peers: Vec<&str> = bgp.ebgp_neighbors.iter().map(|n| n.neighbor.as_str()).collect();
    // stable: e2b was configured before e2a
    assert_eq!(peers, vec!["e2b", "e2a", "e3"]);

    assert_eq!(
        bgp.ebgp_neighbors[0],
        EbgpNeighbor {
            neighbor: "e2b".to_string(),
            asn: AsId(200),
            loopback: None,
            local_int_ip: ip("10.0.2.1"),
            dst_int_ip: ip("10.0.2.2"),
            update_source: "lo0:1".to_string(),
        }
    );
    assert_eq!(bgp.ebgp_neighbors[2].asn, AsId(300));
    assert_eq!(bgp.ebgp_neighbors[2].loopback, Some(ip("192.168.3.1")));
    assert_eq!(bgp.ebgp_neighbors[2].local_int_ip, ip("10.0.3.1"));
}

#[test]
fn test_recompile_is_identical() {
    let model = get_bgp_model();
    let (a, wa) = compile(&model, *R1, Syntax::Quagga);
    let (b, wb) = compile(&model, *R1, Syntax::Quagga);
    assert_eq!(a, b);
    assert_eq!(wa, wb);

    // compiling into the same record again does not change it
    let mut node = a.unwrap();
    let before = node.clone();
    let config = CompilerConfig::default();
    compile_device(device_compiler(Syntax::Quagga), &model, &config, &mut node, &mut Vec::new())
        .unwrap();
    assert_eq!(node, before);
}

#[test]
fn test_missing_as_blocks() {
    let mut model = get_bgp_model();
    model.set_asn_blocks(AsId(100), vec![]);
    let mut model_without = NetworkModel::new();
    let r = model_without.add_device(PhyNode::router("r").with_asn(AsId(400)));
    model_without.set_loopback(r, ip("192.168.0.9")).unwrap();
    model_without.add_bgp_node(r).unwrap();

    // empty entry: nothing to warn about
    let (result, _) = compile(&model, *R1, Syntax::Quagga);
    assert!(result.unwrap().bgp.unwrap().advertise_subnets.is_empty());

    // no entry at all
    let (result, warnings) = compile(&model_without, r, Syntax::Quagga);
    let bgp = result.unwrap().bgp.unwrap();
    assert!(bgp.advertise_subnets.is_empty());
    assert!(bgp.ebgp_neighbors.is_empty());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::MissingAsBlocks(AsId(400)));
}

#[test]
fn test_missing_asn() {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1"));
    model.set_loopback(r1, ip("192.168.0.1")).unwrap();
    model.add_bgp_node(r1).unwrap();

    let err = compile(&model, r1, Syntax::Quagga).0.unwrap_err();
    assert_eq!(err.device, r1);
    assert_eq!(err.label, "r1");
    assert_eq!(err.step, CompileStep::Bgp);
    assert_eq!(
        err.kind,
        CompileErrorKind::MissingAttribute { device: "r1".to_string(), attribute: "asn" }
    );
}

/// # eBGP adjacency model
///
/// ```text
///        10.0.0.0/30
///      .------------.
///   r1               r2
///      '------------'
///        10.0.1.0/30
///   r1 ------------- r3   (not addressed)
/// ```
fn get_adjacency_model(via: Option<usize>) -> (NetworkModel, [DeviceId; 3], [LinkId; 3]) {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1").with_asn(AsId(100)));
    let r2 = model.add_device(PhyNode::router("r2").with_asn(AsId(200)));
    let r3 = model.add_device(PhyNode::router("r3").with_asn(AsId(300)));
    model.set_loopback(r1, ip("192.168.0.1")).unwrap();

    let l0 = model.add_link(r1, r2).unwrap();
    let l1 = model.add_link(r2, r1).unwrap();
    let l2 = model.add_link(r1, r3).unwrap();
    model
        .add_ip_link(l0, net("10.0.0.0/30"), &[(r1, ip("10.0.0.1")), (r2, ip("10.0.0.2"))])
        .unwrap();
    model
        .add_ip_link(l1, net("10.0.1.0/30"), &[(r1, ip("10.0.1.1")), (r2, ip("10.0.1.2"))])
        .unwrap();
    model.set_asn_blocks(AsId(100), vec![]);

    let links = [l0, l1, l2];
    let mut session = BgpSession::ebgp(r1, r2);
    if let Some(i) = via {
        session = session.via(links[i]);
    }
    model.add_bgp_session(session).unwrap();
    model.add_bgp_session(BgpSession::ebgp(r1, r3)).unwrap();

    (model, [r1, r2, r3], links)
}

#[test]
fn test_ambiguous_adjacency() {
    let (model, [r1, _, _], [l0, l1, _]) = get_adjacency_model(None);
    let err = compile(&model, r1, Syntax::Quagga).0.unwrap_err();
    assert_eq!(err.step, CompileStep::Bgp);
    assert_eq!(
        err.kind,
        CompileErrorKind::AmbiguousAdjacency { peer: "r2".to_string(), links: vec![l0, l1] }
    );
}

#[test]
fn test_adjacency_via_link() {
    let (model, [r1, _, _], _) = get_adjacency_model(Some(1));
    let (result, warnings) = compile(&model, r1, Syntax::Quagga);
    let bgp = result.unwrap().bgp.unwrap();

    assert_eq!(bgp.ebgp_neighbors.len(), 1);
    assert_eq!(bgp.ebgp_neighbors[0].neighbor, "r2");
    assert_eq!(bgp.ebgp_neighbors[0].local_int_ip, ip("10.0.1.1"));
    assert_eq!(bgp.ebgp_neighbors[0].dst_int_ip, ip("10.0.1.2"));

    // r3 is connected, but not addressed. The link is also skipped as interface.
    let kinds: Vec<&WarningKind> = warnings.iter().map(|w| &w.kind).collect();
    assert!(kinds.contains(&&WarningKind::UnaddressedEbgpPeer("r3".to_string())));
    assert_eq!(
        warnings.iter().filter(|w| w.step == CompileStep::Interfaces).count(),
        1,
        "{:?}",
        warnings
    );
}

/// # OSPF test model
///
/// Three links of `r1` belong to the same collision domain `192.168.1.0/24`, one more link is in
/// area 1, and the link to `r6` is in the OSPF overlay but not addressed.
///
/// ```text
///        r2   r3   r4
///         \   |   /         192.168.1.0/24, area 0, cost 10
///          '- r1 -'
///            /  \
///          r5    r6          10.0.0.0/30, area 1, cost 20 / not addressed
/// ```
fn get_ospf_model() -> (NetworkModel, DeviceId) {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1"));
    model.set_loopback(r1, ip("192.168.0.1")).unwrap();
    model.add_ospf_node(r1).unwrap();

    for i in 2..=4 {
        let r = model.add_device(PhyNode::router(format!("r{}", i)));
        let link = model.add_link(r1, r).unwrap();
        model
            .add_ip_link(
                link,
                net("192.168.1.0/24"),
                &[(r1, ip("192.168.1.1")), (r, ip(&format!("192.168.1.{}", i)))],
            )
            .unwrap();
        model.add_ospf_link(link, OspfArea(0), 10).unwrap();
    }

    let r5 = model.add_device(PhyNode::router("r5"));
    let link = model.add_link(r1, r5).unwrap();
    model.add_ip_link(link, net("10.0.0.0/30"), &[(r1, ip("10.0.0.1"))]).unwrap();
    model.add_ospf_link(link, OspfArea(1), 20).unwrap();

    let r6 = model.add_device(PhyNode::router("r6"));
    let link = model.add_link(r1, r6).unwrap();
    model.add_ospf_link(link, OspfArea(0), 1).unwrap();

    (model, r1)
}

#[test]
fn test_ospf_dedup() {
    let (model, r1) = get_ospf_model();
    let (result, warnings) = compile(&model, r1, Syntax::Quagga);
    let node = result.unwrap();

    assert_eq!(
        node.ospf,
        Some(OspfConfig {
            process_id: 1,
            lo_interface: "lo0:1".to_string(),
            ospf_links: vec![
                OspfNetwork { network: net("192.168.1.0/24"), area: OspfArea(0) },
                OspfNetwork { network: net("10.0.0.0/30"), area: OspfArea(1) },
            ],
        })
    );

    // the link to r6 is skipped in both steps
    let steps: Vec<CompileStep> = warnings.iter().map(|w| w.step).collect();
    assert_eq!(steps, vec![CompileStep::Interfaces, CompileStep::Ospf]);
}

#[test]
fn test_ospf_cost_and_process_id() {
    let (model, r1) = get_ospf_model();
    let config = CompilerConfig { ospf_process_id: 42, ..Default::default() };
    let node = compile_with(&model, r1, Syntax::Quagga, &config).0.unwrap();

    assert_eq!(node.ospf.unwrap().process_id, 42);
    let costs: Vec<(&str, Option<u32>)> =
        node.interfaces.iter().map(|i| (i.id.as_str(), i.ospf_cost)).collect();
    assert_eq!(
        costs,
        vec![
            ("eth0", Some(10)),
            ("eth1", Some(10)),
            ("eth2", Some(10)),
            ("eth3", Some(20)),
            ("lo0:1", None)
        ]
    );
}

#[test]
fn test_interfaces() {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1").with_label("core.r1"));
    let r2 = model.add_device(PhyNode::router("r2"));
    model.set_loopback(r1, ip("192.168.0.1")).unwrap();

    // 12 parallel links, all but the fourth addressed
    for i in 0..12 {
        let link = model.add_link(r1, r2).unwrap();
        if i != 3 {
            let subnet = net(&format!("10.0.{}.0/30", i));
            model.add_ip_link(link, subnet, &[(r1, ip(&format!("10.0.{}.1", i)))]).unwrap();
        }
    }

    let (result, warnings) = compile(&model, r1, Syntax::Quagga);
    let node = result.unwrap();
    assert_eq!(node.label, "core_r1");
    assert_eq!(node.input_label, "r1");
    assert_eq!(node.loopback_subnet, Some(net("192.168.0.1/32")));

    let ids: Vec<&str> = node.interfaces.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "eth0", "eth1", "eth2", "eth4", "eth5", "eth6", "eth7", "eth8", "eth9", "eth10",
            "eth11", "lo0:1"
        ]
    );

    let link3 = model.links_of(r1)[3];
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::MissingAdjacencyAddressing(link3));
    assert!(node.interface_on(link3).is_none());

    let eth10 = &node.interfaces[9];
    assert_eq!(eth10.description, "core.r1 to r2");
    assert_eq!(eth10.ip_address, ip("10.0.10.1"));
    assert_eq!(eth10.subnet, net("10.0.10.0/30"));
    assert_eq!(eth10.edge, Some(model.links_of(r1)[10]));

    let lo = node.interfaces.last().unwrap();
    assert_eq!(lo.description, "Loopback for BGP");
    assert_eq!(lo.ip_address, ip("192.168.0.1"));
    assert_eq!(lo.subnet, net("192.168.0.1/32"));
    assert_eq!(lo.edge, None);
}

#[test]
fn test_interfaces_sorted_by_id() {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1"));
    model.set_loopback(r1, ip("192.168.0.1")).unwrap();
    for i in 0..3 {
        let r = model.add_device(PhyNode::router(format!("n{}", i)));
        let link = model.add_link(r1, r).unwrap();
        let subnet = net(&format!("10.0.{}.0/30", i));
        model.add_ip_link(link, subnet, &[(r1, ip(&format!("10.0.{}.1", i)))]).unwrap();
    }

    // interface ids assigned in reverse link order
    let mut node = CompiledDevice::new(r1, "r1");
    for (i, link) in model.links_of(r1).into_iter().enumerate() {
        node.interface_ids.insert(link, InterfaceId::new(2 - i, format!("eth{}", 2 - i)));
    }
    let config = CompilerConfig::default();
    compile_device(device_compiler(Syntax::Junos), &model, &config, &mut node, &mut Vec::new())
        .unwrap();

    let descriptions: Vec<&str> = node.interfaces.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(descriptions, vec!["r1 to n2", "r1 to n1", "r1 to n0"]);
}

#[test]
fn test_missing_interface_id() {
    let (model, r1) = get_ospf_model();
    let mut node = CompiledDevice::new(r1, "r1");
    let config = CompilerConfig::default();
    let err =
        compile_device(device_compiler(Syntax::Quagga), &model, &config, &mut node, &mut Vec::new())
            .unwrap_err();
    assert_eq!(err.step, CompileStep::Interfaces);
    assert_eq!(err.kind, CompileErrorKind::MissingInterfaceId(model.links_of(r1)[0]));
}

#[test]
fn test_missing_loopback() {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1"));
    model.add_ip_node(r1).unwrap();

    let err = compile(&model, r1, Syntax::Ios).0.unwrap_err();
    assert_eq!(
        err,
        CompileError::new(r1, "r1", CompileStep::Device, CompileErrorKind::MissingAddress)
    );
}

#[test]
fn test_quagga_loopback_only_on_routers() {
    let mut model = NetworkModel::new();
    let s1 = model.add_device(PhyNode::new("s1", DeviceKind::Server));
    model.set_loopback(s1, ip("192.168.0.1")).unwrap();

    let node = compile(&model, s1, Syntax::Quagga).0.unwrap();
    assert!(node.interfaces.is_empty());

    // IOS always adds the loopback
    let node = compile(&model, s1, Syntax::Ios).0.unwrap();
    assert_eq!(node.interfaces.len(), 1);
    assert_eq!(node.interfaces[0].id, "Loopback0");
}

/// # ISIS test model
///
/// ```text
///              10.0.0.0/30
///   r1 (AS 100) --------- r2 (AS 200)
///              ospf cost 7, isis
/// ```
fn get_isis_model() -> (NetworkModel, DeviceId) {
    let mut model = NetworkModel::new();
    let r1 = model.add_device(PhyNode::router("r1").with_asn(AsId(100)));
    let r2 = model.add_device(PhyNode::router("r2").with_asn(AsId(200)));
    model.set_loopback(r1, ip("192.168.0.1")).unwrap();
    model.set_loopback(r2, ip("192.168.0.2")).unwrap();
    let link = model.add_link(r1, r2).unwrap();
    model
        .add_ip_link(link, net("10.0.0.0/30"), &[(r1, ip("10.0.0.1")), (r2, ip("10.0.0.2"))])
        .unwrap();
    model.add_ospf_node(r1).unwrap();
    model.add_ospf_link(link, OspfArea(0), 7).unwrap();
    model.add_isis_node(r1, 5, "49.0001.1921.6800.0001.00").unwrap();
    model.add_isis_link(link).unwrap();
    model.set_asn_blocks(AsId(100), vec![net("10.100.0.0/16")]);
    model.add_bgp_session(BgpSession::ebgp(r1, r2)).unwrap();
    (model, r1)
}

#[test]
fn test_ios() {
    let (model, r1) = get_isis_model();

    for syntax in [Syntax::Ios, Syntax::Ios2].iter().copied() {
        let (result, warnings) = compile(&model, r1, syntax);
        let node = result.unwrap();
        assert!(warnings.is_empty());

        assert_eq!(node.interfaces.len(), 2);
        let eth = &node.interfaces[0];
        assert_eq!(eth.ospf_cost, Some(7));
        assert!(eth.isis);
        assert_eq!(eth.isis_process_id, Some(5));
        let lo = &node.interfaces[1];
        assert_eq!(lo.id, "Loopback0");
        assert_eq!(lo.description, "Loopback");
        assert_eq!(lo.subnet, net("192.168.0.1/32"));
        assert!(!lo.isis);

        assert_eq!(node.ospf.unwrap().lo_interface, "Loopback0");
        let bgp = node.bgp.unwrap();
        assert_eq!(bgp.lo_interface.as_deref(), Some("Loopback0"));
        assert_eq!(bgp.ebgp_neighbors[0].update_source, "Loopback0");
        assert_eq!(
            node.isis,
            Some(IsisConfig { net: "49.0001.1921.6800.0001.00".to_string(), process_id: 5 })
        );
    }

    let node = compile(&model, r1, Syntax::Ios).0.unwrap();
    assert_eq!(node.interfaces[0].id, "Ethernet0/0");
    let node = compile(&model, r1, Syntax::Ios2).0.unwrap();
    assert_eq!(node.interfaces[0].id, "GigabitEthernet0/0/0");
}

#[test]
fn test_junos() {
    let (model, r1) = get_isis_model();
    let node = compile(&model, r1, Syntax::Junos).0.unwrap();

    // no loopback interface, and no annotations
    assert_eq!(node.interfaces.len(), 1);
    assert_eq!(node.interfaces[0].id, "ge-0/0/0");
    assert_eq!(node.interfaces[0].ospf_cost, None);
    assert!(!node.interfaces[0].isis);

    assert_eq!(node.ospf.unwrap().lo_interface, "lo0");
    assert_eq!(node.bgp.unwrap().ebgp_neighbors[0].update_source, "lo0");
    // Junos does not support ISIS
    assert_eq!(node.isis, None);
}

#[test]
fn test_quagga_ignores_isis() {
    let (model, r1) = get_isis_model();
    let node = compile(&model, r1, Syntax::Quagga).0.unwrap();
    assert_eq!(node.isis, None);
    assert!(!node.interfaces[0].isis);
    assert_eq!(node.interfaces[0].ospf_cost, Some(7));
}

#[test]
fn test_dialect_lookup() {
    for syntax in [Syntax::Quagga, Syntax::Ios, Syntax::Ios2, Syntax::Junos].iter().copied() {
        assert_eq!(device_compiler(syntax).syntax(), syntax);
    }
    assert_eq!(device_compiler(Syntax::Quagga).lo_interface(), "lo0:1");
    assert_eq!(device_compiler(Syntax::Ios).lo_interface(), "Loopback0");
    assert_eq!(device_compiler(Syntax::Ios2).lo_interface(), "Loopback0");
    assert_eq!(device_compiler(Syntax::Junos).lo_interface(), "lo0");
}
