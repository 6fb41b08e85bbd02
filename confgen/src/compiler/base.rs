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

//! Logic shared by all dialects

use super::{CompileErrorKind, DeviceContext, WarningKind};
use crate::model::{BgpSession, BgpSessionKind, DeviceId, LinkId, NetworkModel, RrDirection};
use crate::store::{
    BgpConfig, BgpNeighbor, CompiledDevice, CompiledInterface, EbgpNeighbor, InterfaceId,
    OspfConfig, OspfNetwork,
};

use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Update source of all iBGP sessions, which are established between loopbacks.
pub(super) const IBGP_UPDATE_SOURCE: &str = "loopback 0";

/// One interface per addressed physical link, sorted by interface id. Links without addressing
/// for this device are skipped with a warning.
pub(super) fn interfaces(
    cx: &mut DeviceContext<'_>,
    node: &CompiledDevice,
) -> Result<Vec<CompiledInterface>, CompileErrorKind> {
    let model = cx.model;
    let device = cx.device;
    let label = model.label(device)?;

    let mut interfaces: Vec<(&InterfaceId, CompiledInterface)> = Vec::new();
    for link in model.links_of(device) {
        let (subnet, ip_address) = match model.ip().edge(link) {
            Some(ip_link) => match ip_link.address_of(device) {
                Some(addr) => (ip_link.subnet, addr),
                None => {
                    cx.warn(WarningKind::MissingAdjacencyAddressing(link));
                    continue;
                }
            },
            None => {
                cx.warn(WarningKind::MissingAdjacencyAddressing(link));
                continue;
            }
        };
        let neighbor = model.neighbor(device, link)?;
        let id = node.interface_id(link).ok_or(CompileErrorKind::MissingInterfaceId(link))?;
        interfaces.push((
            id,
            CompiledInterface {
                id: id.name.clone(),
                edge: Some(link),
                description: format!("{} to {}", label, model.label(neighbor)?),
                ip_address,
                subnet,
                ospf_cost: None,
                isis: false,
                isis_process_id: None,
            },
        ));
    }

    interfaces.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(interfaces.into_iter().map(|(_, i)| i).collect())
}

/// Loopback interface of the device
pub(super) fn loopback_interface(
    node: &CompiledDevice,
    lo_interface: &str,
    description: &str,
) -> Result<CompiledInterface, CompileErrorKind> {
    match (node.loopback, node.loopback_subnet) {
        (Some(ip_address), Some(subnet)) => Ok(CompiledInterface {
            id: lo_interface.to_string(),
            edge: None,
            description: description.to_string(),
            ip_address,
            subnet,
            ospf_cost: None,
            isis: false,
            isis_process_id: None,
        }),
        _ => Err(CompileErrorKind::MissingAddress),
    }
}

/// Write the OSPF cost into every interface whose link is in the OSPF overlay.
pub(super) fn annotate_ospf_cost(model: &NetworkModel, interfaces: &mut [CompiledInterface]) {
    for interface in interfaces.iter_mut() {
        interface.ospf_cost =
            interface.edge.and_then(|link| model.ospf().edge(link)).map(|ospf| ospf.cost);
    }
}

/// Enable ISIS on every interface whose link is in the ISIS overlay.
pub(super) fn annotate_isis(
    model: &NetworkModel,
    device: DeviceId,
    interfaces: &mut [CompiledInterface],
) {
    let process_id = model.isis().node(device).map(|n| n.process_id);
    for interface in interfaces.iter_mut() {
        interface.isis = interface.edge.map(|l| model.isis().edge(l).is_some()).unwrap_or(false);
        interface.isis_process_id = if interface.isis { process_id } else { None };
    }
}

/// OSPF section: one network statement per distinct subnet, in link order.
pub(super) fn ospf(
    cx: &mut DeviceContext<'_>,
    lo_interface: &str,
) -> Result<OspfConfig, CompileErrorKind> {
    let model = cx.model;
    let mut added = HashSet::new();
    let mut ospf_links = Vec::new();

    for link in model.links_of(cx.device) {
        let ospf_link = match model.ospf().edge(link) {
            Some(l) => l,
            None => continue,
        };
        let ip_link = match model.ip().edge(link) {
            Some(l) => l,
            None => {
                cx.warn(WarningKind::MissingAdjacencyAddressing(link));
                continue;
            }
        };
        if added.insert(ip_link.subnet) {
            ospf_links.push(OspfNetwork { network: ip_link.subnet, area: ospf_link.area });
        }
    }

    Ok(OspfConfig {
        process_id: cx.config.ospf_process_id,
        lo_interface: lo_interface.to_string(),
        ospf_links,
    })
}

/// BGP section: advertised blocks, the iBGP neighbors split by route-reflector role, and the
/// eBGP neighbors sorted by their AS number.
pub(super) fn bgp(
    cx: &mut DeviceContext<'_>,
    lo_interface: &str,
) -> Result<BgpConfig, CompileErrorKind> {
    let model = cx.model;
    let device = cx.device;
    let asn = model.phy_node(device)?.asn.ok_or_else(|| missing_asn(model, device))?;

    let mut bgp = BgpConfig::new(asn);
    match model.asn_blocks().get(&asn) {
        Some(blocks) => bgp.advertise_subnets = blocks.clone(),
        None => cx.warn(WarningKind::MissingAsBlocks(asn)),
    }

    for session in model.bgp().sessions_of(device) {
        let peer = model.phy_node(session.target)?;
        let peer_asn = peer.asn.ok_or_else(|| missing_asn(model, session.target))?;

        match session.kind {
            BgpSessionKind::IBgp => {
                let loopback = match model.ip().node(session.target).and_then(|n| n.loopback) {
                    Some(l) => l,
                    None => {
                        cx.warn(WarningKind::MissingPeerLoopback(peer.label.clone()));
                        continue;
                    }
                };
                let neighbor = BgpNeighbor {
                    neighbor: peer.label.clone(),
                    asn: peer_asn,
                    loopback,
                    update_source: IBGP_UPDATE_SOURCE.to_string(),
                };
                match session.direction {
                    Some(RrDirection::Down) => bgp.ibgp_rr_clients.push(neighbor),
                    Some(RrDirection::Up) => bgp.ibgp_rr_parents.push(neighbor),
                    None => bgp.ibgp_neighbors.push(neighbor),
                }
            }
            BgpSessionKind::EBgp => {
                let (local_int_ip, dst_int_ip) = match ebgp_adjacency(model, session)? {
                    Some((_, local, remote)) => (local, remote),
                    None => {
                        cx.warn(WarningKind::UnaddressedEbgpPeer(peer.label.clone()));
                        continue;
                    }
                };
                bgp.ebgp_neighbors.push(EbgpNeighbor {
                    neighbor: peer.label.clone(),
                    asn: peer_asn,
                    loopback: model.ip().node(session.target).and_then(|n| n.loopback),
                    local_int_ip,
                    dst_int_ip,
                    update_source: lo_interface.to_string(),
                });
            }
        }
    }

    // stable, such that peers of the same AS keep the session order
    bgp.ebgp_neighbors.sort_by_key(|n| n.asn);

    Ok(bgp)
}

/// Find the physical link over which an eBGP session is established, together with the local and
/// the remote interface address. If the session names a link, only that link is considered.
/// Otherwise, the link must be the only one between the two devices with addresses for both ends.
fn ebgp_adjacency(
    model: &NetworkModel,
    session: &BgpSession,
) -> Result<Option<(LinkId, Ipv4Addr, Ipv4Addr)>, CompileErrorKind> {
    let candidates = match session.via {
        Some(link) => vec![link],
        None => model.links_between(session.source, session.target),
    };

    let mut addressed: Vec<(LinkId, Ipv4Addr, Ipv4Addr)> = candidates
        .into_iter()
        .filter_map(|link| {
            let ip_link = model.ip().edge(link)?;
            Some((link, ip_link.address_of(session.source)?, ip_link.address_of(session.target)?))
        })
        .collect();

    match addressed.len() {
        0 => Ok(None),
        1 => Ok(addressed.pop()),
        _ => Err(CompileErrorKind::AmbiguousAdjacency {
            peer: model.label(session.target)?.to_string(),
            links: addressed.into_iter().map(|(l, _, _)| l).collect(),
        }),
    }
}

fn missing_asn(model: &NetworkModel, device: DeviceId) -> CompileErrorKind {
    CompileErrorKind::MissingAttribute {
        device: model.label(device).unwrap_or_default().to_string(),
        attribute: "asn",
    }
}
