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

#![deny(missing_docs, missing_debug_implementations)]

//! # Network Model
//!
//! The network model is a set of overlays sharing the same device identities. The physical
//! overlay is a `petgraph` graph; every device is a node of this graph, and every link an edge.
//! The other overlays ([`OverlayId::Ip`], [`OverlayId::Ospf`], [`OverlayId::Bgp`] and
//! [`OverlayId::Isis`]) select a subset of the devices, and anchor their edges on the physical
//! links. A device or link missing in an overlay simply means that this layer does not apply.
//!
//! ## Example usage
//!
//! ```rust
//! use confgen::model::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut model = NetworkModel::new();
//!
//!     let r1 = model.add_device(PhyNode::router("r1").with_asn(AsId(100)));
//!     let r2 = model.add_device(PhyNode::router("r2").with_asn(AsId(200)));
//!     let link = model.add_link(r1, r2)?;
//!
//!     model.set_loopback(r1, "192.168.0.1".parse()?)?;
//!     model.set_loopback(r2, "192.168.0.2".parse()?)?;
//!     model.add_ip_link(
//!         link,
//!         "10.0.0.0/30".parse()?,
//!         &[(r1, "10.0.0.1".parse()?), (r2, "10.0.0.2".parse()?)],
//!     )?;
//!     model.add_bgp_session(BgpSession::ebgp(r1, r2))?;
//!
//!     assert!(model.overlay(OverlayId::Ip).has_edge(link));
//!     assert!(model.overlay(OverlayId::Bgp).has_node(r1));
//!     assert!(!model.overlay(OverlayId::Ospf).has_node(r1));
//!
//!     Ok(())
//! }
//! ```

pub mod input;
mod overlay;
mod types;

pub use overlay::{
    AsBlocks, BgpOverlay, BgpSession, BgpSessionKind, IpLink, IpNode, IpOverlay, IsisLink,
    IsisNode, IsisOverlay, Membership, OspfLink, OspfOverlay, Overlay, RrDirection,
};
pub use types::{
    AsId, DeviceId, DeviceKind, LinkId, ModelError, OspfArea, OverlayId, PhyLink, PhyNode,
    PhysicalGraph, Platform, Syntax,
};

use ipnet::Ipv4Net;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// # Network Model
///
/// Contains the physical graph and all protocol overlays. The model is built once, and is then
/// only read by the compilers.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    phy: PhysicalGraph,
    name_lookup: HashMap<String, DeviceId>,
    ip: IpOverlay,
    asn_blocks: AsBlocks,
    ospf: OspfOverlay,
    bgp: BgpOverlay,
    isis: IsisOverlay,
}

impl Default for NetworkModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkModel {
    /// Generate an empty network model
    pub fn new() -> Self {
        Self {
            phy: PhysicalGraph::with_capacity(0, 0),
            name_lookup: HashMap::new(),
            ip: IpOverlay::new(OverlayId::Ip),
            asn_blocks: AsBlocks::new(),
            ospf: OspfOverlay::new(OverlayId::Ospf),
            bgp: BgpOverlay::default(),
            isis: IsisOverlay::new(OverlayId::Isis),
        }
    }

    /// Add a new device to the physical overlay, and return its id. If a device with the same
    /// name already exists, the name lookup will point to the new device. Use
    /// [`NetworkModel::try_add_device`] to reject duplicate names.
    pub fn add_device(&mut self, node: PhyNode) -> DeviceId {
        let name = node.name.clone();
        let id = self.phy.add_node(node);
        self.name_lookup.insert(name, id);
        id
    }

    /// Add a new device, failing if the name is already in use.
    pub fn try_add_device(&mut self, node: PhyNode) -> Result<DeviceId, ModelError> {
        if self.name_lookup.contains_key(&node.name) {
            return Err(ModelError::DuplicateDeviceName(node.name));
        }
        Ok(self.add_device(node))
    }

    /// Add a physical link between two devices.
    pub fn add_link(&mut self, a: DeviceId, b: DeviceId) -> Result<LinkId, ModelError> {
        self.phy_node(a)?;
        self.phy_node(b)?;
        Ok(self.phy.add_edge(a, b, PhyLink))
    }

    /// Set the loopback address of a device. This adds the device to the IP overlay.
    pub fn set_loopback(&mut self, device: DeviceId, loopback: Ipv4Addr) -> Result<(), ModelError> {
        self.phy_node(device)?;
        self.ip.insert_node(device, IpNode { loopback: Some(loopback) });
        Ok(())
    }

    /// Add a device to the IP overlay without a loopback address.
    pub fn add_ip_node(&mut self, device: DeviceId) -> Result<(), ModelError> {
        self.phy_node(device)?;
        self.ip.insert_node(device, IpNode::default());
        Ok(())
    }

    /// Assign the IP overlay edge of a physical link: the subnet of the collision domain, and
    /// the interface address of each addressed endpoint.
    pub fn add_ip_link(
        &mut self,
        link: LinkId,
        subnet: Ipv4Net,
        addresses: &[(DeviceId, Ipv4Addr)],
    ) -> Result<(), ModelError> {
        let (a, b) = self.link_endpoints(link)?;
        if let Some((d, _)) = addresses.iter().find(|(d, _)| *d != a && *d != b) {
            return Err(ModelError::NotAnEndpoint(*d, link));
        }
        self.ip.insert_edge(link, IpLink { subnet, addresses: addresses.iter().copied().collect() })
    }

    /// Set the advertised blocks of an AS
    pub fn set_asn_blocks(&mut self, asn: AsId, blocks: Vec<Ipv4Net>) {
        self.asn_blocks.insert(asn, blocks);
    }

    /// Add a device to the OSPF overlay
    pub fn add_ospf_node(&mut self, device: DeviceId) -> Result<(), ModelError> {
        self.phy_node(device)?;
        self.ospf.insert_node(device, ());
        Ok(())
    }

    /// Add an OSPF edge on a physical link
    pub fn add_ospf_link(
        &mut self,
        link: LinkId,
        area: OspfArea,
        cost: u32,
    ) -> Result<(), ModelError> {
        self.link_endpoints(link)?;
        self.ospf.insert_edge(link, OspfLink { area, cost })
    }

    /// Add a device to the BGP overlay
    pub fn add_bgp_node(&mut self, device: DeviceId) -> Result<(), ModelError> {
        self.phy_node(device)?;
        self.bgp.insert_node(device);
        Ok(())
    }

    /// Add a directed BGP session. Both endpoints are added to the BGP overlay.
    pub fn add_bgp_session(&mut self, session: BgpSession) -> Result<(), ModelError> {
        if session.source == session.target {
            return Err(ModelError::BgpSessionToSelf(session.source));
        }
        if let Some(link) = session.via {
            let (a, b) = self.link_endpoints(link)?;
            if a != session.source && b != session.source {
                return Err(ModelError::NotAnEndpoint(session.source, link));
            }
        }
        self.add_bgp_node(session.source)?;
        self.add_bgp_node(session.target)?;
        self.bgp.insert_session(session);
        Ok(())
    }

    /// Add a device to the ISIS overlay
    pub fn add_isis_node(
        &mut self,
        device: DeviceId,
        process_id: u32,
        net: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.phy_node(device)?;
        self.isis.insert_node(device, IsisNode { process_id, net: net.into() });
        Ok(())
    }

    /// Enable ISIS on a physical link
    pub fn add_isis_link(&mut self, link: LinkId) -> Result<(), ModelError> {
        self.link_endpoints(link)?;
        self.isis.insert_edge(link, IsisLink)
    }

    /// Returns the membership view of an overlay.
    pub fn overlay(&self, id: OverlayId) -> &dyn Membership {
        match id {
            OverlayId::Physical => &self.phy,
            OverlayId::Ip => &self.ip,
            OverlayId::Ospf => &self.ospf,
            OverlayId::Bgp => &self.bgp,
            OverlayId::Isis => &self.isis,
        }
    }

    /// Returns true if the device participates in the overlay
    pub fn has_node(&self, id: OverlayId, device: DeviceId) -> bool {
        self.overlay(id).has_node(device)
    }

    /// Physical graph
    pub fn physical(&self) -> &PhysicalGraph {
        &self.phy
    }

    /// IP overlay
    pub fn ip(&self) -> &IpOverlay {
        &self.ip
    }

    /// Global table of advertised blocks per AS
    pub fn asn_blocks(&self) -> &AsBlocks {
        &self.asn_blocks
    }

    /// OSPF overlay
    pub fn ospf(&self) -> &OspfOverlay {
        &self.ospf
    }

    /// BGP overlay
    pub fn bgp(&self) -> &BgpOverlay {
        &self.bgp
    }

    /// ISIS overlay
    pub fn isis(&self) -> &IsisOverlay {
        &self.isis
    }

    /// Get the physical node attributes of a device
    pub fn phy_node(&self, device: DeviceId) -> Result<&PhyNode, ModelError> {
        self.phy.node_weight(device).ok_or(ModelError::DeviceNotFound(device))
    }

    /// Get the label of a device
    pub fn label(&self, device: DeviceId) -> Result<&str, ModelError> {
        Ok(self.phy_node(device)?.label.as_str())
    }

    /// Get the device id from the input name
    pub fn device_id(&self, name: impl AsRef<str>) -> Result<DeviceId, ModelError> {
        self.name_lookup
            .get(name.as_ref())
            .copied()
            .ok_or_else(|| ModelError::DeviceNameNotFound(name.as_ref().to_string()))
    }

    /// All devices of the physical overlay, in ascending id order.
    pub fn devices(&self) -> Vec<DeviceId> {
        let mut devices: Vec<DeviceId> = self.phy.node_indices().collect();
        devices.sort();
        devices
    }

    /// Both endpoints of a physical link
    pub fn link_endpoints(&self, link: LinkId) -> Result<(DeviceId, DeviceId), ModelError> {
        self.phy.edge_endpoints(link).ok_or(ModelError::LinkNotFound(link))
    }

    /// The endpoint of the link opposite to `device`.
    pub fn neighbor(&self, device: DeviceId, link: LinkId) -> Result<DeviceId, ModelError> {
        let (a, b) = self.link_endpoints(link)?;
        if a == device {
            Ok(b)
        } else if b == device {
            Ok(a)
        } else {
            Err(ModelError::NotAnEndpoint(device, link))
        }
    }

    /// All physical links of a device, in ascending link id order. This order is stable for
    /// the whole lifetime of the model.
    pub fn links_of(&self, device: DeviceId) -> Vec<LinkId> {
        let mut links: Vec<LinkId> = self.phy.edges(device).map(|e| e.id()).collect();
        links.sort();
        links.dedup();
        links
    }

    /// All physical links connecting `a` and `b`, in ascending link id order.
    pub fn links_between(&self, a: DeviceId, b: DeviceId) -> Vec<LinkId> {
        self.links_of(a)
            .into_iter()
            .filter(|l| matches!(self.neighbor(a, *l), Ok(n) if n == b))
            .collect()
    }

    /// All hosts declared by any device, sorted and deduplicated.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self
            .phy
            .node_indices()
            .filter_map(|d| self.phy.node_weight(d))
            .filter_map(|n| n.host.as_deref())
            .collect();
        hosts.sort_unstable();
        hosts.dedup();
        hosts
    }
}

impl Membership for PhysicalGraph {
    fn has_node(&self, device: DeviceId) -> bool {
        self.contains_node(device)
    }

    fn has_edge(&self, link: LinkId) -> bool {
        self.edge_weight(link).is_some()
    }
}
