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

//! # Overlays
//!
//! Every overlay except the physical one is stored as a typed map from device ids to node
//! attributes, and from physical link ids to edge attributes. An overlay edge is always anchored
//! on exactly one physical link, and a physical link carries at most one edge of every overlay.
//! BGP is the exception: sessions are directed edges between two devices, and are stored in the
//! order in which they were added.

use crate::model::{AsId, DeviceId, LinkId, ModelError, OspfArea, OverlayId};

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

/// Membership test of an overlay.
pub trait Membership {
    /// Returns true if the device participates in this overlay
    fn has_node(&self, device: DeviceId) -> bool;
    /// Returns true if the overlay has an edge anchored on the physical link
    fn has_edge(&self, link: LinkId) -> bool;
}

/// Generic overlay with typed node and edge attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay<N, E> {
    id: OverlayId,
    nodes: BTreeMap<DeviceId, N>,
    edges: BTreeMap<LinkId, E>,
}

impl<N, E> Overlay<N, E> {
    pub(crate) fn new(id: OverlayId) -> Self {
        Self { id, nodes: BTreeMap::new(), edges: BTreeMap::new() }
    }

    /// Name of this overlay
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Get the node attributes of a device, or `None` if it does not participate.
    pub fn node(&self, device: DeviceId) -> Option<&N> {
        self.nodes.get(&device)
    }

    /// Get the edge attributes anchored on a physical link, or `None` if there is no such edge.
    pub fn edge(&self, link: LinkId) -> Option<&E> {
        self.edges.get(&link)
    }

    /// Iterate over all nodes, in ascending device id order.
    pub fn nodes(&self) -> btree_map::Iter<'_, DeviceId, N> {
        self.nodes.iter()
    }

    /// Iterate over all edges, in ascending link id order.
    pub fn edges(&self) -> btree_map::Iter<'_, LinkId, E> {
        self.edges.iter()
    }

    /// Insert (or replace) the node attributes of a device.
    pub(crate) fn insert_node(&mut self, device: DeviceId, node: N) {
        self.nodes.insert(device, node);
    }

    /// Insert an edge anchored on a link. Fails if the link already carries an edge of this
    /// overlay.
    pub(crate) fn insert_edge(&mut self, link: LinkId, edge: E) -> Result<(), ModelError> {
        match self.edges.entry(link) {
            btree_map::Entry::Occupied(_) => Err(ModelError::DuplicateOverlayEdge(self.id, link)),
            btree_map::Entry::Vacant(e) => {
                e.insert(edge);
                Ok(())
            }
        }
    }
}

impl<N, E> Membership for Overlay<N, E> {
    fn has_node(&self, device: DeviceId) -> bool {
        self.nodes.contains_key(&device)
    }

    fn has_edge(&self, link: LinkId) -> bool {
        self.edges.contains_key(&link)
    }
}

/// Node attributes of the IP overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpNode {
    /// Loopback address. Every layer 3 device must have one to be compiled.
    pub loopback: Option<Ipv4Addr>,
}

/// Edge attributes of the IP overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpLink {
    /// Subnet of the collision domain this link belongs to
    pub subnet: Ipv4Net,
    /// Interface address of each endpoint. An endpoint without an address (e.g., a switch) is
    /// not present in the map.
    pub addresses: BTreeMap<DeviceId, Ipv4Addr>,
}

impl IpLink {
    /// Interface address of the given endpoint
    pub fn address_of(&self, device: DeviceId) -> Option<Ipv4Addr> {
        self.addresses.get(&device).copied()
    }
}

/// IP overlay
pub type IpOverlay = Overlay<IpNode, IpLink>;

/// Edge attributes of the OSPF overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OspfLink {
    /// Area of the link
    pub area: OspfArea,
    /// Link cost
    pub cost: u32,
}

/// OSPF overlay. Nodes carry no attributes.
pub type OspfOverlay = Overlay<(), OspfLink>;

/// Node attributes of the ISIS overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsisNode {
    /// ISIS process id
    pub process_id: u32,
    /// Network Entity Title
    pub net: String,
}

/// Edge attributes of the ISIS overlay. The presence of the edge enables ISIS on the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsisLink;

/// ISIS overlay
pub type IsisOverlay = Overlay<IsisNode, IsisLink>;

/// Kind of a BGP session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgpSessionKind {
    /// Internal BGP
    IBgp,
    /// External BGP
    EBgp,
}

impl BgpSessionKind {
    /// returns true if the session is internal
    pub fn is_ibgp(&self) -> bool {
        matches!(self, Self::IBgp)
    }

    /// returns true if the session is external
    pub fn is_ebgp(&self) -> bool {
        matches!(self, Self::EBgp)
    }
}

/// Position of the peer in the route-reflector hierarchy, seen from the source of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RrDirection {
    /// The peer is the route-reflector of the source
    Up,
    /// The peer is a route-reflector client of the source
    Down,
}

/// Directed BGP session from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BgpSession {
    /// Device on which the session is configured
    pub source: DeviceId,
    /// Peer of the session
    pub target: DeviceId,
    /// Kind of the session
    pub kind: BgpSessionKind,
    /// Route-reflector direction (only meaningful for iBGP)
    pub direction: Option<RrDirection>,
    /// Physical link over which an eBGP session peers. If unset, the single addressed link
    /// between both devices is used.
    pub via: Option<LinkId>,
}

impl BgpSession {
    /// Create an eBGP session
    pub fn ebgp(source: DeviceId, target: DeviceId) -> Self {
        Self { source, target, kind: BgpSessionKind::EBgp, direction: None, via: None }
    }

    /// Create an iBGP session with an optional route-reflector direction
    pub fn ibgp(source: DeviceId, target: DeviceId, direction: Option<RrDirection>) -> Self {
        Self { source, target, kind: BgpSessionKind::IBgp, direction, via: None }
    }

    /// Pin the session to a physical link
    pub fn via(mut self, link: LinkId) -> Self {
        self.via = Some(link);
        self
    }
}

/// BGP overlay: participating devices, and directed sessions in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BgpOverlay {
    nodes: BTreeSet<DeviceId>,
    sessions: Vec<BgpSession>,
}

impl BgpOverlay {
    pub(crate) fn insert_node(&mut self, device: DeviceId) {
        self.nodes.insert(device);
    }

    pub(crate) fn insert_session(&mut self, session: BgpSession) {
        self.sessions.push(session);
    }

    /// All sessions configured on the device (where the device is the source), in insertion
    /// order.
    pub fn sessions_of(&self, device: DeviceId) -> impl Iterator<Item = &BgpSession> + '_ {
        self.sessions.iter().filter(move |s| s.source == device)
    }

    /// All sessions
    pub fn sessions(&self) -> &[BgpSession] {
        &self.sessions
    }
}

impl Membership for BgpOverlay {
    fn has_node(&self, device: DeviceId) -> bool {
        self.nodes.contains(&device)
    }

    fn has_edge(&self, link: LinkId) -> bool {
        self.sessions.iter().any(|s| s.via == Some(link))
    }
}

/// Per-AS table of advertised subnet blocks, global data of the IP overlay.
pub type AsBlocks = BTreeMap<AsId, Vec<Ipv4Net>>;
