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

//! Module containing all type definitions of the network model

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

type IndexType = u32;
/// Device Identification (and index into the physical graph). The same id is used in every
/// overlay, and as the key into the compiled device store.
pub type DeviceId = NodeIndex<IndexType>;
/// Physical link identification (and edge index into the physical graph). All other overlays
/// anchor their edges on this id.
pub type LinkId = EdgeIndex<IndexType>;
/// Physical topology graph
pub type PhysicalGraph = StableGraph<PhyNode, PhyLink, Undirected, IndexType>;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsId(pub u32);

impl fmt::Display for AsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// OSPF Area
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OspfArea(pub u32);

impl fmt::Display for OspfArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of device in the physical overlay.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Layer 3 router, the only kind of device that is compiled.
    Router,
    /// Layer 3 end host
    Server,
    /// Layer 2 switch (or any collision-domain placeholder)
    Switch,
}

/// Configuration syntax (router OS dialect) declared on a device.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// Unix routing daemon (zebra / ospfd / bgpd)
    Quagga,
    /// Classic IOS
    Ios,
    /// Next generation IOS
    Ios2,
    /// Junos
    Junos,
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quagga => write!(f, "quagga"),
            Self::Ios => write!(f, "ios"),
            Self::Ios2 => write!(f, "ios2"),
            Self::Junos => write!(f, "junos"),
        }
    }
}

/// Deployment or emulation platform declared on a device.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Junosphere cloud emulation
    Junosphere,
    /// Netkit (user-mode linux) lab
    Netkit,
    /// Physical or virtual Cisco devices
    Cisco,
    /// Dynamips / Dynagen emulation
    Dynagen,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Junosphere => write!(f, "junosphere"),
            Self::Netkit => write!(f, "netkit"),
            Self::Cisco => write!(f, "cisco"),
            Self::Dynagen => write!(f, "dynagen"),
        }
    }
}

/// Node attributes of the physical overlay.
///
/// ```
/// use confgen::model::{AsId, PhyNode, Platform, Syntax};
/// let r = PhyNode::router("r1")
///     .with_asn(AsId(100))
///     .with_syntax(Syntax::Quagga)
///     .with_platform(Platform::Netkit)
///     .on_host("h1");
/// assert!(r.is_router());
/// assert_eq!(r.label, "r1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhyNode {
    /// Name of the device in the input (the input identifier)
    pub name: String,
    /// Human readable label
    pub label: String,
    /// Kind of the device
    pub kind: DeviceKind,
    /// AS number
    pub asn: Option<AsId>,
    /// Declared configuration syntax
    pub syntax: Option<Syntax>,
    /// Declared deployment platform
    pub platform: Option<Platform>,
    /// Host on which the device is deployed
    pub host: Option<String>,
}

impl PhyNode {
    /// Create a new device of the given kind, using the name as label.
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            asn: None,
            syntax: None,
            platform: None,
            host: None,
        }
    }

    /// Create a new router.
    pub fn router(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Router)
    }

    /// Create a new switch.
    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Switch)
    }

    /// Set a label different from the name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the AS number
    pub fn with_asn(mut self, asn: AsId) -> Self {
        self.asn = Some(asn);
        self
    }

    /// Set the configuration syntax
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = Some(syntax);
        self
    }

    /// Set the deployment platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set the host
    pub fn on_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Returns true if the device is a router
    pub fn is_router(&self) -> bool {
        self.kind == DeviceKind::Router
    }

    /// Returns true if the device is a layer 3 device (router or server)
    pub fn is_l3device(&self) -> bool {
        matches!(self.kind, DeviceKind::Router | DeviceKind::Server)
    }
}

/// Edge attributes of the physical overlay. A physical link carries no addressing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhyLink;

/// Names of all overlays in the network model.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayId {
    /// Physical topology
    Physical,
    /// IP addressing
    Ip,
    /// OSPF
    Ospf,
    /// BGP sessions
    Bgp,
    /// ISIS
    Isis,
}

impl OverlayId {
    /// All overlays, in a fixed order
    pub const ALL: [OverlayId; 5] =
        [OverlayId::Physical, OverlayId::Ip, OverlayId::Ospf, OverlayId::Bgp, OverlayId::Isis];
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => write!(f, "physical"),
            Self::Ip => write!(f, "ip"),
            Self::Ospf => write!(f, "ospf"),
            Self::Bgp => write!(f, "bgp"),
            Self::Isis => write!(f, "isis"),
        }
    }
}

/// Network Model Errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Device is not present in the physical overlay
    #[error("Network device was not found in the physical overlay: {0:?}")]
    DeviceNotFound(DeviceId),
    /// Link is not present in the physical overlay
    #[error("Link was not found in the physical overlay: {0:?}")]
    LinkNotFound(LinkId),
    /// Device name is not present in the physical overlay
    #[error("Network device name was not found: {0}")]
    DeviceNameNotFound(String),
    /// Device name was used twice
    #[error("Network device name is not unique: {0}")]
    DuplicateDeviceName(String),
    /// The overlay already contains an edge anchored on this physical link
    #[error("The {0} overlay already has an edge on link {1:?}")]
    DuplicateOverlayEdge(OverlayId, LinkId),
    /// An address was given for a device that is not an endpoint of the link
    #[error("Device {0:?} is not an endpoint of link {1:?}")]
    NotAnEndpoint(DeviceId, LinkId),
    /// A BGP session from a device to itself
    #[error("Invalid BGP session from {0:?} to itself")]
    BgpSessionToSelf(DeviceId),
}
