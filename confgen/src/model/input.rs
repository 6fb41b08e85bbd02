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

//! Parses a JSON network description into a [`NetworkModel`].
//!
//! The description lists devices, links (with their optional IP, OSPF and ISIS attributes), BGP
//! sessions and the advertised blocks of every AS:
//!
//! ```json
//! {
//!   "devices": [
//!     { "name": "r1", "asn": 100, "syntax": "quagga", "platform": "netkit", "host": "h1",
//!       "loopback": "192.168.0.1", "ospf": true },
//!     { "name": "sw1", "kind": "switch" }
//!   ],
//!   "links": [
//!     { "src": "r1", "dst": "sw1",
//!       "ip": { "subnet": "10.0.0.0/24", "addresses": { "r1": "10.0.0.1" } },
//!       "ospf": { "area": 0, "cost": 10 } }
//!   ],
//!   "bgp": [ { "src": "r1", "dst": "r2", "type": "ebgp" } ],
//!   "asn_blocks": { "100": ["10.0.0.0/16"] }
//! }
//! ```
//!
//! Devices are added in the order in which they appear, and so are links. Hence, the device ids
//! and link ids only depend on the input file.

use super::{
    AsId, BgpSession, BgpSessionKind, DeviceId, DeviceKind, LinkId, ModelError, NetworkModel,
    OspfArea, PhyNode, Platform, RrDirection, Syntax,
};

use ipnet::Ipv4Net;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Network description, as read from the input file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkDescription {
    /// All devices
    pub devices: Vec<DeviceDescription>,
    /// All physical links
    #[serde(default)]
    pub links: Vec<LinkDescription>,
    /// All directed BGP sessions
    #[serde(default)]
    pub bgp: Vec<SessionDescription>,
    /// Advertised blocks per AS
    #[serde(default)]
    pub asn_blocks: BTreeMap<u32, Vec<Ipv4Net>>,
}

/// Description of a single device
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceDescription {
    /// Unique name
    pub name: String,
    /// Human readable label (defaults to the name)
    pub label: Option<String>,
    /// Kind of the device
    #[serde(default = "default_kind")]
    pub kind: DeviceKind,
    /// AS number
    pub asn: Option<u32>,
    /// Configuration syntax
    pub syntax: Option<Syntax>,
    /// Deployment platform
    pub platform: Option<Platform>,
    /// Host on which the device is deployed
    pub host: Option<String>,
    /// Loopback address. Setting it adds the device to the IP overlay.
    pub loopback: Option<Ipv4Addr>,
    /// Participation in the OSPF overlay
    #[serde(default)]
    pub ospf: bool,
    /// Participation in the BGP overlay (devices with a session are always added)
    #[serde(default)]
    pub bgp: bool,
    /// Participation in the ISIS overlay
    pub isis: Option<IsisDescription>,
}

fn default_kind() -> DeviceKind {
    DeviceKind::Router
}

/// ISIS attributes of a device
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsisDescription {
    /// Process id
    pub process_id: u32,
    /// Network Entity Title
    pub net: String,
}

/// Description of a single physical link
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkDescription {
    /// Name of the first endpoint
    pub src: String,
    /// Name of the second endpoint
    pub dst: String,
    /// IP addressing of the link
    pub ip: Option<IpDescription>,
    /// OSPF attributes of the link
    pub ospf: Option<OspfDescription>,
    /// Enable ISIS on the link
    #[serde(default)]
    pub isis: bool,
}

/// IP addressing of a link
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpDescription {
    /// Subnet of the collision domain
    pub subnet: Ipv4Net,
    /// Interface address of each addressed endpoint, by device name
    #[serde(default)]
    pub addresses: BTreeMap<String, Ipv4Addr>,
}

/// OSPF attributes of a link
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OspfDescription {
    /// Area
    #[serde(default)]
    pub area: u32,
    /// Cost
    #[serde(default = "default_cost")]
    pub cost: u32,
}

fn default_cost() -> u32 {
    1
}

/// Description of a directed BGP session
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionDescription {
    /// Device on which the session is configured
    pub src: String,
    /// Peer device
    pub dst: String,
    /// Session kind
    #[serde(rename = "type")]
    pub kind: BgpSessionKind,
    /// Route-reflector direction
    pub direction: Option<RrDirection>,
    /// Index of the link (in the `links` list) used for peering
    pub via: Option<usize>,
}

/// Error while reading the network description
#[derive(Debug, Error)]
pub enum InputError {
    /// Cannot read the file
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid JSON or unexpected structure
    #[error("Cannot parse the network description: {0}")]
    ParseError(#[from] serde_json::Error),
    /// A link or session references an unknown device
    #[error("Unknown device: {0}")]
    UnknownDevice(String),
    /// A session references a link index which does not exist
    #[error("Unknown link index: {0}")]
    UnknownLink(usize),
    /// The description is inconsistent
    #[error("Invalid network description: {0}")]
    ModelError(#[from] ModelError),
}

impl NetworkDescription {
    /// Parse a description from a JSON string
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a description from a file
    pub fn from_file(filename: impl AsRef<std::path::Path>) -> Result<Self, InputError> {
        Self::from_json(&read_to_string(filename)?)
    }

    /// Build the network model
    pub fn build(&self) -> Result<NetworkModel, InputError> {
        let mut model = NetworkModel::new();

        for d in self.devices.iter() {
            let mut node = PhyNode::new(d.name.clone(), d.kind);
            if let Some(label) = d.label.as_ref() {
                node.label = label.clone();
            }
            node.asn = d.asn.map(AsId);
            node.syntax = d.syntax;
            node.platform = d.platform;
            node.host = d.host.clone();
            let id = model.try_add_device(node)?;

            if let Some(loopback) = d.loopback {
                model.set_loopback(id, loopback)?;
            }
            if d.ospf {
                model.add_ospf_node(id)?;
            }
            if d.bgp {
                model.add_bgp_node(id)?;
            }
            if let Some(isis) = d.isis.as_ref() {
                model.add_isis_node(id, isis.process_id, isis.net.clone())?;
            }
        }

        let mut links: Vec<LinkId> = Vec::with_capacity(self.links.len());
        for l in self.links.iter() {
            let src = lookup(&model, &l.src)?;
            let dst = lookup(&model, &l.dst)?;
            let link = model.add_link(src, dst)?;
            links.push(link);

            if let Some(ip) = l.ip.as_ref() {
                let addresses = ip
                    .addresses
                    .iter()
                    .map(|(name, addr)| Ok((lookup(&model, name)?, *addr)))
                    .collect::<Result<Vec<(DeviceId, Ipv4Addr)>, InputError>>()?;
                model.add_ip_link(link, ip.subnet, &addresses)?;
            }
            if let Some(ospf) = l.ospf.as_ref() {
                model.add_ospf_link(link, OspfArea(ospf.area), ospf.cost)?;
            }
            if l.isis {
                model.add_isis_link(link)?;
            }
        }

        for s in self.bgp.iter() {
            let via = match s.via {
                Some(idx) => Some(*links.get(idx).ok_or(InputError::UnknownLink(idx))?),
                None => None,
            };
            model.add_bgp_session(BgpSession {
                source: lookup(&model, &s.src)?,
                target: lookup(&model, &s.dst)?,
                kind: s.kind,
                direction: s.direction,
                via,
            })?;
        }

        for (asn, blocks) in self.asn_blocks.iter() {
            model.set_asn_blocks(AsId(*asn), blocks.clone());
        }

        Ok(model)
    }
}

fn lookup(model: &NetworkModel, name: &str) -> Result<DeviceId, InputError> {
    model.device_id(name).map_err(|_| InputError::UnknownDevice(name.to_string()))
}
