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

//! Compiled device record

use crate::model::{AsId, DeviceId, LinkId, OspfArea};

use ipnet::Ipv4Net;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// # Compiled Device
///
/// All configuration facts of a single device, ready to be rendered. The protocol sections are
/// `None` if the device does not participate in the corresponding overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledDevice {
    /// Id of the device in the network model
    pub id: DeviceId,
    /// Name of the device in the input
    pub input_label: String,
    /// Hostname used in the configuration
    pub label: String,
    /// Loopback address
    pub loopback: Option<Ipv4Addr>,
    /// Loopback address as a /32 network
    pub loopback_subnet: Option<Ipv4Net>,
    /// Where and how to render the configuration
    pub render: Option<RenderTarget>,
    /// Interface identifiers, assigned by the platform compiler to every physical link
    pub interface_ids: BTreeMap<LinkId, InterfaceId>,
    /// Compiled interfaces
    pub interfaces: Vec<CompiledInterface>,
    /// OSPF section
    pub ospf: Option<OspfConfig>,
    /// BGP section
    pub bgp: Option<BgpConfig>,
    /// ISIS section
    pub isis: Option<IsisConfig>,
    /// Routing daemon settings (Netkit only)
    pub zebra: Option<ZebraConfig>,
    /// SSH settings (Netkit only)
    pub ssh: Option<SshConfig>,
    /// Management (tap) interface (Netkit only)
    pub tap: Option<TapConfig>,
}

impl CompiledDevice {
    /// Create an empty record
    pub fn new(id: DeviceId, input_label: impl Into<String>) -> Self {
        let input_label = input_label.into();
        Self {
            id,
            label: input_label.clone(),
            input_label,
            loopback: None,
            loopback_subnet: None,
            render: None,
            interface_ids: BTreeMap::new(),
            interfaces: Vec::new(),
            ospf: None,
            bgp: None,
            isis: None,
            zebra: None,
            ssh: None,
            tap: None,
        }
    }

    /// Get the interface assigned to a physical link
    pub fn interface_id(&self, link: LinkId) -> Option<&InterfaceId> {
        self.interface_ids.get(&link)
    }

    /// Get the compiled interface of a physical link
    pub fn interface_on(&self, link: LinkId) -> Option<&CompiledInterface> {
        self.interfaces.iter().find(|i| i.edge == Some(link))
    }
}

/// Interface identifier, as allocated by an interface allocator. Identifiers are ordered by
/// allocation sequence, not by name, such that `eth10` comes after `eth9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InterfaceId {
    /// Position in the allocation sequence
    pub seq: usize,
    /// Interface name
    pub name: String,
}

impl InterfaceId {
    /// Create a new interface id
    pub fn new(seq: usize, name: impl Into<String>) -> Self {
        Self { seq, name: name.into() }
    }

    /// Trailing decimal digits of the name, e.g., `3` for `eth3`.
    ///
    /// ```
    /// # use confgen::store::InterfaceId;
    /// assert_eq!(InterfaceId::new(0, "eth12").numeric_suffix(), "12");
    /// assert_eq!(InterfaceId::new(0, "lo").numeric_suffix(), "");
    /// ```
    pub fn numeric_suffix(&self) -> &str {
        let start = self
            .name
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)
            .unwrap_or_else(|| self.name.len());
        &self.name[start..]
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Single compiled interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledInterface {
    /// Interface name
    pub id: String,
    /// Physical link from which this interface was derived. `None` for loopbacks.
    pub edge: Option<LinkId>,
    /// Description
    pub description: String,
    /// Interface address
    pub ip_address: Ipv4Addr,
    /// Subnet (of the collision domain)
    pub subnet: Ipv4Net,
    /// OSPF cost of the link
    pub ospf_cost: Option<u32>,
    /// ISIS is enabled on this interface
    pub isis: bool,
    /// ISIS process id, if ISIS is enabled
    pub isis_process_id: Option<u32>,
}

/// OSPF section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OspfConfig {
    /// Process id
    pub process_id: u32,
    /// Name of the loopback interface
    pub lo_interface: String,
    /// Networks to announce, at most once per subnet
    pub ospf_links: Vec<OspfNetwork>,
}

/// OSPF network statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OspfNetwork {
    /// Network
    pub network: Ipv4Net,
    /// Area
    pub area: OspfArea,
}

/// BGP section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpConfig {
    /// AS number of the device
    pub asn: AsId,
    /// Blocks advertised by the AS
    pub advertise_subnets: Vec<Ipv4Net>,
    /// Update source used by dialects that configure it globally
    pub lo_interface: Option<String>,
    /// Enable debugging output of the routing daemon
    pub debug: bool,
    /// Ordinary iBGP peers
    pub ibgp_neighbors: Vec<BgpNeighbor>,
    /// iBGP peers which are route-reflector clients of this device
    pub ibgp_rr_clients: Vec<BgpNeighbor>,
    /// iBGP peers which are route-reflectors of this device
    pub ibgp_rr_parents: Vec<BgpNeighbor>,
    /// eBGP peers, sorted by AS number
    pub ebgp_neighbors: Vec<EbgpNeighbor>,
}

impl BgpConfig {
    /// Create an empty BGP section
    pub fn new(asn: AsId) -> Self {
        Self {
            asn,
            advertise_subnets: Vec::new(),
            lo_interface: None,
            debug: false,
            ibgp_neighbors: Vec::new(),
            ibgp_rr_clients: Vec::new(),
            ibgp_rr_parents: Vec::new(),
            ebgp_neighbors: Vec::new(),
        }
    }
}

/// iBGP neighbor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNeighbor {
    /// Label of the peer
    pub neighbor: String,
    /// AS number of the peer
    pub asn: AsId,
    /// Loopback of the peer (the peering address)
    pub loopback: Ipv4Addr,
    /// Update source
    pub update_source: String,
}

/// eBGP neighbor, peering over the interface addresses of a direct link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EbgpNeighbor {
    /// Label of the peer
    pub neighbor: String,
    /// AS number of the peer
    pub asn: AsId,
    /// Loopback of the peer
    pub loopback: Option<Ipv4Addr>,
    /// Local interface address on the link towards the peer
    pub local_int_ip: Ipv4Addr,
    /// Interface address of the peer on the same link
    pub dst_int_ip: Ipv4Addr,
    /// Update source
    pub update_source: String,
}

/// ISIS section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsisConfig {
    /// Network Entity Title
    pub net: String,
    /// Process id
    pub process_id: u32,
}

/// Render destination of a device configuration (or of a platform scaffold).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderTarget {
    /// Template identity
    pub template: String,
    /// Folder of additional templates, rendered into `base_dst_folder`
    pub base: Option<String>,
    /// Destination folder
    pub dst_folder: String,
    /// Destination folder of the additional templates
    pub base_dst_folder: Option<String>,
    /// Destination file, relative to `dst_folder`
    pub dst_file: String,
}

/// Routing daemon settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZebraConfig {
    /// Hostname (without dots)
    pub hostname: String,
    /// Password of the daemon's terminal
    pub password: String,
    /// Static routes (prefix and next hop)
    pub static_routes: Vec<(Ipv4Net, Ipv4Addr)>,
}

/// SSH settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SshConfig {
    /// Use key-based authentication
    pub use_key: bool,
}

/// Management interface of an emulated device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapConfig {
    /// Interface name
    pub id: String,
    /// Address, assigned once all devices of the host are compiled
    pub ip: Option<Ipv4Addr>,
}
