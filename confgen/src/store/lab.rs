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

//! Lab topology of an emulated host

use super::RenderTarget;

use serde::Serialize;
use std::net::Ipv4Addr;

/// # Lab Topology
///
/// Host-wide data needed to start an emulated lab: the machines, the collision domain every
/// interface is attached to, and the management addresses. It is built after every device of the
/// host has been compiled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LabTopology {
    /// Where and how to render the lab description
    pub render: RenderTarget,
    /// Description of the lab
    pub description: String,
    /// Labels of all machines, sorted
    pub machines: Vec<String>,
    /// Collision domain of every interface, sorted by device
    pub config_items: Vec<LabConfigItem>,
    /// Address of the host side of the tap tunnel
    pub tap_host: Option<Ipv4Addr>,
    /// Address of the tunnel VM
    pub tap_vm: Option<Ipv4Addr>,
    /// Management address of every machine, sorted by address
    pub tap_ips: Vec<TapIpEntry>,
}

impl LabTopology {
    /// All machine labels, separated by a single space
    pub fn machines_line(&self) -> String {
        self.machines.join(" ")
    }
}

/// Binding of one interface to a collision domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabConfigItem {
    /// Device label
    pub device: String,
    /// Numeric interface id (`1` for `eth1`)
    pub key: String,
    /// Collision domain name (the subnet, with `/` replaced by `.`)
    pub value: String,
}

/// Management address of a machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapIpEntry {
    /// Device label
    pub device: String,
    /// Tap interface name
    pub id: String,
    /// Tap address
    pub ip: Ipv4Addr,
}
