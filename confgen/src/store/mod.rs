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

//! # Compiled Device Store
//!
//! The store holds one [`CompiledDevice`] per compiled device, and one [`LabTopology`] per host
//! compiled for Netkit. Records are created by the platform compilers, filled in by the device
//! compilers, and afterwards only read by the renderer. The whole store can be serialized, which
//! is how it is handed over to the renderer.

mod device;
mod lab;

pub use device::{
    BgpConfig, BgpNeighbor, CompiledDevice, CompiledInterface, EbgpNeighbor, InterfaceId,
    IsisConfig, OspfConfig, OspfNetwork, RenderTarget, SshConfig, TapConfig, ZebraConfig,
};
pub use lab::{LabConfigItem, LabTopology, TapIpEntry};

use crate::model::{DeviceId, NetworkModel};

use serde::Serialize;
use std::collections::{btree_map, BTreeMap};

/// Collection of all compiled device records, and of all platform scaffolds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStore {
    timestamp: String,
    devices: BTreeMap<DeviceId, CompiledDevice>,
    topology: BTreeMap<String, LabTopology>,
}

impl DeviceStore {
    /// Create an empty store. The timestamp is used to name the output folder of platforms
    /// that put every run into a separate folder.
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self { timestamp: timestamp.into(), devices: BTreeMap::new(), topology: BTreeMap::new() }
    }

    /// Timestamp of this compilation run
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the record of a device, creating an empty one if it does not exist yet.
    pub fn node_mut(&mut self, model: &NetworkModel, device: DeviceId) -> &mut CompiledDevice {
        self.devices.entry(device).or_insert_with(|| {
            let name = model.phy_node(device).map(|n| n.name.clone()).unwrap_or_default();
            CompiledDevice::new(device, name)
        })
    }

    /// Get the record of a device, if it exists
    pub fn try_node_mut(&mut self, device: DeviceId) -> Option<&mut CompiledDevice> {
        self.devices.get_mut(&device)
    }

    /// Get the record of a device
    pub fn node(&self, device: DeviceId) -> Option<&CompiledDevice> {
        self.devices.get(&device)
    }

    /// Iterate over all records, in ascending device id order
    pub fn nodes(&self) -> btree_map::Iter<'_, DeviceId, CompiledDevice> {
        self.devices.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if no device was compiled
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Get the lab topology of a host, creating an empty one if it does not exist yet.
    pub fn topology_mut(&mut self, host: &str) -> &mut LabTopology {
        self.topology.entry(host.to_string()).or_default()
    }

    /// Get the lab topology of a host
    pub fn topology(&self, host: &str) -> Option<&LabTopology> {
        self.topology.get(host)
    }

    /// Serialize the store as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
