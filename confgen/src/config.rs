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

//! Settings of a compilation run

use ipnet::Ipv4Net;
use serde::Deserialize;
use std::fs::read_to_string;
use std::net::Ipv4Addr;
use std::path::Path;

/// Process id used for every OSPF section
pub const DEFAULT_OSPF_PROCESS_ID: u32 = 1;
/// Block from which the management addresses of Netkit machines are taken
pub const DEFAULT_TAP_SUBNET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(172, 16, 0, 0), 16);
/// Root folder of all rendered files
pub const DEFAULT_RENDER_ROOT: &str = "rendered";
/// Password of the routing daemon terminal on Netkit machines
pub const DEFAULT_ZEBRA_PASSWORD: &str = "1234";

/// # Compiler Configuration
///
/// All settings have a default value, such that an empty JSON object is a valid configuration.
///
/// ```
/// # use confgen::CompilerConfig;
/// let config = CompilerConfig::from_json(r#"{ "ospf_process_id": 10 }"#).unwrap();
/// assert_eq!(config.ospf_process_id, 10);
/// assert_eq!(config.render_root, "rendered");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Process id of every OSPF section
    pub ospf_process_id: u32,
    /// Block from which the management addresses of Netkit machines are taken. The first two
    /// hosts of the block are reserved for the tunnel host and the tunnel VM.
    pub tap_subnet: Ipv4Net,
    /// Root folder of all rendered files
    pub render_root: String,
    /// Password of the routing daemon terminal on Netkit machines
    pub zebra_password: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            ospf_process_id: DEFAULT_OSPF_PROCESS_ID,
            tap_subnet: DEFAULT_TAP_SUBNET,
            render_root: DEFAULT_RENDER_ROOT.to_string(),
            zebra_password: DEFAULT_ZEBRA_PASSWORD.to_string(),
        }
    }
}

impl CompilerConfig {
    /// Parse the configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the configuration from a JSON file
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, crate::Error> {
        Ok(Self::from_json(&read_to_string(filename)?)?)
    }
}
