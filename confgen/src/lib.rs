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

#![deny(missing_docs)]

//! # Confgen: Compiling Network Designs into Device Configurations
//! This is a library for turning an abstract network model into per-device configuration records,
//! ready to be rendered into the configuration files of different router operating systems and
//! emulation platforms.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Model`](model)**: The network model, consisting of a physical graph and the overlays for
//!   IP addressing, OSPF, BGP and ISIS, all anchored on the physical devices and links. See the
//!   main structure [`NetworkModel`](model::NetworkModel). The model can be read from a JSON
//!   description (see [`NetworkDescription`](model::input::NetworkDescription)).
//!
//! - **[`Compiler`](compiler)**: Device compilers, one per configuration dialect (Quagga, classic
//!   IOS, next-generation IOS and Junos). They compute the interfaces, OSPF, BGP and ISIS sections
//!   of a single device.
//!
//! - **[`Platform`](platform)**: Platform compilers (Netkit, Cisco, Dynagen and Junosphere). They
//!   select the devices of a host, allocate interface names, set the render destination, and
//!   delegate to the device compilers. The Netkit compiler also builds the lab description.
//!
//! - **[`Store`](store)**: The compiled records, which are handed over to the renderer.
//!
//! ## Usage
//!
//! ```
//! use confgen::model::input::NetworkDescription;
//! use confgen::{compile_network, CompilerConfig, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let model = NetworkDescription::from_json(
//!         r#"{
//!             "devices": [
//!                 { "name": "r1", "asn": 100, "syntax": "quagga", "platform": "netkit",
//!                   "host": "h1", "loopback": "192.168.0.1", "bgp": true },
//!                 { "name": "r2", "asn": 200, "syntax": "quagga", "platform": "netkit",
//!                   "host": "h1", "loopback": "192.168.0.2", "bgp": true }
//!             ],
//!             "links": [
//!                 { "src": "r1", "dst": "r2",
//!                   "ip": { "subnet": "10.0.0.0/30",
//!                           "addresses": { "r1": "10.0.0.1", "r2": "10.0.0.2" } } }
//!             ],
//!             "bgp": [
//!                 { "src": "r1", "dst": "r2", "type": "ebgp" },
//!                 { "src": "r2", "dst": "r1", "type": "ebgp" }
//!             ],
//!             "asn_blocks": { "100": ["10.1.0.0/16"], "200": ["10.2.0.0/16"] }
//!         }"#,
//!     )?
//!     .build()?;
//!
//!     let result = compile_network(&model, &CompilerConfig::default(), None, "20210101_120000_0");
//!     result.check()?;
//!
//!     let r1 = result.store.node(model.device_id("r1")?).unwrap();
//!     let bgp = r1.bgp.as_ref().unwrap();
//!     let peer_ip: std::net::Ipv4Addr = "10.0.0.2".parse().unwrap();
//!     assert_eq!(bgp.ebgp_neighbors[0].dst_int_ip, peer_ip);
//!     println!("{}", result.store.to_json()?);
//!
//!     Ok(())
//! }
//! ```

// test modules
mod test;

mod compile;
pub mod compiler;
pub mod config;
mod error;
pub mod model;
pub mod naming;
pub mod platform;
pub mod store;

pub use compile::{compile_network, host_platforms, NetworkCompilation};
pub use config::CompilerConfig;
pub use error::Error;
