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

//! # Platform Compilers
//!
//! A platform compiler compiles all devices of one host that are deployed on its platform. It
//! selects the devices, sets their render destination, allocates their interface identifiers,
//! and delegates the rest to the device compiler of their dialect. The Netkit compiler
//! additionally assigns management (tap) addresses and builds the lab description of the host.

mod allocator;
mod cisco;
mod dynagen;
mod junosphere;
mod netkit;

pub use allocator::{AllocError, InterfaceAllocator, InterfaceScheme};
pub use cisco::CiscoCompiler;
pub use dynagen::DynagenCompiler;
pub use junosphere::JunosphereCompiler;
pub use netkit::NetkitCompiler;

use crate::compiler::{CompileError, CompileStep, CompileWarning};
use crate::config::CompilerConfig;
use crate::model::{DeviceId, NetworkModel, PhyNode, Platform, Syntax};
use crate::store::{CompiledDevice, DeviceStore};

use ipnet::{Ipv4AddrRange, Ipv4Net};
use log::*;
use std::fmt;
use std::net::Ipv4Addr;

/// Compiles all devices of a platform on a single host.
pub trait PlatformCompiler: fmt::Debug {
    /// The platform
    fn platform(&self) -> Platform;

    /// The host
    fn host(&self) -> &str;

    /// Compile all selected devices into the store. Devices which fail are reported, and the
    /// remaining devices are still compiled.
    fn compile(
        &self,
        model: &NetworkModel,
        config: &CompilerConfig,
        store: &mut DeviceStore,
    ) -> CompileReport;
}

/// Returns the platform compiler for a platform and host.
pub fn platform_compiler(platform: Platform, host: impl Into<String>) -> Box<dyn PlatformCompiler> {
    let host = host.into();
    match platform {
        Platform::Junosphere => Box::new(JunosphereCompiler::new(host)),
        Platform::Netkit => Box::new(NetkitCompiler::new(host)),
        Platform::Cisco => Box::new(CiscoCompiler::new(host)),
        Platform::Dynagen => Box::new(DynagenCompiler::new(host)),
    }
}

/// Outcome of a platform compilation
#[derive(Debug, Clone, PartialEq)]
pub struct CompileReport {
    /// The platform
    pub platform: Platform,
    /// The host
    pub host: String,
    /// Devices compiled successfully, in compilation order
    pub compiled: Vec<DeviceId>,
    /// Devices which failed
    pub failed: Vec<CompileError>,
    /// Non-fatal problems
    pub warnings: Vec<CompileWarning>,
}

impl CompileReport {
    /// Create an empty report
    pub fn new(platform: Platform, host: impl Into<String>) -> Self {
        Self {
            platform,
            host: host.into(),
            compiled: Vec::new(),
            failed: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if no device failed
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// Record the outcome of a single device
    pub(crate) fn record(&mut self, device: DeviceId, result: Result<(), CompileError>) {
        match result {
            Ok(()) => self.compiled.push(device),
            Err(e) => self.fail(e),
        }
    }

    /// Mark a device as failed, also if it was compiled successfully before.
    pub(crate) fn fail(&mut self, error: CompileError) {
        error!("{}", error);
        self.compiled.retain(|d| *d != error.device);
        self.failed.push(error);
    }
}

/// Select the routers on `host` with the given syntax, in ascending device id order. Routers
/// declaring a different platform are ignored.
pub fn select_devices<'a>(
    model: &'a NetworkModel,
    host: &str,
    platform: Platform,
    syntax: Syntax,
) -> Vec<(DeviceId, &'a PhyNode)> {
    model
        .devices()
        .into_iter()
        .filter_map(|d| model.phy_node(d).ok().map(|n| (d, n)))
        .filter(|(_, n)| n.is_router())
        .filter(|(_, n)| n.syntax == Some(syntax))
        .filter(|(_, n)| n.host.as_deref() == Some(host))
        .filter(|(_, n)| n.platform.map(|p| p == platform).unwrap_or(true))
        .collect()
}

/// Assign an interface identifier to every physical link of the device, in link order.
pub fn allocate_interfaces(
    model: &NetworkModel,
    node: &mut CompiledDevice,
    allocator: &mut InterfaceAllocator,
) -> Result<(), CompileError> {
    node.interface_ids.clear();
    for link in model.links_of(node.id) {
        let id = allocator.next_id().map_err(|e| {
            CompileError::new(node.id, node.input_label.clone(), CompileStep::Allocation, e)
        })?;
        node.interface_ids.insert(link, id);
    }
    Ok(())
}

/// # Tap Address Pool
///
/// Management addresses of the machines of one host. The first two host addresses of the block
/// are reserved for the tunnel host and the tunnel VM, all others are handed out in ascending
/// order.
///
/// ```
/// # use confgen::platform::TapIpPool;
/// let mut pool = TapIpPool::new("172.16.0.0/16".parse().unwrap());
/// assert_eq!(pool.tap_host(), Some("172.16.0.1".parse().unwrap()));
/// assert_eq!(pool.tap_vm(), Some("172.16.0.2".parse().unwrap()));
/// assert_eq!(pool.take_next(), Some("172.16.0.3".parse().unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct TapIpPool {
    tap_host: Option<Ipv4Addr>,
    tap_vm: Option<Ipv4Addr>,
    hosts: Ipv4AddrRange,
}

impl TapIpPool {
    /// Create the pool from an address block
    pub fn new(block: Ipv4Net) -> Self {
        let mut hosts = block.hosts();
        let tap_host = hosts.next();
        let tap_vm = hosts.next();
        Self { tap_host, tap_vm, hosts }
    }

    /// Address of the host side of the tunnel
    pub fn tap_host(&self) -> Option<Ipv4Addr> {
        self.tap_host
    }

    /// Address of the tunnel VM
    pub fn tap_vm(&self) -> Option<Ipv4Addr> {
        self.tap_vm
    }

    /// Take the next free address, or `None` if the pool is exhausted.
    pub fn take_next(&mut self) -> Option<Ipv4Addr> {
        self.hosts.next()
    }
}
