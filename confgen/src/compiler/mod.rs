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

//! # Device Compilers
//!
//! A device compiler turns the overlays of the network model into the configuration facts of a
//! single device, written into its [`CompiledDevice`] record. Every configuration dialect has its
//! own device compiler, implementing [`DeviceCompiler`]. The dialects share most of their logic,
//! which lives in the helper functions of the `base` module. Each dialect calls them explicitly
//! and adds or overrides what it needs on top.
//!
//! Compiling a device is done in the following steps:
//!
//! 1. Resolve the hostname and the loopback address.
//! 2. Compile the interfaces (always).
//! 3. Compile the OSPF section, if the device is in the OSPF overlay.
//! 4. Compile the BGP section, if the device is in the BGP overlay.
//! 5. Compile the ISIS section, if the device is in the ISIS overlay and the dialect supports it.
//!
//! A fatal error stops the compilation of the device, and is reported as a [`CompileError`].
//! Problems that only affect a single interface or neighbor are reported as [`CompileWarning`],
//! and the compilation continues.
//!
//! ```
//! use confgen::compiler::{compile_device, device_compiler};
//! use confgen::model::{NetworkModel, PhyNode, Syntax};
//! use confgen::store::{CompiledDevice, InterfaceId};
//! use confgen::CompilerConfig;
//!
//! let mut model = NetworkModel::new();
//! let r1 = model.add_device(PhyNode::router("r1"));
//! let r2 = model.add_device(PhyNode::router("r2"));
//! let link = model.add_link(r1, r2).unwrap();
//! model.set_loopback(r1, "192.168.0.1".parse().unwrap()).unwrap();
//! model
//!     .add_ip_link(
//!         link,
//!         "10.0.0.0/30".parse().unwrap(),
//!         &[(r1, "10.0.0.1".parse().unwrap()), (r2, "10.0.0.2".parse().unwrap())],
//!     )
//!     .unwrap();
//!
//! let mut node = CompiledDevice::new(r1, "r1");
//! node.interface_ids.insert(link, InterfaceId::new(0, "eth0"));
//! let mut warnings = Vec::new();
//! let config = CompilerConfig::default();
//! compile_device(device_compiler(Syntax::Quagga), &model, &config, &mut node, &mut warnings)
//!     .unwrap();
//!
//! assert_eq!(node.interfaces[0].id, "eth0");
//! assert_eq!(node.interfaces[1].id, "lo0:1");
//! assert!(warnings.is_empty());
//! ```

mod base;
mod ios;
mod junos;
mod quagga;

pub use ios::IosCompiler;
pub use junos::JunosCompiler;
pub use quagga::QuaggaCompiler;

use crate::config::CompilerConfig;
use crate::model::{AsId, DeviceId, LinkId, ModelError, NetworkModel, OverlayId, Syntax};
use crate::naming::network_hostname;
use crate::platform::AllocError;
use crate::store::{BgpConfig, CompiledDevice, CompiledInterface, IsisConfig, OspfConfig};

use ipnet::Ipv4Net;
use log::*;
use std::fmt;
use thiserror::Error;

/// # Device Compiler
///
/// Capabilities of a configuration dialect. Every method computes one section of the compiled
/// record. The record passed in already contains the hostname, the loopback and the interface
/// ids of the device, and all sections computed by earlier steps.
pub trait DeviceCompiler: fmt::Debug + Sync {
    /// Configuration syntax produced by this compiler
    fn syntax(&self) -> Syntax;

    /// Name of the loopback interface in this dialect
    fn lo_interface(&self) -> &'static str;

    /// Compile all interfaces of the device
    fn interfaces(
        &self,
        cx: &mut DeviceContext<'_>,
        node: &CompiledDevice,
    ) -> Result<Vec<CompiledInterface>, CompileErrorKind>;

    /// Compile the OSPF section
    fn ospf(
        &self,
        cx: &mut DeviceContext<'_>,
        node: &CompiledDevice,
    ) -> Result<OspfConfig, CompileErrorKind>;

    /// Compile the BGP section
    fn bgp(
        &self,
        cx: &mut DeviceContext<'_>,
        node: &CompiledDevice,
    ) -> Result<BgpConfig, CompileErrorKind>;

    /// Compile the ISIS section. Returns `None` if the dialect does not support ISIS.
    fn isis(
        &self,
        cx: &mut DeviceContext<'_>,
        node: &CompiledDevice,
    ) -> Result<Option<IsisConfig>, CompileErrorKind>;
}

static QUAGGA: QuaggaCompiler = QuaggaCompiler;
static IOS: IosCompiler = IosCompiler::CLASSIC;
static IOS2: IosCompiler = IosCompiler::NEXT_GEN;
static JUNOS: JunosCompiler = JunosCompiler;

/// Returns the device compiler of a configuration syntax.
pub fn device_compiler(syntax: Syntax) -> &'static dyn DeviceCompiler {
    match syntax {
        Syntax::Quagga => &QUAGGA,
        Syntax::Ios => &IOS,
        Syntax::Ios2 => &IOS2,
        Syntax::Junos => &JUNOS,
    }
}

/// Read-only inputs of a device compilation, and the warnings collected so far.
#[derive(Debug)]
pub struct DeviceContext<'a> {
    /// The network model
    pub model: &'a NetworkModel,
    /// Compiler settings
    pub config: &'a CompilerConfig,
    /// The device being compiled
    pub device: DeviceId,
    step: CompileStep,
    warnings: &'a mut Vec<CompileWarning>,
}

impl<'a> DeviceContext<'a> {
    /// Create a new context
    pub fn new(
        model: &'a NetworkModel,
        config: &'a CompilerConfig,
        device: DeviceId,
        warnings: &'a mut Vec<CompileWarning>,
    ) -> Self {
        Self { model, config, device, step: CompileStep::Device, warnings }
    }

    /// Step which is currently being executed
    pub fn step(&self) -> CompileStep {
        self.step
    }

    /// Record a non-fatal problem of the current step
    pub fn warn(&mut self, kind: WarningKind) {
        let warning = CompileWarning { device: self.device, step: self.step, kind };
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Compile a single device, writing the result into `node`. Warnings are appended to `warnings`,
/// also if the compilation fails.
///
/// Compiling the same device twice with the same model yields the same record.
pub fn compile_device(
    compiler: &dyn DeviceCompiler,
    model: &NetworkModel,
    config: &CompilerConfig,
    node: &mut CompiledDevice,
    warnings: &mut Vec<CompileWarning>,
) -> Result<(), CompileError> {
    let device = node.id;
    let label = node.input_label.clone();
    let fail = |step: CompileStep| {
        let label = label.clone();
        move |kind: CompileErrorKind| CompileError::new(device, label, step, kind)
    };
    let mut cx = DeviceContext::new(model, config, device, warnings);

    debug!("Compiling {} with the {} compiler", node.input_label, compiler.syntax());

    // hostname and loopback
    let phy = model.phy_node(device).map_err(|e| fail(CompileStep::Device)(e.into()))?;
    let loopback = model
        .ip()
        .node(device)
        .and_then(|n| n.loopback)
        .ok_or_else(|| fail(CompileStep::Device)(CompileErrorKind::MissingAddress))?;
    node.input_label = phy.name.clone();
    node.label = network_hostname(&phy.label);
    node.loopback = Some(loopback);
    node.loopback_subnet = Some(Ipv4Net::from(loopback));

    cx.step = CompileStep::Interfaces;
    let interfaces = compiler.interfaces(&mut cx, node).map_err(fail(CompileStep::Interfaces))?;
    node.interfaces = interfaces;

    node.ospf = if model.has_node(OverlayId::Ospf, device) {
        cx.step = CompileStep::Ospf;
        Some(compiler.ospf(&mut cx, node).map_err(fail(CompileStep::Ospf))?)
    } else {
        None
    };

    node.bgp = if model.has_node(OverlayId::Bgp, device) {
        cx.step = CompileStep::Bgp;
        Some(compiler.bgp(&mut cx, node).map_err(fail(CompileStep::Bgp))?)
    } else {
        None
    };

    node.isis = if model.has_node(OverlayId::Isis, device) {
        cx.step = CompileStep::Isis;
        compiler.isis(&mut cx, node).map_err(fail(CompileStep::Isis))?
    } else {
        None
    };

    Ok(())
}

/// Step of the compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileStep {
    /// Resolving the hostname and the loopback of the device
    Device,
    /// Allocating interface ids (done by the platform compiler)
    Allocation,
    /// Compiling the interfaces
    Interfaces,
    /// Compiling the OSPF section
    Ospf,
    /// Compiling the BGP section
    Bgp,
    /// Compiling the ISIS section
    Isis,
}

impl fmt::Display for CompileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Allocation => write!(f, "allocation"),
            Self::Interfaces => write!(f, "interfaces"),
            Self::Ospf => write!(f, "ospf"),
            Self::Bgp => write!(f, "bgp"),
            Self::Isis => write!(f, "isis"),
        }
    }
}

/// Fatal error while compiling a device
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Cannot compile {label} ({step}): {kind}")]
pub struct CompileError {
    /// The device which failed
    pub device: DeviceId,
    /// Name of the device in the input
    pub label: String,
    /// Step in which the error happened
    pub step: CompileStep,
    /// Cause of the error
    pub kind: CompileErrorKind,
}

impl CompileError {
    /// Create a new error
    pub fn new(
        device: DeviceId,
        label: impl Into<String>,
        step: CompileStep,
        kind: impl Into<CompileErrorKind>,
    ) -> Self {
        Self { device, label: label.into(), step, kind: kind.into() }
    }
}

/// Cause of a fatal compile error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileErrorKind {
    /// The device has no loopback address in the IP overlay
    #[error("The device has no loopback address")]
    MissingAddress,
    /// A device is missing a required attribute
    #[error("Device {device} has no attribute {attribute}")]
    MissingAttribute {
        /// Label of the device
        device: String,
        /// Name of the missing attribute
        attribute: &'static str,
    },
    /// No interface id was allocated for a link of the device
    #[error("No interface was allocated for link {0:?}")]
    MissingInterfaceId(LinkId),
    /// The interface allocator ran out of interface ids
    #[error("{0}")]
    AllocatorExhausted(#[from] AllocError),
    /// More than one addressed link connects the device with an eBGP peer
    #[error("Multiple addressed links towards eBGP peer {peer}: {links:?}")]
    AmbiguousAdjacency {
        /// Label of the peer
        peer: String,
        /// All addressed links between the device and the peer
        links: Vec<LinkId>,
    },
    /// The management address pool is exhausted
    #[error("No management address left")]
    TapPoolExhausted,
    /// The network model is inconsistent
    #[error("{0}")]
    Model(#[from] ModelError),
}

/// Non-fatal problem while compiling a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileWarning {
    /// The affected device
    pub device: DeviceId,
    /// Step in which the problem was detected
    pub step: CompileStep,
    /// Cause of the warning
    pub kind: WarningKind,
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device {:?} ({}): {}", self.device, self.step, self.kind)
    }
}

/// Cause of a compile warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// The link has no IP edge, or the IP edge has no address for the device. The interface is
    /// omitted.
    MissingAdjacencyAddressing(LinkId),
    /// The AS has no entry in the table of advertised blocks. Nothing is advertised.
    MissingAsBlocks(AsId),
    /// The iBGP peer has no loopback address. The neighbor is skipped.
    MissingPeerLoopback(String),
    /// No addressed link connects the device with the eBGP peer. The neighbor is skipped.
    UnaddressedEbgpPeer(String),
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAdjacencyAddressing(link) => {
                write!(f, "link {:?} is not addressed, skipping the interface", link)
            }
            Self::MissingAsBlocks(asn) => write!(f, "no advertised blocks for {}", asn),
            Self::MissingPeerLoopback(peer) => {
                write!(f, "iBGP peer {} has no loopback, skipping the neighbor", peer)
            }
            Self::UnaddressedEbgpPeer(peer) => {
                write!(f, "no addressed link towards eBGP peer {}, skipping the neighbor", peer)
            }
        }
    }
}
