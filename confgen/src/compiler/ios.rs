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

//! Cisco IOS dialects

use super::{base, CompileErrorKind, DeviceCompiler, DeviceContext};
use crate::model::Syntax;
use crate::store::{BgpConfig, CompiledDevice, CompiledInterface, IsisConfig, OspfConfig};

/// Device compiler for Cisco IOS. Classic IOS and the newer generation only differ in their
/// interface naming, which is handled by the interface allocator.
///
/// Compared to the shared logic, IOS interfaces carry their OSPF cost and ISIS settings, every
/// device gets a loopback interface, the BGP section names the loopback as update source, and ISIS
/// is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IosCompiler {
    syntax: Syntax,
}

impl IosCompiler {
    /// Classic IOS
    pub const CLASSIC: Self = Self { syntax: Syntax::Ios };
    /// Newer IOS generation
    pub const NEXT_GEN: Self = Self { syntax: Syntax::Ios2 };
    /// Loopback interface
    pub const LO_INTERFACE: &'static str = "Loopback0";
}

impl DeviceCompiler for IosCompiler {
    fn syntax(&self) -> Syntax {
        self.syntax
    }

    fn lo_interface(&self) -> &'static str {
        Self::LO_INTERFACE
    }

    fn interfaces(
        &self,
        cx: &mut DeviceContext<'_>,
        node: &CompiledDevice,
    ) -> Result<Vec<CompiledInterface>, CompileErrorKind> {
        let mut interfaces = base::interfaces(cx, node)?;
        base::annotate_ospf_cost(cx.model, &mut interfaces);
        base::annotate_isis(cx.model, cx.device, &mut interfaces);
        interfaces.push(base::loopback_interface(node, Self::LO_INTERFACE, "Loopback")?);
        Ok(interfaces)
    }

    fn ospf(
        &self,
        cx: &mut DeviceContext<'_>,
        _node: &CompiledDevice,
    ) -> Result<OspfConfig, CompileErrorKind> {
        base::ospf(cx, Self::LO_INTERFACE)
    }

    fn bgp(
        &self,
        cx: &mut DeviceContext<'_>,
        _node: &CompiledDevice,
    ) -> Result<BgpConfig, CompileErrorKind> {
        let mut bgp = base::bgp(cx, Self::LO_INTERFACE)?;
        bgp.lo_interface = Some(Self::LO_INTERFACE.to_string());
        Ok(bgp)
    }

    fn isis(
        &self,
        cx: &mut DeviceContext<'_>,
        _node: &CompiledDevice,
    ) -> Result<Option<IsisConfig>, CompileErrorKind> {
        Ok(cx
            .model
            .isis()
            .node(cx.device)
            .map(|n| IsisConfig { net: n.net.clone(), process_id: n.process_id }))
    }
}
