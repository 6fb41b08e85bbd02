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

//! Quagga dialect, used on Netkit machines

use super::{base, CompileErrorKind, DeviceCompiler, DeviceContext};
use crate::model::Syntax;
use crate::store::{BgpConfig, CompiledDevice, CompiledInterface, IsisConfig, OspfConfig};

/// Device compiler for the Quagga routing suite. The loopback is an alias of the `lo` device.
/// Quagga has no ISIS section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuaggaCompiler;

impl QuaggaCompiler {
    /// Loopback alias used for BGP
    pub const LO_INTERFACE: &'static str = "lo0:1";
}

impl DeviceCompiler for QuaggaCompiler {
    fn syntax(&self) -> Syntax {
        Syntax::Quagga
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
        if cx.model.phy_node(cx.device)?.is_router() {
            interfaces.push(base::loopback_interface(
                node,
                Self::LO_INTERFACE,
                "Loopback for BGP",
            )?);
        }
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
        base::bgp(cx, Self::LO_INTERFACE)
    }

    fn isis(
        &self,
        _cx: &mut DeviceContext<'_>,
        _node: &CompiledDevice,
    ) -> Result<Option<IsisConfig>, CompileErrorKind> {
        Ok(None)
    }
}
