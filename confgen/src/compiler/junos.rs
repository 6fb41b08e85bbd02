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

//! Junos dialect, used on Junosphere

use super::{base, CompileErrorKind, DeviceCompiler, DeviceContext};
use crate::model::Syntax;
use crate::store::{BgpConfig, CompiledDevice, CompiledInterface, IsisConfig, OspfConfig};

/// Device compiler for Junos. Only the shared logic is used, with `lo0` as loopback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JunosCompiler;

impl JunosCompiler {
    /// Loopback interface
    pub const LO_INTERFACE: &'static str = "lo0";
}

impl DeviceCompiler for JunosCompiler {
    fn syntax(&self) -> Syntax {
        Syntax::Junos
    }

    fn lo_interface(&self) -> &'static str {
        Self::LO_INTERFACE
    }

    fn interfaces(
        &self,
        cx: &mut DeviceContext<'_>,
        node: &CompiledDevice,
    ) -> Result<Vec<CompiledInterface>, CompileErrorKind> {
        base::interfaces(cx, node)
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
