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

//! Junosphere platform: virtual Junos routers

use super::{
    allocate_interfaces, select_devices, CompileReport, InterfaceAllocator, InterfaceScheme,
    PlatformCompiler,
};
use crate::compiler::{compile_device, device_compiler};
use crate::config::CompilerConfig;
use crate::model::{NetworkModel, Platform, Syntax};
use crate::naming::folder_safe;
use crate::store::{DeviceStore, RenderTarget};

use log::*;

/// Compiles all Junos routers of a host into Junosphere configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunosphereCompiler {
    host: String,
}

impl JunosphereCompiler {
    /// Create a compiler for a host
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl PlatformCompiler for JunosphereCompiler {
    fn platform(&self) -> Platform {
        Platform::Junosphere
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn compile(
        &self,
        model: &NetworkModel,
        config: &CompilerConfig,
        store: &mut DeviceStore,
    ) -> CompileReport {
        info!("Compiling Junosphere for {}", self.host);
        let mut report = CompileReport::new(Platform::Junosphere, self.host.as_str());
        let dst_folder = format!("{}/{}/junosphere", config.render_root, self.host);

        for (device, phy) in select_devices(model, &self.host, Platform::Junosphere, Syntax::Junos)
        {
            let node = store.node_mut(model, device);
            node.render = Some(RenderTarget {
                template: "templates/junos.mako".to_string(),
                dst_folder: dst_folder.clone(),
                dst_file: format!("{}.conf", folder_safe(&phy.label)),
                ..Default::default()
            });
            let mut allocator = InterfaceAllocator::new(InterfaceScheme::Junosphere);
            let result = allocate_interfaces(model, node, &mut allocator).and_then(|_| {
                compile_device(
                    device_compiler(Syntax::Junos),
                    model,
                    config,
                    node,
                    &mut report.warnings,
                )
            });
            report.record(device, result);
        }

        report
    }
}
