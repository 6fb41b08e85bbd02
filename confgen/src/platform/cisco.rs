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

//! Cisco platform: physical IOS routers

use super::{
    allocate_interfaces, select_devices, CompileReport, InterfaceAllocator, InterfaceScheme,
    PlatformCompiler,
};
use crate::compiler::{compile_device, device_compiler};
use crate::config::CompilerConfig;
use crate::model::{NetworkModel, Platform, Syntax};
use crate::naming::network_hostname;
use crate::store::{DeviceStore, RenderTarget};

use log::*;

/// Compiles all classic IOS and next-generation IOS routers of a host. All configurations of one
/// run are written into the same folder, named after the host and the timestamp of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiscoCompiler {
    host: String,
}

/// Syntax, interface naming and template of each IOS generation
const GENERATIONS: [(Syntax, InterfaceScheme, &str); 2] = [
    (Syntax::Ios, InterfaceScheme::Ios, "templates/ios.mako"),
    (Syntax::Ios2, InterfaceScheme::Ios2, "templates/ios2/router.conf.mako"),
];

impl CiscoCompiler {
    /// Create a compiler for a host
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl PlatformCompiler for CiscoCompiler {
    fn platform(&self) -> Platform {
        Platform::Cisco
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
        info!("Compiling Cisco for {}", self.host);
        let mut report = CompileReport::new(Platform::Cisco, self.host.as_str());
        let dst_folder =
            format!("{}/{}_{}/cisco", config.render_root, self.host, store.timestamp());

        for (syntax, scheme, template) in GENERATIONS.iter().copied() {
            for (device, phy) in select_devices(model, &self.host, Platform::Cisco, syntax) {
                let node = store.node_mut(model, device);
                node.render = Some(RenderTarget {
                    template: template.to_string(),
                    dst_folder: dst_folder.clone(),
                    dst_file: format!("{}.conf", network_hostname(&phy.label)),
                    ..Default::default()
                });
                let mut allocator = InterfaceAllocator::new(scheme);
                let result = allocate_interfaces(model, node, &mut allocator).and_then(|_| {
                    compile_device(
                        device_compiler(syntax),
                        model,
                        config,
                        node,
                        &mut report.warnings,
                    )
                });
                report.record(device, result);
            }
        }

        report
    }
}
