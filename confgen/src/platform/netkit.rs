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

//! Netkit platform: emulated Linux machines running Quagga

use super::{
    allocate_interfaces, select_devices, CompileReport, InterfaceAllocator, InterfaceScheme,
    PlatformCompiler, TapIpPool,
};
use crate::compiler::{
    compile_device, device_compiler, CompileError, CompileErrorKind, CompileStep, CompileWarning,
};
use crate::config::CompilerConfig;
use crate::model::{DeviceId, NetworkModel, PhyNode, Platform, Syntax};
use crate::naming::network_hostname;
use crate::store::{
    CompiledDevice, DeviceStore, LabConfigItem, LabTopology, RenderTarget, SshConfig, TapConfig,
    TapIpEntry, ZebraConfig,
};

use log::*;

const STARTUP_TEMPLATE: &str = "templates/netkit_startup.mako";
const QUAGGA_TEMPLATES: &str = "templates/quagga";
const LAB_TEMPLATE: &str = "templates/netkit_lab_conf.mako";
const LAB_DESCRIPTION: &str = "Netkit Lab";

/// Compiles all Quagga routers of a host into Netkit machines, and builds the lab description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetkitCompiler {
    host: String,
}

impl NetkitCompiler {
    /// Create a compiler for a host
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    fn dst_folder(&self, config: &CompilerConfig) -> String {
        format!("{}/{}/netkit", config.render_root, self.host)
    }

    fn compile_machine(
        &self,
        model: &NetworkModel,
        config: &CompilerConfig,
        phy: &PhyNode,
        node: &mut CompiledDevice,
        warnings: &mut Vec<CompileWarning>,
    ) -> Result<(), CompileError> {
        let hostname = network_hostname(&phy.label);
        let dst_folder = self.dst_folder(config);
        node.render = Some(RenderTarget {
            template: STARTUP_TEMPLATE.to_string(),
            base: Some(QUAGGA_TEMPLATES.to_string()),
            base_dst_folder: Some(format!("{}/{}", dst_folder, hostname)),
            dst_folder,
            dst_file: format!("{}.startup", hostname),
        });
        node.zebra = Some(ZebraConfig {
            hostname,
            password: config.zebra_password.clone(),
            static_routes: Vec::new(),
        });
        node.ssh = Some(SshConfig { use_key: true });

        let mut allocator = InterfaceAllocator::new(InterfaceScheme::Netkit);
        allocate_interfaces(model, node, &mut allocator)?;
        let tap = allocator.next_id().map_err(|e| {
            CompileError::new(node.id, node.input_label.clone(), CompileStep::Allocation, e)
        })?;
        node.tap = Some(TapConfig { id: tap.name, ip: None });

        compile_device(device_compiler(Syntax::Quagga), model, config, node, warnings)?;

        if let Some(bgp) = node.bgp.as_mut() {
            bgp.debug = true;
        }
        Ok(())
    }

    /// Assign the tap addresses to all compiled machines, in the order of their labels. Machines
    /// for which no address is left are marked as failed.
    fn allocate_tap_ips(
        &self,
        store: &mut DeviceStore,
        pool: &mut TapIpPool,
        report: &mut CompileReport,
    ) {
        let mut machines: Vec<(String, DeviceId)> = report
            .compiled
            .iter()
            .filter_map(|d| store.node(*d).map(|n| (n.label.clone(), *d)))
            .collect();
        machines.sort();

        for (label, device) in machines {
            let ip = pool.take_next();
            let node = store.try_node_mut(device);
            if let Some(tap) = node.and_then(|n| n.tap.as_mut()) {
                tap.ip = ip;
            }
            if ip.is_none() {
                report.fail(CompileError::new(
                    device,
                    label,
                    CompileStep::Allocation,
                    CompileErrorKind::TapPoolExhausted,
                ));
            }
        }
    }

    /// Build the lab description of the host from all compiled machines.
    fn lab_topology(
        &self,
        config: &CompilerConfig,
        store: &DeviceStore,
        pool: &TapIpPool,
        devices: &[DeviceId],
    ) -> LabTopology {
        let nodes: Vec<&CompiledDevice> = devices.iter().filter_map(|d| store.node(*d)).collect();

        let mut machines: Vec<String> = nodes.iter().map(|n| n.label.clone()).collect();
        machines.sort();

        let mut config_items: Vec<LabConfigItem> = nodes
            .iter()
            .flat_map(|n| {
                n.interfaces.iter().filter_map(move |i| {
                    let id = n.interface_id(i.edge?)?;
                    Some(LabConfigItem {
                        device: n.label.clone(),
                        key: id.numeric_suffix().to_string(),
                        value: i.subnet.to_string().replace('/', "."),
                    })
                })
            })
            .collect();
        config_items.sort_by(|a, b| a.device.cmp(&b.device));

        let mut tap_ips: Vec<TapIpEntry> = nodes
            .iter()
            .filter_map(|n| {
                let tap = n.tap.as_ref()?;
                Some(TapIpEntry { device: n.label.clone(), id: tap.id.clone(), ip: tap.ip? })
            })
            .collect();
        tap_ips.sort_by_key(|t| t.ip);

        LabTopology {
            render: RenderTarget {
                template: LAB_TEMPLATE.to_string(),
                base: None,
                dst_folder: self.dst_folder(config),
                base_dst_folder: None,
                dst_file: "lab.conf".to_string(),
            },
            description: LAB_DESCRIPTION.to_string(),
            machines,
            config_items,
            tap_host: pool.tap_host(),
            tap_vm: pool.tap_vm(),
            tap_ips,
        }
    }
}

impl PlatformCompiler for NetkitCompiler {
    fn platform(&self) -> Platform {
        Platform::Netkit
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
        info!("Compiling Netkit for {}", self.host);
        let mut report = CompileReport::new(Platform::Netkit, self.host.as_str());

        for (device, phy) in select_devices(model, &self.host, Platform::Netkit, Syntax::Quagga) {
            let node = store.node_mut(model, device);
            let result = self.compile_machine(model, config, phy, node, &mut report.warnings);
            report.record(device, result);
        }

        let mut pool = TapIpPool::new(config.tap_subnet);
        self.allocate_tap_ips(store, &mut pool, &mut report);

        if report.compiled.is_empty() {
            debug!("No Netkit machines on {}", self.host);
        }
        let topology = self.lab_topology(config, store, &pool, &report.compiled);
        *store.topology_mut(&self.host) = topology;

        report
    }
}
