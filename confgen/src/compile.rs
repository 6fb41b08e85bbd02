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

//! Compilation of a whole network

use crate::compiler::{CompileError, CompileWarning};
use crate::config::CompilerConfig;
use crate::model::{NetworkModel, Platform};
use crate::platform::{platform_compiler, CompileReport};
use crate::store::DeviceStore;
use crate::Error;

use itertools::Itertools;
use log::*;

/// Result of compiling a network: the store with all compiled records, and one report per
/// compiled `(host, platform)` pair.
#[derive(Debug, Clone)]
pub struct NetworkCompilation {
    /// All compiled records and lab descriptions
    pub store: DeviceStore,
    /// Reports, in the order in which the platforms were compiled
    pub reports: Vec<CompileReport>,
}

impl NetworkCompilation {
    /// All devices which failed
    pub fn failed(&self) -> impl Iterator<Item = &CompileError> + '_ {
        self.reports.iter().flat_map(|r| r.failed.iter())
    }

    /// All non-fatal problems
    pub fn warnings(&self) -> impl Iterator<Item = &CompileWarning> + '_ {
        self.reports.iter().flat_map(|r| r.warnings.iter())
    }

    /// Number of successfully compiled devices
    pub fn num_compiled(&self) -> usize {
        self.reports.iter().map(|r| r.compiled.len()).sum()
    }

    /// Returns an error naming every failed device, if there is any.
    pub fn check(&self) -> Result<(), Error> {
        let failed: Vec<String> = self.failed().map(|e| e.label.clone()).collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::CompilationFailed(failed))
        }
    }
}

/// All `(host, platform)` pairs declared by any router, sorted.
pub fn host_platforms(model: &NetworkModel) -> Vec<(String, Platform)> {
    model
        .devices()
        .into_iter()
        .filter_map(|d| model.phy_node(d).ok())
        .filter(|n| n.is_router())
        .filter_map(|n| Some((n.host.clone()?, n.platform?)))
        .sorted()
        .dedup()
        .collect()
}

/// # Compile a network
///
/// Runs the platform compiler of every `(host, platform)` pair declared by the routers of the
/// model, in ascending order. If `host` is given, only that host is compiled. The timestamp is
/// used to name the output folder of platforms that put every run into a separate folder.
///
/// ```
/// use confgen::compile_network;
/// use confgen::model::{NetworkModel, PhyNode, Platform, Syntax};
/// use confgen::CompilerConfig;
///
/// let mut model = NetworkModel::new();
/// let r1 = model.add_device(
///     PhyNode::router("r1")
///         .with_syntax(Syntax::Quagga)
///         .with_platform(Platform::Netkit)
///         .on_host("h1"),
/// );
/// model.set_loopback(r1, "192.168.0.1".parse().unwrap()).unwrap();
///
/// let result = compile_network(&model, &CompilerConfig::default(), None, "20210101_000000_0");
/// assert!(result.check().is_ok());
/// assert_eq!(result.num_compiled(), 1);
/// assert_eq!(result.store.topology("h1").unwrap().machines, vec!["r1"]);
/// ```
pub fn compile_network(
    model: &NetworkModel,
    config: &CompilerConfig,
    host: Option<&str>,
    timestamp: impl Into<String>,
) -> NetworkCompilation {
    let mut store = DeviceStore::new(timestamp);
    let mut reports = Vec::new();

    for (h, platform) in host_platforms(model) {
        if host.map(|x| x != h).unwrap_or(false) {
            continue;
        }
        let compiler = platform_compiler(platform, h);
        reports.push(compiler.compile(model, config, &mut store));
    }

    if reports.is_empty() {
        warn!("No routers to compile");
    }

    NetworkCompilation { store, reports }
}
