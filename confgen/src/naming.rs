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

//! Naming conventions for hostnames and output folders.

/// Hostname of a device, as it is used in the configuration. Routing daemons reject dots in
/// hostnames, so dots and whitespace are replaced by underscores.
///
/// ```
/// # use confgen::naming::network_hostname;
/// assert_eq!(network_hostname("core 1.as100"), "core_1_as100");
/// ```
pub fn network_hostname(label: &str) -> String {
    label.chars().map(|c| if c == '.' || c.is_whitespace() { '_' } else { c }).collect()
}

/// Name which can safely be used as a folder or file name. Every character except ASCII
/// alphanumerics, `-` and `_` is replaced by an underscore.
///
/// ```
/// # use confgen::naming::folder_safe;
/// assert_eq!(folder_safe("r1/edge.syd"), "r1_edge_syd");
/// ```
pub fn folder_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
