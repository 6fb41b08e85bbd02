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

//! Interface identifier allocation

use crate::store::InterfaceId;

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

const IOS_SLOTS: usize = 17;
const IOS_PORTS: usize = 5;

/// Naming scheme of the physical interfaces of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceScheme {
    /// `ge-0/0/{n}`, where `ge-0/0/2` is never used
    Junosphere,
    /// `eth{n}`
    Netkit,
    /// `Ethernet{slot}/{port}`, with 17 slots of 5 ports each
    Ios,
    /// `GigabitEthernet0/{slot}/{port}`, with 17 slots of 5 ports each
    Ios2,
    /// `gigabitethernet0/0/0/{n}`
    Dynagen,
}

impl InterfaceScheme {
    /// Indices which are never handed out
    fn reserved(&self) -> &'static [usize] {
        match self {
            Self::Junosphere => &[2],
            _ => &[],
        }
    }

    /// Number of indices (including reserved ones), or `None` if unbounded
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::Ios | Self::Ios2 => Some(IOS_SLOTS * IOS_PORTS),
            _ => None,
        }
    }

    fn name(&self, n: usize) -> String {
        let (slot, port) = (n / IOS_PORTS, n % IOS_PORTS);
        match self {
            Self::Junosphere => format!("ge-0/0/{}", n),
            Self::Netkit => format!("eth{}", n),
            Self::Ios => format!("Ethernet{}/{}", slot, port),
            Self::Ios2 => format!("GigabitEthernet0/{}/{}", slot, port),
            Self::Dynagen => format!("gigabitethernet0/0/0/{}", n),
        }
    }
}

impl fmt::Display for InterfaceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Junosphere => write!(f, "Junosphere"),
            Self::Netkit => write!(f, "Netkit"),
            Self::Ios => write!(f, "IOS"),
            Self::Ios2 => write!(f, "IOS2"),
            Self::Dynagen => write!(f, "Dynagen"),
        }
    }
}

/// Error of the interface allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// All interfaces of a finite scheme are used up
    #[error("All {capacity} {scheme} interfaces are allocated")]
    Exhausted {
        /// The naming scheme
        scheme: InterfaceScheme,
        /// Number of interfaces of the scheme
        capacity: usize,
    },
}

/// # Interface Allocator
///
/// Hands out the interface identifiers of a single device in order. Identifiers are never handed
/// out twice by the same allocator, and each device gets a fresh allocator.
///
/// ```
/// # use confgen::platform::{InterfaceAllocator, InterfaceScheme};
/// let mut alloc = InterfaceAllocator::new(InterfaceScheme::Junosphere);
/// let names: Vec<String> = alloc.by_ref().take(3).map(|i| i.name).collect();
/// assert_eq!(names, vec!["ge-0/0/0", "ge-0/0/1", "ge-0/0/3"]);
/// ```
#[derive(Debug, Clone)]
pub struct InterfaceAllocator {
    scheme: InterfaceScheme,
    next: usize,
    skip: BTreeSet<usize>,
}

impl InterfaceAllocator {
    /// Create a fresh allocator
    pub fn new(scheme: InterfaceScheme) -> Self {
        Self { scheme, next: 0, skip: scheme.reserved().iter().copied().collect() }
    }

    /// The naming scheme of this allocator
    pub fn scheme(&self) -> InterfaceScheme {
        self.scheme
    }

    /// Get the next interface identifier
    pub fn next_id(&mut self) -> Result<InterfaceId, AllocError> {
        while self.skip.contains(&self.next) {
            self.next += 1;
        }
        if let Some(capacity) = self.scheme.capacity() {
            if self.next >= capacity {
                return Err(AllocError::Exhausted { scheme: self.scheme, capacity });
            }
        }
        let n = self.next;
        self.next += 1;
        Ok(InterfaceId::new(n, self.scheme.name(n)))
    }
}

impl Iterator for InterfaceAllocator {
    type Item = InterfaceId;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_id().ok()
    }
}
