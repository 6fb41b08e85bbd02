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

//! Module containing all error types

use crate::model::{input::InputError, ModelError};
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the network model
    #[error("Model Error: {0}")]
    ModelError(#[from] ModelError),
    /// Error while reading the network description
    #[error("Input Error: {0}")]
    InputError(#[from] InputError),
    /// At least one device could not be compiled
    #[error("Compilation failed for {} device(s): {}", .0.len(), .0.join(", "))]
    CompilationFailed(Vec<String>),
    /// Cannot read or write a file
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Cannot parse or serialize JSON
    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),
}
