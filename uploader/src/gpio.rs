// This file is part of efpga-upload, an application to upload bitstreams to eFPGAs over UART or a bit-banged GPIO link.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// efpga-upload is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// efpga-upload is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! Output line abstraction for the bit-banged transport.
//!
//! The transmitter only ever needs to drive a line high or low, so that is the whole of the
//! [`OutputLine`] interface. [`SysfsLine`] drives a real pin through the kernel's sysfs GPIO
//! class while [`SimulatedLine`] records every level change into a shared [`LineTrace`].

pub mod simulated_line;
pub mod sysfs_line;

pub use simulated_line::{Edge, Line, LineTrace, SimulatedLine};
pub use sysfs_line::SysfsLine;

use serde::Deserialize;
use std::fmt;

/// A single digital output.
pub trait OutputLine {
    type Error;

    /// Drive the line to logic 1 (`true`) or logic 0 (`false`).
    ///
    /// # Returns: `Result<(), Self::Error>`
    /// * `Ok(())` - The new level has been written
    /// * `Err(Self::Error)` - The backend failed to write the level
    fn set_level(&mut self, high: bool) -> Result<(), Self::Error>;
}

impl<L: OutputLine + ?Sized> OutputLine for &mut L {
    type Error = L::Error;

    fn set_level(&mut self, high: bool) -> Result<(), Self::Error> {
        (**self).set_level(high)
    }
}

/// Identifies a GPIO pin either by number or by a board-specific label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum PinId {
    Number(u32),
    Label(String),
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinId::Number(n) => write!(f, "{n}"),
            PinId::Label(label) => f.write_str(label),
        }
    }
}
