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

//! UART transport: the bitstream is written to the serial port byte for byte with no framing.

use crate::error::UploaderError;
use log::{debug, trace};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// How long a single write may block waiting for the port to drain.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Open `port` at `baudrate` with 8N1 framing and no flow control.
///
/// # Returns: `Result<Box<dyn SerialPort>, UploaderError>`
/// * `Ok(Box<dyn SerialPort>)` - The opened port
/// * `Err(UploaderError::Serial)` - The port could not be opened or configured
pub fn open_port(port: &Path, baudrate: u32) -> Result<Box<dyn SerialPort>, UploaderError> {
    debug!("Opening {port:?} at {baudrate} baud");
    serialport::new(port.to_string_lossy(), baudrate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map_err(|e| UploaderError::Serial {
            port: port.into(),
            e,
        })
}

/// Write `data` verbatim and flush.
///
/// `port` only names the destination in errors.
pub fn write_bitstream<W: Write + ?Sized>(
    writer: &mut W,
    port: &Path,
    data: &[u8],
) -> Result<(), UploaderError> {
    trace!("Writing {} bytes to {port:?}", data.len());
    writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .map_err(|e| UploaderError::IOWrite {
            file: port.into(),
            e,
        })
}
