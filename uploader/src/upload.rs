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

//! End-to-end upload flows for both transports.
//!
//! Every precondition (config, bitstream file, device node) is checked before the first
//! hardware side effect. Once bytes start moving there is no retry and no resumption: the
//! upload either completes or the error is handed back to the caller.

use crate::bitbang::{BitbangTransmitter, CTRL_WORD_ENABLE, EmptyPayloadPolicy};
use crate::config::BitbangConfig;
use crate::error::UploaderError;
use crate::gpio::{OutputLine, SysfsLine};
use crate::system_io::{read_bitstream, validate_serial_device};
use crate::uart::{open_port, write_bitstream};
use log::info;
use std::path::Path;

/// Upload `bitstream_file` over the serial port at `port`.
///
/// # Arguments
///
/// * `bitstream_file` - The bitstream to send
/// * `port` - Serial device path or bare device name (e.g. `ttyUSB0`)
/// * `baudrate` - Line speed, see [`crate::config::DEFAULT_BAUDRATE`]
///
/// # Returns: `Result<(), UploaderError>`
/// * `Ok(())` - Every byte was written
/// * `Err(UploaderError::Device)` - `port` is missing or not a character device
/// * `Err(UploaderError::BitstreamNotFound)` - `bitstream_file` is not a regular file
/// * `Err(UploaderError::Serial)` / `Err(UploaderError::IOWrite)` - Opening or writing failed
pub fn upload_over_uart(
    bitstream_file: &Path,
    port: &Path,
    baudrate: u32,
) -> Result<(), UploaderError> {
    let port = validate_serial_device(port)?;
    info!("Using device at {port:?}");
    let data = read_bitstream(bitstream_file)?;

    info!("Uploading bitstream...");
    let mut serial = open_port(&port, baudrate)?;
    write_bitstream(serial.as_mut(), &port, &data)?;
    info!("Bitstream transmitted!");
    Ok(())
}

/// Upload the bitstream named in the bit-bang config file at `config_file`.
///
/// The config is fully validated and the bitstream read before either GPIO is exported.
pub fn upload_over_bitbang(config_file: &Path) -> Result<(), UploaderError> {
    let config = BitbangConfig::from_file(config_file)?;
    let data = read_bitstream(&config.bitstream_file)?;

    info!(
        "Using GPIO {} as clock and GPIO {} as data",
        config.fpga_sclk, config.fpga_sdata
    );
    let sclk = SysfsLine::open(&config.gpio_dir, &config.fpga_sclk)?;
    let sdata = SysfsLine::open(&config.gpio_dir, &config.fpga_sdata)?;
    run_bitbang(sclk, sdata, &data, config.empty_payload)
}

/// Send `bitstream` with the enable control word, then send the disable control word.
pub fn run_bitbang<L: OutputLine>(
    sclk: L,
    sdata: L,
    bitstream: &[u8],
    empty_payload: EmptyPayloadPolicy,
) -> Result<(), L::Error> {
    let mut transmitter =
        BitbangTransmitter::new(sclk, sdata).with_empty_payload_policy(empty_payload);
    info!("Uploading bitstream...");
    transmitter.transmit(bitstream, CTRL_WORD_ENABLE)?;
    transmitter.disable()?;
    info!("Bitstream transmitted!");
    Ok(())
}
