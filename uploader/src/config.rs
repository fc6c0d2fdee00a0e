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

pub mod bitbang_config;
pub mod schema;

pub use bitbang_config::{BitbangConfig, load_config};
pub use schema::{BITBANG_SCHEMA, OPTIONAL_BITBANG_SCHEMA, ValueKind, validate_config};

/// Directory that bare serial device names (e.g. `ttyUSB0`) are resolved against.
pub static DEV_DIR: &str = "/dev/";

/// The serial port used when none is given on the command line.
pub static DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// The eFPGA's UART baud rate when clocked at 10 MHz.
pub const DEFAULT_BAUDRATE: u32 = 57600;

/// The kernel's sysfs GPIO class directory. Can be overridden per board with the `gpio_dir`
/// config key.
pub static GPIO_SYSFS_DIR: &str = "/sys/class/gpio/";

/// The bit-bang configuration file used when none is given on the command line.
pub static DEFAULT_BITBANG_CONFIG: &str = "config.json";
