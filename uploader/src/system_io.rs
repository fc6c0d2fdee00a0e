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

//! Error Wrapping File System I/O Helpers
//!
//! Thin wrappers around standard file system operations which convert failures into
//! `UploaderError` values carrying the offending path. Also home to the two precondition
//! checks which must pass before any transport is touched: the bitstream file check and the
//! serial device check.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use efpga_uploader::system_io::{read_bitstream, validate_serial_device};
//! # use std::path::Path;
//!
//! # fn example() -> Result<(), efpga_uploader::error::UploaderError> {
//! let port = validate_serial_device(Path::new("ttyUSB0"))?;
//! let data = read_bitstream(Path::new("bitstream.bin"))?;
//! # Ok(())
//! # }
//! ```

use crate::config::DEV_DIR;
use crate::error::UploaderError;
use log::{info, trace, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// Read a small text file, such as a config file, into a String.
///
/// # Returns: `Result<String, UploaderError>`
/// * `Ok(String)` - The complete contents of the file
/// * `Err(UploaderError::IORead)` - The file is missing, unreadable or not UTF-8
pub fn fs_read(file_path: &Path) -> Result<String, UploaderError> {
    trace!("Reading {file_path:?}");
    fs::read_to_string(file_path).map_err(|e| UploaderError::IORead {
        file: file_path.into(),
        e,
    })
}

/// Write `value` to an existing sysfs-style attribute file.
///
/// The file is never created: a missing attribute means the kernel did not expose it, which
/// is reported rather than papered over with a regular file.
///
/// # Returns: `Result<(), UploaderError>`
/// * `Ok(())` - The whole value was written
/// * `Err(UploaderError::IOWrite)` - The attribute is missing or rejected the write
pub fn fs_write(file_path: &Path, value: impl AsRef<str>) -> Result<(), UploaderError> {
    let value = value.as_ref();
    trace!("Writing {value:?} to {file_path:?}");
    OpenOptions::new()
        .write(true)
        .open(file_path)
        .and_then(|mut attr| attr.write_all(value.as_bytes()))
        .map_err(|e| UploaderError::IOWrite {
            file: file_path.into(),
            e,
        })
}

/// Read a bitstream file verbatim.
///
/// The path must resolve to a regular file. Anything else, including a directory, is
/// reported as `UploaderError::BitstreamNotFound` so the caller can abort before any
/// transport is set up.
///
/// # Returns: `Result<Vec<u8>, UploaderError>`
/// * `Ok(Vec<u8>)` - The raw file contents, possibly empty
/// * `Err(UploaderError::BitstreamNotFound)` - The path is not a regular file
/// * `Err(UploaderError::IORead)` - The file exists but could not be read
pub fn read_bitstream(bitstream_file: &Path) -> Result<Vec<u8>, UploaderError> {
    if !bitstream_file.is_file() {
        return Err(UploaderError::BitstreamNotFound(bitstream_file.into()));
    }
    trace!("Reading bitstream from {bitstream_file:?}");
    let data = fs::read(bitstream_file).map_err(|e| UploaderError::IORead {
        file: bitstream_file.into(),
        e,
    })?;
    trace!("Read {} bytes of bitstream", data.len());
    Ok(data)
}

/// Prefix a bare device name such as `ttyUSB0` with `/dev/`.
pub fn normalize_device_path(port: &Path) -> PathBuf {
    match port.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new(DEV_DIR).join(port),
        _ => port.to_path_buf(),
    }
}

/// Check that a serial port path exists and is a character device.
///
/// A path that exists but is a regular file or a directory is rejected, since writing a
/// bitstream to it would silently "succeed" without reaching any hardware.
///
/// # Arguments
///
/// * `port` - The device port path (e.g. `/dev/ttyUSB0`, `ttyUSB0`, `/dev/ttyACM0`)
///
/// # Returns: `Result<PathBuf, UploaderError>`
/// * `Ok(PathBuf)` - The normalized device path
/// * `Err(UploaderError::Device)` - Missing path, unreadable metadata or not a character device
pub fn validate_serial_device(port: &Path) -> Result<PathBuf, UploaderError> {
    info!("Checking device...");
    let port_path = normalize_device_path(port);
    if !port_path.exists() {
        return Err(UploaderError::Device(format!(
            "Device port {port_path:?} does not exist. Please check the connection and make \
            sure you selected the correct port."
        )));
    }
    let metadata = fs::metadata(&port_path).map_err(|e| {
        UploaderError::Device(format!("Failed to access device port {port_path:?}: {e}"))
    })?;
    if !metadata.file_type().is_char_device() {
        warn!("Path {port_path:?} exists but is not a character device");
        return Err(UploaderError::Device(format!(
            "Path {port_path:?} exists but is not a character device"
        )));
    }
    trace!("{port_path:?} is a character device");
    Ok(port_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;
    use rstest::*;

    #[gtest]
    #[rstest]
    #[case::bare_name("ttyUSB0", "/dev/ttyUSB0")]
    #[case::absolute("/dev/ttyACM0", "/dev/ttyACM0")]
    #[case::relative_dot("./fake_tty", "./fake_tty")]
    #[case::nested_relative("dev/ttyS1", "dev/ttyS1")]
    fn normalizes_device_paths(#[case] input: &str, #[case] expected: &str) {
        assert_that!(
            normalize_device_path(Path::new(input)),
            eq(&PathBuf::from(expected))
        );
    }
}
