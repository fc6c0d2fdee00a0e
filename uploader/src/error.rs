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

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UploaderError {
    #[error(
        "UploaderError::BitstreamNotFound: File {0:?} does not exist. \
        Check for spelling and if a bitstream file was created."
    )]
    BitstreamNotFound(PathBuf),
    #[error("UploaderError::Device: {0}")]
    Device(String),
    #[error("UploaderError::ConfigNotFound: Config file {0:?} does not exist.")]
    ConfigNotFound(PathBuf),
    #[error("UploaderError::ConfigParse: Failed to parse config file {file:?}: {e}")]
    ConfigParse { file: PathBuf, e: String },
    #[error("UploaderError::Config: Invalid configuration:\n{}", .0.join("\n"))]
    Config(Vec<String>),
    #[error("UploaderError::IORead: An IO error occurred when reading from {file:?}: {e}")]
    IORead { file: PathBuf, e: std::io::Error },
    #[error("UploaderError::IOWrite: An IO error occurred when writing to {file:?}: {e}")]
    IOWrite { file: PathBuf, e: std::io::Error },
    #[error("UploaderError::Serial: Failed to open serial port {port:?}: {e}")]
    Serial {
        port: PathBuf,
        e: serialport::Error,
    },
    #[error("UploaderError::Gpio: {0}")]
    Gpio(String),
}
