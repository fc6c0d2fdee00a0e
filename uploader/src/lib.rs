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

//! efpga_uploader - Upload configuration bitstreams to an eFPGA.
//!
//! Two transports are supported:
//! - **UART**: the bitstream is written verbatim to a serial port (see [`uart`])
//! - **Bit-bang**: the bitstream is clocked out over two GPIO lines together with a repeating
//!   32-bit control word (see [`bitbang`])
//!
//! The [`upload`] module ties each transport to its preconditions. Those are checked in full
//! before any port is opened or any pin is exported, so a bad config, a missing bitstream or
//! a missing device never leads to a partial transfer.
//!
//! # Logging
//!
//! Library code logs through the `log` facade; the binary decides where it ends up.

pub mod bitbang;
pub mod config;
pub mod error;
pub mod gpio;
pub mod system_io;
pub mod uart;
pub mod upload;
