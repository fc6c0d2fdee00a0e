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

use crate::error::UploaderError;
use crate::gpio::{OutputLine, PinId};
use crate::system_io::fs_write;
use log::{debug, trace};
use std::fs::{File, OpenOptions};
use std::io::{Seek, Write};
use std::path::{Component, Path, PathBuf};

/// A GPIO output driven through `/sys/class/gpio`.
///
/// The `value` attribute is held open for the lifetime of the line so that each level change
/// costs a single write.
#[derive(Debug)]
pub struct SysfsLine {
    value_path: PathBuf,
    value: File,
}

impl SysfsLine {
    /// Export `pin` if needed and configure it as an output driven low.
    ///
    /// Numbered pins live at `<gpio_dir>/gpio<N>` and are exported through `<gpio_dir>/export`
    /// when that directory does not exist yet. Labelled pins must already be present as
    /// `<gpio_dir>/<label>`, which is how boards that name their lines expose them.
    ///
    /// # Arguments
    ///
    /// * `gpio_dir` - The sysfs GPIO class directory, typically `/sys/class/gpio/`
    /// * `pin` - The pin to drive
    ///
    /// # Returns: `Result<SysfsLine, UploaderError>`
    /// * `Ok(SysfsLine)` - The pin is an output at logic 0
    /// * `Err(UploaderError::Gpio)` - Invalid label or the pin directory never appeared
    /// * `Err(UploaderError::IOWrite)` - Writing `export`, `direction` or opening `value` failed
    pub fn open(gpio_dir: &Path, pin: &PinId) -> Result<SysfsLine, UploaderError> {
        let pin_dir = pin_dir(gpio_dir, pin)?;
        if let PinId::Number(n) = pin {
            if !pin_dir.exists() {
                debug!("Exporting GPIO {n}");
                fs_write(&gpio_dir.join("export"), n.to_string())?;
            }
        }
        if !pin_dir.is_dir() {
            return Err(UploaderError::Gpio(format!(
                "GPIO {pin} is not available at {pin_dir:?}"
            )));
        }

        // "low" switches the pin to output and drives it to 0 in one step
        fs_write(&pin_dir.join("direction"), "low")?;

        let value_path = pin_dir.join("value");
        let value = OpenOptions::new()
            .write(true)
            .open(&value_path)
            .map_err(|e| UploaderError::IOWrite {
                file: value_path.clone(),
                e,
            })?;
        trace!("GPIO {pin} ready at {value_path:?}");
        Ok(SysfsLine {
            value_path,
            value,
        })
    }
}

fn pin_dir(gpio_dir: &Path, pin: &PinId) -> Result<PathBuf, UploaderError> {
    match pin {
        PinId::Number(n) => Ok(gpio_dir.join(format!("gpio{n}"))),
        PinId::Label(label) => {
            let mut components = Path::new(label).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(_)), None) => Ok(gpio_dir.join(label)),
                _ => Err(UploaderError::Gpio(format!(
                    "'{label}' is not a valid GPIO label"
                ))),
            }
        }
    }
}

impl OutputLine for SysfsLine {
    type Error = UploaderError;

    fn set_level(&mut self, high: bool) -> Result<(), UploaderError> {
        let level: &[u8] = if high { b"1" } else { b"0" };
        self.value
            .rewind()
            .and_then(|_| self.value.write_all(level))
            .map_err(|e| UploaderError::IOWrite {
                file: self.value_path.clone(),
                e,
            })
    }
}
