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

use crate::bitbang::EmptyPayloadPolicy;
use crate::config::GPIO_SYSFS_DIR;
use crate::config::schema::{BITBANG_SCHEMA, OPTIONAL_BITBANG_SCHEMA, schema_violations};
use crate::error::UploaderError;
use crate::gpio::PinId;
use crate::system_io::fs_read;
use log::trace;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

fn default_gpio_dir() -> PathBuf {
    PathBuf::from(GPIO_SYSFS_DIR)
}

/// Everything the bit-bang transport needs, as read from its config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BitbangConfig {
    pub bitstream_file: PathBuf,
    pub fpga_sclk: PinId,
    pub fpga_sdata: PinId,
    #[serde(default = "default_gpio_dir")]
    pub gpio_dir: PathBuf,
    #[serde(default)]
    pub empty_payload: EmptyPayloadPolicy,
}

impl BitbangConfig {
    /// Build a config from an already parsed document.
    ///
    /// All required and optional keys, the allowed values of `empty_payload`, the pin number
    /// range and the distinctness of the two pins are checked before conversion. Every
    /// violation is returned at once in `UploaderError::Config`.
    pub fn from_value(value: Value) -> Result<BitbangConfig, UploaderError> {
        let errors = bitbang_violations(&value);
        if !errors.is_empty() {
            return Err(UploaderError::Config(errors));
        }
        serde_json::from_value(value).map_err(|e| {
            UploaderError::Config(vec![format!("Config could not be converted: {e}")])
        })
    }

    /// Load, validate and convert a config file.
    ///
    /// A relative `bitstream_file` is taken relative to the directory holding the config file,
    /// so a config and its bitstream can be moved around together.
    pub fn from_file(config_file: &Path) -> Result<BitbangConfig, UploaderError> {
        let mut config = BitbangConfig::from_value(load_config(config_file)?)?;
        if config.bitstream_file.is_relative() {
            if let Some(parent) = config_file.parent() {
                config.bitstream_file = parent.join(&config.bitstream_file);
            }
        }
        trace!("Loaded bit-bang config: {config:?}");
        Ok(config)
    }
}

/// Values `empty_payload` may take.
static EMPTY_PAYLOAD_VALUES: &[&str] = &["skip", "full_word"];

fn bitbang_violations(value: &Value) -> Vec<String> {
    let mut errors = schema_violations(value, BITBANG_SCHEMA, true);
    let Some(table) = value.as_object() else {
        return errors;
    };
    errors.extend(schema_violations(value, OPTIONAL_BITBANG_SCHEMA, false));

    for key in ["fpga_sclk", "fpga_sdata"] {
        if let Some(n) = table.get(key).and_then(Value::as_u64) {
            if n > u64::from(u32::MAX) {
                errors.push(format!(
                    "Config key '{key}' must be a pin number no larger than {}, got {n}",
                    u32::MAX
                ));
            }
        }
    }

    if let Some(policy) = table.get("empty_payload").and_then(Value::as_str) {
        if !EMPTY_PAYLOAD_VALUES.contains(&policy) {
            errors.push(format!(
                "Config key 'empty_payload' must be one of {}, got '{policy}'",
                EMPTY_PAYLOAD_VALUES
                    .iter()
                    .map(|v| format!("'{v}'"))
                    .collect::<Vec<_>>()
                    .join(" or ")
            ));
        }
    }

    if let (Some(sclk), Some(sdata)) = (table.get("fpga_sclk"), table.get("fpga_sdata")) {
        if !sclk.is_null() && sclk == sdata {
            errors.push(format!(
                "Config keys 'fpga_sclk' and 'fpga_sdata' must name different pins, both are {sclk}"
            ));
        }
    }
    errors
}

/// Parse a config file into a generic document.
///
/// Files ending in `.toml` are parsed as TOML, everything else as JSON.
///
/// # Returns: `Result<Value, UploaderError>`
/// * `Ok(Value)` - The parsed document
/// * `Err(UploaderError::ConfigNotFound)` - `config_file` is not a file
/// * `Err(UploaderError::ConfigParse)` - The file is not valid JSON/TOML
pub fn load_config(config_file: &Path) -> Result<Value, UploaderError> {
    if !config_file.is_file() {
        return Err(UploaderError::ConfigNotFound(config_file.into()));
    }
    let contents = fs_read(config_file)?;
    let is_toml = config_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let parsed = if is_toml {
        toml::from_str::<Value>(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Value>(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| UploaderError::ConfigParse {
        file: config_file.into(),
        e,
    })
}
