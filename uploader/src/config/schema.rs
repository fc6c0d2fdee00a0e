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

//! Key/type checking for loosely typed configuration documents.
//!
//! A config file is first parsed into a generic [`Value`] and checked here, so that every
//! missing key and every mistyped value is reported in one go instead of failing on the first
//! problem a typed deserializer runs into.

use crate::error::UploaderError;
use serde_json::Value;
use std::fmt;

/// The type a config value is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    /// A GPIO pin: either a non-negative pin number or a board-specific label.
    Pin,
}

impl ValueKind {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Pin => value.is_u64() || value.is_string(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Pin => "pin (non-negative integer or string label)",
        };
        f.write_str(name)
    }
}

/// Keys every bit-bang config must provide.
pub static BITBANG_SCHEMA: &[(&str, ValueKind)] = &[
    ("bitstream_file", ValueKind::String),
    ("fpga_sclk", ValueKind::Pin),
    ("fpga_sdata", ValueKind::Pin),
];

/// Keys a bit-bang config may provide. Only type checked when present.
pub static OPTIONAL_BITBANG_SCHEMA: &[(&str, ValueKind)] = &[
    ("gpio_dir", ValueKind::String),
    ("empty_payload", ValueKind::String),
];

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_i64() && !n.is_u64() => "negative integer",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

/// Collect every schema violation in `config`.
///
/// With `required` set, absent (or null) keys are violations; otherwise they are skipped and
/// only present keys are type checked.
pub fn schema_violations(
    config: &Value,
    schema: &[(&str, ValueKind)],
    required: bool,
) -> Vec<String> {
    let Some(table) = config.as_object() else {
        return vec![format!(
            "Config must be a table of keys and values, got {}",
            type_name(config)
        )];
    };

    let mut errors = Vec::new();
    for (key, expected) in schema {
        match table.get(*key) {
            None | Some(Value::Null) => {
                if required {
                    errors.push(format!("Missing required config key: '{key}'"));
                }
            }
            Some(value) if !expected.matches(value) => errors.push(format!(
                "Config key '{key}' must be of type {expected}, got {}",
                type_name(value)
            )),
            Some(_) => {}
        }
    }
    errors
}

/// Validate `config` against a schema of required keys.
///
/// # Returns: `Result<(), UploaderError>`
/// * `Ok(())` - Every key is present with the expected type
/// * `Err(UploaderError::Config)` - One message per violation, in schema order
pub fn validate_config(config: &Value, schema: &[(&str, ValueKind)]) -> Result<(), UploaderError> {
    let errors = schema_violations(config, schema, true);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(UploaderError::Config(errors))
    }
}
