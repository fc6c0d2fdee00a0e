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

#![allow(dead_code)]

use efpga_uploader::gpio::{Edge, LineTrace};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// What a receiver sampling DATA on both CLOCK edges would have seen.
#[derive(Debug, Default)]
pub struct Received {
    pub clock_edges: usize,
    pub payload: Vec<u8>,
    pub control_bits: Vec<bool>,
}

pub fn receive(trace: &LineTrace) -> Received {
    let mut received = Received::default();
    let mut payload_bits = Vec::new();
    for (edge, data) in trace.samples() {
        received.clock_edges += 1;
        match edge {
            Edge::Rising => payload_bits.push(data),
            Edge::Falling => received.control_bits.push(data),
        }
    }
    received.payload = payload_bits
        .chunks(8)
        .map(|bits| bits.iter().fold(0u8, |byte, bit| (byte << 1) | u8::from(*bit)))
        .collect();
    received
}

/// Fold 32 control bits back into a word, MSB first.
pub fn word_from_bits(bits: &[bool]) -> u32 {
    assert_eq!(bits.len(), 32, "a control word is 32 bits");
    bits.iter()
        .fold(0u32, |word, bit| (word << 1) | u32::from(*bit))
}

/// The control bit expected on the falling edge of `bit_pos` within byte `byte_pos`.
pub fn expected_control_bit(word: u32, byte_pos: usize, bit_pos: usize) -> bool {
    let index = 31 - (8 * (byte_pos % 4) + bit_pos);
    (word >> index) & 1 == 1
}

/// A temp dir laid out like `/sys/class/gpio` with the given pin directories present.
pub fn fake_gpio_dir(pins: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(dir.path().join("export"), "").expect("failed to create export");
    for pin in pins {
        let pin_dir = dir.path().join(pin);
        fs::create_dir(&pin_dir).expect("failed to create pin dir");
        fs::write(pin_dir.join("direction"), "in").expect("failed to create direction");
        fs::write(pin_dir.join("value"), "1").expect("failed to create value");
    }
    dir
}

pub fn read_attr(gpio_dir: &Path, pin: &str, attr: &str) -> String {
    fs::read_to_string(gpio_dir.join(pin).join(attr))
        .unwrap_or_else(|e| panic!("failed to read {pin}/{attr}: {e}"))
}

pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap_or_else(|e| panic!("failed to write {path:?}: {e}"));
    path
}
