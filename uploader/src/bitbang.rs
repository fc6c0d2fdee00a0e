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

//! Two-wire bit-banged transmitter for the eFPGA's bit-bang configuration port.
//!
//! Each clock pulse carries two bits. DATA holds a payload bit when CLOCK rises and a control
//! word bit when CLOCK falls:
//!
//! ```text
//!  CLOCK  ____/‾‾‾‾‾‾‾‾\____/‾‾‾‾‾‾‾‾\____
//!  DATA   ==P0==X==C31==X==P1==X==C30==X==
//!               ^ payload       ^ control
//! ```
//!
//! Payload bytes go out MSB first. The 32-bit control word is walked MSB first at the same
//! rate, eight bits per payload byte, and starts over every four bytes. The receiver uses the
//! control word to tell an ongoing transfer (`0xFAB1`) from the end of one (`0xFAB0`).

use crate::gpio::OutputLine;
use log::{debug, trace};
use serde::Deserialize;

pub const BITS_IN_BYTE: usize = 8;
pub const BITS_IN_WORD: usize = 32;
pub const BYTES_IN_WORD: usize = 4;

/// Enables bit-bang mode on the receiver and marks a transfer in progress.
pub const CTRL_WORD_ENABLE: u32 = 0x0000_FAB1;
/// Ends the transfer and disables bit-bang mode on the receiver.
pub const CTRL_WORD_DISABLE: u32 = 0x0000_FAB0;

const PROGRESS_INTERVAL: usize = 100;

/// What [`BitbangTransmitter::disable`] sends, given that it has no payload of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPayloadPolicy {
    /// Send nothing and only return the lines to idle. No clock pulses are generated, so the
    /// control word never reaches the receiver.
    #[default]
    Skip,
    /// Clock out one full control word behind a zeroed four byte payload.
    FullWord,
}

/// The payload bit sent on the rising edge for `bit_pos` (0 = MSB) of `byte`.
pub fn payload_bit(byte: u8, bit_pos: usize) -> bool {
    (byte >> (BITS_IN_BYTE - 1 - bit_pos)) & 0x1 == 1
}

/// The control word bit sent on the falling edge for `bit_pos` of the byte at `byte_pos`.
///
/// The bit index is `31 - (8 * (byte_pos mod 4) + bit_pos)`.
pub fn control_bit(control_word: u32, byte_pos: usize, bit_pos: usize) -> bool {
    let index = (BITS_IN_WORD - 1) - (BITS_IN_BYTE * (byte_pos % BYTES_IN_WORD) + bit_pos);
    (control_word >> index) & 0x1 == 1
}

/// Drives a CLOCK/DATA line pair.
///
/// The transmitter owns both lines for its whole lifetime; nothing else can toggle them while
/// a transfer is in flight.
#[derive(Debug)]
pub struct BitbangTransmitter<L: OutputLine> {
    sclk: L,
    sdata: L,
    empty_payload: EmptyPayloadPolicy,
}

impl<L: OutputLine> BitbangTransmitter<L> {
    /// Take ownership of the two lines. Both are expected to already be at logic 0.
    pub fn new(sclk: L, sdata: L) -> BitbangTransmitter<L> {
        BitbangTransmitter {
            sclk,
            sdata,
            empty_payload: EmptyPayloadPolicy::default(),
        }
    }

    pub fn with_empty_payload_policy(mut self, policy: EmptyPayloadPolicy) -> Self {
        self.empty_payload = policy;
        self
    }

    /// Clock out `data` interleaved with `control_word`, then leave both lines at 0.
    ///
    /// # Arguments
    ///
    /// * `data` - The payload, sent in order and MSB first
    /// * `control_word` - Repeated alongside the payload, one full word every four bytes
    ///
    /// # Returns: `Result<(), L::Error>`
    /// * `Ok(())` - Every bit was sent and the lines are idle
    /// * `Err(L::Error)` - A line write failed; the transfer is abandoned as-is
    pub fn transmit(&mut self, data: &[u8], control_word: u32) -> Result<(), L::Error> {
        trace!(
            "Transmitting {} bytes with control word {control_word:#010X}",
            data.len()
        );
        for (byte_pos, byte) in data.iter().enumerate() {
            for bit_pos in 0..BITS_IN_BYTE {
                self.sdata.set_level(payload_bit(*byte, bit_pos))?;
                self.sclk.set_level(true)?;
                self.sdata
                    .set_level(control_bit(control_word, byte_pos, bit_pos))?;
                self.sclk.set_level(false)?;
            }
            if byte_pos % PROGRESS_INTERVAL == 0 {
                debug!("{byte_pos}/{} bytes transmitted", data.len());
            }
        }
        self.idle()
    }

    /// Send the disable control word. See [`EmptyPayloadPolicy`] for what goes on the wire.
    pub fn disable(&mut self) -> Result<(), L::Error> {
        match self.empty_payload {
            EmptyPayloadPolicy::Skip => self.transmit(&[], CTRL_WORD_DISABLE),
            EmptyPayloadPolicy::FullWord => {
                self.transmit(&[0u8; BYTES_IN_WORD], CTRL_WORD_DISABLE)
            }
        }
    }

    fn idle(&mut self) -> Result<(), L::Error> {
        self.sclk.set_level(false)?;
        self.sdata.set_level(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;
    use rstest::*;

    #[gtest]
    #[rstest]
    #[case::msb(0x80, 0, true)]
    #[case::msb_clear(0x7F, 0, false)]
    #[case::lsb(0x01, 7, true)]
    #[case::middle(0xA5, 2, true)]
    #[case::middle_clear(0xA5, 1, false)]
    fn payload_bits_are_msb_first(#[case] byte: u8, #[case] bit_pos: usize, #[case] bit: bool) {
        expect_that!(payload_bit(byte, bit_pos), eq(bit));
    }

    #[gtest]
    #[rstest]
    #[case::first_bit_of_word(0x8000_0000, 0, 0, true)]
    #[case::wraps_every_four_bytes(0x8000_0000, 4, 0, true)]
    #[case::second_byte_starts_at_bit_23(0x0080_0000, 1, 0, true)]
    #[case::last_bit_of_word(0x0000_0001, 3, 7, true)]
    #[case::last_bit_clear(0x0000_FAB0, 3, 7, false)]
    #[case::enable_lsb(CTRL_WORD_ENABLE, 7, 7, true)]
    fn control_bits_walk_the_word(
        #[case] word: u32,
        #[case] byte_pos: usize,
        #[case] bit_pos: usize,
        #[case] bit: bool,
    ) {
        expect_that!(control_bit(word, byte_pos, bit_pos), eq(bit));
    }
}
