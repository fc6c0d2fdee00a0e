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

//! In-memory output lines for exercising the bit-bang protocol without hardware.
//!
//! Every [`SimulatedLine`] created from the same [`LineTrace`] appends to one shared event
//! log, so the exact interleaving of CLOCK and DATA writes can be inspected afterwards.

use crate::gpio::OutputLine;
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Clock,
    Data,
}

/// Direction of a CLOCK transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// A shared, ordered record of level writes.
#[derive(Debug, Clone, Default)]
pub struct LineTrace {
    events: Rc<RefCell<Vec<(Line, bool)>>>,
}

impl LineTrace {
    pub fn new() -> LineTrace {
        LineTrace::default()
    }

    /// Create a line that records into this trace.
    pub fn line(&self, line: Line) -> SimulatedLine {
        SimulatedLine {
            line,
            trace: self.clone(),
        }
    }

    /// Every write so far, in order.
    pub fn events(&self) -> Vec<(Line, bool)> {
        self.events.borrow().clone()
    }

    /// The last level written to `line`. Lines start at logic 0.
    pub fn level(&self, line: Line) -> bool {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|(l, _)| *l == line)
            .is_some_and(|(_, level)| *level)
    }

    /// Sample DATA at every CLOCK transition, the way the receiver does.
    ///
    /// Writes to CLOCK that do not change its level are not edges and produce no sample.
    pub fn samples(&self) -> Vec<(Edge, bool)> {
        let mut clock = false;
        let mut data = false;
        let mut samples = Vec::new();
        for (line, level) in self.events.borrow().iter().copied() {
            match line {
                Line::Data => data = level,
                Line::Clock if level != clock => {
                    clock = level;
                    let edge = if level { Edge::Rising } else { Edge::Falling };
                    samples.push((edge, data));
                }
                Line::Clock => {}
            }
        }
        samples
    }
}

/// One line of a [`LineTrace`].
#[derive(Debug, Clone)]
pub struct SimulatedLine {
    line: Line,
    trace: LineTrace,
}

impl OutputLine for SimulatedLine {
    type Error = Infallible;

    fn set_level(&mut self, high: bool) -> Result<(), Infallible> {
        self.trace.events.borrow_mut().push((self.line, high));
        Ok(())
    }
}
