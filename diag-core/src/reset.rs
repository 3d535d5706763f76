// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::tx::{UartTx, send_polled};

/// Access to the MCU status register (MCUSR).
pub trait ResetStatus {
    fn read(&self) -> u8;
    fn clear(&self);
}

/// The reset source flags of the last reset.
///
/// Several flags can be set at the same time.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ResetCause(u8);

impl ResetCause {
    pub const PORF: u8 = 1 << 0;
    pub const EXTRF: u8 = 1 << 1;
    pub const BORF: u8 = 1 << 2;
    pub const WDRF: u8 = 1 << 3;
    const MASK: u8 = Self::PORF | Self::EXTRF | Self::BORF | Self::WDRF;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Read the reset flags and clear the status register,
    /// so that the next boot only sees new reset events.
    pub fn take(reg: &impl ResetStatus) -> Self {
        let cause = Self::from_bits(reg.read());
        reg.clear();
        cause
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn watchdog(&self) -> bool {
        self.0 & Self::WDRF != 0
    }

    pub const fn brownout(&self) -> bool {
        self.0 & Self::BORF != 0
    }

    pub const fn external(&self) -> bool {
        self.0 & Self::EXTRF != 0
    }

    pub const fn power_on(&self) -> bool {
        self.0 & Self::PORF != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Print all reset sources on one line.
    pub fn report(&self, hw: &impl UartTx) {
        send_polled(hw, b"\r\n->Polled ");
        if self.watchdog() {
            send_polled(hw, b"Watchdog");
        }
        if self.brownout() {
            send_polled(hw, b"Brownout");
        }
        if self.external() {
            send_polled(hw, b"External");
        }
        if self.power_on() {
            send_polled(hw, b"Power On");
        }
        send_polled(hw, b" Reset\r\n");
    }
}


// vim: ts=4 sw=4 expandtab
