// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{context::MainCtx, hw::mcu, uart::DP, wdt::WATCHDOG};
use diag_core::reset::{ResetCause, ResetStatus};

struct Mcusr<'a>(&'a mcu::CPU);

impl ResetStatus for Mcusr<'_> {
    fn read(&self) -> u8 {
        self.0.mcusr().read().bits()
    }

    fn clear(&self) {
        // SAFETY: Writing zero clears all reset flags.
        self.0.mcusr().write(|w| unsafe { w.bits(0) });
    }
}

/// Report and clear the reset flags of the last reset.
pub fn cause_of_reset(_m: &MainCtx, cpu: &mcu::CPU) {
    let cause = ResetCause::take(&Mcusr(cpu));
    cause.report(&*DP);
    WATCHDOG.note_reset_cause(&cause);
}

// vim: ts=4 sw=4 expandtab
