// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    context::IrqCtx,
    hw::{interrupt, mcu},
    uart::puts_polled,
};
use diag_core::{
    report::MSG_BARK,
    wdt::{WDCE, WDE, WatchdogMonitor, WdtTimeout},
};

/// WDTCSR data space address. It is outside of the `out` range.
const WDTCSR: u16 = 0x60;

pub static WATCHDOG: WatchdogMonitor = WatchdogMonitor::new();

/// Enable the watchdog in system reset mode.
pub fn wdt_enable(_wp: &mcu::WDT, timeout: WdtTimeout) {
    interrupt::free(|_| {
        // SAFETY: The asm code only accesses the WDT registers.
        //         Interrupts are disabled, so the timed sequence can't be interrupted.
        unsafe {
            core::arch::asm!(
                "wdr",
                "sts {WDTCSR}, {ce}",
                "sts {WDTCSR}, {val}",
                ce = in(reg) WDCE | WDE,
                val = in(reg) timeout.wdtcsr(),
                WDTCSR = const WDTCSR,
                options(nostack, preserves_flags)
            );
        }
    });
}

/// Switch the watchdog to interrupt-then-reset mode.
///
/// WDE and the prescaler are protected by the timed sequence
/// and keep their values. The hardware clears WDIE again
/// when the interrupt fires.
pub fn wdt_enable_irq(wp: &mcu::WDT) {
    wp.wdtcsr().write(|w| w.wdie().set_bit());
}

pub fn wdt_poke(_wp: &mcu::WDT) {
    avr_device::asm::wdr();
}

pub fn irq_handler_wdt(_c: &IrqCtx) {
    WATCHDOG.on_timeout();
    puts_polled(MSG_BARK);
}

// vim: ts=4 sw=4 expandtab
