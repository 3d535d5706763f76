// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    atomic::{AtomicCounter, AtomicFlag},
    reset::ResetCause,
};

/// WDTCSR bits.
pub const WDIF: u8 = 1 << 7;
pub const WDIE: u8 = 1 << 6;
pub const WDP3: u8 = 1 << 5;
pub const WDCE: u8 = 1 << 4;
pub const WDE: u8 = 1 << 3;

/// Watchdog timeout, selected by the WDP prescaler bits.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WdtTimeout {
    Ms16,
    Ms32,
    Ms64,
    Ms125,
    Ms250,
    Ms500,
    S1,
    S2,
    S4,
    S8,
}

impl WdtTimeout {
    const fn prescaler(&self) -> u8 {
        *self as u8
    }

    /// WDTCSR value for system reset mode with this timeout.
    ///
    /// This must be written within 4 cycles after setting WDCE and WDE.
    pub const fn wdtcsr(&self) -> u8 {
        let p = self.prescaler();
        let wdp3 = if p & 0x08 != 0 { WDP3 } else { 0 };
        WDE | wdp3 | (p & 0x07)
    }

    /// Nominal timeout at 128 kHz watchdog oscillator frequency.
    pub const fn millis(&self) -> u32 {
        (2048 << self.prescaler()) / 128
    }
}

/// Watchdog wake-up bookkeeping.
///
/// The main context arms the sleeping flag and busy waits on it.
/// The watchdog interrupt handler clears it.
pub struct WatchdogMonitor {
    sleeping: AtomicFlag,
    count: AtomicCounter,
}

impl WatchdogMonitor {
    pub const fn new() -> Self {
        Self {
            sleeping: AtomicFlag::new(),
            count: AtomicCounter::new(),
        }
    }

    /// Number of watchdog events seen so far.
    pub fn count(&self) -> u8 {
        self.count.get()
    }

    /// A watchdog reset during boot counts as one watchdog event.
    ///
    /// Must be called before interrupts are enabled.
    pub fn note_reset_cause(&self, cause: &ResetCause) {
        if cause.watchdog() {
            self.count.increment();
        }
    }

    /// Interrupt mode must be enabled after exactly one watchdog event,
    /// because the hardware disables it again after each interrupt.
    pub fn irq_mode_due(&self) -> bool {
        self.count.get() == 1
    }

    pub fn begin_sleep(&self) {
        self.sleeping.set();
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping.is_set()
    }

    /// Busy wait until the watchdog interrupt fires.
    ///
    /// If watchdog interrupts are not enabled, this waits
    /// until the watchdog resets the system.
    pub fn sleep(&self) {
        self.begin_sleep();
        while self.is_sleeping() {}
    }

    /// Watchdog interrupt handler part.
    pub fn on_timeout(&self) {
        self.sleeping.clear();
        self.count.increment();
    }
}

impl Default for WatchdogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wdtcsr() {
        assert_eq!(WdtTimeout::Ms16.wdtcsr(), 0x08);
        assert_eq!(WdtTimeout::S1.wdtcsr(), 0x0E);
        assert_eq!(WdtTimeout::S2.wdtcsr(), 0x0F);
        assert_eq!(WdtTimeout::S4.wdtcsr(), 0x28);
        assert_eq!(WdtTimeout::S8.wdtcsr(), 0x29);
        assert_eq!(WdtTimeout::S8.wdtcsr() & (WDIE | WDCE | WDIF), 0);
    }

    #[test]
    fn test_millis() {
        assert_eq!(WdtTimeout::Ms16.millis(), 16);
        assert_eq!(WdtTimeout::Ms125.millis(), 128);
        assert_eq!(WdtTimeout::S2.millis(), 2048);
        assert_eq!(WdtTimeout::S8.millis(), 8192);
    }

    #[test]
    fn test_timeout_wakes_sleeper() {
        let wdt = WatchdogMonitor::new();
        assert_eq!(wdt.count(), 0);
        assert!(!wdt.irq_mode_due());

        wdt.begin_sleep();
        assert!(wdt.is_sleeping());
        wdt.on_timeout();
        assert!(!wdt.is_sleeping());
        assert_eq!(wdt.count(), 1);
        assert!(wdt.irq_mode_due());

        wdt.on_timeout();
        assert_eq!(wdt.count(), 2);
        assert!(!wdt.irq_mode_due());
    }

    #[test]
    fn test_sleep_rendezvous() {
        extern crate std;

        let wdt = WatchdogMonitor::new();
        std::thread::scope(|s| {
            s.spawn(|| {
                while !wdt.is_sleeping() {
                    std::thread::yield_now();
                }
                wdt.on_timeout();
            });
            wdt.sleep();
        });
        assert!(!wdt.is_sleeping());
        assert_eq!(wdt.count(), 1);
    }

    #[test]
    fn test_watchdog_reset_counts() {
        let wdt = WatchdogMonitor::new();
        wdt.note_reset_cause(&ResetCause::from_bits(ResetCause::PORF));
        assert_eq!(wdt.count(), 0);
        wdt.note_reset_cause(&ResetCause::from_bits(ResetCause::WDRF | ResetCause::EXTRF));
        assert_eq!(wdt.count(), 1);
        assert!(wdt.irq_mode_due());
    }
}

// vim: ts=4 sw=4 expandtab
