// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hardware independent parts of the watchdog and bootloader
//! diagnostics firmware.
//!
//! Everything in here is reachable from the host, so the
//! behavior of the firmware can be tested without a target.

#![no_std]

#[cfg(not(target_arch = "avr"))]
mod atomic_generic;
#[cfg(not(target_arch = "avr"))]
use atomic_generic as atomic_impl;

#[cfg(target_arch = "avr")]
mod atomic_avr;
#[cfg(target_arch = "avr")]
use atomic_avr as atomic_impl;

pub mod atomic;
pub mod baud;
pub mod bits;
pub mod config;
pub mod flash;
pub mod report;
pub mod reset;
pub mod tx;
pub mod wdt;

// vim: ts=4 sw=4 expandtab
