// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic output lines.

use crate::config::Config;
use ufmt::uwrite;

/// Size of the line formatting buffer.
pub const LINE_SIZE: usize = 100;

pub type LineBuf = heapless::String<LINE_SIZE>;

/// The formatted text did not fit into the [LineBuf].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LineOverflow;

pub const MSG_ENABLE_WDT_IRQ: &[u8] =
    b"Irq: Enable Watchdog IRQ, set WDTCSR = 1<<WDIE, next expect Barking\r\n";
pub const MSG_SURVIVED: &[u8] = b"Irq: Survived Watchdog\r\n";
pub const MSG_BARK: &[u8] = b"Polled:- Bow Wow - Watchdog IRQ\r\n";
pub const MSG_LINE_END: &[u8] = b"\r\n";

/// Lower case hexadecimal without leading zeros.
struct Hex(u8);

impl ufmt::uDisplay for Hex {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let hi = self.0 >> 4;
        if hi != 0 {
            f.write_char(DIGITS[hi as usize] as char)?;
        }
        f.write_char(DIGITS[(self.0 & 0xF) as usize] as char)
    }
}

fn level(high: bool) -> &'static str {
    if high { "high" } else { "low" }
}

/// `Polled <name> hello polled print, base:<base>`
pub fn polled_banner(buf: &mut LineBuf, conf: &Config) -> Result<(), LineOverflow> {
    buf.clear();
    uwrite!(
        buf,
        "Polled {} hello polled print, base:{}",
        conf.name,
        conf.base
    )
    .map_err(|_| LineOverflow)
}

/// Bootloader version line.
pub fn bootloader_version(buf: &mut LineBuf, major: u8, minor: u8) -> Result<(), LineOverflow> {
    buf.clear();
    uwrite!(
        buf,
        " Optiboot major: {} 0x{}, minor {} 0x{}\r\n\n",
        major,
        Hex(major),
        minor,
        Hex(minor)
    )
    .map_err(|_| LineOverflow)
}

/// `Irq <name> hello IRQ print, base: <base>`
pub fn irq_banner(buf: &mut LineBuf, conf: &Config) -> Result<(), LineOverflow> {
    buf.clear();
    uwrite!(buf, "Irq {} hello IRQ print, base: {}", conf.name, conf.base)
        .map_err(|_| LineOverflow)
}

/// Pull-up pin level and watchdog count.
pub fn status(
    buf: &mut LineBuf,
    conf: &Config,
    pin_high: bool,
    watchdog_count: u8,
) -> Result<(), LineOverflow> {
    buf.clear();
    uwrite!(
        buf,
        ", Port,Bit: {} = {}, watchdog_count={}\r\n",
        conf.pullup_pin,
        level(pin_high),
        watchdog_count
    )
    .map_err(|_| LineOverflow)
}


// vim: ts=4 sw=4 expandtab
