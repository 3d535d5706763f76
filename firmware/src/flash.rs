// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    context::{MainCtx, unwrap_result},
    uart::puts_irq,
};
use avr_progmem::{progmem, wrapper::ProgMem};
use diag_core::flash::FlashCopy;

/// RAMPZ I/O address.
const RAMPZ: u8 = 0x3B;

progmem! {
    pub static progmem SLEEP_MSG: [u8; 41] = *b"Flash: sleep - watchdog is set to 2 sec\r\n";
}

/// Read one byte from anywhere in the program memory,
/// including the area above 64 kiB.
#[rustfmt::skip]
pub fn read_far(addr: u32) -> u8 {
    let data: u8;
    // SAFETY: The asm code only reads program memory and restores RAMPZ to zero.
    unsafe {
        core::arch::asm!(
            "out {RAMPZ}, {hh}",
            "elpm {data}, Z",
            "out {RAMPZ}, __zero_reg__",
            hh = in(reg) (addr >> 16) as u8,
            data = out(reg) data,
            RAMPZ = const RAMPZ,
            in("Z") addr as u16,
            options(nostack, preserves_flags)
        );
    }
    data
}

/// Copy a program memory string to RAM and send it interrupt driven.
pub fn puts_flash<const N: usize>(m: &MainCtx, copy: &mut FlashCopy, text: &ProgMem<[u8; N]>) {
    let data = unwrap_result(copy.load(N, |i| text.load_at(i)));
    puts_irq(m, data);
}

// vim: ts=4 sw=4 expandtab
