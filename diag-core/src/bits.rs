// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Length of `"X=bbbbbbbb "`.
pub const PORT_BITS_LEN: usize = 11;

/// Text representation of one 8 bit port register.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PortBits([u8; PORT_BITS_LEN]);

impl PortBits {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: format_bits() only stores ASCII characters.
        unsafe { core::str::from_utf8_unchecked(&self.0) }
    }
}

/// Format `value` as `"<label>=bbbbbbbb "`, most significant bit first.
///
/// Non-ASCII labels are replaced by `?`.
pub fn format_bits(label: u8, value: u8) -> PortBits {
    let mut buf = [b' '; PORT_BITS_LEN];
    buf[0] = if label.is_ascii() { label } else { b'?' };
    buf[1] = b'=';
    for i in 0..8 {
        let mask = 0x80 >> i;
        buf[2 + i] = if value & mask != 0 { b'1' } else { b'0' };
    }
    PortBits(buf)
}


// vim: ts=4 sw=4 expandtab
