// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Program memory string relay.

/// Size of the RAM copy buffer, including one byte for a terminator.
pub const FLASH_COPY_SIZE: usize = 100;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FlashCopyError {
    /// The string does not fit into the copy buffer.
    TooLong,
}

/// RAM copy of a program memory string.
pub struct FlashCopy {
    buf: [u8; FLASH_COPY_SIZE],
}

impl FlashCopy {
    pub const fn new() -> Self {
        Self {
            buf: [0; FLASH_COPY_SIZE],
        }
    }

    /// Copy `len` bytes of a program memory string into RAM.
    ///
    /// `load` reads the byte at the given index from program memory.
    /// The copy stops early at a NUL byte.
    /// Strings with `len >= FLASH_COPY_SIZE` are rejected
    /// before anything is read.
    pub fn load<F>(&mut self, len: usize, mut load: F) -> Result<&[u8], FlashCopyError>
    where
        F: FnMut(usize) -> u8,
    {
        if len >= FLASH_COPY_SIZE {
            return Err(FlashCopyError::TooLong);
        }
        let mut count = 0;
        while count < len {
            let c = load(count);
            if c == 0 {
                break;
            }
            self.buf[count] = c;
            count += 1;
        }
        self.buf[count] = 0;
        Ok(&self.buf[..count])
    }
}

impl Default for FlashCopy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_copy() {
        let text = b"Flash: sleep - watchdog is set to 2 sec\r\n";
        let mut copy = FlashCopy::new();
        let res = copy.load(text.len(), |i| text[i]).unwrap();
        assert_eq!(res, text);
    }

    #[test]
    fn test_copy_reuse() {
        let mut copy = FlashCopy::new();
        assert_eq!(copy.load(5, |i| b"hello"[i]).unwrap(), b"hello");
        assert_eq!(copy.load(2, |i| b"hi"[i]).unwrap(), b"hi");
        assert_eq!(copy.load(0, |_| unreachable!()).unwrap(), b"");
    }

    #[test]
    fn test_copy_stops_at_nul() {
        let text = b"ab\0cd";
        let mut copy = FlashCopy::new();
        assert_eq!(copy.load(text.len(), |i| text[i]).unwrap(), b"ab");
    }

    #[test]
    fn test_copy_limit() {
        let text = [b'x'; FLASH_COPY_SIZE];
        let mut copy = FlashCopy::new();

        let res = copy.load(FLASH_COPY_SIZE - 1, |i| text[i]).unwrap();
        assert_eq!(res.len(), FLASH_COPY_SIZE - 1);

        let mut reads = 0;
        let res = copy.load(FLASH_COPY_SIZE, |i| {
            reads += 1;
            text[i]
        });
        assert_eq!(res, Err(FlashCopyError::TooLong));
        assert_eq!(reads, 0);
    }
}

// vim: ts=4 sw=4 expandtab
