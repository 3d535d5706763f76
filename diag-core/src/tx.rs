// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UART transmit paths.

use core::cell::Cell;

/// Access to the USART transmitter registers.
pub trait UartTx {
    /// The transmit data register is empty (UDRE).
    fn data_register_empty(&self) -> bool;

    /// Write to the transmit data register (UDR).
    fn write_data(&self, data: u8);

    /// Enable or disable the data register empty interrupt (UDRIE).
    fn set_udre_irq(&self, enable: bool);

    fn udre_irq_enabled(&self) -> bool;
}

/// Transmit `data` by busy waiting for the data register.
///
/// This doesn't touch any shared state.
/// It can be called from any context, including interrupt handlers.
pub fn send_polled(hw: &impl UartTx, data: &[u8]) {
    for &c in data {
        while !hw.data_register_empty() {}
        hw.write_data(c);
    }
}

/// Optimization and reordering fence.
#[inline(always)]
fn fence() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
}

/// Interrupt driven transmitter state.
///
/// The buffer is handed over to the interrupt handler by enabling UDRIE
/// and handed back by the handler when it disables UDRIE.
/// Only the side that currently owns the buffer touches the cursor.
pub struct TxCursor {
    ptr: Cell<*const u8>,
    remaining: Cell<usize>,
}

// SAFETY: The cursor is only written by the main context while UDRIE is disabled
//         and only by the interrupt handler while UDRIE is enabled.
//         The UDRIE bit is the ownership token.
unsafe impl Sync for TxCursor {}

impl TxCursor {
    pub const fn new() -> Self {
        Self {
            ptr: Cell::new(core::ptr::null()),
            remaining: Cell::new(0),
        }
    }

    /// Transmit `data` from the data register empty interrupt.
    ///
    /// Returns after the last byte has been written to the data register.
    /// An empty `data` returns immediately.
    ///
    /// Must not be called from interrupt context.
    /// Interrupts must be enabled or this will never return.
    pub fn send(&self, hw: &impl UartTx, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.ptr.set(data.as_ptr());
        self.remaining.set(data.len());
        fence();
        hw.set_udre_irq(true);
        // The interrupt handler disables UDRIE after the last byte.
        while hw.udre_irq_enabled() {}
        fence();
    }

    /// Data register empty interrupt handler.
    pub fn on_data_register_empty(&self, hw: &impl UartTx) {
        let remaining = self.remaining.get();
        if remaining == 0 {
            // Spurious. Nothing is in flight.
            hw.set_udre_irq(false);
            return;
        }
        let ptr = self.ptr.get();
        // SAFETY: remaining > 0, so ptr points into the buffer passed to send().
        //         send() does not return before remaining reaches 0,
        //         so the buffer is still borrowed.
        let c = unsafe { *ptr };
        let remaining = remaining - 1;
        // SAFETY: Advances at most to one past the end of the buffer.
        self.ptr.set(unsafe { ptr.add(1) });
        self.remaining.set(remaining);
        if remaining == 0 {
            // c is the last byte.
            hw.set_udre_irq(false);
        }
        hw.write_data(c);
    }

    /// Number of bytes not yet written by the interrupt handler.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

impl Default for TxCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use core::cell::RefCell;

    pub const MOCK_BUF_SIZE: usize = 256;

    /// USART mock.
    ///
    /// Polling the UDRIE bit with the interrupt enabled
    /// runs the interrupt handler once.
    pub struct MockUart<'a> {
        pub cursor: Option<&'a TxCursor>,
        pub out: RefCell<heapless::Vec<u8, MOCK_BUF_SIZE>>,
        pub irq_written: Cell<usize>,
        pub polled_written: Cell<usize>,
        pub udrie: Cell<bool>,
        pub in_irq: Cell<bool>,
        pub busy_polls: Cell<u8>,
        pub irq_count: Cell<usize>,
    }

    impl<'a> MockUart<'a> {
        pub fn new(cursor: Option<&'a TxCursor>) -> Self {
            Self {
                cursor,
                out: RefCell::new(heapless::Vec::new()),
                irq_written: Cell::new(0),
                polled_written: Cell::new(0),
                udrie: Cell::new(false),
                in_irq: Cell::new(false),
                busy_polls: Cell::new(0),
                irq_count: Cell::new(0),
            }
        }

        pub fn output(&self) -> heapless::Vec<u8, MOCK_BUF_SIZE> {
            self.out.borrow().clone()
        }
    }

    impl UartTx for MockUart<'_> {
        fn data_register_empty(&self) -> bool {
            // Report "busy" every other poll.
            let polls = self.busy_polls.get();
            self.busy_polls.set(polls.wrapping_add(1));
            polls % 2 == 1
        }

        fn write_data(&self, data: u8) {
            self.out.borrow_mut().push(data).unwrap();
            if self.in_irq.get() {
                self.irq_written.set(self.irq_written.get() + 1);
            } else {
                self.polled_written.set(self.polled_written.get() + 1);
            }
        }

        fn set_udre_irq(&self, enable: bool) {
            self.udrie.set(enable);
        }

        fn udre_irq_enabled(&self) -> bool {
            if self.udrie.get() && !self.in_irq.get() {
                if let Some(cursor) = self.cursor {
                    self.in_irq.set(true);
                    self.irq_count.set(self.irq_count.get() + 1);
                    cursor.on_data_register_empty(self);
                    self.in_irq.set(false);
                }
            }
            self.udrie.get()
        }
    }

    #[test]
    fn test_polled() {
        let hw = MockUart::new(None);
        send_polled(&hw, b"\r\n->Polled ");
        assert_eq!(hw.output().as_slice(), b"\r\n->Polled ");
        assert_eq!(hw.polled_written.get(), 11);
        assert_eq!(hw.irq_written.get(), 0);
        assert!(!hw.udrie.get());
    }

    #[test]
    fn test_irq() {
        let cursor = TxCursor::new();
        let hw = MockUart::new(Some(&cursor));
        cursor.send(&hw, b"Irq: Survived Watchdog\r\n");
        assert_eq!(hw.output().as_slice(), b"Irq: Survived Watchdog\r\n");
        // Every byte, including the last one, was written from the IRQ.
        assert_eq!(hw.irq_written.get(), 24);
        assert_eq!(hw.polled_written.get(), 0);
        assert_eq!(hw.irq_count.get(), 24);
        assert!(!hw.udrie.get());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_irq_single_byte() {
        let cursor = TxCursor::new();
        let hw = MockUart::new(Some(&cursor));
        cursor.send(&hw, b"x");
        assert_eq!(hw.output().as_slice(), b"x");
        assert_eq!(hw.irq_count.get(), 1);
        assert!(!hw.udrie.get());
    }

    #[test]
    fn test_irq_empty() {
        let cursor = TxCursor::new();
        let hw = MockUart::new(Some(&cursor));
        cursor.send(&hw, b"");
        assert!(hw.output().is_empty());
        assert_eq!(hw.irq_count.get(), 0);
        assert!(!hw.udrie.get());
    }

    #[test]
    fn test_irq_sequential() {
        let cursor = TxCursor::new();
        let hw = MockUart::new(Some(&cursor));
        cursor.send(&hw, b"A=00000000 ");
        cursor.send(&hw, b"B=11111111 ");
        cursor.send(&hw, b"\r\n");
        assert_eq!(hw.output().as_slice(), b"A=00000000 B=11111111 \r\n");
        assert!(!hw.udrie.get());
    }

    #[test]
    fn test_spurious_irq() {
        let cursor = TxCursor::new();
        let hw = MockUart::new(None);
        hw.udrie.set(true);
        cursor.on_data_register_empty(&hw);
        assert!(hw.output().is_empty());
        assert!(!hw.udrie.get());
    }

    #[test]
    fn test_mixed_paths() {
        let cursor = TxCursor::new();
        let hw = MockUart::new(Some(&cursor));
        cursor.send(&hw, b"irq ");
        send_polled(&hw, b"polled");
        assert_eq!(hw.output().as_slice(), b"irq polled");
        assert_eq!(hw.irq_written.get(), 4);
        assert_eq!(hw.polled_written.get(), 6);
    }
}

// vim: ts=4 sw=4 expandtab
