// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{
    config::CONFIG,
    context::{InitCtx, InitCtxCell, IrqCtx, MainCtx},
    hw::mcu,
};
use diag_core::tx::{TxCursor, UartTx, send_polled};

#[allow(non_snake_case)]
pub struct Dp {
    pub USART0: mcu::USART0,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static DP: InitCtxCell<Dp> = unsafe { InitCtxCell::uninit() };

static TX: TxCursor = TxCursor::new();

impl Dp {
    /// Transmitter only, 8N1.
    #[rustfmt::skip]
    pub fn setup(&self, _: &InitCtx) {
        let baud = CONFIG.baud_setting();
        self.USART0.ucsr0a().write(|w| w.u2x0().bit(baud.double_speed()));
        // SAFETY: The divisor is checked to fit into 12 bits.
        self.USART0.ubrr0().write(|w| unsafe { w.bits(baud.ubrr()) });
        self.USART0.ucsr0b().write(|w| w.txen0().set_bit());
    }
}

impl UartTx for Dp {
    #[inline(always)]
    fn data_register_empty(&self) -> bool {
        self.USART0.ucsr0a().read().udre0().bit_is_set()
    }

    #[inline(always)]
    fn write_data(&self, data: u8) {
        // SAFETY: All data values are valid.
        self.USART0.udr0().write(|w| unsafe { w.bits(data) });
    }

    #[inline(always)]
    fn set_udre_irq(&self, enable: bool) {
        self.USART0.ucsr0b().modify(|_, w| w.udrie0().bit(enable));
    }

    #[inline(always)]
    fn udre_irq_enabled(&self) -> bool {
        self.USART0.ucsr0b().read().udrie0().bit_is_set()
    }
}

/// Busy waiting transmit. Usable from any context.
pub fn puts_polled(data: &[u8]) {
    send_polled(&*DP, data);
}

/// Interrupt driven transmit.
///
/// Returns after the last byte has been handed to the hardware.
pub fn puts_irq(_m: &MainCtx, data: &[u8]) {
    TX.send(&*DP, data);
}

pub fn irq_handler_udre(_c: &IrqCtx) {
    TX.on_data_register_empty(&*DP);
}

// vim: ts=4 sw=4 expandtab
