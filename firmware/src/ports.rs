// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{context::MainCtx, hw::mcu, uart::puts_irq};
use diag_core::{
    bits::format_bits,
    config::{DUMP_PORTS, PinId, Port},
    report::MSG_LINE_END,
};

#[rustfmt::skip]
macro_rules! impl_ports {
    (
        $(
            $port:ident => $name:ident, $portreg:ident, $ddr:ident, $pin:ident;
        )*
    ) => {
        #[allow(non_snake_case)]
        pub struct Ports {
            $(
                pub $name: mcu::$name,
            )*
        }

        impl Ports {
            /// Read the input register (PINx) of a port.
            #[inline(always)]
            pub fn read(&self, port: Port) -> u8 {
                match port {
                    $(
                        Port::$port => self.$name.$pin().read().bits(),
                    )*
                }
            }

            /// Configure one pin as input with internal pull-up.
            pub fn input_pullup(&self, _m: &MainCtx, pin: PinId) {
                let mask = pin.mask();
                match pin.port() {
                    $(
                        Port::$port => {
                            // SAFETY: Only the bit of this pin is changed.
                            self.$name.$ddr().modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
                            // SAFETY: Only the bit of this pin is changed.
                            self.$name.$portreg().modify(|r, w| unsafe { w.bits(r.bits() | mask) });
                        }
                    )*
                }
            }
        }
    };
}

impl_ports!(
    A => PORTA, porta, ddra, pina;
    B => PORTB, portb, ddrb, pinb;
    C => PORTC, portc, ddrc, pinc;
    D => PORTD, portd, ddrd, pind;
    E => PORTE, porte, ddre, pine;
    F => PORTF, portf, ddrf, pinf;
    G => PORTG, portg, ddrg, ping;
    H => PORTH, porth, ddrh, pinh;
    J => PORTJ, portj, ddrj, pinj;
    K => PORTK, portk, ddrk, pink;
    L => PORTL, portl, ddrl, pinl;
);

impl Ports {
    /// Logic level of one pin.
    pub fn get(&self, pin: PinId) -> bool {
        self.read(pin.port()) & pin.mask() != 0
    }

    /// Print the input state of all ports on one line.
    pub fn print_all_pins(&self, m: &MainCtx) {
        for port in DUMP_PORTS {
            let bits = format_bits(port.letter(), self.read(port));
            puts_irq(m, bits.as_bytes());
        }
        puts_irq(m, MSG_LINE_END);
    }
}

// vim: ts=4 sw=4 expandtab
