// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bootloader and watchdog diagnostics for the ATmega2560.
//!
//! Expected sequence on the serial console:
//!
//! 1. Power on: the busy wait is ended by a watchdog reset.
//! 2. Watchdog reset: count is 1, the watchdog interrupt is enabled,
//!    the busy wait is ended by the interrupt ("Bow Wow").
//! 3. The port dump runs until the 8 s watchdog resets the system.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod config;
mod context;
mod flash;
mod hw;
mod ports;
mod reset;
mod uart;
mod wdt;

use crate::{
    config::{BOOTLOADER_END, CONFIG},
    context::{InitCtx, MainCtx, unwrap_option, unwrap_result},
    flash::{SLEEP_MSG, puts_flash, read_far},
    hw::{Peripherals, delay_ms, interrupt},
    ports::Ports,
    reset::cause_of_reset,
    uart::{puts_irq, puts_polled},
    wdt::{WATCHDOG, wdt_enable, wdt_enable_irq, wdt_poke},
};
use diag_core::{
    flash::FlashCopy,
    report::{self, LineBuf, MSG_ENABLE_WDT_IRQ, MSG_SURVIVED},
    wdt::WdtTimeout,
};

#[avr_device::entry]
fn main() -> ! {
    let major = read_far(BOOTLOADER_END);
    let minor = read_far(BOOTLOADER_END - 1);

    let dp = unwrap_option(Peripherals::take());
    wdt_poke(&dp.WDT);

    let ports = Ports {
        PORTA: dp.PORTA,
        PORTB: dp.PORTB,
        PORTC: dp.PORTC,
        PORTD: dp.PORTD,
        PORTE: dp.PORTE,
        PORTF: dp.PORTF,
        PORTG: dp.PORTG,
        PORTH: dp.PORTH,
        PORTJ: dp.PORTJ,
        PORTK: dp.PORTK,
        PORTL: dp.PORTL,
    };

    let uart_dp = uart::Dp { USART0: dp.USART0 };

    let init_static_vars = |i: &InitCtx| {
        uart::DP.init(i, uart_dp);
        uart::DP.setup(i);
    };

    // SAFETY:
    // This is the context handle for the main() function.
    // Holding a reference to this object proves that the holder
    // is running in main() context.
    let m = unsafe { MainCtx::new_with_init(init_static_vars) };

    cause_of_reset(&m, &dp.CPU);

    let mut buf = LineBuf::new();
    unwrap_result(report::polled_banner(&mut buf, &CONFIG));
    puts_polled(buf.as_bytes());
    unwrap_result(report::bootloader_version(&mut buf, major, minor));
    puts_polled(buf.as_bytes());

    wdt_enable(&dp.WDT, WdtTimeout::S2);

    // SAFETY: This must be after construction of MainCtx
    //         and after initialization of static InitCtxCell variables.
    unsafe { interrupt::enable() };

    ports.input_pullup(&m, CONFIG.pullup_pin);

    wdt_poke(&dp.WDT);

    unwrap_result(report::irq_banner(&mut buf, &CONFIG));
    puts_irq(&m, buf.as_bytes());
    let pin_high = ports.get(CONFIG.pullup_pin);
    unwrap_result(report::status(&mut buf, &CONFIG, pin_high, WATCHDOG.count()));
    puts_irq(&m, buf.as_bytes());

    if WATCHDOG.irq_mode_due() {
        puts_irq(&m, MSG_ENABLE_WDT_IRQ);
        wdt_enable_irq(&dp.WDT);
    }

    let mut flash_copy = FlashCopy::new();
    puts_flash(&m, &mut flash_copy, &SLEEP_MSG);

    // Without the watchdog interrupt this ends in a watchdog reset.
    WATCHDOG.sleep();

    puts_irq(&m, MSG_SURVIVED);

    wdt_enable(&dp.WDT, WdtTimeout::S8);
    loop {
        // The watchdog is not poked anymore.
        // It resets the system 8 seconds from now.
        delay_ms(1000);
        ports.print_all_pins(&m);
    }
}

// vim: ts=4 sw=4 expandtab
