pub use avr_device::atmega2560::{self as mcu, Peripherals};
pub use avr_device::interrupt;

use crate::{config::CONFIG, context::IrqCtx};

macro_rules! define_isr {
    ($name:ident, $handler:path) => {
        #[avr_device::interrupt(atmega2560)]
        fn $name() {
            // SAFETY: We are inside of an interrupt handler.
            // Therefore, it is safe to construct an `IrqCtx`.
            let c = unsafe { IrqCtx::new() };
            $handler(&c);
        }
    };
}

define_isr!(USART0_UDRE, crate::uart::irq_handler_udre);
define_isr!(WDT, crate::wdt::irq_handler_wdt);

/// Number of 4-cycle loop iterations per millisecond.
const DELAY_LOOPS_PER_MS: u32 = CONFIG.f_cpu / 4000;
const _: () = assert!(DELAY_LOOPS_PER_MS > 0 && DELAY_LOOPS_PER_MS <= u16::MAX as u32);

/// Busy wait for approximately one millisecond.
#[inline(always)]
#[rustfmt::skip]
fn delay_1ms() {
    // SAFETY: The asm code only modifies the loop counter register.
    unsafe {
        core::arch::asm!(
            "1: sbiw {cnt}, 1",  // 2 cycles
            "   brne 1b",        // 2 cycles
            cnt = inout(reg_iw) DELAY_LOOPS_PER_MS as u16 => _,
            options(nomem, nostack)
        )
    }
}

/// Busy wait. Interrupts extend the delay.
pub fn delay_ms(ms: u16) {
    for _ in 0..ms {
        delay_1ms();
    }
}

// vim: ts=4 sw=4 expandtab
