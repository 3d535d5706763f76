// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Largest value the 12 bit UBRR register can hold.
pub const UBRR_MAX: u32 = 0x0FFF;

/// USART baud rate register setting.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BaudSetting {
    divisor: u32,
    double_speed: bool,
}

impl BaudSetting {
    /// Calculate the divisor for the given CPU clock and baud rate.
    ///
    /// The double speed mode (U2X) is preferred, because it has the
    /// smaller rounding error. If the divisor doesn't fit into
    /// the UBRR register in double speed mode, normal speed is used.
    ///
    /// Invalid combinations are not rejected here.
    /// Use [Self::is_valid] to check the result.
    pub const fn new(f_cpu: u32, baud: u32) -> Self {
        let divisor = (f_cpu / 4 / baud).saturating_sub(1) / 2;
        if divisor > UBRR_MAX {
            Self {
                divisor: (f_cpu / 8 / baud).saturating_sub(1) / 2,
                double_speed: false,
            }
        } else {
            Self {
                divisor,
                double_speed: true,
            }
        }
    }

    /// The value to be written to UBRR.
    pub const fn ubrr(&self) -> u16 {
        (self.divisor & UBRR_MAX) as u16
    }

    /// Whether the U2X bit must be set.
    pub const fn double_speed(&self) -> bool {
        self.double_speed
    }

    /// The unclamped divisor fits into the UBRR register.
    pub const fn is_valid(&self) -> bool {
        self.divisor <= UBRR_MAX
    }

    /// The baud rate that the hardware actually generates.
    pub const fn actual_baud(&self, f_cpu: u32) -> u32 {
        let div = if self.double_speed { 8 } else { 16 };
        f_cpu / (div * (self.divisor + 1))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn error_permille(f_cpu: u32, baud: u32) -> u32 {
        let actual = BaudSetting::new(f_cpu, baud).actual_baud(f_cpu);
        actual.abs_diff(baud) * 1000 / baud
    }

    #[test]
    fn test_double_speed() {
        let b = BaudSetting::new(16_000_000, 115_200);
        assert!(b.double_speed());
        assert!(b.is_valid());
        assert_eq!(b.ubrr(), 16);
        assert_eq!(b.actual_baud(16_000_000), 117_647);

        let b = BaudSetting::new(16_000_000, 9_600);
        assert!(b.double_speed());
        assert_eq!(b.ubrr(), 207);
        assert_eq!(b.actual_baud(16_000_000), 9_615);
    }

    #[test]
    fn test_fallback_normal_speed() {
        // Double speed divisor would be 6666.
        let b = BaudSetting::new(16_000_000, 300);
        assert!(!b.double_speed());
        assert!(b.is_valid());
        assert_eq!(b.ubrr(), 3332);
    }

    #[test]
    fn test_too_slow() {
        let b = BaudSetting::new(20_000_000, 300);
        assert!(!b.double_speed());
        assert!(!b.is_valid());
        assert_eq!(b.ubrr() as u32, 4166 & UBRR_MAX);
    }

    #[test]
    fn test_too_fast() {
        let b = BaudSetting::new(1_000_000, 1_000_000);
        assert!(b.double_speed());
        assert!(b.is_valid());
        assert_eq!(b.ubrr(), 0);
    }

    #[test]
    fn test_supported_range() {
        for f_cpu in [1_000_000, 8_000_000, 16_000_000, 20_000_000] {
            for baud in [1_200, 2_400, 4_800, 9_600, 19_200, 38_400, 57_600] {
                let b = BaudSetting::new(f_cpu, baud);
                assert!(b.is_valid(), "{f_cpu} {baud}");
                assert!(b.ubrr() as u32 <= UBRR_MAX);
            }
        }
        assert!(error_permille(16_000_000, 9_600) < 5);
        assert!(error_permille(16_000_000, 57_600) < 25);
        assert!(error_permille(8_000_000, 38_400) < 25);
    }
}

// vim: ts=4 sw=4 expandtab
