// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build time configuration.
//!
//! All parsers are `const fn`, so the firmware evaluates them
//! in a `const` item and a bad configuration fails the build.

use crate::baud::BaudSetting;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidBit,
    InvalidNumber,
    ZeroBaud,
    BaudOutOfRange,
    LabelTooLong,
}

/// Maximum length of the name and base labels.
/// Longer labels would not fit into the line buffer.
pub const MAX_LABEL_LEN: usize = 32;

impl ConfigError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPort => "Invalid port letter",
            Self::InvalidBit => "Invalid bit number",
            Self::InvalidNumber => "Invalid decimal number",
            Self::ZeroBaud => "Baud rate is zero",
            Self::BaudOutOfRange => "Baud rate divisor does not fit into UBRR",
            Self::LabelTooLong => "Name or base label is too long",
        }
    }

    /// Abort const evaluation with a readable message.
    pub const fn fail(&self) -> ! {
        match self {
            Self::InvalidPort => panic!("Invalid port letter"),
            Self::InvalidBit => panic!("Invalid bit number"),
            Self::InvalidNumber => panic!("Invalid decimal number"),
            Self::ZeroBaud => panic!("Baud rate is zero"),
            Self::BaudOutOfRange => panic!("Baud rate divisor does not fit into UBRR"),
            Self::LabelTooLong => panic!("Name or base label is too long"),
        }
    }
}

/// Digital I/O ports of the ATmega2560. There is no port I.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    J,
    K,
    L,
}

/// Ports printed by the periodic port dump, in print order.
pub const DUMP_PORTS: [Port; 10] = [
    Port::A,
    Port::B,
    Port::C,
    Port::D,
    Port::E,
    Port::F,
    Port::G,
    Port::H,
    Port::J,
    Port::K,
];

impl Port {
    pub const fn letter(&self) -> u8 {
        match self {
            Self::A => b'A',
            Self::B => b'B',
            Self::C => b'C',
            Self::D => b'D',
            Self::E => b'E',
            Self::F => b'F',
            Self::G => b'G',
            Self::H => b'H',
            Self::J => b'J',
            Self::K => b'K',
            Self::L => b'L',
        }
    }

    pub const fn from_letter(letter: u8) -> Result<Self, ConfigError> {
        match letter.to_ascii_uppercase() {
            b'A' => Ok(Self::A),
            b'B' => Ok(Self::B),
            b'C' => Ok(Self::C),
            b'D' => Ok(Self::D),
            b'E' => Ok(Self::E),
            b'F' => Ok(Self::F),
            b'G' => Ok(Self::G),
            b'H' => Ok(Self::H),
            b'J' => Ok(Self::J),
            b'K' => Ok(Self::K),
            b'L' => Ok(Self::L),
            _ => Err(ConfigError::InvalidPort),
        }
    }
}

/// One I/O pin, identified by port and bit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PinId {
    port: Port,
    bit: u8,
}

impl PinId {
    pub const fn new(port: Port, bit: u8) -> Result<Self, ConfigError> {
        if bit > 7 {
            Err(ConfigError::InvalidBit)
        } else {
            Ok(Self { port, bit })
        }
    }

    /// Parse `"B,7"` or `"B7"`.
    pub const fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.as_bytes();
        let digit = match s {
            [_, b',', digit] | [_, digit] => *digit,
            [] => return Err(ConfigError::InvalidPort),
            _ => return Err(ConfigError::InvalidBit),
        };
        let port = match Port::from_letter(s[0]) {
            Ok(port) => port,
            Err(e) => return Err(e),
        };
        if !digit.is_ascii_digit() {
            return Err(ConfigError::InvalidBit);
        }
        Self::new(port, digit - b'0')
    }

    pub const fn port(&self) -> Port {
        self.port
    }

    pub const fn bit(&self) -> u8 {
        self.bit
    }

    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

impl ufmt::uDisplay for PinId {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_char(self.port.letter() as char)?;
        f.write_char(',')?;
        f.write_char((b'0' + self.bit) as char)
    }
}

/// Parse an unsigned decimal number.
///
/// A C style `U`, `L` or `UL` suffix is accepted and ignored.
pub const fn parse_u32(s: &str) -> Result<u32, ConfigError> {
    let mut s = s.as_bytes();
    while let [rest @ .., b'U' | b'u' | b'L' | b'l'] = s {
        s = rest;
    }
    if s.is_empty() {
        return Err(ConfigError::InvalidNumber);
    }
    let mut value: u32 = 0;
    let mut i = 0;
    while i < s.len() {
        let c = s[i];
        if !c.is_ascii_digit() {
            return Err(ConfigError::InvalidNumber);
        }
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return Err(ConfigError::InvalidNumber),
        };
        value = match value.checked_add((c - b'0') as u32) {
            Some(v) => v,
            None => return Err(ConfigError::InvalidNumber),
        };
        i += 1;
    }
    Ok(value)
}

/// Firmware build configuration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// Device name printed in the banners.
    pub name: &'static str,
    /// Base value printed in the banners.
    pub base: &'static str,
    pub baud: u32,
    pub f_cpu: u32,
    /// Input pin with pull-up that is reported in every status line.
    pub pullup_pin: PinId,
}

impl Config {
    pub const fn parse(
        name: &'static str,
        base: &'static str,
        baud: &str,
        f_cpu: &str,
        pullup_pin: &str,
    ) -> Result<Self, ConfigError> {
        let baud = match parse_u32(baud) {
            Ok(v) => v,
            Err(e) => return Err(e),
        };
        let f_cpu = match parse_u32(f_cpu) {
            Ok(v) => v,
            Err(e) => return Err(e),
        };
        let pullup_pin = match PinId::parse(pullup_pin) {
            Ok(v) => v,
            Err(e) => return Err(e),
        };
        let conf = Self {
            name,
            base,
            baud,
            f_cpu,
            pullup_pin,
        };
        match conf.check() {
            Ok(()) => Ok(conf),
            Err(e) => Err(e),
        }
    }

    pub const fn check(&self) -> Result<(), ConfigError> {
        if self.name.len() > MAX_LABEL_LEN || self.base.len() > MAX_LABEL_LEN {
            return Err(ConfigError::LabelTooLong);
        }
        if self.baud == 0 {
            return Err(ConfigError::ZeroBaud);
        }
        if !BaudSetting::new(self.f_cpu, self.baud).is_valid() {
            return Err(ConfigError::BaudOutOfRange);
        }
        Ok(())
    }

    /// The baud rate register setting. Only valid after [Self::check].
    pub const fn baud_setting(&self) -> BaudSetting {
        BaudSetting::new(self.f_cpu, self.baud)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("0"), Ok(0));
        assert_eq!(parse_u32("115200"), Ok(115_200));
        assert_eq!(parse_u32("16000000UL"), Ok(16_000_000));
        assert_eq!(parse_u32("16000000L"), Ok(16_000_000));
        assert_eq!(parse_u32("4294967295"), Ok(u32::MAX));
        assert_eq!(parse_u32("4294967296"), Err(ConfigError::InvalidNumber));
        assert_eq!(parse_u32(""), Err(ConfigError::InvalidNumber));
        assert_eq!(parse_u32("UL"), Err(ConfigError::InvalidNumber));
        assert_eq!(parse_u32("12a"), Err(ConfigError::InvalidNumber));
        assert_eq!(parse_u32("-1"), Err(ConfigError::InvalidNumber));
    }

    #[test]
    fn test_pin_parse() {
        let p = PinId::parse("B,7").unwrap();
        assert_eq!(p.port(), Port::B);
        assert_eq!(p.bit(), 7);
        assert_eq!(p.mask(), 0x80);

        let p = PinId::parse("k0").unwrap();
        assert_eq!(p.port(), Port::K);
        assert_eq!(p.mask(), 0x01);

        assert_eq!(PinId::parse("I,1"), Err(ConfigError::InvalidPort));
        assert_eq!(PinId::parse("B,8"), Err(ConfigError::InvalidBit));
        assert_eq!(PinId::parse("B,x"), Err(ConfigError::InvalidBit));
        assert_eq!(PinId::parse("B,17"), Err(ConfigError::InvalidBit));
        assert_eq!(PinId::parse(""), Err(ConfigError::InvalidPort));
        assert_eq!(PinId::new(Port::L, 8), Err(ConfigError::InvalidBit));
    }

    #[test]
    fn test_pin_display() {
        let mut s: heapless::String<8> = heapless::String::new();
        ufmt::uwrite!(s, "{}", PinId::parse("H,3").unwrap()).unwrap();
        assert_eq!(s.as_str(), "H,3");
    }

    #[test]
    fn test_port_letters() {
        for port in DUMP_PORTS {
            assert_eq!(Port::from_letter(port.letter()), Ok(port));
        }
        assert_eq!(Port::from_letter(b'L'), Ok(Port::L));
        assert!(!DUMP_PORTS.contains(&Port::L));
    }

    #[test]
    fn test_config() {
        const CONF: Config = match Config::parse("mega", "0x3E000", "115200", "16000000UL", "B,7")
        {
            Ok(conf) => conf,
            Err(e) => e.fail(),
        };
        assert_eq!(CONF.baud, 115_200);
        assert_eq!(CONF.f_cpu, 16_000_000);
        assert_eq!(CONF.pullup_pin.mask(), 0x80);
        assert!(CONF.baud_setting().double_speed());

        assert_eq!(
            Config::parse("x", "0", "0", "16000000", "B,7"),
            Err(ConfigError::ZeroBaud)
        );
        assert_eq!(
            Config::parse("x", "0", "300", "20000000", "B,7"),
            Err(ConfigError::BaudOutOfRange)
        );
        assert_eq!(
            Config::parse("x", "0", "9600", "16000000", "Q,1"),
            Err(ConfigError::InvalidPort)
        );
        assert_eq!(
            Config::parse("0123456789012345678901234567890123", "0", "9600", "16000000", "B,7"),
            Err(ConfigError::LabelTooLong)
        );
        assert_eq!(ConfigError::ZeroBaud.as_str(), "Baud rate is zero");
    }
}

// vim: ts=4 sw=4 expandtab
