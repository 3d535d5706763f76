// -*- coding: utf-8 -*-

use diag_core::{config::DUMP_PORTS, reset::ResetCause};

/// One classified line of the firmware output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// Reset cause report.
    Reset(ResetCause),
    /// Polled banner, usually followed by the bootloader version on the same line.
    Banner {
        name: String,
        base: String,
        version: Option<(u8, u8)>,
    },
    /// IRQ banner with pull-up pin state and watchdog count.
    Status {
        name: String,
        pin: String,
        high: bool,
        watchdog_count: u8,
    },
    EnableIrq,
    Sleep,
    Bark,
    Survived,
    /// Port letter and input register value.
    PortDump(Vec<(char, u8)>),
    Other(String),
}

fn parse_reset(text: &str) -> Option<ResetCause> {
    let causes = text.strip_prefix("->Polled ")?.strip_suffix(" Reset")?;
    let mut bits = 0;
    for (name, bit) in [
        ("Watchdog", ResetCause::WDRF),
        ("Brownout", ResetCause::BORF),
        ("External", ResetCause::EXTRF),
        ("Power On", ResetCause::PORF),
    ] {
        if causes.contains(name) {
            bits |= bit;
        }
    }
    Some(ResetCause::from_bits(bits))
}

fn parse_version(text: &str) -> Option<(u8, u8)> {
    // "major: 8 0x8, minor 0 0x0"
    let rest = text.strip_prefix("major: ")?;
    let (major, rest) = rest.split_once(' ')?;
    let (_, rest) = rest.split_once(", minor ")?;
    let (minor, _) = rest.split_once(' ')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

fn parse_banner(text: &str) -> Option<Line> {
    let rest = text.strip_prefix("Polled ")?;
    let (name, rest) = rest.split_once(" hello polled print, base:")?;
    let (base, version) = match rest.split_once(" Optiboot ") {
        Some((base, version)) => (base, parse_version(version)),
        None => (rest, None),
    };
    Some(Line::Banner {
        name: name.to_string(),
        base: base.to_string(),
        version,
    })
}

fn parse_status(text: &str) -> Option<Line> {
    let rest = text.strip_prefix("Irq ")?;
    let (name, rest) = rest.split_once(" hello IRQ print, base: ")?;
    let (_, rest) = rest.split_once(", Port,Bit: ")?;
    let (pin, rest) = rest.split_once(" = ")?;
    let (level, rest) = rest.split_once(", watchdog_count=")?;
    let high = match level {
        "high" => true,
        "low" => false,
        _ => return None,
    };
    Some(Line::Status {
        name: name.to_string(),
        pin: pin.to_string(),
        high,
        watchdog_count: rest.trim().parse().ok()?,
    })
}

fn parse_port_dump(text: &str) -> Option<Line> {
    let mut ports = Vec::with_capacity(DUMP_PORTS.len());
    for item in text.split_whitespace() {
        let (letter, bits) = item.split_once('=')?;
        let mut letter = letter.chars();
        let port = letter.next()?;
        if letter.next().is_some() || bits.len() != 8 {
            return None;
        }
        ports.push((port, u8::from_str_radix(bits, 2).ok()?));
    }
    if ports.is_empty() {
        None
    } else {
        Some(Line::PortDump(ports))
    }
}

/// Classify one line. Line terminators must already be removed.
/// Returns `None` for empty lines.
pub fn parse_line(text: &str) -> Option<Line> {
    if text.trim().is_empty() {
        return None;
    }
    let line = match text {
        "Irq: Enable Watchdog IRQ, set WDTCSR = 1<<WDIE, next expect Barking" => Line::EnableIrq,
        "Flash: sleep - watchdog is set to 2 sec" => Line::Sleep,
        "Polled:- Bow Wow - Watchdog IRQ" => Line::Bark,
        "Irq: Survived Watchdog" => Line::Survived,
        text => parse_reset(text)
            .map(Line::Reset)
            .or_else(|| parse_banner(text))
            .or_else(|| parse_status(text))
            .or_else(|| parse_port_dump(text))
            .unwrap_or_else(|| Line::Other(text.to_string())),
    };
    Some(line)
}


// vim: ts=4 sw=4 expandtab
