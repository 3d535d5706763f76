// -*- coding: utf-8 -*-

use crate::parse::{Line, parse_line};
use std::{fmt::Write as _, time::Instant};
use tracing::{info, warn};

/// Firmware output tracking.
pub struct Monitor {
    start: Instant,
    resets: u32,
    barks: u32,
    last_watchdog_count: Option<u8>,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            resets: 0,
            barks: 0,
            last_watchdog_count: None,
        }
    }

    /// Handle one raw line including its terminator.
    pub fn handle_raw(&mut self, raw: &[u8]) {
        let text = String::from_utf8_lossy(raw);
        let text = text.trim_end_matches(['\r', '\n']);
        if let Some(line) = parse_line(text) {
            let desc = self.describe(&line);
            let t = self.start.elapsed().as_secs_f64();
            println!("[{t:10.3}] {desc}");
        }
    }

    fn describe(&mut self, line: &Line) -> String {
        match line {
            Line::Reset(cause) => {
                self.resets += 1;
                self.last_watchdog_count = None;
                let mut names = Vec::new();
                if cause.watchdog() {
                    names.push("watchdog");
                }
                if cause.brownout() {
                    names.push("brownout");
                }
                if cause.external() {
                    names.push("external");
                }
                if cause.power_on() {
                    names.push("power-on");
                }
                if cause.watchdog() || cause.brownout() {
                    warn!("Reset #{}: {}", self.resets, names.join(", "));
                } else {
                    info!("Reset #{}: {}", self.resets, names.join(", "));
                }
                if names.is_empty() {
                    "RESET (no flags)".to_string()
                } else {
                    format!("RESET ({})", names.join(", "))
                }
            }
            Line::Banner {
                name,
                base,
                version,
            } => match version {
                Some((major, minor)) => {
                    format!("BOOT  {name}, base {base}, bootloader {major}.{minor}")
                }
                None => format!("BOOT  {name}, base {base}"),
            },
            Line::Status {
                name,
                pin,
                high,
                watchdog_count,
            } => {
                if let Some(prev) = self.last_watchdog_count
                    && *watchdog_count < prev
                {
                    warn!("Watchdog count went backwards without a reset report");
                }
                self.last_watchdog_count = Some(*watchdog_count);
                let level = if *high { "high" } else { "low" };
                format!("STAT  {name}: pin {pin} {level}, watchdog count {watchdog_count}")
            }
            Line::EnableIrq => "WDT   interrupt mode enabled".to_string(),
            Line::Sleep => "WDT   waiting for watchdog".to_string(),
            Line::Bark => {
                self.barks += 1;
                format!("WDT   interrupt #{}", self.barks)
            }
            Line::Survived => "WDT   survived".to_string(),
            Line::PortDump(ports) => {
                let mut s = String::from("PORTS");
                for (letter, value) in ports {
                    let _ = write!(s, " {letter}={value:02X}");
                }
                s
            }
            Line::Other(text) => format!("????  {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let mut mon = Monitor::new();

        let line = parse_line("->Polled WatchdogPower On Reset").unwrap();
        assert_eq!(mon.describe(&line), "RESET (watchdog, power-on)");
        assert_eq!(mon.resets, 1);

        let line = parse_line("Polled:- Bow Wow - Watchdog IRQ").unwrap();
        assert_eq!(mon.describe(&line), "WDT   interrupt #1");

        let line = parse_line("A=00000001 B=10000000 ").unwrap();
        assert_eq!(mon.describe(&line), "PORTS A=01 B=80");

        let line =
            parse_line("Irq m hello IRQ print, base: 0, Port,Bit: B,7 = high, watchdog_count=1")
                .unwrap();
        assert_eq!(
            mon.describe(&line),
            "STAT  m: pin B,7 high, watchdog count 1"
        );
        assert_eq!(mon.last_watchdog_count, Some(1));
    }

    #[test]
    fn test_handle_raw() {
        let mut mon = Monitor::new();
        mon.handle_raw(b"\r\n");
        assert_eq!(mon.resets, 0);
        mon.handle_raw(b"->Polled External Reset\r\n");
        assert_eq!(mon.resets, 1);
    }
}

// vim: ts=4 sw=4 expandtab
