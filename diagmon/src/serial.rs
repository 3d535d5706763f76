// -*- coding: utf-8 -*-

use crate::{Opts, monitor::Monitor};
use anyhow::{self as ah, Context as _, format_err as err};
use std::{
    io::{BufRead as _, BufReader, ErrorKind},
    time::Duration,
};
use tracing::{debug, info};

pub fn run_serial(opts: &Opts, monitor: &mut Monitor) -> ah::Result<()> {
    let port = opts.port.as_deref().unwrap_or("/dev/ttyACM0");
    let serial = serialport::new(port, opts.baud)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .flow_control(serialport::FlowControl::None)
        .stop_bits(serialport::StopBits::One)
        .timeout(Duration::from_millis(500))
        .open()
        .context("Open serial port")?;
    info!("Listening on {port} with {} baud", opts.baud);

    let mut reader = BufReader::new(serial);
    let mut line = Vec::with_capacity(128);
    loop {
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return Err(err!("Serial port closed")),
            Ok(_) => {
                monitor.handle_raw(&line);
                line.clear();
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                // Partial lines stay in the buffer.
                debug!("Serial read timeout, {} bytes pending", line.len());
            }
            Err(e) => return Err(e).context("Serial port read"),
        }
    }
}

// vim: ts=4 sw=4 expandtab
