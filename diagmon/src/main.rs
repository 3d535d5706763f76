// -*- coding: utf-8 -*-

#![forbid(unsafe_code)]

mod monitor;
mod parse;
mod serial;

use crate::{monitor::Monitor, serial::run_serial};
use anyhow as ah;
use clap::Parser;
use std::{thread, time::Duration};
use tracing::error;

#[derive(Parser, Debug)]
pub struct Opts {
    /// Serial port device. Default: /dev/ttyACM0
    port: Option<String>,

    /// Serial baud rate.
    #[arg(short, long, default_value_t = 115_200)]
    baud: u32,

    /// Verbose diagnostics on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_max_level(if opts.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut monitor = Monitor::new();
    loop {
        if let Err(e) = run_serial(&opts, &mut monitor) {
            error!("Serial error: {e:?}");
        }
        thread::sleep(Duration::from_millis(5000));
    }
}

// vim: ts=4 sw=4 expandtab
