// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use diag_core::config::Config;

/// Build time setting from the environment, with a default.
macro_rules! env_or {
    ($name:literal, $default:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => $default,
        }
    };
}

/// Firmware configuration.
///
/// An invalid configuration fails the build.
pub const CONFIG: Config = match Config::parse(
    env_or!("DIAG_NAME", "atmega2560"),
    env_or!("DIAG_BASE", "0"),
    env_or!("DIAG_BAUD", "115200"),
    env_or!("DIAG_F_CPU", "16000000"),
    env_or!("DIAG_PULLUP_PIN", "B,7"), // Arduino Mega pin 13
) {
    Ok(conf) => conf,
    Err(e) => e.fail(),
};

/// Last byte of the 256 kiB program memory.
/// The bootloader stores its major version here
/// and the minor version in the byte below.
pub const BOOTLOADER_END: u32 = 0x3FFFF;

// vim: ts=4 sw=4 expandtab
