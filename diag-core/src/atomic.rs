// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Byte sized state shared between `main()` and interrupt handlers.
//!
//! Loads have acquire semantics and stores have release semantics.
//! There are no read-modify-write operations.
//! Every cell must have exactly one writing context.

use crate::atomic_impl::{FlagImpl, U8Impl};

/// Binary flag.
///
/// Used as a single slot rendezvous:
/// One context sets the flag and waits, the other context clears it.
pub struct AtomicFlag(FlagImpl);

impl AtomicFlag {
    pub const fn new() -> Self {
        Self(FlagImpl::new())
    }

    #[inline]
    pub fn set(&self) {
        self.0.store(true);
    }

    #[inline]
    pub fn clear(&self) {
        self.0.store(false);
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load()
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// 8 bit event counter.
///
/// The increment is not atomic as a whole.
/// It is only correct, if all increments happen in the same context.
pub struct AtomicCounter(U8Impl);

impl AtomicCounter {
    pub const fn new() -> Self {
        Self(U8Impl::new())
    }

    #[inline]
    pub fn get(&self) -> u8 {
        self.0.load()
    }

    #[inline]
    pub fn increment(&self) {
        self.0.store(self.0.load().wrapping_add(1));
    }
}

impl Default for AtomicCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flag() {
        let f = AtomicFlag::new();
        assert!(!f.is_set());
        f.set();
        assert!(f.is_set());
        f.set();
        assert!(f.is_set());
        f.clear();
        assert!(!f.is_set());
    }

    #[test]
    fn test_counter() {
        let c = AtomicCounter::new();
        assert_eq!(c.get(), 0);
        c.increment();
        c.increment();
        assert_eq!(c.get(), 2);
        for _ in 0..254 {
            c.increment();
        }
        assert_eq!(c.get(), 0);
    }
}

// vim: ts=4 sw=4 expandtab
