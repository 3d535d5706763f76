use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub struct FlagImpl(AtomicBool);

impl FlagImpl {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    #[inline]
    pub fn load(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn store(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}

pub struct U8Impl(AtomicU8);

impl U8Impl {
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    #[inline]
    pub fn load(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn store(&self, value: u8) {
        self.0.store(value, Ordering::Release);
    }
}

// vim: ts=4 sw=4 expandtab
