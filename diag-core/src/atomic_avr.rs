use avr_atomic::AvrAtomic;

pub struct FlagImpl(AvrAtomic<bool>);

impl FlagImpl {
    pub const fn new() -> Self {
        Self(AvrAtomic::new())
    }

    #[inline(always)]
    pub fn load(&self) -> bool {
        self.0.load()
    }

    #[inline(always)]
    pub fn store(&self, value: bool) {
        self.0.store(value);
    }
}

pub struct U8Impl(AvrAtomic<u8>);

impl U8Impl {
    pub const fn new() -> Self {
        Self(AvrAtomic::new())
    }

    #[inline(always)]
    pub fn load(&self) -> u8 {
        self.0.load()
    }

    #[inline(always)]
    pub fn store(&self, value: u8) {
        self.0.store(value);
    }
}

// vim: ts=4 sw=4 expandtab
