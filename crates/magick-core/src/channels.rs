//! Channel masks

use bitflags::bitflags;

bitflags! {
    /// Pixel channels an operation applies to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Channels: u64 {
        const RED = 0x0001;
        const GREEN = 0x0002;
        const BLUE = 0x0004;
        const BLACK = 0x0008;
        const ALPHA = 0x0010;
        const INDEX = 0x0020;
        const META = 0x0400;
        const COMPOSITE = 0x001f;
        const RGB = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits();
        const ALL = 0x7ff_ffff;
    }
}

impl Channels {
    pub const CYAN: Channels = Channels::RED;
    pub const MAGENTA: Channels = Channels::GREEN;
    pub const YELLOW: Channels = Channels::BLUE;
    pub const GRAY: Channels = Channels::RED;

    /// Native bitmask; an empty mask means every channel.
    pub fn to_native(self) -> u64 {
        if self.is_empty() {
            Channels::ALL.bits()
        } else {
            self.bits()
        }
    }

    pub fn from_native(bits: u64) -> Self {
        Channels::from_bits_retain(bits)
    }
}

impl Default for Channels {
    fn default() -> Self {
        Channels::COMPOSITE
    }
}
