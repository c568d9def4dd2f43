//! Pixel sample representation
//!
//! `QuantumType` follows the enabled depth feature. When several are enabled `q8` wins,
//! then `q16-hdri`, so generated bindings and this alias always agree.

#[cfg(feature = "q8")]
pub type QuantumType = u8;

#[cfg(all(feature = "q16-hdri", not(feature = "q8")))]
pub type QuantumType = f32;

#[cfg(not(any(feature = "q8", feature = "q16-hdri")))]
pub type QuantumType = u16;

/// A sample type the native library can be built with.
pub trait Quantum: Copy + PartialOrd + Default + std::fmt::Debug {
    /// Bits per sample
    const DEPTH: u32;
    /// Value of a fully saturated sample
    const MAX: f64;

    fn to_f64(self) -> f64;

    /// Convert with rounding and clamping to the representable range.
    fn from_f64(value: f64) -> Self;
}

impl Quantum for u8 {
    const DEPTH: u32 = 8;
    const MAX: f64 = u8::MAX as f64;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, <Self as Quantum>::MAX) as u8
    }
}

impl Quantum for u16 {
    const DEPTH: u32 = 16;
    const MAX: f64 = u16::MAX as f64;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, <Self as Quantum>::MAX) as u16
    }
}

// HDRI samples keep the 16-bit range but are not clamped
impl Quantum for f32 {
    const DEPTH: u32 = 16;
    const MAX: f64 = u16::MAX as f64;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

/// Depth of the enabled `QuantumType`.
pub const QUANTUM_DEPTH: u32 = <QuantumType as Quantum>::DEPTH;
