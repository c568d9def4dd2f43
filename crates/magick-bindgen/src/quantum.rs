//! Quantum depth selection
//!
//! Every member whose signature carries pixel samples is emitted once per selected depth.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single pixel sample representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantumDepth {
    Q8,
    Q16,
    Q16Hdri,
}

impl QuantumDepth {
    /// Cargo feature enabling this depth in the runtime crate.
    pub fn feature(&self) -> &'static str {
        match self {
            QuantumDepth::Q8 => "q8",
            QuantumDepth::Q16 => "q16",
            QuantumDepth::Q16Hdri => "q16-hdri",
        }
    }

    /// Concrete Rust type of one sample.
    pub fn rust_type(&self) -> &'static str {
        match self {
            QuantumDepth::Q8 => "u8",
            QuantumDepth::Q16 => "u16",
            QuantumDepth::Q16Hdri => "f32",
        }
    }
}

/// Which depths the emitter instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantumSelection {
    Q8,
    #[default]
    Q16,
    #[serde(rename = "q16-hdri")]
    Q16Hdri,
    /// All three depths, each guarded by its cargo feature
    All,
}

impl QuantumSelection {
    pub fn variants(&self) -> Vec<QuantumDepth> {
        match self {
            QuantumSelection::Q8 => vec![QuantumDepth::Q8],
            QuantumSelection::Q16 => vec![QuantumDepth::Q16],
            QuantumSelection::Q16Hdri => vec![QuantumDepth::Q16Hdri],
            QuantumSelection::All => vec![QuantumDepth::Q8, QuantumDepth::Q16, QuantumDepth::Q16Hdri],
        }
    }

    /// Whether emitted members need a `#[cfg(feature = ..)]` guard per depth.
    pub fn is_guarded(&self) -> bool {
        matches!(self, QuantumSelection::All)
    }

    /// Resolve the selection from enabled cargo features.
    ///
    /// Priority is `q8`, then `q16-hdri`, then `q16`; the runtime alias uses the same order.
    pub fn from_features(q8: bool, q16: bool, q16_hdri: bool) -> Self {
        if q8 {
            QuantumSelection::Q8
        } else if q16_hdri {
            QuantumSelection::Q16Hdri
        } else if q16 {
            QuantumSelection::Q16
        } else {
            QuantumSelection::default()
        }
    }
}

impl fmt::Display for QuantumSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuantumSelection::Q8 => "q8",
            QuantumSelection::Q16 => "q16",
            QuantumSelection::Q16Hdri => "q16-hdri",
            QuantumSelection::All => "all",
        };
        f.write_str(name)
    }
}

impl FromStr for QuantumSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "q8" => Ok(QuantumSelection::Q8),
            "q16" => Ok(QuantumSelection::Q16),
            "q16-hdri" => Ok(QuantumSelection::Q16Hdri),
            "all" => Ok(QuantumSelection::All),
            other => Err(format!(
                "unknown quantum selection '{}' (expected q8, q16, q16-hdri or all)",
                other
            )),
        }
    }
}
