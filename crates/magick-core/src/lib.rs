//! magick-core: native resource runtime and generated bindings
//!
//! The native image library hands out opaque instance handles. This crate owns them:
//!
//! - [`OwnedHandle`] releases a handle exactly once, on drop or on replacement
//! - [`ExceptionSlot`] carries native exceptions back into [`MagickError`]
//! - [`Mutator`] enforces the single-operation protocol for operations producing a new image
//!
//! The wrappers in [`native`] are generated from `declarations/` by the build script. They
//! are generic over the entry point traits, so any implementation of `MagickImageEntries`
//! can back them; the `link-native` feature adds [`LinkedLibrary`], which calls the exported
//! symbols directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use magick_core::{LinkedLibrary, MagickGeometry, NativeMagickImage};
//!
//! let library = LinkedLibrary::new();
//! let mut image = NativeMagickImage::new(&library);
//! image.read_file("input.png")?;
//!
//! let mut mutator = image.mutator();
//! mutator.resize(&MagickGeometry::new(320, 240))?;
//! let resized = NativeMagickImage::from_handle(mutator.get_result().unwrap());
//! ```

pub mod channels;
pub mod drawing;
pub mod enums;
pub mod error;
pub mod exception;
pub mod geometry;
pub mod handle;
#[cfg(feature = "link-native")]
pub mod linked;
pub mod marshal;
pub mod matrix;
pub mod mutator;
pub mod native;
pub mod point;
pub mod quantum;

pub use channels::Channels;
pub use drawing::{PathBuilder, PathSegment, Paths};
pub use enums::{Gravity, NoiseType, PixelInterpolateMethod};
pub use error::{ExceptionSeverity, MagickError, NativeException, Result};
pub use exception::ExceptionSlot;
pub use geometry::MagickGeometry;
pub use handle::{OwnedHandle, RawHandle, ReleaseFn};
#[cfg(feature = "link-native")]
pub use linked::LinkedLibrary;
pub use matrix::DoubleMatrix;
pub use mutator::{Mutator, MutatorState};
pub use native::{
    DrawingWandEntries, MagickImageEntries, NativeDrawingWand, NativeMagickImage,
    NativeMagickImageMutator,
};
pub use point::{PathArc, PointD};
pub use quantum::{Quantum, QuantumType, QUANTUM_DEPTH};
