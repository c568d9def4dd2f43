//! Generated native wrappers
//!
//! One submodule per declaration under `declarations/`; the code comes from the build script.

mod magick_image {
    use crate::enums::{Gravity, NoiseType, PixelInterpolateMethod};

    include!(concat!(env!("OUT_DIR"), "/magick_image.rs"));
}

mod drawing_wand {
    include!(concat!(env!("OUT_DIR"), "/drawing_wand.rs"));
}

pub use drawing_wand::{DrawingWandEntries, NativeDrawingWand};
pub use magick_image::{MagickImageEntries, NativeMagickImage, NativeMagickImageMutator};
