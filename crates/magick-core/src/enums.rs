//! Enumerations passed to the native library by value

/// Placement of a region relative to the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Gravity {
    #[default]
    Undefined = 0,
    Northwest = 1,
    North = 2,
    Northeast = 3,
    West = 4,
    Center = 5,
    East = 6,
    Southwest = 7,
    South = 8,
    Southeast = 9,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NoiseType {
    #[default]
    Undefined = 0,
    Uniform = 1,
    Gaussian = 2,
    MultiplicativeGaussian = 3,
    Impulse = 4,
    Laplacian = 5,
    Poisson = 6,
    Random = 7,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PixelInterpolateMethod {
    #[default]
    Undefined = 0,
    Average = 1,
    Average9 = 2,
    Average16 = 3,
    Background = 4,
    Bilinear = 5,
    Blend = 6,
    Catrom = 7,
    Integer = 8,
    Mesh = 9,
    Nearest = 10,
    Spline = 11,
}
