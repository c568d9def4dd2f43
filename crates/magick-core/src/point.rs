//! Drawing coordinates

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub fn new(x: f64, y: f64) -> Self {
        PointD { x, y }
    }
}

impl From<(f64, f64)> for PointD {
    fn from((x, y): (f64, f64)) -> Self {
        PointD { x, y }
    }
}

/// One elliptical arc of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathArc {
    /// End point
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x axis, in degrees
    pub rotation_x: f64,
    pub use_large_arc: bool,
    pub use_sweep: bool,
}

impl PathArc {
    pub fn new(end: PointD, radius_x: f64, radius_y: f64) -> Self {
        PathArc {
            x: end.x,
            y: end.y,
            radius_x,
            radius_y,
            ..Self::default()
        }
    }
}
