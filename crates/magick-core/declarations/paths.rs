/// A path built from drawing segments, replayed onto a drawing wand.
#[paths(variants, segment = "PathSegment", interface = "PathBuilder")]
pub trait Paths {
    /// Elliptical arcs.
    fn arc(&self, arcs: &[PathArc]);

    /// Close the current subpath.
    fn close(&self);

    /// A cubic Bezier curve.
    fn curve_to(&self, control_point_start: PointD, control_point_end: PointD, end_point: PointD);

    fn line_to(&self, coordinates: &[PointD]);

    fn line_to_horizontal(&self, x: f64);

    fn line_to_vertical(&self, y: f64);

    fn move_to(&self, point: PointD);
}
