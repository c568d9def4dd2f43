//! Path drawing
//!
//! [`Paths`] records segments; [`Paths::draw`] replays them onto a drawing wand inside one
//! `path_start`/`path_finish` pair.

use crate::error::Result;
use crate::native::{DrawingWandEntries, NativeDrawingWand};
use crate::point::{PathArc, PointD};

include!(concat!(env!("OUT_DIR"), "/paths.rs"));

impl Paths {
    /// Replay every recorded segment onto `wand`.
    pub fn draw<L: DrawingWandEntries>(&self, wand: &NativeDrawingWand<'_, L>) -> Result<()> {
        wand.path_start()?;
        for segment in self.segments() {
            segment.draw(wand)?;
        }
        wand.path_finish()
    }
}

impl PathSegment {
    fn draw<L: DrawingWandEntries>(&self, wand: &NativeDrawingWand<'_, L>) -> Result<()> {
        match self {
            PathSegment::ArcAbs(arcs) => {
                for arc in arcs {
                    let PathArc { x, y, radius_x, radius_y, rotation_x, use_large_arc, use_sweep } = *arc;
                    wand.path_arc_abs(x, y, radius_x, radius_y, rotation_x, use_large_arc, use_sweep)?;
                }
                Ok(())
            }
            PathSegment::ArcRel(arcs) => {
                for arc in arcs {
                    let PathArc { x, y, radius_x, radius_y, rotation_x, use_large_arc, use_sweep } = *arc;
                    wand.path_arc_rel(x, y, radius_x, radius_y, rotation_x, use_large_arc, use_sweep)?;
                }
                Ok(())
            }
            PathSegment::Close => wand.path_close(),
            PathSegment::CurveToAbs { control_point_start: start, control_point_end: end, end_point } => {
                wand.path_curve_to_abs(start.x, start.y, end.x, end.y, end_point.x, end_point.y)
            }
            PathSegment::CurveToRel { control_point_start: start, control_point_end: end, end_point } => {
                wand.path_curve_to_rel(start.x, start.y, end.x, end.y, end_point.x, end_point.y)
            }
            PathSegment::LineToAbs(points) => {
                for point in points {
                    wand.path_line_to_abs(point.x, point.y)?;
                }
                Ok(())
            }
            PathSegment::LineToRel(points) => {
                for point in points {
                    wand.path_line_to_rel(point.x, point.y)?;
                }
                Ok(())
            }
            PathSegment::LineToHorizontalAbs { x } => wand.path_line_to_horizontal_abs(*x),
            PathSegment::LineToHorizontalRel { x } => wand.path_line_to_horizontal_rel(*x),
            PathSegment::LineToVerticalAbs { y } => wand.path_line_to_vertical_abs(*y),
            PathSegment::LineToVerticalRel { y } => wand.path_line_to_vertical_rel(*y),
            PathSegment::MoveToAbs { point } => wand.path_move_to_abs(point.x, point.y),
            PathSegment::MoveToRel { point } => wand.path_move_to_rel(point.x, point.y),
        }
    }
}
