/// A drawing context bound to one image.
#[native_interop(name = "DrawingWand")]
pub trait NativeDrawingWand {
    #[throws]
    fn create(image: Handle) -> Handle;

    #[throws]
    fn render(&self);

    #[throws]
    fn path_start(&self);

    #[throws]
    fn path_finish(&self);

    #[throws]
    fn path_close(&self);

    #[throws]
    fn path_move_to_abs(&self, x: f64, y: f64);

    #[throws]
    fn path_move_to_rel(&self, x: f64, y: f64);

    #[throws]
    fn path_line_to_abs(&self, x: f64, y: f64);

    #[throws]
    fn path_line_to_rel(&self, x: f64, y: f64);

    #[throws]
    fn path_line_to_horizontal_abs(&self, x: f64);

    #[throws]
    fn path_line_to_horizontal_rel(&self, x: f64);

    #[throws]
    fn path_line_to_vertical_abs(&self, y: f64);

    #[throws]
    fn path_line_to_vertical_rel(&self, y: f64);

    #[throws]
    fn path_curve_to_abs(&self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);

    #[throws]
    fn path_curve_to_rel(&self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);

    #[throws]
    fn path_arc_abs(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation_x: f64,
        use_large_arc: bool,
        use_sweep: bool,
    );

    #[throws]
    fn path_arc_rel(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation_x: f64,
        use_large_arc: bool,
        use_sweep: bool,
    );
}
