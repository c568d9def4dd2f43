/// An image instance owned by the native library.
#[native_interop(name = "MagickImage", enums(Gravity, NoiseType, PixelInterpolateMethod))]
pub trait NativeMagickImage {
    /// Allocate an empty image.
    #[throws]
    fn create() -> Handle;

    #[throws]
    #[read_instance]
    fn read_file(&self, file_name: &str) -> Handle;

    #[throws]
    #[read_instance]
    fn read_blob(&self, data: &[u8]) -> Handle;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    #[throws]
    fn clone_image(&self) -> Handle;

    #[throws]
    fn adaptive_blur(&self, #[default(0.0)] radius: f64, #[default(1.0)] sigma: f64) -> Handle;

    #[throws]
    fn blur(&self, radius: f64, sigma: f64, channels: Channels) -> Handle;

    #[throws]
    fn resize(&self, geometry: &MagickGeometry) -> Handle;

    #[throws]
    fn crop(&self, geometry: &MagickGeometry, gravity: Gravity) -> Handle;

    #[throws]
    fn add_noise(&self, noise_type: NoiseType, attenuate: f64, channels: Channels) -> Handle;

    #[throws]
    fn interpolative_resize(&self, geometry: &MagickGeometry, method: PixelInterpolateMethod) -> Handle;

    #[throws]
    fn convolve(&self, matrix: &DoubleMatrix) -> Handle;

    /// Rotate according to the orientation tag; the result replaces the current instance.
    #[throws]
    #[set_instance]
    fn auto_orient(&self) -> Handle;

    fn set_artifact(&self, name: &str, value: &str);

    fn get_artifact(&self, name: &str) -> String;

    /// Straighten the image. The temporary auto-crop artifact is always removed afterwards.
    #[throws]
    #[cleanup(name = "MagickImage_RemoveArtifact", args = "self, \"deskew:auto-crop\"")]
    fn deskew(&self, threshold: f64) -> Handle;

    #[throws]
    fn level(&self, black_point: QuantumType, white_point: QuantumType, gamma: f64, channels: Channels);

    #[throws]
    fn export_pixels(
        &self,
        x: isize,
        y: isize,
        width: usize,
        height: usize,
        map: &str,
        pixels: &mut [QuantumType],
    );

    /// Combine an image list into one image; the list is always released afterwards.
    #[throws]
    #[cleanup(name = "MagickImage_DisposeList", args = "images")]
    fn append_list(images: Handle, stack: bool) -> Handle;
}
