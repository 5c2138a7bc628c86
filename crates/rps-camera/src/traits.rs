use crate::{CameraError, CaptureOptions};
use rps_image::Frame;

/// Async still-capture camera.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Whether `take_picture` can be called now.
    ///
    /// Callers check this first and skip the capture when it is `false`.
    fn is_ready(&self) -> bool;

    /// Capture one photo.
    async fn take_picture(&mut self, options: CaptureOptions) -> Result<Frame, CameraError>;
}
