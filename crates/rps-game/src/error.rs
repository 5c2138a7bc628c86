use crate::Phase;
use rps_camera::CameraError;
use rps_image::ImageError;
use rps_infer::InferError;
use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// The round cannot take `action` in phase `from`.
    InvalidTransition { from: Phase, action: &'static str },
    Capture(CameraError),
    Image(ImageError),
    Infer(InferError),
    /// The publishing side of an observable is gone.
    Closed,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidTransition { from, action } => {
                write!(f, "cannot {action} a round in phase {from}")
            }
            GameError::Capture(e) => write!(f, "capture error: {e}"),
            GameError::Image(e) => write!(f, "image error: {e}"),
            GameError::Infer(e) => write!(f, "inference error: {e}"),
            GameError::Closed => write!(f, "observable closed"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<CameraError> for GameError {
    fn from(err: CameraError) -> Self {
        GameError::Capture(err)
    }
}

impl From<ImageError> for GameError {
    fn from(err: ImageError) -> Self {
        GameError::Image(err)
    }
}

impl From<InferError> for GameError {
    fn from(err: InferError) -> Self {
        GameError::Infer(err)
    }
}
