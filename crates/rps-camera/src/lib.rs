//! Still-capture camera abstraction for the gesture detector.
//!
//! The detector only needs two things from a camera: whether it can be used
//! right now, and a way to take one picture. Backends:
//!
//! - [`DirectoryCamera`] replays image files from a directory
//! - `V4l2Camera` (feature `v4l2`) grabs MJPEG frames from a V4L2 device

pub mod config;
pub mod directory;
pub mod error;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{CameraConfig, CaptureOptions};
pub use directory::DirectoryCamera;
pub use error::CameraError;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
