use crate::ImageError;
use crates_image::DynamicImage;
use std::path::PathBuf;

/// Where the pixels of a captured frame live.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource {
    /// Encoded image bytes (JPEG from MJPEG cameras).
    Jpeg(Vec<u8>),
    /// Image file written by the capture backend.
    File(PathBuf),
}

/// A single captured photo.
///
/// Width and height are what the capture backend reported. Either may be
/// unknown, in which case preprocessing falls back to the display size.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub source: FrameSource,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Frame {
    pub fn from_jpeg(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            source: FrameSource::Jpeg(data),
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: FrameSource::File(path.into()),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Decode the frame's pixels.
    pub(crate) fn decode(&self) -> Result<DynamicImage, ImageError> {
        match &self.source {
            FrameSource::Jpeg(data) => Ok(crates_image::load_from_memory(data)?),
            FrameSource::File(path) => {
                let data = std::fs::read(path)
                    .map_err(|e| ImageError::Io(format!("{}: {e}", path.display())))?;
                Ok(crates_image::load_from_memory(&data)?)
            }
        }
    }
}
