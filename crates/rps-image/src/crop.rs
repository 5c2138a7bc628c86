use crate::ImageError;

/// Classifier input resolution (square).
pub const INPUT_SIZE: u32 = 224;

/// On-screen capture mask and the display it is drawn on.
///
/// The mask is a square of `mask_dimension` logical points centred on a
/// display of `display_width` x `display_height` points. Cropping maps that
/// square onto the sensor resolution of each captured frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskConfig {
    mask_dimension: f32,
    display_width: f32,
    display_height: f32,
    output_size: u32,
    jpeg_quality: u8,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask_dimension: 300.0,
            display_width: 390.0,
            display_height: 844.0,
            output_size: INPUT_SIZE,
            jpeg_quality: 100,
        }
    }
}

impl MaskConfig {
    pub fn with_mask_dimension(mut self, mask_dimension: f32) -> Self {
        self.mask_dimension = mask_dimension;
        self
    }

    pub fn with_display(mut self, width: f32, height: f32) -> Self {
        self.display_width = width;
        self.display_height = height;
        self
    }

    pub fn with_output_size(mut self, output_size: u32) -> Self {
        self.output_size = output_size;
        self
    }

    /// JPEG quality (1-100) of the encoded crop.
    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    pub fn mask_dimension(&self) -> f32 {
        self.mask_dimension
    }

    pub fn display_width(&self) -> f32 {
        self.display_width
    }

    pub fn display_height(&self) -> f32 {
        self.display_height
    }

    pub fn output_size(&self) -> u32 {
        self.output_size
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

/// Pixel rectangle inside a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Centred crop matching the on-screen mask.
    ///
    /// Per axis: `side = mask * frame / display`, `origin = frame / 2 - side / 2`.
    /// Width and height are scaled independently, so the result is square on
    /// screen but not necessarily in sensor pixels.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Crop` if a display dimension is not positive, or
    /// the scaled mask is empty or does not fit inside the frame.
    pub fn centered(frame_width: u32, frame_height: u32, mask: &MaskConfig) -> Result<Self, ImageError> {
        let (x, width) = axis(frame_width, mask.mask_dimension, mask.display_width)?;
        let (y, height) = axis(frame_height, mask.mask_dimension, mask.display_height)?;
        Ok(Self { x, y, width, height })
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x + self.width <= width && self.y + self.height <= height
    }
}

fn axis(frame: u32, mask: f32, display: f32) -> Result<(u32, u32), ImageError> {
    if !(display.is_finite() && display > 0.0) {
        return Err(ImageError::Crop(format!("invalid display dimension {display}")));
    }
    let frame_f = frame as f32;
    let side = mask * frame_f / display;
    let origin = frame_f / 2.0 - side / 2.0;

    if !(side.is_finite() && side >= 1.0) {
        return Err(ImageError::Crop(format!("crop side {side} is empty")));
    }
    // half a pixel of slack for rounding
    if origin < -0.5 || origin + side > frame_f + 0.5 {
        return Err(ImageError::Crop(format!(
            "crop of {side} px at {origin} exceeds frame of {frame} px"
        )));
    }

    let start = origin.round().max(0.0) as u32;
    let len = (side.round() as u32).min(frame - start);
    if len == 0 {
        return Err(ImageError::Crop(format!("crop at {start} leaves no pixels")));
    }
    Ok((start, len))
}
