//! Frame preprocessing for the gesture classifier.
//!
//! Two stages, mirroring what the camera screen shows:
//!
//! 1. [`crop_and_resize`] cuts the on-screen mask out of a captured frame,
//!    scales it to 224x224 and returns it as base64 JPEG.
//! 2. [`base64_to_tensor`] turns that JPEG into the classifier input: a
//!    `[1, 224, 224, 3]` NHWC `f32` tensor normalised to `[-1, 1]`.

pub mod crop;
pub mod error;
pub mod frame;

pub use crop::{CropRect, INPUT_SIZE, MaskConfig};
pub use error::ImageError;
pub use frame::{Frame, FrameSource};

pub use crates_image::RgbImage;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use crates_image::imageops::{self, FilterType};
use crates_image::ImageEncoder;
use rps_base::Tensor;
use std::io::Cursor;

/// Encode an RGB image as JPEG with the given quality (1-100).
///
/// # Errors
///
/// Returns `ImageError::Encode` if the encoder rejects the buffer.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decode any supported encoded image into 8-bit RGB.
pub fn decode_rgb(data: &[u8]) -> Result<RgbImage, ImageError> {
    Ok(crates_image::load_from_memory(data)?.to_rgb8())
}

/// Read width and height from an encoded image header without decoding pixels.
pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), ImageError> {
    let reader = crates_image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

/// Synchronous core of [`crop_and_resize`], returning the failure reason.
///
/// # Errors
///
/// Returns `ImageError::Io`/`Decode` if the frame cannot be read,
/// `ImageError::Crop` if the mask does not map into the frame, and
/// `ImageError::Encode` if JPEG encoding fails.
pub fn crop_and_resize_blocking(frame: &Frame, mask: &MaskConfig) -> Result<String, ImageError> {
    let image = frame.decode()?;
    let width = frame.width.unwrap_or(mask.display_width() as u32);
    let height = frame.height.unwrap_or(mask.display_height() as u32);

    let rect = CropRect::centered(width, height, mask)?;
    if !rect.fits_within(image.width(), image.height()) {
        return Err(ImageError::Crop(format!(
            "{rect:?} outside decoded {}x{} frame",
            image.width(),
            image.height()
        )));
    }

    let side = mask.output_size();
    let square = image
        .crop_imm(rect.x, rect.y, rect.width, rect.height)
        .resize_exact(side, side, FilterType::Triangle)
        .to_rgb8();
    let jpeg = encode_jpeg(&square, mask.jpeg_quality())?;
    Ok(BASE64.encode(jpeg))
}

/// Crop the mask region out of `frame`, resize it to the classifier
/// resolution and return it as base64-encoded JPEG.
///
/// Never fails: any error is logged and reported as `None`, which callers
/// treat as "skip this frame". The CPU-bound work runs on tokio's blocking
/// thread pool.
pub async fn crop_and_resize(frame: Frame, mask: MaskConfig) -> Option<String> {
    let result = tokio::task::spawn_blocking(move || crop_and_resize_blocking(&frame, &mask))
        .await
        .map_err(|e| ImageError::Encode(e.to_string()))
        .and_then(|inner| inner);

    match result {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            log::warn!("could not crop & resize frame: {e}");
            None
        }
    }
}

/// Map a `[0, 255]` channel value to `[-1, 1]`.
#[inline]
pub fn normalize(value: f32) -> f32 {
    value / 127.5 - 1.0
}

/// Decode a base64 JPEG into the classifier input tensor.
///
/// The image is converted to 3-channel RGB, resized bilinearly to 224x224 if
/// it is not already that size, normalised with [`normalize`] and given a
/// leading batch dimension. Intermediate buffers are dropped before return;
/// only the tensor escapes.
///
/// # Errors
///
/// Returns `ImageError::Base64` for malformed base64 and `ImageError::Decode`
/// for undecodable image bytes.
pub fn base64_to_tensor(encoded: &str) -> Result<Tensor<f32>, ImageError> {
    let rgb = {
        let bytes = BASE64.decode(encoded.trim())?;
        let decoded = decode_rgb(&bytes)?;
        if decoded.dimensions() == (INPUT_SIZE, INPUT_SIZE) {
            decoded
        } else {
            imageops::resize(&decoded, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        }
    };

    let (width, height) = rgb.dimensions();
    let pixels = Tensor::new(vec![height as usize, width as usize, 3], rgb.into_raw())?;
    Ok(pixels.map_f32(normalize).unsqueeze())
}
