/// Configuration for a streaming camera device.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    device: String,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
            buffer_count: 4,
        }
    }
}

impl CameraConfig {
    /// V4L2 device node to open.
    pub fn with_device(mut self, device: String) -> Self {
        self.device = device;
        self
    }

    /// Requested sensor width; the driver may pick the nearest mode.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the number of mmap buffers in the capture stream.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}

/// Per-shot capture options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOptions {
    /// JPEG quality in `[0, 1]`.
    pub quality: f32,
    /// Return the sensor image as-is, without re-encoding at `quality`.
    pub skip_processing: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 0.3,
            skip_processing: true,
        }
    }
}

impl CaptureOptions {
    /// `quality` on the 1-100 scale used by JPEG encoders.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
    }
}
