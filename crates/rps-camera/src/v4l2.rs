use crate::{Camera, CameraConfig, CameraError, CaptureOptions};
use rps_image::{Frame, FrameSource, decode_rgb, encode_jpeg};
use std::thread::{self, JoinHandle};
use tokio::sync::watch;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

/// V4L2 still camera.
///
/// A background thread streams MJPEG frames and keeps only the newest one;
/// `take_picture` waits for the next frame after the call and returns it.
pub struct V4l2Camera {
    config: CameraConfig,
    device: Option<Device>,
    latest: Option<watch::Receiver<Option<Vec<u8>>>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("device", &self.device.is_some())
            .field("streaming", &self.latest.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    fn is_ready(&self) -> bool {
        match &self.thread_handle {
            Some(handle) => !handle.is_finished(),
            None => self.device.is_some(),
        }
    }

    async fn take_picture(&mut self, options: CaptureOptions) -> Result<Frame, CameraError> {
        self.ensure_started()?;
        let latest = self
            .latest
            .as_mut()
            .ok_or_else(|| CameraError::Channel("stream not initialized".to_string()))?;

        latest
            .changed()
            .await
            .map_err(|_| CameraError::Stream("capture thread stopped".to_string()))?;
        let jpeg = latest
            .borrow_and_update()
            .clone()
            .ok_or(CameraError::NotReady)?;

        let frame = Frame::from_jpeg(jpeg, self.config.width(), self.config.height());
        if options.skip_processing {
            Ok(frame)
        } else {
            recompress(frame, options.jpeg_quality()).await
        }
    }
}

async fn recompress(frame: Frame, quality: u8) -> Result<Frame, CameraError> {
    tokio::task::spawn_blocking(move || {
        let FrameSource::Jpeg(data) = &frame.source else {
            return Ok(frame);
        };
        let rgb = decode_rgb(data)?;
        let (width, height) = rgb.dimensions();
        Ok(Frame::from_jpeg(encode_jpeg(&rgb, quality)?, width, height))
    })
    .await
    .map_err(|e| CameraError::Channel(e.to_string()))?
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // the capture thread exits once nobody watches its frames
        drop(self.latest.take());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()` in MJPEG mode at the requested
    /// resolution and frame rate.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened, does not
    /// support MJPEG, or rejects the format or frame rate.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;

        let requested = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let format = Capture::set_format(&device, &requested)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::Device(
                "MJPEG format not supported by device".to_string(),
            ));
        }
        let config = config.with_width(format.width).with_height(format.height);

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        Ok(Self {
            config,
            device: Some(device),
            latest: None,
            thread_handle: None,
        })
    }

    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.latest.is_some() {
            return Ok(());
        }
        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count();
        let (tx, rx) = watch::channel(None);
        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(device, tx, buffer_count) {
                log::error!("v4l2 capture thread: {e}");
            }
        });

        self.latest = Some(rx);
        self.thread_handle = Some(handle);
        Ok(())
    }

    fn capture_loop(
        device: Device,
        tx: watch::Sender<Option<Vec<u8>>>,
        buffer_count: u32,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count)?;
        loop {
            let (data, _metadata) = CaptureStream::next(&mut stream)?;
            // the mmap buffer is reused on the next call
            if tx.send(Some(data.to_vec())).is_err() {
                break;
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
