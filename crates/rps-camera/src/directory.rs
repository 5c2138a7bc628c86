use crate::{Camera, CameraError, CaptureOptions};
use rps_image::{Frame, probe_dimensions};
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Camera that replays still images from a directory, in file name order,
/// wrapping around at the end.
///
/// Handy for running the game on a machine without a camera, or for
/// replaying a recorded session. Capture options are ignored: files are
/// returned as stored.
#[derive(Debug)]
pub struct DirectoryCamera {
    dir: PathBuf,
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectoryCamera {
    /// Scan `dir` for `.jpg`, `.jpeg` and `.png` files.
    ///
    /// An empty directory is not an error; the camera just never becomes ready.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the directory cannot be read.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CameraError> {
        let dir = dir.into();
        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
            .map_err(|e| CameraError::Device(format!("{}: {e}", dir.display())))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_image(path))
            .collect();
        files.sort();

        log::info!("directory camera: {} frames in {}", files.len(), dir.display());
        Ok(Self {
            dir,
            files,
            next: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl Camera for DirectoryCamera {
    fn is_ready(&self) -> bool {
        !self.files.is_empty()
    }

    async fn take_picture(&mut self, _options: CaptureOptions) -> Result<Frame, CameraError> {
        if self.files.is_empty() {
            return Err(CameraError::NotReady);
        }
        let path = self.files[self.next % self.files.len()].clone();
        self.next = (self.next + 1) % self.files.len();

        let probe_path = path.clone();
        let (width, height) = tokio::task::spawn_blocking(move || {
            let data = std::fs::read(&probe_path)?;
            Ok::<_, CameraError>(probe_dimensions(&data)?)
        })
        .await
        .map_err(|e| CameraError::Channel(e.to_string()))??;

        Ok(Frame::from_file(path).with_dimensions(width, height))
    }
}
