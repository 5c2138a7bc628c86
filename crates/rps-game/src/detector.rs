use crate::{GameConfig, GameError, GestureCell, GestureReader, TaskHandle};
use rps_camera::{Camera, CaptureOptions};
use rps_image::{Frame, MaskConfig, base64_to_tensor, crop_and_resize};
use rps_infer::{Gesture, LabelTable, ModelCell, ModelHandle, Prediction};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// Periodically turns camera frames into a published [`Gesture`].
///
/// Each tick runs capture, crop, tensor conversion, inference and argmax.
/// A tick that cannot finish (camera not ready, model still loading, capture
/// or preprocessing failure, unlabelled prediction) is skipped and the
/// previously published gesture stays.
pub struct GestureDetector<C> {
    camera: C,
    model: ModelCell,
    labels: LabelTable,
    mask: MaskConfig,
    capture: CaptureOptions,
    gesture: GestureCell,
    preview: watch::Sender<Option<Frame>>,
}

impl<C: Camera + 'static> GestureDetector<C> {
    pub fn new(camera: C, model: ModelCell, labels: LabelTable) -> Self {
        let (preview, _) = watch::channel(None);
        Self {
            camera,
            model,
            labels,
            mask: MaskConfig::default(),
            capture: CaptureOptions::default(),
            gesture: GestureCell::new(),
            preview,
        }
    }

    /// Detector with the mask and capture settings of `config`.
    pub fn from_config(
        camera: C,
        model: ModelCell,
        labels: LabelTable,
        config: &GameConfig,
    ) -> Self {
        Self::new(camera, model, labels)
            .with_mask(config.mask())
            .with_capture(config.capture())
    }

    pub fn with_mask(mut self, mask: MaskConfig) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_capture(mut self, capture: CaptureOptions) -> Self {
        self.capture = capture;
        self
    }

    pub fn gesture(&self) -> GestureReader {
        self.gesture.reader()
    }

    /// The most recently captured frame, for showing the last photo.
    pub fn preview(&self) -> watch::Receiver<Option<Frame>> {
        self.preview.subscribe()
    }

    /// Run one detection cycle and return the gesture it published, if any.
    pub async fn tick(&mut self) -> Option<Gesture> {
        match self.detect().await {
            Ok(Some(gesture)) => {
                log::debug!("detected {gesture}");
                self.gesture.publish(gesture);
                Some(gesture)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("skipping detector tick: {e}");
                None
            }
        }
    }

    async fn detect(&mut self) -> Result<Option<Gesture>, GameError> {
        if !self.camera.is_ready() {
            log::debug!("camera not ready, skipping detector tick");
            return Ok(None);
        }
        let Some(model) = self.model.get() else {
            log::debug!("model still loading, skipping detector tick");
            return Ok(None);
        };

        let frame = self.camera.take_picture(self.capture).await?;
        self.preview.send_replace(Some(frame.clone()));

        let Some(encoded) = crop_and_resize(frame, self.mask).await else {
            return Ok(None);
        };
        let prediction = tokio::task::spawn_blocking(move || classify(&model, &encoded))
            .await
            .map_err(|e| GameError::Infer(rps_infer::InferError::BackendError(e.to_string())))??;

        let gesture = prediction.top(&self.labels);
        if gesture.is_none() {
            log::debug!("no label for scores {:?}", prediction.scores());
        }
        Ok(gesture)
    }

    /// Run [`GestureDetector::tick`] every `period` on the current `LocalSet`.
    ///
    /// The first tick fires one period after the call. Ticks that fall due
    /// while a slow cycle is still running are dropped, not queued.
    pub fn start(mut self, period: Duration) -> TaskHandle {
        TaskHandle::spawn_local(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                self.tick().await;
            }
        })
    }
}

fn classify(model: &ModelHandle, encoded: &str) -> Result<Prediction, GameError> {
    let input = base64_to_tensor(encoded)?;
    let prediction = model.predict(&input);
    drop(input);
    Ok(prediction?)
}
