#![allow(dead_code)]

use rps_base::Tensor;
use rps_camera::{Camera, CameraError, CaptureOptions};
use rps_image::{Frame, RgbImage, encode_jpeg};
use rps_infer::{InferError, ModelCell, Session};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Camera whose readiness and failure can be flipped from the test.
pub struct MockCamera {
    pub ready: Rc<Cell<bool>>,
    pub fail: Rc<Cell<bool>>,
    pub captures: Rc<Cell<usize>>,
    pub readiness_checks: Rc<Cell<usize>>,
    /// How long each capture takes; zero returns at once.
    pub delay: Rc<Cell<Duration>>,
    frame: Frame,
}

impl MockCamera {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: Rc::new(Cell::new(ready)),
            fail: Rc::new(Cell::new(false)),
            captures: Rc::new(Cell::new(0)),
            readiness_checks: Rc::new(Cell::new(0)),
            delay: Rc::new(Cell::new(Duration::ZERO)),
            frame: Frame::from_jpeg(phone_jpeg(), 390, 844),
        }
    }

    /// A second camera sharing this one's switches and counters.
    pub fn shared(&self) -> Self {
        Self {
            ready: Rc::clone(&self.ready),
            fail: Rc::clone(&self.fail),
            captures: Rc::clone(&self.captures),
            readiness_checks: Rc::clone(&self.readiness_checks),
            delay: Rc::clone(&self.delay),
            frame: self.frame.clone(),
        }
    }
}

impl Camera for MockCamera {
    fn is_ready(&self) -> bool {
        self.readiness_checks.set(self.readiness_checks.get() + 1);
        self.ready.get()
    }

    async fn take_picture(&mut self, _options: CaptureOptions) -> Result<Frame, CameraError> {
        self.captures.set(self.captures.get() + 1);
        let delay = self.delay.get();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail.get() {
            return Err(CameraError::Stream("sensor timeout".to_string()));
        }
        Ok(self.frame.clone())
    }
}

/// Portrait frame the size of the default display.
pub fn phone_jpeg() -> Vec<u8> {
    let image = RgbImage::from_fn(390, 844, |x, y| {
        crates_image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    encode_jpeg(&image, 90).unwrap()
}

/// Session returning the same scores for any input.
pub struct FixedScores {
    scores: Vec<f32>,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl FixedScores {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            inputs: vec!["input_1".to_string()],
            outputs: vec!["dense".to_string()],
        }
    }
}

impl Session for FixedScores {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        assert_eq!(inputs[0].1.shape, vec![1, 224, 224, 3]);
        let mut outputs = HashMap::new();
        outputs.insert(
            "dense".to_string(),
            Tensor::new(vec![1, self.scores.len()], self.scores.clone())?,
        );
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }
}

pub async fn loaded_model(scores: Vec<f32>) -> ModelCell {
    let cell = ModelCell::new();
    cell.load(move || Ok(Box::new(FixedScores::new(scores)) as Box<dyn Session>))
        .await
        .unwrap();
    cell
}
