use rps_camera::CaptureOptions;
use rps_image::MaskConfig;
use std::time::Duration;

/// Timing and capture settings for a [`Game`](crate::Game).
#[derive(Clone, Debug)]
pub struct GameConfig {
    detector_period: Duration,
    countdown_from: u32,
    countdown_tick: Duration,
    capture: CaptureOptions,
    mask: MaskConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            detector_period: Duration::from_millis(700),
            countdown_from: 3,
            countdown_tick: Duration::from_secs(1),
            capture: CaptureOptions::default(),
            mask: MaskConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the time between detector ticks.
    pub fn with_detector_period(mut self, period: Duration) -> Self {
        self.detector_period = period;
        self
    }

    /// Set the number of seconds counted down before a round resolves.
    pub fn with_countdown_from(mut self, seconds: u32) -> Self {
        self.countdown_from = seconds;
        self
    }

    pub fn with_countdown_tick(mut self, tick: Duration) -> Self {
        self.countdown_tick = tick;
        self
    }

    pub fn with_capture(mut self, capture: CaptureOptions) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_mask(mut self, mask: MaskConfig) -> Self {
        self.mask = mask;
        self
    }

    pub fn detector_period(&self) -> Duration {
        self.detector_period
    }

    pub fn countdown_from(&self) -> u32 {
        self.countdown_from
    }

    pub fn countdown_tick(&self) -> Duration {
        self.countdown_tick
    }

    pub fn capture(&self) -> CaptureOptions {
        self.capture
    }

    pub fn mask(&self) -> MaskConfig {
        self.mask
    }
}
