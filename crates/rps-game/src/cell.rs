use crate::GameError;
use rps_infer::Gesture;
use tokio::sync::watch;

/// Placeholder shown while no gesture has been detected yet.
pub const DETECTING_TEXT: &str = "Detecting gesture...";

/// Latest detected gesture. Single writer, last write wins.
///
/// Once a gesture is published it stays until the next one replaces it;
/// failed detector ticks never clear it.
#[derive(Debug)]
pub struct GestureCell {
    tx: watch::Sender<Option<Gesture>>,
}

impl Default for GestureCell {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureCell {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub fn publish(&self, gesture: Gesture) {
        self.tx.send_replace(Some(gesture));
    }

    pub fn peek(&self) -> Option<Gesture> {
        *self.tx.borrow()
    }

    pub fn reader(&self) -> GestureReader {
        GestureReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of a [`GestureCell`].
///
/// Keeps returning the last value after the cell is dropped.
#[derive(Clone, Debug)]
pub struct GestureReader {
    rx: watch::Receiver<Option<Gesture>>,
}

impl GestureReader {
    /// Snapshot of the latest gesture. Never waits.
    pub fn peek(&self) -> Option<Gesture> {
        *self.rx.borrow()
    }

    /// `Detected: <label>`, or the placeholder when nothing was detected.
    pub fn display_text(&self) -> String {
        match self.peek() {
            Some(gesture) => format!("Detected: {gesture}"),
            None => DETECTING_TEXT.to_string(),
        }
    }

    /// Wait for the next publish and return it.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Closed` once the cell has been dropped.
    pub async fn changed(&mut self) -> Result<Option<Gesture>, GameError> {
        self.rx.changed().await.map_err(|_| GameError::Closed)?;
        Ok(*self.rx.borrow_and_update())
    }
}
