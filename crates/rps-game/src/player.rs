use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rps_infer::Gesture;

/// Source of the computer's move.
pub trait ComputerPlayer {
    fn choose(&mut self) -> Gesture;
}

/// Picks uniformly among rock, paper and scissor.
#[derive(Debug)]
pub struct RandomPlayer<R = StdRng> {
    rng: R,
}

impl RandomPlayer<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RandomPlayer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomPlayer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ComputerPlayer for RandomPlayer<R> {
    fn choose(&mut self) -> Gesture {
        Gesture::ALL[self.rng.gen_range(0..Gesture::ALL.len())]
    }
}

/// Always plays the same gesture.
#[derive(Clone, Copy, Debug)]
pub struct FixedPlayer(pub Gesture);

impl ComputerPlayer for FixedPlayer {
    fn choose(&mut self) -> Gesture {
        self.0
    }
}
