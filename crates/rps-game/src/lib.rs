//! Round logic for the gesture game.
//!
//! Two cooperative timers run on a tokio [`LocalSet`](tokio::task::LocalSet):
//!
//! - the [`GestureDetector`] loop captures a frame every 700 ms, classifies
//!   it and publishes the winning label into a [`GestureCell`];
//! - the countdown ticker drives a [`RoundMachine`] from 3 down to 0, then
//!   resolves the round against whatever gesture was last published.
//!
//! [`Game`] owns both and is what a UI talks to.

pub mod cell;
pub mod config;
pub mod detector;
pub mod error;
pub mod game;
pub mod player;
pub mod round;
pub mod task;

pub use cell::{GestureCell, GestureReader};
pub use config::GameConfig;
pub use detector::GestureDetector;
pub use error::GameError;
pub use game::Game;
pub use player::{ComputerPlayer, FixedPlayer, RandomPlayer};
pub use round::{Outcome, Phase, Round, RoundMachine, Tick, beats, outcome};
pub use task::TaskHandle;

pub use rps_infer::Gesture;
