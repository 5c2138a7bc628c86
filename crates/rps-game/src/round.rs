use crate::{ComputerPlayer, GameError, GestureReader};
use rps_infer::Gesture;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Countdown,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Countdown => write!(f, "countdown"),
            Phase::Resolved => write!(f, "resolved"),
        }
    }
}

/// Result of a round, from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
    NoGestureDetected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "You Win!"),
            Outcome::Lose => write!(f, "You Lose!"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::NoGestureDetected => write!(f, "No gesture detected"),
        }
    }
}

/// Whether `a` beats `b`: rock > scissor > paper > rock.
pub fn beats(a: Gesture, b: Gesture) -> bool {
    matches!(
        (a, b),
        (Gesture::Rock, Gesture::Scissor)
            | (Gesture::Scissor, Gesture::Paper)
            | (Gesture::Paper, Gesture::Rock)
    )
}

pub fn outcome(player: Option<Gesture>, computer: Gesture) -> Outcome {
    match player {
        None => Outcome::NoGestureDetected,
        Some(player) if player == computer => Outcome::Draw,
        Some(player) if beats(player, computer) => Outcome::Win,
        Some(_) => Outcome::Lose,
    }
}

/// Everything a UI shows about the current round.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Round {
    pub phase: Phase,
    pub remaining_seconds: Option<u32>,
    pub computer_choice: Option<Gesture>,
    pub outcome: Option<Outcome>,
}

/// What a countdown tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The tick belongs to a round that was restarted or dismissed.
    Stale,
    Remaining(u32),
    Resolved(Outcome),
}

/// Round state machine: `Idle -> Countdown -> Resolved -> Idle`.
///
/// The machine holds no timer. Whoever drives it passes the epoch returned
/// by [`RoundMachine::start`] to every [`RoundMachine::tick`]; ticks from an
/// older epoch are ignored, so a replaced timer can never resolve the new
/// round.
#[derive(Debug)]
pub struct RoundMachine {
    round: Round,
    countdown_from: u32,
    epoch: u64,
}

impl RoundMachine {
    pub fn new(countdown_from: u32) -> Self {
        Self {
            round: Round::default(),
            countdown_from,
            epoch: 0,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Begin a fresh countdown from any phase and return its epoch.
    ///
    /// A round already counting down is restarted.
    pub fn start(&mut self) -> u64 {
        self.epoch += 1;
        self.round = Round {
            phase: Phase::Countdown,
            remaining_seconds: Some(self.countdown_from),
            computer_choice: None,
            outcome: None,
        };
        self.epoch
    }

    /// Advance the countdown by one second.
    ///
    /// On reaching zero the computer draws its move, the latest gesture is
    /// read from `gesture` and the round resolves. A countdown configured to
    /// start at zero resolves on its first tick.
    pub fn tick(
        &mut self,
        epoch: u64,
        computer: &mut dyn ComputerPlayer,
        gesture: &GestureReader,
    ) -> Tick {
        if epoch != self.epoch || self.round.phase != Phase::Countdown {
            return Tick::Stale;
        }

        let remaining = self.round.remaining_seconds.unwrap_or(0).saturating_sub(1);
        self.round.remaining_seconds = Some(remaining);
        if remaining > 0 {
            return Tick::Remaining(remaining);
        }

        let computer_choice = computer.choose();
        let result = outcome(gesture.peek(), computer_choice);
        self.round.phase = Phase::Resolved;
        self.round.computer_choice = Some(computer_choice);
        self.round.outcome = Some(result);
        Tick::Resolved(result)
    }

    /// Return a resolved round to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTransition` from any phase other than
    /// `Resolved`; the round is left untouched.
    pub fn dismiss(&mut self) -> Result<(), GameError> {
        if self.round.phase != Phase::Resolved {
            return Err(GameError::InvalidTransition {
                from: self.round.phase,
                action: "dismiss",
            });
        }
        self.epoch += 1;
        self.round = Round::default();
        Ok(())
    }
}
