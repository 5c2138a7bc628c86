use crate::{
    ComputerPlayer, GameConfig, GameError, GestureDetector, GestureReader, Round, RoundMachine,
    TaskHandle, Tick,
};
use rps_camera::Camera;
use rps_image::Frame;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::watch;
use tokio::time::Instant;

struct RoundState {
    machine: RoundMachine,
    player: Box<dyn ComputerPlayer>,
    tx: watch::Sender<Round>,
}

impl RoundState {
    fn publish(&self) {
        self.tx.send_replace(self.machine.round().clone());
    }
}

/// A running game: the gesture detector plus one round at a time.
///
/// Must be created and used inside a tokio `LocalSet`. Dropping the game or
/// calling [`Game::shutdown`] stops both timers.
pub struct Game {
    state: Rc<RefCell<RoundState>>,
    rounds: watch::Receiver<Round>,
    gesture: GestureReader,
    preview: watch::Receiver<Option<Frame>>,
    config: GameConfig,
    detector: TaskHandle,
    countdown: Option<TaskHandle>,
}

impl Game {
    /// Start the detector loop and return an idle game.
    pub fn new<C, P>(detector: GestureDetector<C>, player: P, config: GameConfig) -> Self
    where
        C: Camera + 'static,
        P: ComputerPlayer + 'static,
    {
        let gesture = detector.gesture();
        let preview = detector.preview();
        let detector = detector.start(config.detector_period());

        let machine = RoundMachine::new(config.countdown_from());
        let (tx, rounds) = watch::channel(machine.round().clone());
        let state = Rc::new(RefCell::new(RoundState {
            machine,
            player: Box::new(player),
            tx,
        }));

        Self {
            state,
            rounds,
            gesture,
            preview,
            config,
            detector,
            countdown: None,
        }
    }

    /// Start a new round, restarting any countdown in progress.
    pub fn start(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.stop();
        }

        let epoch = {
            let mut state = self.state.borrow_mut();
            let epoch = state.machine.start();
            state.publish();
            epoch
        };
        log::info!("round {epoch} started");

        let state = Rc::clone(&self.state);
        let gesture = self.gesture.clone();
        let period = self.config.countdown_tick();
        self.countdown = Some(TaskHandle::spawn_local(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let mut guard = state.borrow_mut();
                let RoundState { machine, player, .. } = &mut *guard;
                let tick = machine.tick(epoch, &mut **player, &gesture);
                match tick {
                    Tick::Remaining(_) => guard.publish(),
                    Tick::Resolved(outcome) => {
                        guard.publish();
                        let computer = guard.machine.round().computer_choice;
                        log::info!(
                            "round {epoch} resolved: {outcome} (computer played {})",
                            computer.map_or("nothing", |g| g.as_str())
                        );
                        break;
                    }
                    Tick::Stale => break,
                }
            }
        }));
    }

    /// Return a resolved round to idle.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTransition` unless the round is resolved.
    pub fn dismiss(&mut self) -> Result<(), GameError> {
        let mut state = self.state.borrow_mut();
        state.machine.dismiss()?;
        state.publish();
        self.countdown = None;
        Ok(())
    }

    /// Snapshot of the current round.
    pub fn round(&self) -> Round {
        self.rounds.borrow().clone()
    }

    pub fn rounds(&self) -> watch::Receiver<Round> {
        self.rounds.clone()
    }

    pub fn gesture(&self) -> GestureReader {
        self.gesture.clone()
    }

    pub fn preview(&self) -> watch::Receiver<Option<Frame>> {
        self.preview.clone()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        !self.detector.is_stopped()
    }

    /// Stop the detector and any countdown. Idempotent.
    pub fn shutdown(&mut self) {
        self.detector.stop();
        if let Some(mut countdown) = self.countdown.take() {
            countdown.stop();
        }
        log::debug!("game shut down");
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}
