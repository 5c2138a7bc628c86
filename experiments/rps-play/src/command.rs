use rps_game::{GestureReader, Phase, Round};

pub const HELP: &str = "commands: s = start round, d = dismiss result, p = status, q = quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Dismiss,
    Status,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "s" | "start" => Some(Command::Start),
            "d" | "dismiss" => Some(Command::Dismiss),
            "p" | "status" => Some(Command::Status),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// One line describing the round as the camera screen would show it.
pub fn status_line(round: &Round, gesture: &GestureReader) -> String {
    let detected = gesture.display_text();
    match round.phase {
        Phase::Idle => format!("{detected} | press s to play"),
        Phase::Countdown => format!(
            "{detected} | {}...",
            round.remaining_seconds.unwrap_or_default()
        ),
        Phase::Resolved => {
            let outcome = round.outcome.map(|o| o.to_string()).unwrap_or_default();
            match round.computer_choice {
                Some(computer) => format!("{detected} | {outcome} (Computer chose: {computer})"),
                None => format!("{detected} | {outcome}"),
            }
        }
    }
}
