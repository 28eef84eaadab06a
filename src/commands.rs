//! Console commands and their mapping onto the engine

use std::str::FromStr;

use thiserror::Error;

use crate::{
    config::parse_duration,
    state::{TimerEngine, TimerState},
};

/// A command typed on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Stop,
    Adjust(i64),
    Reconfigure { work: u64, rest: u64 },
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("invalid adjustment '{0}', expected +N or -N seconds")]
    InvalidAdjustment(String),
    #[error("usage: set <work> <rest>")]
    SetUsage,
    #[error("{0}")]
    InvalidDuration(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        if head.starts_with(['+', '-']) {
            let invalid = || CommandError::InvalidAdjustment(line.trim().to_string());
            if words.next().is_some() {
                return Err(invalid());
            }
            return head.parse::<i64>().map(Command::Adjust).map_err(|_| invalid());
        }

        match head.to_ascii_lowercase().as_str() {
            "s" | "start" => Ok(Command::Start),
            "p" | "pause" => Ok(Command::Pause),
            "r" | "reset" => Ok(Command::Reset),
            "x" | "stop" => Ok(Command::Stop),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "set" => {
                let (Some(work), Some(rest), None) = (words.next(), words.next(), words.next())
                else {
                    return Err(CommandError::SetUsage);
                };
                Ok(Command::Reconfigure {
                    work: parse_duration(work).map_err(CommandError::InvalidDuration)?,
                    rest: parse_duration(rest).map_err(CommandError::InvalidDuration)?,
                })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl Command {
    /// Apply the command to the engine. `Quit` leaves the engine untouched
    /// and returns `None`.
    pub fn apply(self, engine: &mut TimerEngine) -> Option<TimerState> {
        match self {
            Command::Start => Some(engine.start()),
            Command::Pause => Some(engine.pause()),
            Command::Reset => Some(engine.reset()),
            Command::Stop => Some(engine.stop()),
            Command::Adjust(delta) => Some(engine.adjust_time(delta)),
            Command::Reconfigure { work, rest } => Some(engine.reconfigure(work, rest)),
            Command::Quit => None,
        }
    }
}

/// Help text listing the console commands
pub const HELP: &str = "commands: s=start p=pause r=reset x=stop +N/-N=adjust seconds \
set <work> <rest>=reconfigure q=quit";
