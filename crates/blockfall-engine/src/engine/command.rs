use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A discrete player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Command {
    /// Shift the falling piece one column left.
    MoveLeft,
    /// Shift the falling piece one column right.
    MoveRight,
    /// Move the falling piece one row down. Awards no points.
    SoftDrop,
    /// Rotate the falling piece 90° clockwise in place.
    Rotate,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
    ];

    /// Returns the single-letter code used in command scripts.
    ///
    /// `L` left, `R` right, `D` soft drop, `U` rotate (the "up" key).
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Command::MoveLeft => 'L',
            Command::MoveRight => 'R',
            Command::SoftDrop => 'D',
            Command::Rotate => 'U',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' | 'l' => Some(Command::MoveLeft),
            'R' | 'r' => Some(Command::MoveRight),
            'D' | 'd' => Some(Command::SoftDrop),
            'U' | 'u' => Some(Command::Rotate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid command: {input:?} (expected left, right, down, rotate or one of L, R, D, U)")]
pub struct ParseCommandError {
    pub input: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c).ok_or_else(|| ParseCommandError {
                input: s.to_owned(),
            });
        }
        match s.to_ascii_lowercase().as_str() {
            "left" | "move-left" => Ok(Command::MoveLeft),
            "right" | "move-right" => Ok(Command::MoveRight),
            "down" | "soft-drop" => Ok(Command::SoftDrop),
            "rotate" | "up" => Ok(Command::Rotate),
            _ => Err(ParseCommandError {
                input: s.to_owned(),
            }),
        }
    }
}

/// What [`Engine::apply_command`](super::Engine::apply_command) did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommandOutcome {
    /// The falling piece moved or rotated.
    Applied,
    /// The move was blocked by a wall, the floor or a locked cell.
    Rejected,
    /// The game is over; nothing can change any more.
    Ignored,
}
