//! Error taxonomy for the engine and its command surface
//!
//! Display strings double as the user-facing messages printed by the REPL.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidArguments(#[from] ArgumentError),
    #[error(transparent)]
    InvalidState(#[from] StateError),
    #[error("Cannot Place Atom Here")]
    IllegalMove { x: u8, y: u8 },
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Corrupt Save: {0}")]
    CorruptSave(String),
}

/// Malformed or out-of-range command parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Missing Argument")]
    Missing,
    #[error("Too Many Arguments")]
    TooMany,
    /// Player count or board size outside the configured bounds
    #[error("Invalid Command Arguments")]
    OutOfRange,
    /// More players than cells
    #[error("Cannot Start Game")]
    BoardTooSmall,
    #[error("Invalid Coordinates")]
    Coordinates,
    #[error("Invalid Turn Number")]
    TurnNumber,
    #[error("Invalid Command")]
    Command,
}

/// An operation was requested when none is legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Game Not In Progress")]
    NotStarted,
    #[error("Game Already In Progress")]
    AlreadyStarted,
    #[error("Cannot Undo")]
    NothingToUndo,
    #[error("Restart Application To Load Save")]
    GameActive,
    #[error("Game Is Over")]
    GameOver,
    #[error("No Save Loaded")]
    NoPendingLoad,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("File Already Exists")]
    AlreadyExists(PathBuf),
    #[error("Cannot Load Save")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Shorthand for the common "game not in progress" rejection
    pub fn not_started() -> Self {
        Error::InvalidState(StateError::NotStarted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_terminal_output() {
        assert_eq!(
            Error::from(ArgumentError::Coordinates).to_string(),
            "Invalid Coordinates"
        );
        assert_eq!(Error::IllegalMove { x: 1, y: 2 }.to_string(), "Cannot Place Atom Here");
        assert_eq!(Error::from(StateError::NothingToUndo).to_string(), "Cannot Undo");
        assert_eq!(
            Error::from(PersistenceError::AlreadyExists(PathBuf::from("a.sav"))).to_string(),
            "File Already Exists"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: PersistenceError = io::Error::other("disk gone").into();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}
