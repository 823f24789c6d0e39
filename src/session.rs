//! Command surface over a single game
//!
//! The session decides which operations are legal right now (no game,
//! game running, save opened but not yet replayed) and applies the
//! configured START bounds before anything reaches the engine.

use std::path::Path;

use crate::error::{ArgumentError, Error, Result, StateError};
use crate::persistence::{self, PlayFrom, SaveFile, SaveHeader};
use crate::settings::Settings;
use crate::sim::{GameState, Outcome, PlayerId, PlayerStat};

#[derive(Debug, Default)]
pub struct Session {
    settings: Settings,
    game: Option<GameState>,
    /// Save opened by LOAD, waiting for PLAYFROM
    pending: Option<SaveFile>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
            game: None,
            pending: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// The running game, or `InvalidState` if there is none
    pub fn require_game(&self) -> Result<&GameState> {
        self.game.as_ref().ok_or_else(Error::not_started)
    }

    fn require_game_mut(&mut self) -> Result<&mut GameState> {
        self.game.as_mut().ok_or_else(Error::not_started)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start(&mut self, players: i64, width: i64, height: i64) -> Result<&GameState> {
        if self.game.is_some() || self.pending.is_some() {
            return Err(StateError::AlreadyStarted.into());
        }
        if !self.settings.allows(players, width, height) {
            return Err(ArgumentError::OutOfRange.into());
        }
        if players > width * height {
            return Err(ArgumentError::BoardTooSmall.into());
        }
        let state = GameState::new(players as u8, width as u8, height as u8)?;
        Ok(self.game.insert(state))
    }

    pub fn place(&mut self, x: i64, y: i64) -> Result<Outcome> {
        self.require_game_mut()?.place(x, y)
    }

    /// Undo the last placement and return who is to move again
    pub fn undo(&mut self) -> Result<PlayerId> {
        let game = self.require_game_mut()?;
        game.undo()?;
        Ok(game.current_player())
    }

    pub fn stats(&self) -> Result<Vec<PlayerStat>> {
        Ok(self.require_game()?.stats())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        persistence::save(self.require_game()?, path)
    }

    /// First half of LOAD: read the file and wait for a PLAYFROM answer
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<SaveHeader> {
        if self.game.is_some() {
            return Err(StateError::GameActive.into());
        }
        let file = persistence::open(path)?;
        let header = file.header;
        self.pending = Some(file);
        Ok(header)
    }

    /// Second half of LOAD: replay the opened save.
    ///
    /// On failure the opened save stays pending so another answer can be given.
    pub fn play_from(&mut self, from: PlayFrom) -> Result<&GameState> {
        let file = self
            .pending
            .as_ref()
            .ok_or(Error::InvalidState(StateError::NoPendingLoad))?;
        let state = persistence::replay(file, from)?;
        self.pending = None;
        Ok(self.game.insert(state))
    }

    /// Abandon an opened save
    pub fn cancel_load(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::sim::PlayerStatus;
    use std::fs;

    fn temp_save(tag: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("atoms-session-{tag}-{}.sav", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_requires_game() {
        let mut session = Session::default();
        assert!(matches!(
            session.place(0, 0),
            Err(Error::InvalidState(StateError::NotStarted))
        ));
        assert!(matches!(
            session.undo(),
            Err(Error::InvalidState(StateError::NotStarted))
        ));
        assert!(matches!(
            session.stats(),
            Err(Error::InvalidState(StateError::NotStarted))
        ));
        assert!(matches!(
            session.save("never-written.sav"),
            Err(Error::InvalidState(StateError::NotStarted))
        ));
    }

    #[test]
    fn test_start_bounds() {
        let mut session = Session::default();
        assert!(matches!(
            session.start(7, 5, 5),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(matches!(
            session.start(2, 256, 5),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(matches!(
            session.start(6, 2, 2),
            Err(Error::InvalidArguments(ArgumentError::BoardTooSmall))
        ));
        assert!(session.game().is_none());

        session.start(2, 3, 3).unwrap();
        assert!(matches!(
            session.start(2, 3, 3),
            Err(Error::InvalidState(StateError::AlreadyStarted))
        ));
    }

    #[test]
    fn test_configured_bounds() {
        let settings = Settings {
            max_players: 2,
            max_width: 4,
            ..Settings::default()
        };
        let mut session = Session::new(settings);
        assert!(matches!(
            session.start(3, 4, 4),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(matches!(
            session.start(2, 5, 4),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(session.start(2, 4, 9).is_ok());
    }

    #[test]
    fn test_play_and_stats() {
        let mut session = Session::default();
        session.start(2, 3, 3).unwrap();
        session.place(1, 1).unwrap();
        session.place(0, 0).unwrap();
        assert_eq!(session.undo().unwrap(), PlayerId(1));

        let stats = session.stats().unwrap();
        assert_eq!(stats[0].status, PlayerStatus::Owned(1));
        assert_eq!(stats[1].status, PlayerStatus::Owned(0));
    }

    #[test]
    fn test_save_and_load_flow() {
        let path = temp_save("flow");
        let mut session = Session::default();
        session.start(2, 3, 3).unwrap();
        for (x, y) in [(1, 1), (0, 0), (1, 1)] {
            session.place(x, y).unwrap();
        }
        session.save(&path).unwrap();
        let expected = session.game().unwrap().snapshot();

        // A second save to the same path is refused
        assert!(matches!(
            session.save(&path),
            Err(Error::Persistence(PersistenceError::AlreadyExists(_)))
        ));
        // Cannot load over a running game
        assert!(matches!(
            session.open(&path),
            Err(Error::InvalidState(StateError::GameActive))
        ));

        let mut fresh = Session::default();
        assert!(matches!(
            fresh.play_from(PlayFrom::End),
            Err(Error::InvalidState(StateError::NoPendingLoad))
        ));
        let header = fresh.open(&path).unwrap();
        assert_eq!((header.width, header.height, header.players), (3, 3, 2));
        assert!(fresh.is_loading());
        assert!(matches!(
            fresh.start(2, 3, 3),
            Err(Error::InvalidState(StateError::AlreadyStarted))
        ));

        let state = fresh.play_from(PlayFrom::End).unwrap();
        assert_eq!(state.snapshot(), expected);
        assert!(!fresh.is_loading());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_missing_file() {
        let mut session = Session::default();
        assert!(matches!(
            session.open(temp_save("missing")),
            Err(Error::Persistence(PersistenceError::NotFound { .. }))
        ));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_unplayable_save_is_not_opened() {
        let path = temp_save("header");
        // One column wide: not a board the engine can host
        fs::write(&path, [1, 9, 2]).unwrap();

        let mut session = Session::default();
        assert!(matches!(session.open(&path), Err(Error::CorruptSave(_))));
        assert!(!session.is_loading());
        assert!(matches!(
            session.play_from(PlayFrom::End),
            Err(Error::InvalidState(StateError::NoPendingLoad))
        ));
        assert!(session.start(2, 3, 3).is_ok());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_replay_keeps_pending() {
        let path = temp_save("corrupt");
        // Second record places Green on Red's cell
        fs::write(&path, [2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();

        let mut session = Session::default();
        session.open(&path).unwrap();
        assert!(matches!(
            session.play_from(PlayFrom::End),
            Err(Error::CorruptSave(_))
        ));
        assert!(session.is_loading());
        assert_eq!(session.play_from(PlayFrom::Turn(1)).unwrap().turn_count(), 1);

        let _ = fs::remove_file(&path);
    }
}
