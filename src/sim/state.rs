//! Game state and turn bookkeeping
//!
//! `GameState` is the single mutable aggregate of a running game: board,
//! players, whose turn it is, the move history and the raw move log.

use super::board::{Board, Cell, Pos};
use super::history::{MoveHistory, MoveLog};
use crate::consts::{COLOURS, MAX_PLAYERS, MIN_HEIGHT, MIN_PLAYERS, MIN_WIDTH};
use crate::error::{ArgumentError, Result};

/// Index of a player in turn order (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A participant and their territory tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub colour: &'static str,
    /// Number of cells this player owns
    pub owned: u32,
}

/// Per-player line of the STAT report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Owned(u32),
    Eliminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStat {
    pub colour: &'static str,
    pub status: PlayerStatus,
}

/// Value copy of everything undo must restore, for comparisons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub cells: Vec<Cell>,
    pub owned: Vec<u32>,
    pub turn_count: u32,
    pub whose_turn: PlayerId,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    pub(crate) whose_turn: PlayerId,
    /// Completed user placements
    pub(crate) turn_count: u32,
    pub(crate) history: MoveHistory,
    pub(crate) move_log: MoveLog,
    pub(crate) game_over: bool,
}

impl GameState {
    /// Create an empty board for `players` players.
    ///
    /// Only the engine's hard limits are checked here; configurable bounds
    /// are applied by the session.
    pub fn new(players: u8, width: u8, height: u8) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players)
            || width < MIN_WIDTH
            || height < MIN_HEIGHT
        {
            return Err(ArgumentError::OutOfRange.into());
        }
        if players as usize > width as usize * height as usize {
            return Err(ArgumentError::BoardTooSmall.into());
        }

        let players = (0..players)
            .map(|i| Player {
                id: PlayerId(i),
                colour: COLOURS[i as usize],
                owned: 0,
            })
            .collect();

        log::info!("New {width}x{height} game");

        Ok(Self {
            board: Board::new(width, height),
            players,
            whose_turn: PlayerId(0),
            turn_count: 0,
            history: MoveHistory::new(),
            move_log: MoveLog::with_capacity(width as usize * height as usize),
            game_over: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_count(&self) -> u8 {
        self.players.len() as u8
    }

    pub fn current_player(&self) -> PlayerId {
        self.whose_turn
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The player who took the last opponent cell, once the game is decided
    pub fn winner(&self) -> Option<PlayerId> {
        self.game_over.then_some(self.whose_turn)
    }

    /// Zero-cell players count as defeated only once everyone has moved
    pub fn elimination_active(&self) -> bool {
        self.turn_count >= self.players.len() as u32
    }

    pub fn is_eliminated(&self, id: PlayerId) -> bool {
        self.elimination_active() && self.player(id).owned == 0
    }

    /// True when every player other than the current one holds no cells
    pub fn check_winner(&self) -> bool {
        self.elimination_active()
            && self
                .players
                .iter()
                .all(|p| p.id == self.whose_turn || p.owned == 0)
    }

    /// Hand the turn to the next player still in the game
    pub(crate) fn advance_turn(&mut self) {
        self.turn_count += 1;
        let n = self.player_count();
        for _ in 0..n {
            self.whose_turn = PlayerId((self.whose_turn.0 + 1) % n);
            if !self.is_eliminated(self.whose_turn) {
                break;
            }
        }
    }

    /// Inverse of `advance_turn`, used by undo
    pub(crate) fn retreat_turn(&mut self) {
        self.turn_count -= 1;
        let n = self.player_count();
        for _ in 0..n {
            self.whose_turn = PlayerId((self.whose_turn.0 + n - 1) % n);
            if self.player(self.whose_turn).owned != 0 {
                break;
            }
        }
    }

    pub fn stats(&self) -> Vec<PlayerStat> {
        self.players
            .iter()
            .map(|p| PlayerStat {
                colour: p.colour,
                status: if self.is_eliminated(p.id) {
                    PlayerStatus::Eliminated
                } else {
                    PlayerStatus::Owned(p.owned)
                },
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.board.cells().to_vec(),
            owned: self.players.iter().map(|p| p.owned).collect(),
            turn_count: self.turn_count,
            whose_turn: self.whose_turn,
        }
    }

    /// Cells the current player may place on: empty or already theirs
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.game_over {
            return Vec::new();
        }
        self.board
            .iter()
            .filter(|(_, cell)| cell.owner.is_none_or(|o| o == self.whose_turn))
            .map(|(pos, _)| pos)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_game() {
        let state = GameState::new(3, 4, 5).unwrap();
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.board().width(), 4);
        assert_eq!(state.board().height(), 5);
        assert_eq!(state.current_player(), PlayerId(0));
        assert_eq!(state.player(PlayerId(2)).colour, "Purple");
        assert_eq!(state.legal_moves().len(), 20);
        assert!(!state.is_over());
    }

    #[test]
    fn test_new_game_rejects_bad_sizes() {
        assert!(matches!(
            GameState::new(1, 3, 3),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(matches!(
            GameState::new(7, 3, 3),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(matches!(
            GameState::new(2, 1, 3),
            Err(Error::InvalidArguments(ArgumentError::OutOfRange))
        ));
        assert!(matches!(
            GameState::new(5, 2, 2),
            Err(Error::InvalidArguments(ArgumentError::BoardTooSmall))
        ));
    }

    #[test]
    fn test_turn_rotation_before_threshold() {
        let mut state = GameState::new(3, 3, 3).unwrap();
        // Nobody owns anything yet, but elimination is not active
        state.advance_turn();
        assert_eq!(state.current_player(), PlayerId(1));
        state.advance_turn();
        assert_eq!(state.current_player(), PlayerId(2));
        state.retreat_turn();
        assert_eq!(state.current_player(), PlayerId(1));
        assert_eq!(state.turn_count(), 1);
    }

    #[test]
    fn test_advance_skips_eliminated() {
        let mut state = GameState::new(3, 3, 3).unwrap();
        state.players[0].owned = 2;
        state.players[1].owned = 0;
        state.players[2].owned = 1;
        state.turn_count = 3;
        state.whose_turn = PlayerId(0);

        state.advance_turn();
        assert_eq!(state.current_player(), PlayerId(2));
        assert!(state.is_eliminated(PlayerId(1)));

        state.retreat_turn();
        assert_eq!(state.current_player(), PlayerId(0));
    }

    #[test]
    fn test_check_winner_needs_threshold() {
        let mut state = GameState::new(2, 3, 3).unwrap();
        state.players[0].owned = 1;
        state.turn_count = 1;
        assert!(!state.check_winner());
        state.turn_count = 2;
        assert!(state.check_winner());
        state.players[1].owned = 1;
        assert!(!state.check_winner());
    }

    #[test]
    fn test_stats_report_elimination() {
        let mut state = GameState::new(2, 3, 3).unwrap();
        assert_eq!(state.stats()[1].status, PlayerStatus::Owned(0));
        state.players[0].owned = 3;
        state.turn_count = 4;
        let stats = state.stats();
        assert_eq!(stats[0].status, PlayerStatus::Owned(3));
        assert_eq!(stats[1].status, PlayerStatus::Eliminated);
        assert_eq!(stats[1].colour, "Green");
    }
}
