//! Deterministic game engine
//!
//! All rules live here. Nothing in this module prints or touches files:
//! - Fixed neighbour visit order (up, right, down, left)
//! - Every mutation recorded in the move history so it can be undone
//! - One `GameState` value holds the whole game

pub mod board;
pub mod cascade;
pub mod history;
pub mod state;

pub use board::{Board, Cell, Pos};
pub use cascade::Outcome;
pub use history::{MoveHistory, MoveLog, MoveNode, MoveTree, PackedMove};
pub use state::{GameState, Player, PlayerId, PlayerStat, PlayerStatus, Snapshot};
