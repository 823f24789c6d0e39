//! Atoms - a chain-reaction territory game
//!
//! Core modules:
//! - `sim`: Rules engine (board, cascades, undo, turn order)
//! - `persistence`: Binary save format and replay-based loading
//! - `session`: Command surface gating what may run when
//! - `command`: Parsing of terminal commands
//! - `renderer`: Text rendering of the board and reports
//! - `settings`: Configurable bounds and preferences

pub mod command;
pub mod error;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::Settings;
pub use sim::{GameState, Outcome, PlayerId};

/// Engine limits
pub mod consts {
    /// Player labels, in turn order
    pub const COLOURS: [&str; 6] = ["Red", "Green", "Purple", "Blue", "Yellow", "White"];

    pub const MIN_PLAYERS: u8 = 2;
    pub const MAX_PLAYERS: u8 = COLOURS.len() as u8;

    /// Narrower boards would have cells whose capacity exceeds their neighbour count
    pub const MIN_WIDTH: u8 = 2;
    pub const MIN_HEIGHT: u8 = 2;
    /// Coordinates are stored as single bytes on disk
    pub const MAX_WIDTH: u8 = u8::MAX;
    pub const MAX_HEIGHT: u8 = u8::MAX;
}
