//! Text rendering of the board and reports
//!
//! Pure string builders; the binary decides where they go.

use std::fmt::Write;

use crate::sim::{GameState, PlayerStat, PlayerStatus, Pos};

pub const HELP: &str = "
HELP displays this help message
QUIT quits the current game

DISPLAY draws the game board in terminal
START <number of players> <width> <height> starts the game
PLACE <x> <y> places an atom in a grid space
UNDO undoes the last move made
STAT displays game statistics

SAVE <filename> saves the state of the game
LOAD <filename> loads a save file
PLAYFROM <turn> plays from n steps into the game
";

/// `+-----+` spanning a board of `width` cells
fn border(width: u8) -> String {
    let inner = 3 * width as usize - 1;
    format!("+{}+", "-".repeat(inner))
}

/// Bordered grid, one three-character column per cell.
///
/// Owned cells show the owner's initial and atom count, empty cells are blank:
///
/// ```text
/// +--------+
/// |R1|  |  |
/// |  |G2|  |
/// +--------+
/// ```
pub fn board(state: &GameState) -> String {
    let board = state.board();
    let edge = border(board.width());

    let mut out = String::new();
    out.push_str(&edge);
    out.push('\n');
    for y in 0..board.height() {
        for x in 0..board.width() {
            out.push('|');
            let cell = board.get(Pos::new(x, y));
            match cell.owner {
                Some(owner) => {
                    let initial = state.player(owner).colour.chars().next().unwrap_or('?');
                    let _ = write!(out, "{initial}{}", cell.atoms);
                }
                None => out.push_str("  "),
            }
        }
        out.push_str("|\n");
    }
    out.push_str(&edge);
    out.push('\n');
    out
}

pub fn turn_banner(state: &GameState) -> String {
    format!("{}'s Turn", state.player(state.current_player()).colour)
}

pub fn winner(state: &GameState) -> Option<String> {
    state
        .winner()
        .map(|id| format!("{} Wins!", state.player(id).colour))
}

/// STAT report, one block per player separated by blank lines
pub fn stats(stats: &[PlayerStat]) -> String {
    let mut out = String::new();
    for stat in stats {
        let _ = writeln!(out, "Player {}:", stat.colour);
        match stat.status {
            PlayerStatus::Owned(n) => {
                let _ = writeln!(out, "Grid Count: {n}");
            }
            PlayerStatus::Eliminated => out.push_str("Lost\n"),
        }
        out.push('\n');
    }
    out
}
