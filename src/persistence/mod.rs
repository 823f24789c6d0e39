//! Save/load of games
//!
//! Features:
//! - Byte-exact binary format shared with earlier saves (see [`codec`])
//! - Refuses to overwrite an existing file
//! - Loading replays the stored placements through the engine
//! - Replay can stop after any number of turns

pub mod codec;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub use codec::{PlayFrom, SaveFile, SaveHeader, decode, encode};

use crate::error::{Error, PersistenceError, Result};
use crate::sim::{GameState, Outcome};

/// Write the header and one record per completed turn to a new file
pub fn save(state: &GameState, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if fs::File::open(path).is_ok() {
        return Err(PersistenceError::AlreadyExists(path.to_path_buf()).into());
    }

    let bytes = encode(SaveHeader::of(state), state.move_log().records());
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            io::ErrorKind::AlreadyExists => PersistenceError::AlreadyExists(path.to_path_buf()),
            _ => PersistenceError::Io(err),
        })?;
    file.write_all(&bytes).map_err(PersistenceError::from)?;

    log::info!(
        "Saved {} turn(s) to {}",
        state.move_log().len(),
        path.display()
    );
    Ok(())
}

/// Read and decode a save without replaying it.
///
/// A header describing a game the engine cannot host is rejected here.
pub fn open(path: impl AsRef<Path>) -> Result<SaveFile> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PersistenceError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let file = decode(&bytes)?;
    file.header.new_game()?;
    Ok(file)
}

/// Rebuild a game by replaying the selected prefix of a save.
///
/// Replay stops early if a placement wins the game.
pub fn replay(file: &SaveFile, from: PlayFrom) -> Result<GameState> {
    let mut state = file.header.new_game()?;

    let moves = file.moves_for(from);
    for (i, m) in moves.iter().enumerate() {
        let outcome = state
            .place(m.x() as i64, m.y() as i64)
            .map_err(|err| {
                Error::CorruptSave(format!("record {i} at ({}, {}): {err}", m.x(), m.y()))
            })?;
        if let Outcome::Won { .. } = outcome {
            log::info!("Replay decided after {} of {} record(s)", i + 1, moves.len());
            break;
        }
    }

    log::info!("Replayed {} turn(s)", state.turn_count());
    Ok(state)
}

/// Open a save and replay it in one step
pub fn load(path: impl AsRef<Path>, from: PlayFrom) -> Result<GameState> {
    let file = open(path)?;
    replay(&file, from)
}
