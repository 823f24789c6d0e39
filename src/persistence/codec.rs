//! Binary save layout
//!
//! ```text
//! byte 0      width
//! byte 1      height
//! byte 2      player count
//! then        one little-endian u32 per user placement:
//!             x in byte 0, y in byte 1, bytes 2-3 zero
//! ```
//!
//! Cascades are never stored; loading replays the placements.

use crate::error::{Error, Result};
use crate::sim::{GameState, PackedMove};

pub const HEADER_SIZE: usize = 3;
pub const RECORD_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveHeader {
    pub width: u8,
    pub height: u8,
    pub players: u8,
}

impl SaveHeader {
    pub fn of(state: &GameState) -> Self {
        Self {
            width: state.board().width(),
            height: state.board().height(),
            players: state.player_count(),
        }
    }

    /// Empty game of this shape, or `CorruptSave` if the engine cannot host it
    pub fn new_game(self) -> Result<GameState> {
        let Self {
            width,
            height,
            players,
        } = self;
        GameState::new(players, width, height).map_err(|err| {
            Error::CorruptSave(format!(
                "{players} player(s) on a {width}x{height} board: {err}"
            ))
        })
    }

    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        [self.width, self.height, self.players]
    }
}

/// How many records to replay when loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayFrom {
    /// At most this many placements
    Turn(u32),
    /// Every complete record in the file
    End,
}

/// A decoded save: header plus every complete record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub moves: Vec<PackedMove>,
}

impl SaveFile {
    /// The prefix of the log selected by `from`
    pub fn moves_for(&self, from: PlayFrom) -> &[PackedMove] {
        match from {
            PlayFrom::End => &self.moves,
            PlayFrom::Turn(n) => &self.moves[..self.moves.len().min(n as usize)],
        }
    }
}

pub fn encode(header: SaveHeader, moves: &[PackedMove]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + moves.len() * RECORD_SIZE);
    bytes.extend_from_slice(&header.to_bytes());
    for m in moves {
        bytes.extend_from_slice(&m.raw().to_le_bytes());
    }
    bytes
}

/// Decode a save image. A short trailing record is treated as end of log.
pub fn decode(bytes: &[u8]) -> Result<SaveFile> {
    let Some((header, body)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
        return Err(Error::CorruptSave(format!(
            "header is {} byte(s), expected {HEADER_SIZE}",
            bytes.len()
        )));
    };
    let header = SaveHeader {
        width: header[0],
        height: header[1],
        players: header[2],
    };

    let records = body.chunks_exact(RECORD_SIZE);
    if !records.remainder().is_empty() {
        log::warn!(
            "Ignoring {} trailing byte(s) after the last complete record",
            records.remainder().len()
        );
    }
    let moves = records
        .map(|r| PackedMove::from_raw(u32::from_le_bytes([r[0], r[1], r[2], r[3]])))
        .collect();

    Ok(SaveFile { header, moves })
}
