//! Cascade engine
//!
//! Placing an atom may push a cell to its capacity, which empties it and
//! forces one atom of the same player onto each neighbour, which may
//! explode in turn. Every placement becomes a [`MoveNode`] in the move's
//! [`MoveTree`] so the whole chain can be undone.
//!
//! The chain is resolved depth-first with an explicit work stack, visiting
//! neighbours up, right, down, left. Pending placements live on the heap,
//! so a chain spanning a 255x255 board needs no deep call stack.

use super::board::Pos;
use super::history::{MoveNode, MoveTree, PackedMove};
use super::state::{GameState, PlayerId};
use crate::error::{ArgumentError, Error, Result, StateError};

/// Result of a successful user placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The game goes on with `next` to move
    Continue { next: PlayerId },
    /// The placer now owns every occupied cell
    Won { winner: PlayerId },
}

impl GameState {
    /// Place one atom for the current player at `(x, y)` and resolve the
    /// resulting chain reaction.
    ///
    /// A rejected placement leaves the state untouched.
    pub fn place(&mut self, x: i64, y: i64) -> Result<Outcome> {
        if self.game_over {
            return Err(StateError::GameOver.into());
        }
        if !self.board.contains(x, y) {
            return Err(ArgumentError::Coordinates.into());
        }
        let pos = Pos::new(x as u8, y as u8);
        let placer = self.whose_turn;
        if self.board.get(pos).owner.is_some_and(|owner| owner != placer) {
            return Err(Error::IllegalMove { x: pos.x, y: pos.y });
        }

        let tree = self.resolve(pos);
        log::debug!(
            "{} placed at ({}, {}): {} placement(s)",
            self.player(placer).colour,
            pos.x,
            pos.y,
            tree.placements()
        );
        self.history.record(tree);

        if self.game_over {
            log::info!("{} wins on turn {}", self.player(placer).colour, self.turn_count);
            return Ok(Outcome::Won { winner: placer });
        }

        self.move_log.push(PackedMove::new(pos));
        self.advance_turn();
        Ok(Outcome::Continue {
            next: self.whose_turn,
        })
    }

    /// Resolve a user placement and everything it sets off
    fn resolve(&mut self, pos: Pos) -> MoveTree {
        let mut tree = MoveTree::new(pos, self.board.get(pos).owner);
        // (cell, arena index of the placement that forced it)
        let mut pending = Vec::new();
        if self.place_atom(pos) {
            tree.mark_exploded(0);
            self.queue_neighbours(&mut pending, pos, 0);
        }

        while let Some((pos, parent)) = pending.pop() {
            // Once the game is decided nothing else on the board changes
            if self.game_over {
                break;
            }
            let index = tree.push(pos, self.board.get(pos).owner, parent);
            if self.place_atom(pos) {
                tree.mark_exploded(index);
                self.queue_neighbours(&mut pending, pos, index);
            }
        }
        tree
    }

    /// Stack the neighbours of an exploded cell so that `up` is popped first
    fn queue_neighbours(&self, pending: &mut Vec<(Pos, usize)>, pos: Pos, parent: usize) {
        let neighbours = self.board.neighbours(pos);
        pending.extend(neighbours.into_iter().rev().flatten().map(|n| (n, parent)));
    }

    /// One atom for the current player, user-initiated or forced.
    ///
    /// Returns whether the cell reached capacity and exploded.
    fn place_atom(&mut self, pos: Pos) -> bool {
        let placer = self.whose_turn;
        if let Some(previous) = self.board.get(pos).owner {
            self.players[previous.index()].owned -= 1;
        }
        self.board.set_owner(pos, Some(placer));

        // Checked before the atom lands
        if self.check_winner() {
            self.players[placer.index()].owned += 1;
            self.game_over = true;
            return false;
        }

        let atoms = self.board.increment_atoms(pos);
        if atoms < self.board.capacity(pos) {
            self.players[placer.index()].owned += 1;
            return false;
        }
        self.board.reset(pos);
        true
    }

    /// Revert the most recent user placement, including its whole cascade
    pub fn undo(&mut self) -> Result<()> {
        if self.game_over {
            return Err(StateError::GameOver.into());
        }
        if self.turn_count == 0 {
            return Err(StateError::NothingToUndo.into());
        }
        let Some(tree) = self.history.pop() else {
            return Err(StateError::NothingToUndo.into());
        };

        self.retreat_turn();
        self.move_log.pop();
        // Reverse construction order
        for node in tree.iter().rev() {
            self.restore(node);
        }

        let root = tree.root();
        log::debug!(
            "Undid ({}, {}), {} to move",
            root.pos.x,
            root.pos.y,
            self.player(self.whose_turn).colour
        );
        Ok(())
    }

    fn restore(&mut self, node: &MoveNode) {
        let pos = node.pos;
        let cell = *self.board.get(pos);

        if cell.atoms != 0
            && let Some(owner) = cell.owner
        {
            self.players[owner.index()].owned -= 1;
        }
        self.board.set_owner(pos, node.previous_owner);

        match node.previous_owner {
            Some(previous) => {
                // An explosion left the cell at 0; wrap back to capacity - 1
                let capacity = self.board.capacity(pos);
                self.board
                    .set_atoms(pos, (cell.atoms + capacity - 1) % capacity);
                self.players[previous.index()].owned += 1;
            }
            None => self.board.set_atoms(pos, 0),
        }
    }
}
