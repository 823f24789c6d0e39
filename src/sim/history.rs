//! Move history
//!
//! Every atom placement, user-initiated or forced by an explosion, is a
//! [`MoveNode`]. One user move and its whole chain reaction form a
//! [`MoveTree`]: an arena of nodes in construction order, each naming the
//! node whose explosion caused it. Walking the arena backwards undoes the
//! cascade, and no operation on it recurses, so board-sized chains cost
//! heap rather than stack.
//!
//! The raw move log ([`MoveLog`]) is kept separately: it holds only the
//! user-initiated coordinates and is what gets persisted.

use super::board::Pos;
use super::state::PlayerId;

/// One atom placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveNode {
    pub pos: Pos,
    /// Owner of the cell before this placement
    pub previous_owner: Option<PlayerId>,
    /// Arena index of the placement whose explosion forced this one
    pub parent: Option<usize>,
    /// Whether this placement made the cell explode
    pub exploded: bool,
}

/// A user placement and the cascade it triggered, root first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
}

impl MoveTree {
    pub fn new(pos: Pos, previous_owner: Option<PlayerId>) -> Self {
        Self {
            nodes: vec![MoveNode {
                pos,
                previous_owner,
                parent: None,
                exploded: false,
            }],
        }
    }

    /// Append a forced placement, returning its arena index
    pub fn push(&mut self, pos: Pos, previous_owner: Option<PlayerId>, parent: usize) -> usize {
        self.nodes.push(MoveNode {
            pos,
            previous_owner,
            parent: Some(parent),
            exploded: false,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn mark_exploded(&mut self, index: usize) {
        self.nodes[index].exploded = true;
    }

    pub fn root(&self) -> &MoveNode {
        &self.nodes[0]
    }

    /// Number of placements, the user's own included
    pub fn placements(&self) -> usize {
        self.nodes.len()
    }

    /// Placements in construction order
    pub fn iter(&self) -> std::slice::Iter<'_, MoveNode> {
        self.nodes.iter()
    }

    /// Placements forced directly by the node at `index`, in neighbour order
    pub fn children(&self, index: usize) -> impl Iterator<Item = &MoveNode> + '_ {
        self.nodes.iter().filter(move |n| n.parent == Some(index))
    }
}

/// Stack of user-initiated placements, most recent last
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    roots: Vec<MoveTree>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tree: MoveTree) {
        self.roots.push(tree);
    }

    /// Most recent user-initiated placement
    pub fn last(&self) -> Option<&MoveTree> {
        self.roots.last()
    }

    /// Detach the most recent placement, handing its cascade to the caller
    pub fn pop(&mut self) -> Option<MoveTree> {
        self.roots.pop()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// A user placement packed the way it is stored on disk:
/// `x` in byte 0, `y` in byte 1, upper bytes zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedMove(u32);

impl PackedMove {
    pub const fn new(pos: Pos) -> Self {
        Self(pos.x as u32 | (pos.y as u32) << 8)
    }

    /// From an on-disk record; the two upper bytes are padding and dropped
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & 0xffff)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn x(self) -> u8 {
        self.0 as u8
    }

    pub const fn y(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn pos(self) -> Pos {
        Pos::new(self.x(), self.y())
    }
}

/// Raw log of user placements, one record per completed turn
#[derive(Debug, Clone, Default)]
pub struct MoveLog {
    records: Vec<PackedMove>,
}

impl MoveLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record, doubling the backing storage when full
    pub fn push(&mut self, record: PackedMove) {
        if self.records.len() == self.records.capacity() {
            self.records.reserve_exact(self.records.capacity().max(1));
        }
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<PackedMove> {
        self.records.pop()
    }

    pub fn records(&self) -> &[PackedMove] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
