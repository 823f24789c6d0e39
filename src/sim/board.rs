//! Board model
//!
//! A fixed width x height grid of cells. Capacity is derived from the
//! position and the board size, never stored.

use super::state::PlayerId;

/// A board coordinate (column `x`, row `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// A single grid square
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub owner: Option<PlayerId>,
    pub atoms: u32,
}

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `(x, y)` lies on the board
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn set_owner(&mut self, pos: Pos, owner: Option<PlayerId>) {
        let i = self.index(pos);
        self.cells[i].owner = owner;
    }

    /// Add one atom and return the new count
    pub fn increment_atoms(&mut self, pos: Pos) -> u32 {
        let i = self.index(pos);
        self.cells[i].atoms += 1;
        self.cells[i].atoms
    }

    pub fn set_atoms(&mut self, pos: Pos, atoms: u32) {
        let i = self.index(pos);
        self.cells[i].atoms = atoms;
    }

    /// Clear a cell back to unowned and empty
    pub fn reset(&mut self, pos: Pos) {
        let i = self.index(pos);
        self.cells[i] = Cell::default();
    }

    /// Critical mass: 2 in a corner, 3 on an edge, 4 in the interior
    pub fn capacity(&self, pos: Pos) -> u32 {
        let inner_x = pos.x > 0 && pos.x + 1 < self.width;
        let inner_y = pos.y > 0 && pos.y + 1 < self.height;
        2 + inner_x as u32 + inner_y as u32
    }

    /// Orthogonal neighbours in visit order: up, right, down, left.
    /// Slots beyond the grid are `None`.
    pub fn neighbours(&self, pos: Pos) -> [Option<Pos>; 4] {
        let Pos { x, y } = pos;
        [
            (y > 0).then(|| Pos::new(x, y - 1)),
            (x + 1 < self.width).then(|| Pos::new(x + 1, y)),
            (y + 1 < self.height).then(|| Pos::new(x, y + 1)),
            (x > 0).then(|| Pos::new(x - 1, y)),
        ]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major iterator over `(pos, cell)`
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pos::new((i % width) as u8, (i / width) as u8), cell))
    }

    pub fn total_atoms(&self) -> u64 {
        self.cells.iter().map(|c| c.atoms as u64).sum()
    }

    /// Number of cells currently held by `player`
    pub fn count_owned(&self, player: PlayerId) -> u32 {
        self.cells.iter().filter(|c| c.owner == Some(player)).count() as u32
    }
}
