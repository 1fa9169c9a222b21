use std::fmt;

use super::action::Action;

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move position by delta, `None` if it would leave the non-negative quadrant
    pub fn moved_by(&self, dr: isize, dc: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Move position in the direction of an action
    pub fn moved_by_action(&self, action: Action) -> Option<Self> {
        let (dr, dc) = action.delta();
        self.moved_by(dr, dc)
    }
}

/// Occupant of a board cell, stored as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Snake = 1,
    Food = 2,
}

impl Tile {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Create an all-empty board
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Tile::Empty; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Tile at `pos`, `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    pub(crate) fn set(&mut self, pos: Position, tile: Tile) {
        let idx = self.index(pos);
        self.cells[idx] = tile;
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Tile::Empty);
    }

    /// Iterate the board one row at a time
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.width)
    }

    /// Tile codes in row-major order
    pub fn as_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|tile| tile.code()).collect()
    }

    /// Count the cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Positions of all cells holding `tile`, row-major
    pub fn positions_of(&self, tile: Tile) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == tile)
            .map(move |(idx, _)| Position::new(idx / self.width, idx % self.width))
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }
}

/// Whitespace-separated tile codes, one row per line
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for tile in row {
                write!(f, "{} ", tile.code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
