//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of cell values (0 empty, 1-7 piece ids, 8 garbage).
//! Uses a flat array for cache locality; every structural operation keeps the
//! grid at exactly 20 rows of 10 cells.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use rand::Rng;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL, GARBAGE_CELL};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; BOARD_SIZE],
        }
    }

    /// Build a board from rows of cell values.
    ///
    /// Returns None unless there are exactly 20 rows of 10 cells.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        if rows.len() != HEIGHT {
            return None;
        }
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != WIDTH {
                return None;
            }
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y), None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and non-empty)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_CELL)
    }

    /// One row of cells, top row is 0
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Write a shape's blocks at anchor (x, y) with the given kind's id.
    ///
    /// Blocks that fall outside the grid (typically rows above the top while a
    /// piece is still entering) are skipped. Returns how many were written.
    pub fn stamp(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        shape
            .minos()
            .filter(|&(dx, dy)| self.set(x + dx, y + dy, kind.id()))
            .count()
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Remaining rows keep their order and settle at the bottom; the same
    /// number of empty rows appear at the top. Two-pointer pass, no allocation.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = EMPTY_CELL;
        }

        cleared
    }

    /// Push `lines` garbage rows in from the bottom.
    ///
    /// Each line drops the top row, shifts everything up, and fills the new
    /// bottom row with garbage except for one hole in a random column. Every
    /// line rolls its own hole. Zero lines leaves the board untouched. Past
    /// `HEIGHT` lines every row is garbage, so only the last `HEIGHT` are rolled.
    pub fn inject_garbage<R: Rng + ?Sized>(&mut self, lines: u32, rng: &mut R) {
        let lines = (lines as usize).min(HEIGHT);
        for _ in 0..lines {
            self.cells.copy_within(WIDTH.., 0);
            let hole = rng.random_range(0..WIDTH);
            let bottom = &mut self.cells[(HEIGHT - 1) * WIDTH..];
            for (x, cell) in bottom.iter_mut().enumerate() {
                *cell = if x == hole { EMPTY_CELL } else { GARBAGE_CELL };
            }
        }
    }

    /// Count of non-empty cells
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to 2D rows (wire/display layout)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
