//! Pieces module - tetromino catalog and the active falling piece
//!
//! Every kind owns an ordered list of rotation states. Each state is a small
//! square occupancy grid (side 2, 3 or 4); the grid's top-left corner is the
//! piece anchor. Rotation simply steps to the next state in the list.

use crate::types::{Cell, PieceKind, UnknownKindError, BOARD_WIDTH, GARBAGE_CELL};

/// Largest shape side in the catalog
pub const MAX_SHAPE_SIZE: usize = 4;

/// One rotation state: a square 0/1 grid of side `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from an `N x N` grid of 0/1 flags
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the grid
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Occupied cells as `(col, row)` offsets from the anchor
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Index of the topmost row holding at least one block
    pub fn first_filled_row(&self) -> usize {
        let n = self.size as usize;
        (0..n)
            .find(|&row| self.cells[row][..n].iter().any(|&c| c))
            .unwrap_or(0)
    }

    /// The grid as rows of 0/1 values
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let n = self.size as usize;
        (0..n)
            .map(|row| (0..n).map(|col| self.cells[row][col] as u8).collect())
            .collect()
    }
}

/// Static catalog entry for one piece kind
#[derive(Debug)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub name: &'static str,
    /// Display color as `#RRGGBB`
    pub color: &'static str,
    pub shapes: &'static [Shape],
}

static I_SHAPES: [Shape; 2] = [
    Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::from_rows([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

static J_SHAPES: [Shape; 4] = [
    Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    Shape::from_rows([[0, 1, 1], [0, 1, 0], [0, 1, 0]]),
    Shape::from_rows([[0, 0, 0], [1, 1, 1], [0, 0, 1]]),
    Shape::from_rows([[0, 1, 0], [0, 1, 0], [1, 1, 0]]),
];

static L_SHAPES: [Shape; 4] = [
    Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    Shape::from_rows([[0, 1, 0], [0, 1, 0], [0, 1, 1]]),
    Shape::from_rows([[0, 0, 0], [1, 1, 1], [1, 0, 0]]),
    Shape::from_rows([[1, 1, 0], [0, 1, 0], [0, 1, 0]]),
];

static O_SHAPES: [Shape; 1] = [Shape::from_rows([[1, 1], [1, 1]])];

static S_SHAPES: [Shape; 2] = [
    Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 0, 1]]),
];

static T_SHAPES: [Shape; 4] = [
    Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]),
    Shape::from_rows([[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
    Shape::from_rows([[0, 1, 0], [1, 1, 0], [0, 1, 0]]),
];

static Z_SHAPES: [Shape; 2] = [
    Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    Shape::from_rows([[0, 0, 1], [0, 1, 1], [0, 1, 0]]),
];

/// The catalog, in identifier order (index = id - 1)
pub static CATALOG: [PieceDef; 7] = [
    PieceDef { kind: PieceKind::I, name: "I", color: "#00A1E4", shapes: &I_SHAPES },
    PieceDef { kind: PieceKind::J, name: "J", color: "#0050EF", shapes: &J_SHAPES },
    PieceDef { kind: PieceKind::L, name: "L", color: "#F7921C", shapes: &L_SHAPES },
    PieceDef { kind: PieceKind::O, name: "O", color: "#FFD900", shapes: &O_SHAPES },
    PieceDef { kind: PieceKind::S, name: "S", color: "#00A859", shapes: &S_SHAPES },
    PieceDef { kind: PieceKind::T, name: "T", color: "#A700AE", shapes: &T_SHAPES },
    PieceDef { kind: PieceKind::Z, name: "Z", color: "#E4002B", shapes: &Z_SHAPES },
];

/// Display color of garbage blocks
pub const GARBAGE_COLOR: &str = "#6C757D";

/// Catalog entry for a kind
pub fn definition(kind: PieceKind) -> &'static PieceDef {
    &CATALOG[kind.id() as usize - 1]
}

/// Rotation states for a kind
pub fn shapes(kind: PieceKind) -> &'static [Shape] {
    definition(kind).shapes
}

/// Rotation states for a raw identifier
pub fn shapes_of(id: u8) -> Result<&'static [Shape], UnknownKindError> {
    PieceKind::from_id(id).map(shapes)
}

/// Display color for a board cell value, `None` for empty or unknown cells
pub fn cell_color(cell: Cell) -> Option<&'static str> {
    if cell == GARBAGE_CELL {
        return Some(GARBAGE_COLOR);
    }
    PieceKind::from_id(cell).ok().map(|kind| definition(kind).color)
}

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current rotation state, copied out of the catalog
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
    pub rotation: usize,
}

impl ActivePiece {
    /// Create a piece at its spawn position.
    ///
    /// The piece is horizontally centered and shifted up so its first
    /// non-empty row sits on board row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shapes(kind)[0];
        let size = shape.size() as i8;
        Self {
            kind,
            shape,
            x: BOARD_WIDTH as i8 / 2 - size / 2,
            y: -(shape.first_filled_row() as i8),
            rotation: 0,
        }
    }

    /// Rotation index and shape one step further in the cycle
    pub fn next_rotation(&self) -> (usize, Shape) {
        let states = shapes(self.kind);
        let next = (self.rotation + 1) % states.len();
        (next, states[next])
    }

    /// Same piece, translated
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board coordinates `(x, y)` of each block
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(col, row)| (self.x + col, self.y + row))
    }
}
