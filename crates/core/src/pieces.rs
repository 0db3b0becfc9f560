//! Pieces module - tetromino shape matrices and the rotation transform
//!
//! Every shape is a rectangular boolean matrix of at most 4x4 cells. A falling
//! [`Piece`] is a shape plus the board coordinate of the matrix's top-left corner.
//! Rotation is a pure geometric transform on the matrix; whether the rotated
//! piece fits is decided by [`crate::placement`].

use serde::Serialize;

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest row/column count a shape matrix can have
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offsets tried in order by [`RotationMode::Kicks`] when the in-place rotation collides
pub const WALL_KICKS: [(i8, i8); 5] = [(-1, 0), (1, 0), (-2, 0), (2, 0), (0, -1)];

/// Rectangular boolean matrix describing which cells a piece covers
///
/// Storage outside `rows x cols` is always `false`, so derived equality is
/// matrix equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

const fn pattern<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut r = 0;
    while r < R {
        let mut c = 0;
        while c < C {
            cells[r][c] = rows[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape {
        rows: R as u8,
        cols: C as u8,
        cells,
    }
}

const I_SHAPE: Shape = pattern([[1, 1, 1, 1]]);
const O_SHAPE: Shape = pattern([[1, 1], [1, 1]]);
const T_SHAPE: Shape = pattern([[0, 1, 0], [1, 1, 1]]);
const S_SHAPE: Shape = pattern([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = pattern([[1, 1, 0], [0, 1, 1]]);
const J_SHAPE: Shape = pattern([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = pattern([[0, 0, 1], [1, 1, 1]]);

/// Spawn orientation of a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

impl Shape {
    /// Build a shape from text rows, `#` for filled and `.` for empty
    ///
    /// Returns `None` for empty, ragged or oversized input, or unknown characters.
    ///
    /// ```
    /// use blockfall_core::pieces::{get_shape, Shape};
    /// use blockfall_core::types::PieceKind;
    ///
    /// let t = Shape::from_rows(&[".#.", "###"]).unwrap();
    /// assert_eq!(t, get_shape(PieceKind::T));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIZE || width > MAX_SHAPE_SIZE {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            for (c, ch) in row.chars().enumerate() {
                cells[r][c] = match ch {
                    '#' => true,
                    '.' => false,
                    _ => return None,
                };
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the matrix cell at (`row`, `col`) is filled; false outside the matrix
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Filled cells as `(dx, dy)` offsets from the top-left corner, row-major
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.filled().count()
    }

    /// Rotate 90° clockwise
    ///
    /// Row `i` of the result is column `i` of `self` read bottom-to-top.
    pub fn rotate_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Text rows in the format accepted by [`Shape::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| if self.get(r, c) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

/// Rotate a shape 90° clockwise (no bounds checking)
pub fn rotate_cw(shape: &Shape) -> Shape {
    shape.rotate_cw()
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Board column of the shape's left edge
    pub x: i8,
    /// Board row of the shape's top edge (negative above the board)
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation, centered horizontally on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        let (x, y) = spawn_position(&shape);
        Self { kind, shape, x, y }
    }

    /// Create a piece in spawn orientation at an explicit anchor
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            x,
            y,
        }
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same anchor, shape rotated 90° clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            ..*self
        }
    }
}

/// Anchor for a freshly spawned shape: `x = W/2 - cols/2`, `y = 0`
pub fn spawn_position(shape: &Shape) -> (i8, i8) {
    let x = (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8;
    (x, 0)
}

/// How rotations that collide in place are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationMode {
    /// Rotate in place or not at all
    #[default]
    Strict,
    /// Also try the [`WALL_KICKS`] offsets, in order
    Kicks,
}

/// Try to rotate a piece clockwise
///
/// `fits` is the placement check for a candidate piece. Returns the committed
/// piece (possibly kicked), or `None` when every candidate collides.
pub fn try_rotate(piece: &Piece, mode: RotationMode, fits: impl Fn(&Piece) -> bool) -> Option<Piece> {
    let rotated = piece.rotated();
    if fits(&rotated) {
        return Some(rotated);
    }

    match mode {
        RotationMode::Strict => None,
        RotationMode::Kicks => WALL_KICKS
            .iter()
            .map(|&(dx, dy)| rotated.shifted(dx, dy))
            .find(|candidate| fits(candidate)),
    }
}
