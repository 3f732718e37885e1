use smallvec::SmallVec;

use crate::piece::{PieceType, Pos};

pub const WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
/// Rows above the visible field. Pieces spawn here, and locking into them ends the game.
pub const HIDDEN_ROWS: usize = 4;
pub const HEIGHT: usize = VISIBLE_HEIGHT + HIDDEN_ROWS;

pub type Cell = Option<PieceType>;

/// The settled blocks, stored row-major with row 0 at the top of the hidden area.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT],
}

impl Board {
    pub const fn new() -> Self {
        Self {
            cells: [None; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [None; WIDTH * HEIGHT];
    }

    fn index(row: usize, column: usize) -> usize {
        assert!(
            row < HEIGHT && column < WIDTH,
            "cell ({column}, {row}) is off the board"
        );
        row * WIDTH + column
    }

    fn in_bounds(pos: Pos) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row).ok().filter(|&r| r < HEIGHT)?;
        let column = usize::try_from(pos.column).ok().filter(|&c| c < WIDTH)?;
        Some((row, column))
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[Self::index(row, column)]
    }

    pub fn set(&mut self, row: usize, column: usize, cell: Cell) {
        self.cells[Self::index(row, column)] = cell;
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = Self::index(row, 0);
        &self.cells[start..start + WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Rows that are on screen, topmost first.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows().skip(HIDDEN_ROWS)
    }

    /// Whether `piece` in `phase`, with its origin moved by `delta`, sits entirely on free
    /// cells inside the board.
    pub fn validate(&self, piece: PieceType, phase: u8, origin: Pos, delta: Pos) -> bool {
        piece.phase(phase).cells.iter().all(|&offset| {
            match Self::in_bounds(origin + delta + offset) {
                Some((row, column)) => self.get(row, column).is_none(),
                None => false,
            }
        })
    }

    /// Writes the piece into the grid. The placement must have been validated.
    pub fn commit(&mut self, piece: PieceType, phase: u8, origin: Pos) {
        for offset in piece.phase(phase).cells {
            let pos = origin + offset;
            let (row, column) = Self::in_bounds(pos)
                .unwrap_or_else(|| panic!("locking {piece:?} off the board at {pos:?}"));
            debug_assert!(
                self.get(row, column).is_none(),
                "locking {piece:?} onto an occupied cell at {pos:?}"
            );
            self.set(row, column, Some(piece));
        }
    }

    fn row_complete(&self, row: usize) -> bool {
        self.row(row).iter().all(Option::is_some)
    }

    /// Indices of every full row, bottom first.
    pub fn complete_rows(&self) -> SmallVec<[usize; 4]> {
        (0..HEIGHT).rev().filter(|&row| self.row_complete(row)).collect()
    }

    /// Removes every full row, dropping everything above it, and returns how many went.
    pub fn clear_completed_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = HEIGHT;

        while row > 0 {
            let candidate = row - 1;
            if self.row_complete(candidate) {
                self.cells.copy_within(0..candidate * WIDTH, WIDTH);
                self.cells[..WIDTH].fill(None);
                cleared += 1;
                // The row above now sits at `candidate`; test it again.
            } else {
                row -= 1;
            }
        }

        cleared
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
