use core::ops;

use crate::piece_data::{PieceData, PIECE_DATA};

/// A board coordinate or offset. Rows grow downwards from the top of the hidden area.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Pos {
    pub row: i8,
    pub column: i8,
}

impl Pos {
    pub const ZERO: Pos = Pos { row: 0, column: 0 };

    pub const fn new(column: i8, row: i8) -> Self {
        Self { row, column }
    }
}

impl ops::Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            row: self.row + rhs.row,
            column: self.column + rhs.column,
        }
    }
}

impl ops::AddAssign for Pos {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// One rotation orientation of a piece.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Phase {
    pub width: u8,
    pub height: u8,
    /// Occupied cells relative to the top-left corner of the bounding box.
    pub cells: [Pos; 4],
    /// Added to the piece origin when a rotation enters this phase.
    pub pivot: Pos,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PieceType {
    J,
    L,
    T,
    I,
    Z,
    S,
    O,
}

impl PieceType {
    pub const COUNT: usize = 7;

    pub const ALL: [PieceType; PieceType::COUNT] = [
        PieceType::J,
        PieceType::L,
        PieceType::T,
        PieceType::I,
        PieceType::Z,
        PieceType::S,
        PieceType::O,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceType::J => 0,
            PieceType::L => 1,
            PieceType::T => 2,
            PieceType::I => 3,
            PieceType::Z => 4,
            PieceType::S => 5,
            PieceType::O => 6,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => PieceType::J,
            1 => PieceType::L,
            2 => PieceType::T,
            3 => PieceType::I,
            4 => PieceType::Z,
            5 => PieceType::S,
            6 => PieceType::O,
            _ => panic!("Invalid piece index {idx}"),
        }
    }

    /// Identifier written into the board on lock; selects the fill colour.
    pub fn fill(self) -> u8 {
        self.index() as u8 + 1
    }

    fn data(self) -> &'static PieceData {
        &PIECE_DATA[self.index()]
    }

    pub fn phase(self, phase: u8) -> &'static Phase {
        assert!(phase < 4, "Invalid phase {phase}");
        &self.data().phases[phase as usize]
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub fn apply(self, phase: u8) -> u8 {
        match self {
            Rotation::Clockwise => (phase + 1) % 4,
            Rotation::CounterClockwise => (phase + 3) % 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_four_distinct_cells_inside_its_box() {
        for piece in PieceType::ALL {
            for phase in 0..4 {
                let data = piece.phase(phase);
                for (i, cell) in data.cells.iter().enumerate() {
                    assert!(
                        (0..data.width as i8).contains(&cell.column)
                            && (0..data.height as i8).contains(&cell.row),
                        "{piece:?} phase {phase} cell {cell:?} outside {}x{}",
                        data.width,
                        data.height
                    );
                    for other in &data.cells[i + 1..] {
                        assert_ne!(cell, other, "{piece:?} phase {phase} repeats a cell");
                    }
                }
            }
        }
    }

    #[test]
    fn every_phase_touches_the_top_and_left_of_its_box() {
        for piece in PieceType::ALL {
            for phase in 0..4 {
                let data = piece.phase(phase);
                assert_eq!(data.cells.iter().map(|c| c.row).min(), Some(0));
                assert_eq!(data.cells.iter().map(|c| c.column).min(), Some(0));
                assert_eq!(
                    data.cells.iter().map(|c| c.row).max(),
                    Some(data.height as i8 - 1)
                );
                assert_eq!(
                    data.cells.iter().map(|c| c.column).max(),
                    Some(data.width as i8 - 1)
                );
            }
        }
    }

    #[test]
    fn only_the_bar_carries_a_pivot_correction() {
        for piece in PieceType::ALL {
            for phase in 0..4 {
                let pivot = piece.phase(phase).pivot;
                if piece == PieceType::I {
                    assert_ne!(pivot, Pos::ZERO);
                } else {
                    assert_eq!(pivot, Pos::ZERO, "{piece:?} phase {phase}");
                }
            }
        }
        assert_eq!(PieceType::I.phase(1).pivot, Pos::new(1, -1));
        assert_eq!(PieceType::I.phase(0).pivot, Pos::new(-1, 1));
    }

    #[test]
    fn symmetric_pieces_repeat_their_phases() {
        for piece in [PieceType::I, PieceType::Z, PieceType::S] {
            assert_eq!(piece.phase(0), piece.phase(2));
            assert_eq!(piece.phase(1), piece.phase(3));
            assert_ne!(piece.phase(0), piece.phase(1));
        }
        for phase in 1..4 {
            assert_eq!(PieceType::O.phase(0), PieceType::O.phase(phase));
        }
    }

    #[test]
    fn index_round_trips_and_fill_is_one_based() {
        for (i, piece) in PieceType::ALL.into_iter().enumerate() {
            assert_eq!(piece.index(), i);
            assert_eq!(PieceType::from_index(i), piece);
            assert_eq!(piece.fill() as usize, i + 1);
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range_phase_panics() {
        PieceType::T.phase(4);
    }

    #[test]
    fn rotation_wraps_both_ways() {
        assert_eq!(Rotation::Clockwise.apply(3), 0);
        assert_eq!(Rotation::CounterClockwise.apply(0), 3);
        assert_eq!(Rotation::CounterClockwise.apply(2), 1);
    }
}
