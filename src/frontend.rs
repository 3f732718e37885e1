//! What the core needs from the machine it runs on.

use crate::board::Board;
use crate::game::ActivePiece;
use crate::input::Buttons;
use crate::piece::PieceType;
use crate::score::Score;

pub const CELL_PIXELS: i16 = 8;

/// Where things go on screen. Text positions are in tiles, the field origin in pixels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    /// Pixel position of board cell (0, 0), the top-left of the hidden rows.
    pub field_x: i16,
    pub field_y: i16,
    pub score: (u16, u16),
    pub pause_message: (u16, u16),
    pub game_over_message: (u16, u16),
    pub text_palette: u8,
}

impl Layout {
    pub fn piece_sprite(&self, piece: &ActivePiece) -> PieceSprite {
        PieceSprite {
            x: self.field_x + i16::from(piece.origin.column) * CELL_PIXELS,
            y: self.field_y + i16::from(piece.origin.row) * CELL_PIXELS,
            piece: piece.piece,
            phase: piece.phase,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        // A 240x160 screen with the visible field centred and its first visible row at
        // the top edge.
        Self {
            field_x: 80,
            field_y: -(crate::board::HIDDEN_ROWS as i16) * CELL_PIXELS,
            score: (1, 1),
            pause_message: (12, 9),
            game_over_message: (13, 9),
            text_palette: 1,
        }
    }
}

/// The single moving-piece visual.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PieceSprite {
    /// Screen position of the piece's bounding-box corner.
    pub x: i16,
    pub y: i16,
    pub piece: PieceType,
    pub phase: u8,
}

impl PieceSprite {
    /// One pattern per piece phase.
    pub fn pattern(&self) -> u16 {
        (self.piece.index() * 4 + self.phase as usize) as u16
    }

    pub fn palette(&self) -> u8 {
        self.piece.fill()
    }
}

/// Draw calls issued by the game loop.
pub trait Presenter {
    /// Redraws every visible cell. Called every frame, so it must be idempotent.
    fn present_board(&mut self, board: &Board);
    fn present_score(&mut self, score: &Score);
    fn present_message(&mut self, x: u16, y: u16, palette: u8, text: &str, max_len: usize);
    fn present_active_piece(&mut self, sprite: PieceSprite);
    fn hide_active_piece(&mut self);
    /// Shows an empty visible field without touching the board.
    fn blank_playfield(&mut self);
}

/// A presenter that also owns input and frame pacing.
pub trait Frontend: Presenter {
    /// Buttons held as of the last vertical blank.
    fn poll_input(&self) -> Buttons;
    /// Buttons that went down on the last vertical blank.
    fn poll_input_edge(&self) -> Buttons;
    /// Blocks for at least `n + 1` vertical blanks past the previous call.
    fn wait_frames(&mut self, n: u32);
    fn frame(&self) -> u32;
    /// Something that varies with player timing, for seeding a random piece order.
    fn entropy(&mut self) -> Option<u64> {
        None
    }
}
