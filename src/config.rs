use crate::difficulty::{Level, LEVELS};
use crate::frontend::Layout;
use crate::pieces::PieceOrder;
use crate::repeat::RepeatTiming;

/// Choices a frontend can make about a game. Everything else is fixed.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub repeat: RepeatTiming,
    pub piece_order: PieceOrder,
    pub levels: &'static [Level],
    pub layout: Layout,
}

impl GameConfig {
    pub fn with_repeat(mut self, repeat: RepeatTiming) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_piece_order(mut self, piece_order: PieceOrder) -> Self {
        self.piece_order = piece_order;
        self
    }

    pub fn with_levels(mut self, levels: &'static [Level]) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            repeat: RepeatTiming::default(),
            piece_order: PieceOrder::Sequential,
            levels: &LEVELS,
            layout: Layout::default(),
        }
    }
}
