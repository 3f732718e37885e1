use agb::display::object::{DynamicSprite, Object, ObjectController, PaletteVram, SpriteBorrow};
use agb::display::tiled::{
    MapLoan, RegularBackgroundSize, RegularMap, TileSetting, Tiled0, TiledMap, VRamManager,
};
use agb::display::{self, Priority};
use agb::fixnum::Vector2D;
use agb::input::{Button, ButtonController};
use agb::interrupt::VBlank;
use agb::rng::RandomNumberGenerator;
use alloc::vec::Vec;

use agb_blox::board::{Board, HIDDEN_ROWS, VISIBLE_HEIGHT, WIDTH};
use agb_blox::clock::{FrameSync, VsyncClock};
use agb_blox::frontend::{Frontend, Layout, PieceSprite, Presenter, CELL_PIXELS};
use agb_blox::piece::PieceType;
use agb_blox::score::Score;
use agb_blox::Buttons;

use crate::font::glyph_index;
use crate::tiles::{
    gen_piece_tile_data, get_global_tileset, tile_bytes, BLANK_TILE, FIRST_GLYPH_TILE,
    PIECE_PALETTE, PIECE_PALETTE_ID, SOLID_TILE, TEXT_PALETTE_ID,
};

const SCORE_LABEL: &str = "SCORE:";

const BUTTON_MAP: [(Button, Buttons); 8] = [
    (Button::A, Buttons::ROTATE_CW),
    (Button::B, Buttons::ROTATE_CCW),
    (Button::SELECT, Buttons::SELECT),
    (Button::START, Buttons::START),
    (Button::UP, Buttons::UP),
    (Button::RIGHT, Buttons::RIGHT),
    (Button::DOWN, Buttons::DOWN),
    (Button::LEFT, Buttons::LEFT),
];

fn read_buttons(input: &ButtonController) -> Buttons {
    BUTTON_MAP
        .iter()
        .filter(|(button, _)| input.is_pressed(*button))
        .fold(Buttons::empty(), |held, (_, mapped)| held | *mapped)
}

fn gen_piece_sprites() -> Vec<SpriteBorrow> {
    let palette = PaletteVram::new(&PIECE_PALETTE).expect("no room for the piece palette");
    PieceType::ALL
        .iter()
        .map(|piece| {
            let tile_data = gen_piece_tile_data(piece.index() as u8);
            DynamicSprite::new(tile_bytes(&tile_data), display::object::Size::S8x8)
                .to_vram(palette.clone())
        })
        .collect()
}

fn glyph_tile(c: char) -> u16 {
    match glyph_index(c) {
        Some(index) => FIRST_GLYPH_TILE + index as u16,
        None => BLANK_TILE,
    }
}

/// Game Boy Advance frontend: the board on a tiled background, the falling piece as four
/// 8x8 objects.
///
/// There is no interrupt handler. Each vertical blank is consumed inside
/// [`Frontend::wait_frames`], which commits the frame, samples the keypad and advances the
/// clock before checking whether enough frames have passed.
pub struct GbaFrontend<'a> {
    objects: &'a ObjectController,
    piece_sprites: Vec<SpriteBorrow>,
    piece_objects: Vec<Object<'a>>,
    map: MapLoan<'a, RegularMap>,
    vram: VRamManager,
    vblank: VBlank,
    input: ButtonController,
    /// Stepped once per vertical blank, so its state depends on how long the player takes.
    rng: RandomNumberGenerator,
    clock: VsyncClock,
    sync: FrameSync,
    layout: Layout,
    /// Board last written to the map, so unchanged frames skip the redraw.
    shown_board: Option<Board>,
}

impl<'a> GbaFrontend<'a> {
    pub fn new(
        objects: &'a ObjectController,
        tiled: &'a Tiled0,
        vram: VRamManager,
        layout: Layout,
    ) -> Self {
        let piece_sprites = gen_piece_sprites();
        let piece_objects = (0..4)
            .map(|_| {
                let mut object = objects.object(piece_sprites[0].clone());
                object.hide();
                object
            })
            .collect();
        let clock = VsyncClock::new();
        let sync = FrameSync::new(&clock);

        let mut frontend = Self {
            objects,
            piece_sprites,
            piece_objects,
            map: tiled.background(Priority::P1, RegularBackgroundSize::Background32x32),
            vram,
            vblank: VBlank::get(),
            input: ButtonController::new(),
            rng: RandomNumberGenerator::new(),
            clock,
            sync,
            layout,
            shown_board: None,
        };
        frontend.draw_frame();
        frontend
    }

    /// Tile position of the first visible board row's leftmost cell.
    fn field_tile(&self) -> (u16, u16) {
        let x = self.layout.field_x / CELL_PIXELS;
        let y = self.layout.field_y / CELL_PIXELS + HIDDEN_ROWS as i16;
        (x as u16, y as u16)
    }

    fn set_tile(&mut self, x: u16, y: u16, tile_id: u16, palette: u8) {
        self.map.set_tile(
            &mut self.vram,
            Vector2D { x, y },
            get_global_tileset(),
            TileSetting::new(tile_id, false, false, palette),
        );
    }

    /// Walls either side of the field and the score label. Neither changes during play.
    fn draw_frame(&mut self) {
        let (left, top) = self.field_tile();
        for y in top..top + VISIBLE_HEIGHT as u16 {
            self.set_tile(left - 1, y, SOLID_TILE, TEXT_PALETTE_ID);
            self.set_tile(left + WIDTH as u16, y, SOLID_TILE, TEXT_PALETTE_ID);
        }

        let (x, y) = self.layout.score;
        self.present_message(x, y, self.layout.text_palette, SCORE_LABEL, SCORE_LABEL.len());
        self.blank_playfield();
        self.map.show();
    }
}

impl<'a> Presenter for GbaFrontend<'a> {
    fn present_board(&mut self, board: &Board) {
        if self.shown_board.as_ref() == Some(board) {
            return;
        }

        let (left, top) = self.field_tile();
        for (i, row) in board.visible_rows().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let tile_id = match cell {
                    Some(piece) => piece.index() as u16,
                    None => BLANK_TILE,
                };
                self.set_tile(left + j as u16, top + i as u16, tile_id, PIECE_PALETTE_ID);
            }
        }
        self.shown_board = Some(board.clone());
    }

    fn present_score(&mut self, score: &Score) {
        let (x, y) = self.layout.score;
        let palette = self.layout.text_palette;
        for (i, digit) in score.as_str().chars().enumerate() {
            self.set_tile(x + i as u16, y + 1, glyph_tile(digit), palette);
        }
    }

    fn present_message(&mut self, x: u16, y: u16, palette: u8, text: &str, max_len: usize) {
        for (i, c) in text.chars().take(max_len).enumerate() {
            self.set_tile(x + i as u16, y, glyph_tile(c), palette);
        }
    }

    fn present_active_piece(&mut self, sprite: PieceSprite) {
        let cells = sprite.piece.phase(sprite.phase).cells;
        let image = &self.piece_sprites[sprite.piece.index()];

        for (cell, object) in cells.iter().zip(self.piece_objects.iter_mut()) {
            let screen_x = sprite.x + i16::from(cell.column) * CELL_PIXELS;
            let screen_y = sprite.y + i16::from(cell.row) * CELL_PIXELS;

            if screen_y < 0 {
                object.hide();
                continue;
            }
            object.set_x(screen_x as u16);
            object.set_y(screen_y as u16);
            object.set_sprite(image.clone());
            object.show();
        }
    }

    fn hide_active_piece(&mut self) {
        for object in &mut self.piece_objects {
            object.hide();
        }
    }

    fn blank_playfield(&mut self) {
        let (left, top) = self.field_tile();
        for y in top..top + VISIBLE_HEIGHT as u16 {
            for x in left..left + WIDTH as u16 {
                self.set_tile(x, y, BLANK_TILE, PIECE_PALETTE_ID);
            }
        }
        self.shown_board = None;
    }
}

impl<'a> Frontend for GbaFrontend<'a> {
    fn poll_input(&self) -> Buttons {
        self.clock.current()
    }

    fn poll_input_edge(&self) -> Buttons {
        self.clock.just_pressed()
    }

    fn wait_frames(&mut self, n: u32) {
        let Self {
            objects,
            map,
            vram,
            vblank,
            input,
            rng,
            clock,
            sync,
            ..
        } = self;
        let clock = &*clock;

        sync.await_frames(clock, n, || {
            vblank.wait_for_vblank();
            objects.commit();
            map.commit(vram);
            input.update();
            rng.gen();
            clock.on_vsync(read_buttons(input));
        });
    }

    fn frame(&self) -> u32 {
        self.clock.frame()
    }

    fn entropy(&mut self) -> Option<u64> {
        let high = self.rng.gen() as u32;
        let low = self.rng.gen() as u32;
        Some((u64::from(high) << 32) | u64::from(low ^ self.clock.frame()))
    }
}
