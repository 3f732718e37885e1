use agb::display::palette16::Palette16;
use agb::display::tiled::{TileFormat, TileSet};
use agb::sync::InitOnce;
use alloc::vec::Vec;
use core::slice;

use crate::font::GLYPHS;

pub const SOLID_TILE: u16 = 7;
pub const BLANK_TILE: u16 = 8;
pub const FIRST_GLYPH_TILE: u16 = 9;

pub const PIECE_PALETTE_ID: u8 = 0;
pub const TEXT_PALETTE_ID: u8 = 1;

/// One 8-bit channel of `html` scaled to 5 bits, rounding half up.
const fn channel(html: u32, shift: u32) -> u32 {
    let value = (html >> shift) & 0xFF;
    let scaled = (value + 4) / 8;
    if scaled > 31 {
        31
    } else {
        scaled
    }
}

/// Converts `0xRRGGBB` to the 15-bit BGR the hardware palette wants.
pub const fn html_color_to_gba(html: u32) -> u16 {
    (channel(html, 16) | (channel(html, 8) << 5) | (channel(html, 0) << 10)) as u16
}

/// Views 4bpp tile words as the byte slice agb uploads.
pub fn tile_bytes(words: &[u16]) -> &[u8] {
    // Safety: u8 has no alignment requirement and every byte of a u16 is initialised.
    unsafe { slice::from_raw_parts(words.as_ptr().cast::<u8>(), words.len() * 2) }
}

/// Sets pixel (`x`, `y`) of a 4bpp 8x8 tile, four pixels to a word.
fn put_pixel(tile: &mut [u16; 16], x: usize, y: usize, color: u16) {
    let pixel = y * 8 + x;
    tile[pixel / 4] |= color << ((pixel % 4) * 4);
}

const fn gen_palette(colors: &[u32]) -> Palette16 {
    let mut compressed_colors = [0; 16];

    let mut i = 0;
    while i < colors.len() {
        compressed_colors[i] = html_color_to_gba(colors[i]);
        i += 1;
    }

    Palette16::new(compressed_colors)
}

/// Fill and border colour for each piece type, in piece index order.
const PIECE_COLORS: [u32; 15] = [
    0x0, 0x0a126b, 0x091ced, 0xed940e, 0x472c04, 0xb515e6, 0x4d0a61, 0x1bd6e3, 0x10676e,
    0xf52f11, 0x99200e, 0x37d60b, 0x195c06, 0xe8d810, 0x635c1d,
];

pub static PIECE_PALETTE: Palette16 = gen_palette(&PIECE_COLORS);

pub static BACKGROUND_PALETTES: [Palette16; 2] = [
    gen_palette(&PIECE_COLORS),
    gen_palette(&[0x0, 0x0, 0xffffff]),
];

/// An 8x8 block in the fill colour of piece `index`, with a darker one pixel rim.
pub fn gen_piece_tile_data(index: u8) -> [u16; 16] {
    let fill = u16::from(index) * 2 + 1;
    let mut tile = [0; 16];

    for y in 0..8 {
        for x in 0..8 {
            let rim = x == 0 || y == 0 || x == 7 || y == 7;
            put_pixel(&mut tile, x, y, if rim { fill + 1 } else { fill });
        }
    }

    tile
}

/// A text tile: set bits of each row become colour 2, shifted one pixel in from the left.
fn gen_glyph_tile_data(rows: &[u8; 7]) -> [u16; 16] {
    let mut tile = [0; 16];

    for (y, row) in rows.iter().enumerate() {
        for x in 0..5 {
            if row & (0x10 >> x) != 0 {
                put_pixel(&mut tile, x + 1, y, 2);
            }
        }
    }

    tile
}

pub fn get_global_tileset() -> &'static TileSet<'static> {
    static GLOBAL_TILESET: InitOnce<TileSet<'static>> = InitOnce::new();
    fn gen_global_tileset() -> TileSet<'static> {
        let mut tiles = Vec::with_capacity(16 * (FIRST_GLYPH_TILE as usize + GLYPHS.len()));
        for i in 0..7 {
            tiles.extend_from_slice(&gen_piece_tile_data(i));
        }
        tiles.resize(tiles.len() + 16, 0x2222);
        tiles.resize(tiles.len() + 16, 0x0);
        for (_, rows) in GLYPHS.iter() {
            tiles.extend_from_slice(&gen_glyph_tile_data(rows));
        }
        TileSet::new(tile_bytes(tiles.leak()), TileFormat::FourBpp)
    }

    GLOBAL_TILESET.get(gen_global_tileset)
}
