#![no_std]
#![no_main]

extern crate alloc;

mod font;
mod gba;
mod tiles;

use agb::mgba::{DebugLevel, Mgba};
use agb_blox::pieces::PieceOrder;
use agb_blox::{GameConfig, Session};
use log::{Level, LevelFilter, Log, Metadata, Record};

use gba::GbaFrontend;
use tiles::BACKGROUND_PALETTES;

/// Sends log records to the mGBA debug console. Silent on hardware.
struct MgbaLogger;

impl Log for MgbaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => DebugLevel::Error,
            Level::Warn => DebugLevel::Warning,
            Level::Info => DebugLevel::Info,
            Level::Debug | Level::Trace => DebugLevel::Debug,
        };
        if let Some(mut mgba) = Mgba::new() {
            let _ = mgba.print(
                format_args!("{}: {}", record.target(), record.args()),
                level,
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: MgbaLogger = MgbaLogger;

#[agb::entry]
fn main(mut gba: agb::Gba) -> ! {
    // Safety: nothing else is running yet, so nothing can race the logger install.
    if unsafe { log::set_logger_racy(&LOGGER) }.is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let objects = gba.display.object.get();
    let (tiled, mut vram) = gba.display.video.tiled0();
    vram.set_background_palettes(&BACKGROUND_PALETTES);

    // The session mixes frame timing into the order at every game start and every lock.
    let config = GameConfig::default().with_piece_order(PieceOrder::Random { seed: 0 });

    let mut frontend = GbaFrontend::new(&objects, &tiled, vram, config.layout);
    Session::new(config).run(&mut frontend)
}
