//! Gameplay core of a falling-blocks puzzle for tile and sprite hardware.
//!
//! Everything here is hardware independent. A machine plugs in through
//! [`frontend::Frontend`]; the Game Boy Advance build lives in the `agb_blox` binary.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod clock;
pub mod config;
pub mod difficulty;
pub mod frontend;
pub mod game;
pub mod input;
pub mod piece;
mod piece_data;
pub mod pieces;
pub mod repeat;
pub mod score;
pub mod session;

pub use config::GameConfig;
pub use frontend::{Frontend, Presenter};
pub use input::Buttons;
pub use session::Session;
