//! The outer game loop and its blocking overlays.

use crate::config::GameConfig;
use crate::frontend::{Frontend, Layout};
use crate::game::{GameState, Status, TickOutcome};
use crate::input::{Buttons, InputSnapshot};
use crate::score::Score;

pub const PAUSE_MESSAGE: &str = "PAUSE";
pub const GAME_OVER_MESSAGE: [&str; 2] = ["GAME", "OVER"];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GameSummary {
    pub score: Score,
    pub level: usize,
    pub pieces: u32,
}

pub struct Session {
    game: GameState,
    layout: Layout,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: GameState::new(&config),
            layout: config.layout,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Plays games back to back forever.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> ! {
        loop {
            let summary = self.play(frontend);
            log::info!(
                "game finished: score {}, level {}, {} pieces",
                summary.score,
                summary.level,
                summary.pieces
            );
        }
    }

    /// Plays one game, returning once the game-over message has been confirmed.
    pub fn play<F: Frontend>(&mut self, frontend: &mut F) -> GameSummary {
        self.mix_entropy(frontend);
        if self.game.status() != Status::Falling {
            self.game.restart();
        }
        let mut pieces = 1;

        frontend.wait_frames(0);
        self.draw(frontend);

        loop {
            let input = InputSnapshot {
                current: frontend.poll_input(),
                just_pressed: frontend.poll_input_edge(),
            };

            match self.game.tick(input) {
                TickOutcome::Falling => {}
                TickOutcome::Locked { .. } => {
                    pieces += 1;
                    self.mix_entropy(frontend);
                }
                TickOutcome::PauseRequested => {
                    pause(frontend, &self.layout, &self.game);
                    self.game.resume();
                }
                TickOutcome::GameOver => {
                    frontend.hide_active_piece();
                    frontend.present_board(self.game.board());
                    frontend.present_score(self.game.score());
                    game_over(frontend, &self.layout);
                    return GameSummary {
                        score: *self.game.score(),
                        level: self.game.difficulty().level(),
                        pieces,
                    };
                }
            }

            self.draw(frontend);
            frontend.wait_frames(0);
        }
    }

    fn mix_entropy<F: Frontend>(&mut self, frontend: &mut F) {
        if let Some(entropy) = frontend.entropy() {
            self.game.reseed(entropy);
        }
    }

    fn draw<F: Frontend>(&self, frontend: &mut F) {
        frontend.present_board(self.game.board());
        frontend.present_score(self.game.score());
        frontend.present_active_piece(self.layout.piece_sprite(self.game.active()));
    }
}

/// Blanks the field, shows the pause message and waits for confirm.
pub fn pause<F: Frontend>(frontend: &mut F, layout: &Layout, game: &GameState) {
    log::debug!("paused at frame {}", frontend.frame());
    frontend.hide_active_piece();
    frontend.blank_playfield();
    let (x, y) = layout.pause_message;
    frontend.present_message(x, y, layout.text_palette, PAUSE_MESSAGE, 5);

    wait_confirm(frontend);

    frontend.present_board(game.board());
    log::debug!("resumed at frame {}", frontend.frame());
}

pub fn game_over<F: Frontend>(frontend: &mut F, layout: &Layout) {
    let (x, y) = layout.game_over_message;
    for (line, text) in GAME_OVER_MESSAGE.iter().enumerate() {
        frontend.present_message(x, y + line as u16, layout.text_palette, text, 4);
    }
    wait_confirm(frontend);
}

/// Waits for a fresh press of the confirm button.
///
/// Skips a frame first so a press that is still registering as new is not taken as the
/// confirmation.
pub fn wait_confirm<F: Frontend>(frontend: &mut F) {
    frontend.wait_frames(1);
    loop {
        frontend.wait_frames(0);
        if frontend.poll_input_edge().contains(Buttons::CONFIRM) {
            return;
        }
    }
}
