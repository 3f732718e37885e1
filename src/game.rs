use smallvec::SmallVec;

use crate::board::{Board, HIDDEN_ROWS, WIDTH};
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::input::{Buttons, InputSnapshot};
use crate::piece::{Phase, PieceType, Pos, Rotation};
use crate::pieces::{PieceOrder, PieceSource, Pieces};
use crate::repeat::RepeatFilter;
use crate::score::Score;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ActivePiece {
    pub piece: PieceType,
    pub phase: u8,
    pub origin: Pos,
}

impl ActivePiece {
    /// Phase 0, centred, resting on the bottom of the hidden rows.
    pub fn spawn(piece: PieceType) -> Self {
        let data = piece.phase(0);
        let column = (WIDTH as i8 - data.width as i8) / 2;
        let row = HIDDEN_ROWS as i8 - data.height as i8;
        Self {
            piece,
            phase: 0,
            origin: Pos::new(column, row),
        }
    }

    pub fn data(&self) -> &'static Phase {
        self.piece.phase(self.phase)
    }

    pub fn cells(&self) -> [Pos; 4] {
        self.data().cells.map(|offset| self.origin + offset)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Falling,
    Paused,
    GameOver,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    Falling,
    /// The piece locked and the next one spawned. Lists the rows that were cleared.
    Locked { cleared: SmallVec<[usize; 4]> },
    PauseRequested,
    GameOver,
}

pub struct GameState {
    board: Board,
    active: ActivePiece,
    score: Score,
    difficulty: Difficulty,
    repeat: RepeatFilter,
    descent: u16,
    pieces: Pieces,
    piece_order: PieceOrder,
    status: Status,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let mut pieces = Pieces::new(config.piece_order);
        let difficulty = Difficulty::with_table(config.levels);
        let game = Self {
            board: Board::new(),
            active: ActivePiece::spawn(pieces.next_piece()),
            score: Score::new(),
            descent: difficulty.interval(),
            difficulty,
            repeat: RepeatFilter::new(config.repeat),
            pieces,
            piece_order: config.piece_order,
            status: Status::Falling,
        };
        log::info!("new game, first piece {:?}", game.active.piece);
        game
    }

    /// Starts over with an empty board, zero score and the easiest level.
    ///
    /// Sequential piece order starts again from the first piece; a random order keeps
    /// drawing from the same stream.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = Score::new();
        self.difficulty = Difficulty::with_table(self.difficulty.table());
        self.descent = self.difficulty.interval();
        self.repeat.reset();
        if self.piece_order == PieceOrder::Sequential {
            self.pieces = Pieces::new(PieceOrder::Sequential);
        }
        self.status = Status::Falling;
        self.spawn();
        log::info!("new game, first piece {:?}", self.active.piece);
    }

    /// Mixes `entropy` into a random piece order, from the next piece on.
    pub fn reseed(&mut self, entropy: u64) {
        self.pieces.reseed(entropy);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Frames left until the next forced drop.
    pub fn descent(&self) -> u16 {
        self.descent
    }

    pub fn pause(&mut self) {
        assert_eq!(self.status, Status::Falling, "pausing a game that is not running");
        self.status = Status::Paused;
    }

    pub fn resume(&mut self) {
        assert_eq!(self.status, Status::Paused, "resuming a game that is not paused");
        self.status = Status::Falling;
    }

    /// Moves the piece by `delta` if it fits there.
    pub fn try_shift(&mut self, delta: Pos) -> bool {
        let ActivePiece {
            piece,
            phase,
            origin,
        } = self.active;

        if self.board.validate(piece, phase, origin, delta) {
            self.active.origin += delta;
            true
        } else {
            log::trace!("{piece:?} blocked moving by {delta:?}");
            false
        }
    }

    /// Rotates the piece, applying the target phase's pivot correction. Either the whole
    /// rotation happens or nothing changes.
    pub fn try_rotate(&mut self, rotation: Rotation) -> bool {
        let ActivePiece {
            piece,
            phase,
            origin,
        } = self.active;
        let next = rotation.apply(phase);
        let pivot = piece.phase(next).pivot;

        if self.board.validate(piece, next, origin, pivot) {
            self.active.phase = next;
            self.active.origin += pivot;
            true
        } else {
            log::trace!("{piece:?} blocked rotating {rotation:?} into phase {next}");
            false
        }
    }

    fn apply(&mut self, actions: Buttons) {
        if actions.contains(Buttons::LEFT) {
            self.try_shift(Pos::new(-1, 0));
        }
        if actions.contains(Buttons::RIGHT) {
            self.try_shift(Pos::new(1, 0));
        }
        if actions.contains(Buttons::DOWN) {
            self.try_shift(Pos::new(0, 1));
        }
        if actions.contains(Buttons::ROTATE_CW) {
            self.try_rotate(Rotation::Clockwise);
        }
        if actions.contains(Buttons::ROTATE_CCW) {
            self.try_rotate(Rotation::CounterClockwise);
        }
    }

    /// Advances one frame of play.
    pub fn tick(&mut self, input: InputSnapshot) -> TickOutcome {
        assert_eq!(self.status, Status::Falling, "ticking a game that is not running");

        let actions = self.repeat.update(input.current);
        self.apply(actions);

        self.descent = self.descent.saturating_sub(1);

        // A descent that came due on this frame runs on the first frame after resuming.
        if input.is_just_pressed(Buttons::CONFIRM) {
            self.pause();
            return TickOutcome::PauseRequested;
        }
        if self.descent > 0 {
            return TickOutcome::Falling;
        }

        self.difficulty.update(&self.score);
        self.descent = self.difficulty.interval();

        if self.try_shift(Pos::new(0, 1)) {
            TickOutcome::Falling
        } else {
            self.lock()
        }
    }

    fn lock(&mut self) -> TickOutcome {
        let ActivePiece {
            piece,
            phase,
            origin,
        } = self.active;
        self.board.commit(piece, phase, origin);

        if self
            .active
            .cells()
            .iter()
            .any(|cell| (cell.row as usize) < HIDDEN_ROWS)
        {
            log::info!("{piece:?} locked in the hidden rows, final score {}", self.score);
            self.status = Status::GameOver;
            return TickOutcome::GameOver;
        }

        let cleared = self.board.complete_rows();
        let count = self.board.clear_completed_lines();
        debug_assert_eq!(count, cleared.len());
        self.score.add_lines(count);
        log::debug!(
            "{piece:?} locked at {origin:?}, cleared {:?}, score {}",
            cleared.as_slice(),
            self.score
        );

        if !self.spawn() {
            return TickOutcome::GameOver;
        }
        TickOutcome::Locked { cleared }
    }

    /// Brings in the next piece. Returns false, ending the game, if it does not fit.
    fn spawn(&mut self) -> bool {
        self.active = ActivePiece::spawn(self.pieces.next_piece());
        let ActivePiece {
            piece,
            phase,
            origin,
        } = self.active;

        if self.board.validate(piece, phase, origin, Pos::ZERO) {
            true
        } else {
            log::info!("no room to spawn {piece:?}, final score {}", self.score);
            self.status = Status::GameOver;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HEIGHT;

    fn new_game() -> GameState {
        GameState::new(&GameConfig::default())
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn press(buttons: Buttons) -> InputSnapshot {
        InputSnapshot {
            current: buttons,
            just_pressed: buttons,
        }
    }

    fn place(game: &mut GameState, piece: PieceType, phase: u8, column: i8, row: i8) {
        game.active = ActivePiece {
            piece,
            phase,
            origin: Pos::new(column, row),
        };
    }

    #[test]
    fn square_spawns_centred_on_the_hidden_floor() {
        let square = ActivePiece::spawn(PieceType::from_index(6));
        assert_eq!(square.piece, PieceType::O);
        assert_eq!(square.origin, Pos::new(4, 2));
        assert_eq!(square.phase, 0);
    }

    #[test]
    fn game_starts_with_the_first_piece_and_full_interval() {
        let game = new_game();
        assert_eq!(game.active().piece, PieceType::J);
        assert_eq!(game.active().origin, Pos::new(4, 1));
        assert_eq!(game.descent(), 30);
        assert_eq!(game.score().as_str(), "00000");
        assert_eq!(game.status(), Status::Falling);
    }

    #[test]
    fn piece_drops_one_row_every_interval() {
        let mut game = new_game();
        let start = game.active().origin;

        for _ in 0..29 {
            assert_eq!(game.tick(idle()), TickOutcome::Falling);
        }
        assert_eq!(game.active().origin, start);

        assert_eq!(game.tick(idle()), TickOutcome::Falling);
        assert_eq!(game.active().origin, start + Pos::new(0, 1));
        assert_eq!(game.descent(), 30);
    }

    #[test]
    fn shifts_are_validated_against_the_walls() {
        let mut game = new_game();
        place(&mut game, PieceType::O, 0, 0, 10);

        game.tick(press(Buttons::LEFT));
        assert_eq!(game.active().origin, Pos::new(0, 10));

        game.tick(press(Buttons::RIGHT));
        assert_eq!(game.active().origin, Pos::new(1, 10));
    }

    #[test]
    fn held_direction_repeats_after_the_delay() {
        let mut game = new_game();
        place(&mut game, PieceType::O, 0, 8, 10);
        game.descent = 100;

        game.tick(press(Buttons::LEFT));
        for _ in 0..14 {
            game.tick(InputSnapshot {
                current: Buttons::LEFT,
                just_pressed: Buttons::empty(),
            });
        }
        assert_eq!(game.active().origin.column, 7);

        game.tick(InputSnapshot {
            current: Buttons::LEFT,
            just_pressed: Buttons::empty(),
        });
        assert_eq!(game.active().origin.column, 6);
    }

    #[test]
    fn soft_drop_moves_down_without_resetting_the_timer() {
        let mut game = new_game();
        let start = game.active().origin;

        game.tick(press(Buttons::DOWN));
        assert_eq!(game.active().origin, start + Pos::new(0, 1));
        assert_eq!(game.descent(), 29);
    }

    #[test]
    fn bar_rotation_applies_the_pivot_correction() {
        let mut game = new_game();
        place(&mut game, PieceType::I, 0, 3, 10);

        assert!(game.try_rotate(Rotation::Clockwise));
        assert_eq!(game.active().phase, 1);
        assert_eq!(game.active().origin, Pos::new(4, 9));

        assert!(game.try_rotate(Rotation::Clockwise));
        assert_eq!(game.active().phase, 2);
        assert_eq!(game.active().origin, Pos::new(3, 10));

        assert!(game.try_rotate(Rotation::CounterClockwise));
        assert_eq!(game.active().phase, 1);
        assert_eq!(game.active().origin, Pos::new(4, 9));
    }

    #[test]
    fn blocked_rotation_changes_nothing() {
        let mut game = new_game();
        place(&mut game, PieceType::I, 0, 3, 10);
        game.board.set(12, 4, Some(PieceType::O));

        let before = *game.active();
        assert!(!game.try_rotate(Rotation::Clockwise));
        assert_eq!(*game.active(), before);

        // The corrected origin would be above the board.
        place(&mut game, PieceType::I, 0, 3, 0);
        assert!(!game.try_rotate(Rotation::Clockwise));
        assert_eq!(game.active().origin, Pos::new(3, 0));
        assert_eq!(game.active().phase, 0);
    }

    #[test]
    fn rotation_buttons_turn_the_piece_both_ways() {
        let mut game = new_game();
        place(&mut game, PieceType::T, 0, 4, 10);

        game.tick(press(Buttons::ROTATE_CW));
        assert_eq!(game.active().phase, 1);

        game.tick(idle());
        game.tick(press(Buttons::ROTATE_CCW));
        assert_eq!(game.active().phase, 0);

        game.tick(idle());
        game.tick(press(Buttons::ROTATE_CCW));
        assert_eq!(game.active().phase, 3);
    }

    #[test]
    fn locking_on_the_floor_clears_lines_and_scores() {
        let mut game = new_game();
        for column in 0..WIDTH {
            if column != 4 && column != 5 {
                game.board.set(HEIGHT - 1, column, Some(PieceType::T));
            }
        }
        place(&mut game, PieceType::O, 0, 4, 22);
        game.descent = 1;

        let outcome = game.tick(idle());
        assert_eq!(
            outcome,
            TickOutcome::Locked {
                cleared: SmallVec::from_slice(&[HEIGHT - 1])
            }
        );
        assert_eq!(game.score().as_str(), "00001");
        assert_eq!(game.board().get(HEIGHT - 1, 4), Some(PieceType::O));
        assert_eq!(game.board().get(HEIGHT - 1, 0), None);
        assert_eq!(game.active().piece, PieceType::L);
        assert_eq!(game.descent(), 30);
    }

    #[test]
    fn locking_in_the_hidden_rows_ends_the_game() {
        let mut game = new_game();
        game.board.set(HIDDEN_ROWS, 4, Some(PieceType::T));
        place(&mut game, PieceType::O, 0, 4, 2);
        game.descent = 1;

        assert_eq!(game.tick(idle()), TickOutcome::GameOver);
        assert_eq!(game.status(), Status::GameOver);
        assert_eq!(game.board().get(3, 4), Some(PieceType::O));
    }

    #[test]
    fn no_room_to_spawn_ends_the_game() {
        let mut game = new_game();
        // The next piece is L, spawning with a cell at column 5, row 2.
        game.board.set(2, 5, Some(PieceType::T));
        place(&mut game, PieceType::O, 0, 0, 22);
        game.descent = 1;

        assert_eq!(game.tick(idle()), TickOutcome::GameOver);
        assert_eq!(game.status(), Status::GameOver);
        assert_eq!(game.active().piece, PieceType::L);
    }

    #[test]
    fn difficulty_rises_on_the_drop_after_the_threshold() {
        let mut game = new_game();
        game.score.add_lines(3);
        game.descent = 1;
        game.tick(idle());
        assert_eq!(game.difficulty().interval(), 30);
        assert_eq!(game.descent(), 30);

        game.score.add_lines(1);
        game.descent = 1;
        game.tick(idle());
        assert_eq!(game.difficulty().interval(), 24);
        assert_eq!(game.descent(), 24);
    }

    #[test]
    fn the_pausing_frame_still_counts_down() {
        let mut game = new_game();
        game.tick(idle());
        let descent = game.descent();

        assert_eq!(game.tick(press(Buttons::START)), TickOutcome::PauseRequested);
        assert_eq!(game.status(), Status::Paused);
        assert_eq!(game.descent(), descent - 1);

        game.resume();
        assert_eq!(game.status(), Status::Falling);
        game.tick(idle());
        assert_eq!(game.descent(), descent - 2);
    }

    #[test]
    fn a_drop_due_on_the_pausing_frame_runs_after_resume() {
        let mut game = new_game();
        let row = game.active().origin.row;
        game.descent = 1;

        assert_eq!(game.tick(press(Buttons::START)), TickOutcome::PauseRequested);
        assert_eq!(game.active().origin.row, row);
        assert_eq!(game.descent(), 0);

        game.resume();
        assert_eq!(game.tick(idle()), TickOutcome::Falling);
        assert_eq!(game.active().origin.row, row + 1);
        assert_eq!(game.descent(), 30);
    }

    #[test]
    #[should_panic]
    fn ticking_while_paused_panics() {
        let mut game = new_game();
        game.pause();
        game.tick(idle());
    }

    #[test]
    fn restart_resets_everything() {
        let mut game = new_game();
        game.board.set(20, 0, Some(PieceType::S));
        game.score.add_lines(12);
        game.difficulty.update(&Score::MAX);
        game.pieces.next_piece();
        game.status = Status::GameOver;

        game.restart();

        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.score(), &Score::ZERO);
        assert_eq!(game.difficulty().level(), 0);
        assert_eq!(game.descent(), 30);
        assert_eq!(game.active().piece, PieceType::J);
        assert_eq!(game.status(), Status::Falling);
    }

    #[test]
    fn random_order_is_seeded_from_the_config() {
        let config = GameConfig::default().with_piece_order(PieceOrder::Random { seed: 9 });
        let a = GameState::new(&config);
        let b = GameState::new(&config);
        assert_eq!(a.active().piece, b.active().piece);
    }
}
