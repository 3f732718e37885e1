use bitflags::bitflags;

bitflags! {
    /// Joypad state, one bit per button. Bit positions follow the pad's own numbering.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const ROTATE_CW = 1 << 0;
        const ROTATE_CCW = 1 << 1;
        const SELECT = 1 << 6;
        const START = 1 << 7;
        const UP = 1 << 8;
        const RIGHT = 1 << 9;
        const DOWN = 1 << 10;
        const LEFT = 1 << 11;
    }
}

impl Buttons {
    /// Buttons whose held state goes through the auto-repeat filter.
    pub const REPEATABLE: Buttons = Buttons::LEFT
        .union(Buttons::RIGHT)
        .union(Buttons::DOWN)
        .union(Buttons::ROTATE_CW)
        .union(Buttons::ROTATE_CCW);

    /// Pauses play and dismisses the pause and game-over overlays.
    pub const CONFIRM: Buttons = Buttons::START;
}

/// Input as sampled on one vertical blank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Everything physically held.
    pub current: Buttons,
    /// Buttons that went down on this sample.
    pub just_pressed: Buttons,
}

impl InputSnapshot {
    /// Samples `raw` against the previously held state.
    pub fn sample(previous: Buttons, raw: Buttons) -> Self {
        Self {
            current: raw,
            just_pressed: raw & !previous,
        }
    }

    pub fn is_pressed(&self, button: Buttons) -> bool {
        self.current.contains(button)
    }

    pub fn is_just_pressed(&self, button: Buttons) -> bool {
        self.just_pressed.contains(button)
    }

    pub(crate) fn pack(self) -> u32 {
        (self.current.bits() as u32) | ((self.just_pressed.bits() as u32) << 16)
    }

    pub(crate) fn unpack(word: u32) -> Self {
        Self {
            current: Buttons::from_bits_truncate(word as u16),
            just_pressed: Buttons::from_bits_truncate((word >> 16) as u16),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rising_edges_are_just_pressed() {
        let held = Buttons::LEFT | Buttons::ROTATE_CW;
        let snapshot = InputSnapshot::sample(held, Buttons::LEFT | Buttons::START);

        assert!(snapshot.is_pressed(Buttons::LEFT));
        assert!(snapshot.is_just_pressed(Buttons::START));
        assert!(!snapshot.is_just_pressed(Buttons::LEFT));
        assert!(!snapshot.is_pressed(Buttons::ROTATE_CW));
    }

    #[test]
    fn packing_keeps_both_masks() {
        let snapshot = InputSnapshot {
            current: Buttons::DOWN | Buttons::START,
            just_pressed: Buttons::START,
        };
        assert_eq!(InputSnapshot::unpack(snapshot.pack()), snapshot);
    }

    #[test]
    fn start_and_select_never_repeat() {
        assert!(!Buttons::REPEATABLE.intersects(Buttons::START | Buttons::SELECT | Buttons::UP));
        assert!(Buttons::REPEATABLE.contains(Buttons::LEFT | Buttons::ROTATE_CCW));
    }
}
