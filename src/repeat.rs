use crate::input::Buttons;

/// Frames a combination must be held before it starts repeating.
pub const INITIAL_DELAY: u8 = 15;
/// Frames between repeats once repeating.
pub const REPEAT_INTERVAL: u8 = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RepeatTiming {
    pub initial_delay: u8,
    pub interval: u8,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            initial_delay: INITIAL_DELAY,
            interval: REPEAT_INTERVAL,
        }
    }
}

/// Typematic filter over the repeatable buttons.
///
/// A new combination fires on the frame it appears. Holding it fires again once
/// `initial_delay` frames have passed, then every `interval` frames.
#[derive(Clone, Debug)]
pub struct RepeatFilter {
    timing: RepeatTiming,
    last: Buttons,
    held: u8,
    since_repeat: u8,
}

impl RepeatFilter {
    pub fn new(timing: RepeatTiming) -> Self {
        Self {
            timing,
            last: Buttons::empty(),
            held: 0,
            since_repeat: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.timing);
    }

    /// Feeds one frame of held buttons, returning the buttons to act on this frame.
    pub fn update(&mut self, current: Buttons) -> Buttons {
        let masked = current & Buttons::REPEATABLE;

        if masked != self.last {
            self.last = masked;
            self.held = 0;
            self.since_repeat = 0;
            return masked;
        }

        if self.held < self.timing.initial_delay {
            self.held += 1;
            if self.held < self.timing.initial_delay {
                return Buttons::empty();
            }
            return self.last;
        }

        self.since_repeat += 1;
        if self.since_repeat >= self.timing.interval {
            self.since_repeat = 0;
            self.last
        } else {
            Buttons::empty()
        }
    }
}

impl Default for RepeatFilter {
    fn default() -> Self {
        Self::new(RepeatTiming::default())
    }
}
