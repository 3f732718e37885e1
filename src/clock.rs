//! Frame clock and joypad sampler.
//!
//! [`VsyncClock`] is written from the vertical-blank side (an interrupt handler, or the
//! frontend's vblank wait) and read from the main loop. Both the frame count and the
//! input snapshot are single words, so a reader always sees a whole old value or a whole
//! new one. Only loads and stores are used; ARMv4T has no compare-and-swap.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::input::{Buttons, InputSnapshot};

pub struct VsyncClock {
    frames: AtomicU32,
    input: AtomicU32,
}

impl VsyncClock {
    pub const fn new() -> Self {
        Self {
            frames: AtomicU32::new(0),
            input: AtomicU32::new(0),
        }
    }

    /// Records one vertical blank with the joypad state read during it.
    ///
    /// Must only be called from one context at a time.
    pub fn on_vsync(&self, raw: Buttons) {
        let previous = InputSnapshot::unpack(self.input.load(Ordering::Relaxed)).current;
        let snapshot = InputSnapshot::sample(previous, raw);
        self.input.store(snapshot.pack(), Ordering::Release);

        let frame = self.frames.load(Ordering::Relaxed).wrapping_add(1);
        self.frames.store(frame, Ordering::Release);
    }

    pub fn frame(&self) -> u32 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::unpack(self.input.load(Ordering::Acquire))
    }

    pub fn current(&self) -> Buttons {
        self.snapshot().current
    }

    pub fn just_pressed(&self) -> Buttons {
        self.snapshot().just_pressed
    }
}

impl Default for VsyncClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Main-loop side of frame pacing.
#[derive(Debug, Default)]
pub struct FrameSync {
    last: u32,
}

impl FrameSync {
    pub fn new(clock: &VsyncClock) -> Self {
        Self {
            last: clock.frame(),
        }
    }

    /// Blocks until the clock is `n + 1` frames past the previous return from this call.
    ///
    /// `idle` runs while waiting; it is where a frontend without a real interrupt waits for
    /// the next blank and calls [`VsyncClock::on_vsync`]. If the target has already passed
    /// this returns immediately.
    pub fn await_frames(&mut self, clock: &VsyncClock, n: u32, mut idle: impl FnMut()) {
        let target = self.last.wrapping_add(n).wrapping_add(1);
        while (clock.frame().wrapping_sub(target) as i32) < 0 {
            idle();
        }
        self.last = clock.frame();
    }

    pub fn last(&self) -> u32 {
        self.last
    }
}
