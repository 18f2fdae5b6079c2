//! Frame-counting gravity driver. The engine has no clock of its own.

/// Frames between gravity ticks at 60 fps in the classic game.
pub const DEFAULT_GRAVITY_EVERY: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityClock {
    every: u32,
    frames: u32,
}

impl GravityClock {
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }

    pub fn every(&self) -> u32 {
        self.every
    }

    /// Count one frame; true when this frame should issue a gravity tick.
    pub fn on_frame(&mut self) -> bool {
        self.frames += 1;
        if self.frames >= self.every {
            self.frames = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.frames = 0;
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_EVERY)
    }
}
