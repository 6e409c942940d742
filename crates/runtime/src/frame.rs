use foundation::time::Time;

/// One tick of the host's render loop.
///
/// The orchestrator has no wall clock: phase timers and camera flights only
/// advance when a frame is handed in, so a recorded frame sequence replays
/// identically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt_s: f64,
    pub time: Time,
}

impl Frame {
    /// Fixed-step frame at `index * dt_s`.
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self::at(index, dt_s, Time(index as f64 * dt_s))
    }

    /// Frame with a host-supplied timestamp (variable frame rate).
    pub fn at(index: u64, dt_s: f64, time: Time) -> Self {
        Self { index, dt_s, time }
    }

    /// Following frame, `dt_s` later.
    pub fn next(self) -> Self {
        Self::at(self.index + 1, self.dt_s, Time(self.time.0 + self.dt_s))
    }
}

/// Fixed-rate frame source for headless sessions and tests.
#[derive(Debug, Clone)]
pub struct FrameClock {
    current: Frame,
}

impl FrameClock {
    /// `None` unless `fps` is finite and positive.
    pub fn from_fps(fps: f64) -> Option<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return None;
        }
        Some(Self {
            current: Frame::new(0, 1.0 / fps),
        })
    }

    /// Last frame handed out; frame 0 before the first tick.
    pub fn current(&self) -> Frame {
        self.current
    }

    pub fn tick(&mut self) -> Frame {
        self.current = self.current.next();
        self.current
    }

    /// Number of ticks needed to cover `seconds`, rounded up.
    pub fn frames_in(&self, seconds: f64) -> u64 {
        if seconds <= 0.0 {
            return 0;
        }
        // Shave rounding noise so 2.0 s at 60 fps is 120 frames, not 121.
        (seconds / self.current.dt_s - 1e-9).ceil() as u64
    }
}
