/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// Seconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

/// Fixed duration in whole milliseconds.
///
/// Every phase length in the orchestrator is one of these constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Millis(pub u64);

impl Millis {
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl std::ops::Add<Millis> for Time {
    type Output = Time;

    fn add(self, rhs: Millis) -> Self::Output {
        Time(self.0 + rhs.as_secs_f64())
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Self::Output {
        Millis(self.0 + rhs.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn starting_at(start: Time, length: Millis) -> Self {
        Self {
            start,
            end: start + length,
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Normalized progress of `now` through the span, clamped to `[0, 1]`.
    ///
    /// Zero-length spans are complete immediately.
    pub fn progress(&self, now: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return 1.0;
        }
        (now.since(self.start) / d).clamp(0.0, 1.0)
    }
}
