use foundation::time::{Millis, Time};

/// Lifecycle token.
///
/// Every timer records the generation it was scheduled under. Owners bump
/// their generation when a lifecycle is superseded and compare at fire time,
/// so a timer that slips through cancellation can never act on a newer
/// lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Timer<K> {
    pub id: TimerId,
    pub generation: Generation,
    pub due: Time,
    pub kind: K,
}

/// Single-threaded one-shot timer queue driven by frame time.
///
/// Ordering contract:
/// - `poll_due` returns expired timers sorted by `(due, id)`; ids grow with
///   scheduling order, so timers due at the same instant fire in the order
///   they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<K> {
    next_id: u64,
    pending: Vec<Timer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, generation: Generation, due: Time, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Timer {
            id,
            generation,
            due,
            kind,
        });
        id
    }

    pub fn schedule_after(
        &mut self,
        generation: Generation,
        now: Time,
        delay: Millis,
        kind: K,
    ) -> TimerId {
        self.schedule(generation, now + delay, kind)
    }

    /// Removes a single timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        before != self.pending.len()
    }

    /// Removes every timer belonging to `generation`; returns how many were dropped.
    pub fn cancel_generation(&mut self, generation: Generation) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.generation != generation);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_for(&self, generation: Generation) -> usize {
        self.pending
            .iter()
            .filter(|t| t.generation == generation)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every timer with `due <= now`.
    pub fn poll_due(&mut self, now: Time) -> Vec<Timer<K>> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.due <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.due.0.total_cmp(&b.due.0).then_with(|| a.id.cmp(&b.id)));
        due
    }
}
