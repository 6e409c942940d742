use crate::frame::Frame;

/// A payload stamped with the frame it was emitted in.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    pub frame_index: u64,
    pub payload: E,
}

/// Append-only event log drained by the host after each update.
///
/// Emission order is preserved, so the log doubles as a trace of the
/// orchestration for tests and the CLI.
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, payload: E) {
        self.emit_at(frame.index, payload);
    }

    pub fn emit_at(&mut self, frame_index: u64, payload: E) {
        self.events.push(Event {
            frame_index,
            payload,
        });
    }

    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::new(2, 0.1);
        bus.emit(f, "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].payload, "hello");
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0, 1.0), 7u32);
        bus.emit_at(1, 8u32);
        let drained = bus.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].payload, 8);
        assert!(bus.events().is_empty());
    }
}
