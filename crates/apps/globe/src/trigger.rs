/// Edge detector for the host's "trigger camera move" flag.
///
/// Only a `false -> true` transition counts; holding the flag high, or
/// setting it high again, does nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CameraTrigger {
    raised: bool,
}

impl CameraTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Returns `true` on a rising edge.
    pub fn set(&mut self, value: bool) -> bool {
        let rising = value && !self.raised;
        self.raised = value;
        rising
    }
}
