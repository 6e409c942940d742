use catalog::{ComparisonInsights, Dataset, InsightPolicy, Side, compare};

/// One of the two comparison targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Slot::A => Side::A,
            Slot::B => Side::B,
        }
    }
}

/// Two-slot selection used by comparison mode.
///
/// While fewer than two slots are filled the active slot is always the first
/// empty one. Once both are filled it only moves on an explicit
/// [`ComparisonCoordinator::set_active`] or a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonCoordinator {
    slot_a: Option<String>,
    slot_b: Option<String>,
    active: Slot,
}

impl ComparisonCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::A => self.slot_a.as_deref(),
            Slot::B => self.slot_b.as_deref(),
        }
    }

    pub fn active_slot(&self) -> Slot {
        self.active
    }

    /// Name held by the active slot, i.e. the one the globe highlights.
    pub fn active_target(&self) -> Option<&str> {
        self.get(self.active)
    }

    pub fn is_ready(&self) -> bool {
        self.slot_a.is_some() && self.slot_b.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slot_a.is_none() && self.slot_b.is_none()
    }

    /// Stores `name` in `slot`. Returns `true` if anything changed.
    ///
    /// Filling a slot while the other is still empty advances the active
    /// slot to the empty one.
    pub fn set_slot(&mut self, slot: Slot, name: impl Into<String>) -> bool {
        let name = name.into();
        let before = self.clone();
        *self.slot_mut(slot) = Some(name);
        if self.get(slot.other()).is_none() {
            self.active = slot.other();
        }
        *self != before
    }

    /// Stores `name` in whichever slot is active.
    pub fn assign(&mut self, name: impl Into<String>) -> bool {
        self.set_slot(self.active, name)
    }

    /// Moves the active slot on explicit user request.
    ///
    /// Honoured only when both slots are filled; until then the active slot
    /// tracks the first empty one.
    pub fn set_active(&mut self, slot: Slot) -> bool {
        if !self.is_ready() || self.active == slot {
            return false;
        }
        self.active = slot;
        true
    }

    pub fn reset(&mut self) -> bool {
        let changed = !self.is_empty() || self.active != Slot::A;
        *self = Self::default();
        changed
    }

    /// Head-to-head insights, once both slots name countries with data.
    pub fn insights(&self, dataset: &Dataset, policy: InsightPolicy) -> Option<ComparisonInsights> {
        let a = dataset.get(self.slot_a.as_deref()?)?;
        let b = dataset.get(self.slot_b.as_deref()?)?;
        Some(compare(a, b, policy))
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::A => &mut self.slot_a,
            Slot::B => &mut self.slot_b,
        }
    }
}
