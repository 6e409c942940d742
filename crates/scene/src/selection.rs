use crate::comparison::{ComparisonCoordinator, Slot};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Single,
    Compare,
}

/// Change notification produced by every mutating [`SelectionStore`] call.
///
/// `target` is what the globe should now treat as selected: the single-mode
/// selection, or the name in the active comparison slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub mode: ViewMode,
    pub previous_target: Option<String>,
    pub target: Option<String>,
}

impl SelectionChange {
    pub fn target_changed(&self) -> bool {
        self.previous_target != self.target
    }
}

/// Single source of truth for what is selected.
///
/// Both mode substates live here; only the current mode's one is observable.
/// Leaving a mode resets its substate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    mode: ViewMode,
    single: Option<String>,
    compare: ComparisonCoordinator,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Single-mode selection.
    pub fn selected(&self) -> Option<&str> {
        self.single.as_deref()
    }

    pub fn comparison(&self) -> &ComparisonCoordinator {
        &self.compare
    }

    /// Name the globe highlights and the camera follows.
    pub fn target(&self) -> Option<&str> {
        match self.mode {
            ViewMode::Single => self.single.as_deref(),
            ViewMode::Compare => self.compare.active_target(),
        }
    }

    pub fn has_target(&self) -> bool {
        self.target().is_some()
    }

    /// Commits a pick. In single mode `None` clears the selection; in compare
    /// mode a name fills the active slot and `None` is ignored.
    pub fn commit(&mut self, name: Option<&str>) -> Option<SelectionChange> {
        match self.mode {
            ViewMode::Single => self.mutate(|s| {
                let next = name.map(str::to_string);
                if s.single == next {
                    return false;
                }
                s.single = next;
                true
            }),
            ViewMode::Compare => {
                let name = name?;
                self.mutate(|s| s.compare.assign(name))
            }
        }
    }

    pub fn set_slot(&mut self, slot: Slot, name: &str) -> Option<SelectionChange> {
        if self.mode != ViewMode::Compare {
            return None;
        }
        self.mutate(|s| s.compare.set_slot(slot, name))
    }

    pub fn set_active_slot(&mut self, slot: Slot) -> Option<SelectionChange> {
        if self.mode != ViewMode::Compare {
            return None;
        }
        self.mutate(|s| s.compare.set_active(slot))
    }

    /// Clears the current mode's selection back to its initial value.
    pub fn reset(&mut self) -> Option<SelectionChange> {
        self.mutate(|s| match s.mode {
            ViewMode::Single => s.single.take().is_some(),
            ViewMode::Compare => s.compare.reset(),
        })
    }

    pub fn set_mode(&mut self, mode: ViewMode) -> Option<SelectionChange> {
        if self.mode == mode {
            return None;
        }
        self.mutate(|s| {
            s.single = None;
            s.compare.reset();
            s.mode = mode;
            true
        })
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Self) -> bool) -> Option<SelectionChange> {
        let previous_target = self.target().map(str::to_string);
        if !f(self) {
            return None;
        }
        Some(SelectionChange {
            mode: self.mode,
            previous_target,
            target: self.target().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionStore, ViewMode};
    use crate::comparison::Slot;

    #[test]
    fn single_commit_and_clear() {
        let mut s = SelectionStore::new();
        let change = s.commit(Some("Finland")).expect("changed");
        assert_eq!(change.previous_target, None);
        assert_eq!(change.target.as_deref(), Some("Finland"));
        assert!(change.target_changed());

        assert!(s.commit(Some("Finland")).is_none());

        let cleared = s.commit(None).expect("cleared");
        assert_eq!(cleared.previous_target.as_deref(), Some("Finland"));
        assert_eq!(s.target(), None);
        assert!(s.commit(None).is_none());
    }

    #[test]
    fn compare_commit_fills_active_slot() {
        let mut s = SelectionStore::new();
        s.set_mode(ViewMode::Compare);
        let change = s.commit(Some("Finland")).expect("changed");
        // Active slot advanced to the empty B, so nothing is targeted.
        assert_eq!(change.target, None);
        assert_eq!(s.comparison().get(Slot::A), Some("Finland"));

        s.commit(Some("Norway"));
        assert_eq!(s.target(), Some("Norway"));
        assert!(s.commit(None).is_none());
    }

    #[test]
    fn slot_operations_require_compare_mode() {
        let mut s = SelectionStore::new();
        assert!(s.set_slot(Slot::A, "Finland").is_none());
        assert!(s.set_active_slot(Slot::B).is_none());
        assert!(s.comparison().is_empty());
    }

    #[test]
    fn switching_mode_resets_the_mode_left_behind() {
        let mut s = SelectionStore::new();
        s.commit(Some("Chile"));
        let change = s.set_mode(ViewMode::Compare).expect("changed");
        assert_eq!(change.previous_target.as_deref(), Some("Chile"));
        assert_eq!(change.target, None);
        assert_eq!(s.selected(), None);

        s.set_slot(Slot::A, "Peru");
        s.set_mode(ViewMode::Single);
        assert!(s.comparison().is_empty());
        assert!(s.set_mode(ViewMode::Single).is_none());
    }

    #[test]
    fn reset_clears_current_mode() {
        let mut s = SelectionStore::new();
        s.set_mode(ViewMode::Compare);
        s.set_slot(Slot::A, "Peru");
        s.set_slot(Slot::B, "Chile");
        let change = s.reset().expect("changed");
        assert_eq!(change.previous_target.as_deref(), Some("Chile"));
        assert!(s.comparison().is_empty());
        assert!(s.reset().is_none());
    }
}
