use catalog::NameResolver;
use scene::{RegionId, RegionSet};

use crate::symbology::RegionStyle;

/// Emphasis class of a region, in priority order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    Selected,
    Hovered,
    #[default]
    Default,
}

impl Emphasis {
    pub fn style(self) -> RegionStyle {
        match self {
            Emphasis::Selected => RegionStyle::SELECTED,
            Emphasis::Hovered => RegionStyle::HOVERED,
            Emphasis::Default => RegionStyle::DEFAULT,
        }
    }
}

/// Per-region emphasis derived from the current target and hover.
///
/// Holds no selection of its own: callers pass the target on every
/// [`RegionHighlighter::recompute`], so the styles can never lag behind the
/// selection store.
#[derive(Debug, Clone, Default)]
pub struct RegionHighlighter {
    hovered: Option<RegionId>,
    emphasis: Vec<Emphasis>,
}

impl RegionHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<RegionId> {
        self.hovered
    }

    /// Returns `true` if the hovered region changed.
    pub fn set_hovered(&mut self, hovered: Option<RegionId>) -> bool {
        if self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    /// Rebuilds every region's emphasis from scratch.
    pub fn recompute(
        &mut self,
        regions: &RegionSet,
        resolver: &NameResolver,
        target: Option<&str>,
    ) {
        let hovered = self.hovered;
        self.emphasis = regions
            .iter()
            .map(|(id, region)| {
                let canonical = resolver.resolve(&region.raw_name);
                classify(&canonical, id, target, hovered)
            })
            .collect();
    }

    pub fn emphasis(&self, id: RegionId) -> Emphasis {
        self.emphasis.get(id.index()).copied().unwrap_or_default()
    }

    pub fn styles(&self) -> Vec<RegionStyle> {
        self.emphasis.iter().map(|e| e.style()).collect()
    }

    pub fn selected(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.emphasis
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Emphasis::Selected)
            .map(|(i, _)| RegionId(i as u32))
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.emphasis.clear();
    }
}

/// Selection outranks hover; hover shows only while nothing is selected.
pub fn classify(
    canonical: &str,
    id: RegionId,
    target: Option<&str>,
    hovered: Option<RegionId>,
) -> Emphasis {
    match target {
        Some(t) if t == canonical => Emphasis::Selected,
        None if hovered == Some(id) => Emphasis::Hovered,
        _ => Emphasis::Default,
    }
}
