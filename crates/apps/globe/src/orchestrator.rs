use std::collections::BTreeMap;
use std::fmt::Display;

use catalog::{
    ComparisonInsights, CorruptionSense, CountryRecord, Dataset, InsightPolicy, NameResolver,
};
use foundation::time::Millis;
use layers::{RegionHighlighter, RegionStyle};
use runtime::{Event, EventBus, Frame};
use scene::{
    CameraController, CameraPose, ESCAPE_RESET_DURATION, FOCUS_DURATION, FlightKind,
    RESET_DURATION, RegionId, RegionSet, SelectionChange, SelectionStore, Slot, ViewMode,
};
use tracing::{debug, info, warn};

use crate::sequencer::{Effect, TimerKind, TransitionPhase, TransitionSequencer};
use crate::trigger::CameraTrigger;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobeConfig {
    pub corruption_sense: CorruptionSense,
    /// Committed as soon as the orchestrator is built.
    pub initial_selection: Option<String>,
    /// Canonical name to lowercase ISO 3166-1 alpha-2 code, for the reveal flag.
    pub flag_codes: BTreeMap<String, String>,
}

/// What the orchestrator reports to the host, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    SelectionChanged {
        mode: ViewMode,
        target: Option<String>,
    },
    PhaseChanged {
        from: TransitionPhase,
        to: TransitionPhase,
    },
    OverlayShown {
        name: String,
    },
    OverlayFading,
    OverlayHidden,
    CameraFocus {
        name: Option<String>,
        target: CameraPose,
    },
    CameraReset {
        duration: Millis,
    },
    CameraLanded(FlightKind),
    PanelOpened {
        name: String,
        has_data: bool,
    },
    PanelClosing,
    PanelClosed,
    StaleTimerIgnored(TimerKind),
    GeometryUnavailable {
        reason: String,
    },
}

/// Full-screen identity reveal shown while a country is being introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub name: String,
    /// Flag to show; `None` shows the name alone.
    pub iso_code: Option<String>,
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub name: String,
    /// `None` renders as "no data".
    pub record: Option<CountryRecord>,
    pub closing: bool,
}

/// Host-facing facade tying selection, sequencing, camera and styling together.
///
/// Every input is applied synchronously; time only moves in [`Self::update`].
#[derive(Debug)]
pub struct GlobeOrchestrator {
    dataset: Dataset,
    resolver: NameResolver,
    policy: InsightPolicy,
    flag_codes: BTreeMap<String, String>,
    regions: RegionSet,
    interactive: bool,
    selection: SelectionStore,
    sequencer: TransitionSequencer,
    camera: CameraController,
    trigger: CameraTrigger,
    highlighter: RegionHighlighter,
    overlay: Option<Overlay>,
    panel: Option<DetailPanel>,
    frame: Frame,
    events: EventBus<EventKind>,
}

impl GlobeOrchestrator {
    pub fn new(dataset: Dataset, config: GlobeConfig) -> Self {
        Self::with_resolver(dataset, NameResolver::new(), config)
    }

    pub fn with_resolver(dataset: Dataset, resolver: NameResolver, config: GlobeConfig) -> Self {
        let mut orchestrator = Self {
            dataset,
            resolver,
            policy: InsightPolicy {
                corruption: config.corruption_sense,
            },
            flag_codes: config.flag_codes,
            regions: RegionSet::default(),
            interactive: false,
            selection: SelectionStore::new(),
            sequencer: TransitionSequencer::new(),
            camera: CameraController::new(),
            trigger: CameraTrigger::new(),
            highlighter: RegionHighlighter::new(),
            overlay: None,
            panel: None,
            frame: Frame::new(0, 0.0),
            events: EventBus::new(),
        };
        if let Some(name) = config.initial_selection.as_deref() {
            orchestrator.commit_selection(Some(name));
        }
        orchestrator
    }

    /// Installs the fetched geometry. A failed fetch leaves the globe
    /// without regions; list-driven selection keeps working.
    pub fn load_regions<E: Display>(&mut self, source: Result<RegionSet, E>) {
        match source {
            Ok(regions) => {
                info!(regions = regions.len(), "geometry loaded");
                self.regions = regions;
                self.interactive = true;
            }
            Err(err) => {
                warn!("geometry unavailable, globe is not interactive: {err}");
                self.regions = RegionSet::default();
                self.interactive = false;
                self.emit(EventKind::GeometryUnavailable {
                    reason: err.to_string(),
                });
            }
        }
        self.highlighter.clear();
        self.refresh_highlight();
    }

    // --- inputs ---

    /// Selection-commit callback: a canonical name, or `None` to clear.
    pub fn commit_selection(&mut self, name: Option<&str>) {
        let change = self.selection.commit(name);
        self.apply_change(change, RESET_DURATION);
    }

    /// Globe click. Ignored while the globe has no geometry.
    pub fn click_region(&mut self, id: RegionId) {
        if !self.interactive {
            return;
        }
        let Some(region) = self.regions.get(id) else {
            debug!(region = id.0, "click on unknown region");
            return;
        };
        let canonical = self.resolver.resolve(&region.raw_name).into_owned();
        self.camera.stop_rotation();
        self.commit_selection(Some(&canonical));
    }

    pub fn hover_region(&mut self, id: Option<RegionId>) {
        if !self.interactive || !self.highlighter.set_hovered(id) {
            return;
        }
        if id.is_some() {
            self.camera.stop_rotation();
        } else if !self.selection.has_target() {
            self.camera.start_idle_rotation();
        }
        self.refresh_highlight();
    }

    pub fn close_panel(&mut self) {
        let effects = self.sequencer.close_panel(self.frame.time);
        self.apply_effects(effects);
    }

    /// Clears the current mode's selection and flies back to the overview.
    pub fn escape(&mut self) {
        let change = self.selection.reset();
        let clears_target = change
            .as_ref()
            .is_some_and(|c| c.target_changed() && c.target.is_none());
        self.apply_change(change, ESCAPE_RESET_DURATION);
        if !clears_target {
            self.reset_camera(ESCAPE_RESET_DURATION);
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        let change = self.selection.set_mode(mode);
        self.apply_change(change, RESET_DURATION);
    }

    pub fn set_active_slot(&mut self, slot: Slot) {
        let change = self.selection.set_active_slot(slot);
        self.apply_change(change, RESET_DURATION);
    }

    pub fn assign_slot(&mut self, slot: Slot, name: &str) {
        let change = self.selection.set_slot(slot, name);
        self.apply_change(change, RESET_DURATION);
    }

    pub fn reset_comparison(&mut self) {
        if self.selection.mode() != ViewMode::Compare {
            return;
        }
        let change = self.selection.reset();
        self.apply_change(change, RESET_DURATION);
    }

    /// The host's "trigger camera move" flag. A rising edge focuses the
    /// camera on the current target.
    pub fn set_camera_trigger(&mut self, raised: bool) {
        if self.trigger.set(raised) {
            self.focus_target();
        }
    }

    /// Advances the camera, then fires every due phase timer.
    pub fn update(&mut self, frame: Frame) {
        self.frame = frame;
        if let Some(kind) = self.camera.update(frame) {
            debug!(?kind, "camera landed");
            self.hold_rotation_while_hovered();
            self.emit(EventKind::CameraLanded(kind));
        }
        let effects = self.sequencer.update(frame.time);
        self.apply_effects(effects);
    }

    // --- observed state ---

    pub fn phase(&self) -> TransitionPhase {
        self.sequencer.phase()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.camera.is_auto_rotating()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// One style per loaded region, indexed by [`RegionId`].
    pub fn styles(&self) -> Vec<RegionStyle> {
        self.highlighter.styles()
    }

    /// Available in compare mode once both slots name countries with data.
    pub fn comparison_insights(&self) -> Option<ComparisonInsights> {
        if self.selection.mode() != ViewMode::Compare {
            return None;
        }
        self.selection
            .comparison()
            .insights(&self.dataset, self.policy)
    }

    pub fn events(&self) -> &[Event<EventKind>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event<EventKind>> {
        self.events.drain()
    }

    // --- internals ---

    fn apply_change(&mut self, change: Option<SelectionChange>, reset_duration: Millis) {
        let Some(change) = change else {
            return;
        };
        info!(
            mode = ?change.mode,
            target = change.target.as_deref().unwrap_or("-"),
            "selection changed"
        );
        self.emit(EventKind::SelectionChanged {
            mode: change.mode,
            target: change.target.clone(),
        });
        self.refresh_highlight();

        // Only single mode runs the reveal sequence; compare mode keeps it idle.
        let sequenced = match change.mode {
            ViewMode::Single => change.target.as_deref(),
            ViewMode::Compare => None,
        };
        let effects = self.sequencer.select(sequenced, self.frame.time);
        self.apply_effects(effects);

        if !change.target_changed() {
            return;
        }
        match change.target {
            Some(_) => self.camera.stop_rotation(),
            None => self.reset_camera(reset_duration),
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PhaseChanged { from, to } => {
                    debug!(?from, ?to, "phase changed");
                    self.emit(EventKind::PhaseChanged { from, to });
                }
                Effect::ShowOverlay { name } => {
                    self.overlay = Some(Overlay {
                        iso_code: self.flag_codes.get(&name).cloned(),
                        name: name.clone(),
                        fading: false,
                    });
                    self.emit(EventKind::OverlayShown { name });
                }
                Effect::FadeOverlay => {
                    if let Some(overlay) = &mut self.overlay {
                        overlay.fading = true;
                        self.emit(EventKind::OverlayFading);
                    }
                }
                Effect::HideOverlay => {
                    if self.overlay.take().is_some() {
                        self.emit(EventKind::OverlayHidden);
                    }
                }
                Effect::RaiseCameraTrigger => self.set_camera_trigger(true),
                Effect::LowerCameraTrigger => self.set_camera_trigger(false),
                Effect::OpenPanel { name } => {
                    let record = self.dataset.record_or_world(&name).cloned();
                    if record.is_none() {
                        debug!(name = name.as_str(), "no data for selection");
                    }
                    let has_data = record.is_some();
                    self.panel = Some(DetailPanel {
                        name: name.clone(),
                        record,
                        closing: false,
                    });
                    self.emit(EventKind::PanelOpened { name, has_data });
                }
                Effect::BeginClosing => {
                    if let Some(panel) = &mut self.panel {
                        panel.closing = true;
                        self.emit(EventKind::PanelClosing);
                    }
                }
                Effect::ClosePanel => {
                    if self.panel.take().is_some() {
                        self.emit(EventKind::PanelClosed);
                    }
                }
                Effect::ClearSelection => {
                    let change = self.selection.commit(None);
                    self.apply_change(change, RESET_DURATION);
                }
                Effect::StaleTimer(kind) => {
                    debug!(?kind, "stale timer ignored");
                    self.emit(EventKind::StaleTimerIgnored(kind));
                }
            }
        }
    }

    fn focus_target(&mut self) {
        let name = self.selection.target().map(str::to_string);
        let region = name
            .as_deref()
            .and_then(|n| self.regions.find_canonical(&self.resolver, n))
            .map(|(_, region)| region);
        if name.is_some() && region.is_none() {
            debug!(
                name = name.as_deref().unwrap_or("-"),
                "no geometry for selection, using overview pose"
            );
        }
        let target = CameraController::target_for(region);
        self.camera.focus_pose(target, FOCUS_DURATION);
        self.emit(EventKind::CameraFocus { name, target });
    }

    fn reset_camera(&mut self, duration: Millis) {
        self.camera.reset(duration);
        self.hold_rotation_while_hovered();
        self.emit(EventKind::CameraReset { duration });
    }

    /// A reset resumes the idle spin on landing; a hovered region keeps it off.
    fn hold_rotation_while_hovered(&mut self) {
        if self.highlighter.hovered().is_some() {
            self.camera.stop_rotation();
        }
    }

    fn refresh_highlight(&mut self) {
        let target = self.selection.target();
        self.highlighter.recompute(&self.regions, &self.resolver, target);
    }

    fn emit(&mut self, kind: EventKind) {
        self.events.emit(self.frame, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::{EventKind, GlobeConfig, GlobeOrchestrator};
    use crate::sequencer::TransitionPhase;
    use catalog::{CountryRecord, Dataset, Factor, ScoreLead, Side};
    use foundation::math::LonLat;
    use layers::RegionStyle;
    use pretty_assertions::assert_eq;
    use runtime::FrameClock;
    use scene::{
        CameraController, CameraPose, FlightKind, OVERVIEW_POSE, Region, RegionId, RegionSet,
        Slot, ViewMode,
    };

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_pose(actual: CameraPose, expected: CameraPose) {
        assert_close(actual.lat, expected.lat, 1e-6);
        assert_close(actual.lng, expected.lng, 1e-6);
        assert_close(actual.altitude, expected.altitude, 1e-6);
    }

    /// Idle rotation resumes on landing, so only latitude and altitude are stable.
    fn assert_overview(actual: CameraPose) {
        assert_close(actual.lat, OVERVIEW_POSE.lat, 1e-6);
        assert_close(actual.altitude, OVERVIEW_POSE.altitude, 1e-6);
    }

    fn square(name: &str, lng: f64, lat: f64) -> Region {
        let ring = [
            [lng, lat],
            [lng + 2.0, lat],
            [lng + 2.0, lat + 2.0],
            [lng, lat + 2.0],
        ]
        .into_iter()
        .map(LonLat::from)
        .collect();
        Region::polygon(name, vec![ring])
    }

    fn regions() -> RegionSet {
        RegionSet::new(vec![
            square("Finland", 24.0, 62.0),
            square("Norway", 8.0, 60.0),
            square("United States of America", -100.0, 38.0),
        ])
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            CountryRecord::new("Finland", Some(1), 7.8).with_factor(Factor::Freedom, 0.80),
            CountryRecord::new("Norway", Some(7), 7.2).with_factor(Factor::Freedom, 0.65),
            CountryRecord::new("United States", Some(23), 6.7),
        ])
        .unwrap()
    }

    fn globe() -> GlobeOrchestrator {
        let mut o = GlobeOrchestrator::new(dataset(), GlobeConfig::default());
        o.load_regions(Ok::<_, String>(regions()));
        o
    }

    fn pose_of(o: &GlobeOrchestrator, id: u32) -> CameraPose {
        CameraController::target_for(o.regions().get(RegionId(id)))
    }

    /// 60 Hz fixed-step driver.
    struct Clock(FrameClock);

    impl Clock {
        fn new() -> Self {
            Self(FrameClock::from_fps(60.0).expect("clock"))
        }

        fn run(&mut self, o: &mut GlobeOrchestrator, seconds: f64) {
            for _ in 0..self.0.frames_in(seconds) {
                o.update(self.0.tick());
            }
        }
    }

    fn kinds(o: &mut GlobeOrchestrator) -> Vec<EventKind> {
        o.drain_events().into_iter().map(|e| e.payload).collect()
    }

    fn panels_opened(events: &[EventKind]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                EventKind::PanelOpened { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn selection_runs_reveal_camera_and_panel_in_order() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        assert_eq!(o.phase(), TransitionPhase::Revealing);
        assert_eq!(o.overlay().map(|v| v.name.as_str()), Some("Finland"));
        assert!(!o.is_auto_rotating());
        assert_eq!(o.styles()[0], RegionStyle::SELECTED);

        clock.run(&mut o, 3.0);
        assert!(o.overlay().is_some_and(|v| v.fading));

        clock.run(&mut o, 1.0);
        assert_eq!(o.phase(), TransitionPhase::CameraMoving);
        assert!(o.overlay().is_none());

        clock.run(&mut o, 1.5);
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);
        let panel = o.panel().expect("panel");
        assert_eq!(panel.name, "Finland");
        assert_eq!(panel.record.as_ref().map(|r| r.rank), Some(Some(1)));
        assert_pose(o.camera_pose(), pose_of(&o, 0));

        let events = kinds(&mut o);
        let focus: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, EventKind::CameraFocus { .. }))
            .collect();
        assert_eq!(focus.len(), 1);
    }

    #[test]
    fn second_selection_before_any_timer_wins_outright() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        o.commit_selection(Some("Norway"));
        clock.run(&mut o, 10.0);

        let events = kinds(&mut o);
        assert_eq!(panels_opened(&events), vec!["Norway".to_string()]);
        for e in &events {
            if let EventKind::CameraFocus { name, .. } = e {
                assert_eq!(name.as_deref(), Some("Norway"));
            }
        }
        assert!(!events
            .iter()
            .any(|e| matches!(e, EventKind::StaleTimerIgnored(_))));
        assert_pose(o.camera_pose(), pose_of(&o, 1));
        assert_eq!(o.styles()[0], RegionStyle::DEFAULT);
        assert_eq!(o.styles()[1], RegionStyle::SELECTED);
    }

    #[test]
    fn clearing_while_camera_moves_returns_to_overview_without_closing() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        clock.run(&mut o, 4.0);
        assert_eq!(o.phase(), TransitionPhase::CameraMoving);
        o.drain_events();

        o.commit_selection(None);
        assert_eq!(o.phase(), TransitionPhase::Idle);
        let events = kinds(&mut o);
        assert!(!events.contains(&EventKind::PanelClosing));

        clock.run(&mut o, 10.0);
        assert_overview(o.camera_pose());
        assert!(o.is_auto_rotating());
        assert!(o.panel().is_none());
        assert!(panels_opened(&kinds(&mut o)).is_empty());
    }

    #[test]
    fn clearing_an_open_panel_skips_the_closing_animation() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        clock.run(&mut o, 6.0);
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);
        o.drain_events();

        o.commit_selection(None);
        let events = kinds(&mut o);
        assert!(events.contains(&EventKind::PanelClosed));
        assert!(!events.contains(&EventKind::PanelClosing));
        assert_eq!(o.phase(), TransitionPhase::Idle);

        clock.run(&mut o, 2.0);
        assert_overview(o.camera_pose());
        assert!(o.is_auto_rotating());
    }

    #[test]
    fn closing_the_panel_clears_selection_after_teardown() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Norway"));
        clock.run(&mut o, 6.0);
        o.close_panel();
        assert_eq!(o.phase(), TransitionPhase::Closing);
        assert!(o.panel().is_some_and(|p| p.closing));

        clock.run(&mut o, 0.5);
        assert_eq!(o.selection().selected(), Some("Norway"));

        clock.run(&mut o, 0.5);
        assert_eq!(o.phase(), TransitionPhase::Idle);
        assert_eq!(o.selection().selected(), None);
        assert!(o.panel().is_none());

        clock.run(&mut o, 2.0);
        assert_overview(o.camera_pose());
        assert!(o.is_auto_rotating());
    }

    #[test]
    fn world_opens_the_panel_immediately_with_the_aggregate() {
        let mut o = globe();
        o.commit_selection(Some("World (Overall)"));
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);
        let panel = o.panel().expect("panel");
        let record = panel.record.as_ref().expect("aggregate");
        assert_close(record.score, (7.8 + 7.2 + 6.7) / 3.0, 1e-12);
        assert!(o.overlay().is_none());
        assert!(!o.is_auto_rotating());
        assert!(o.styles().iter().all(|s| *s == RegionStyle::DEFAULT));
    }

    #[test]
    fn unknown_names_degrade_to_no_data_and_overview_pose() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Atlantis"));
        clock.run(&mut o, 6.0);
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);
        let panel = o.panel().expect("panel");
        assert_eq!(panel.record, None);
        assert_pose(o.camera_pose(), OVERVIEW_POSE);
    }

    #[test]
    fn clicks_resolve_geometry_names() {
        let mut o = globe();
        o.click_region(RegionId(2));
        assert_eq!(o.selection().selected(), Some("United States"));
        assert_eq!(o.styles()[2], RegionStyle::SELECTED);
        o.click_region(RegionId(42));
        assert_eq!(o.selection().selected(), Some("United States"));
    }

    #[test]
    fn geometry_failure_leaves_list_selection_working() {
        let mut o = GlobeOrchestrator::new(dataset(), GlobeConfig::default());
        o.load_regions(Err::<RegionSet, _>("fetch failed"));
        assert!(!o.is_interactive());
        assert_eq!(
            kinds(&mut o),
            vec![EventKind::GeometryUnavailable {
                reason: "fetch failed".to_string()
            }]
        );

        o.click_region(RegionId(0));
        assert_eq!(o.selection().selected(), None);

        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        clock.run(&mut o, 6.0);
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);
        assert!(o.panel().is_some_and(|p| p.record.is_some()));
        assert_pose(o.camera_pose(), OVERVIEW_POSE);
    }

    #[test]
    fn hover_pauses_rotation_and_yields_to_selection() {
        let mut o = globe();
        o.hover_region(Some(RegionId(1)));
        assert!(!o.is_auto_rotating());
        assert_eq!(o.styles()[1], RegionStyle::HOVERED);

        o.hover_region(None);
        assert!(o.is_auto_rotating());
        assert_eq!(o.styles()[1], RegionStyle::DEFAULT);

        o.commit_selection(Some("Finland"));
        o.hover_region(Some(RegionId(1)));
        assert_eq!(o.styles()[0], RegionStyle::SELECTED);
        assert_eq!(o.styles()[1], RegionStyle::DEFAULT);
        o.hover_region(None);
        assert!(!o.is_auto_rotating());
    }

    #[test]
    fn hover_keeps_rotation_off_through_a_reset_landing() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        clock.run(&mut o, 6.0);
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);

        o.hover_region(Some(RegionId(1)));
        o.commit_selection(None);
        clock.run(&mut o, 3.0);
        assert!(kinds(&mut o).contains(&EventKind::CameraLanded(FlightKind::Reset)));
        assert_overview(o.camera_pose());
        assert!(!o.is_auto_rotating());

        o.hover_region(None);
        assert!(o.is_auto_rotating());
    }

    #[test]
    fn escape_at_overview_keeps_rotation_off_while_hovered() {
        let mut o = globe();
        o.hover_region(Some(RegionId(2)));
        o.escape();
        assert!(!o.is_auto_rotating());
    }

    #[test]
    fn reselecting_during_teardown_does_not_restart() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Norway"));
        clock.run(&mut o, 6.0);
        o.close_panel();
        clock.run(&mut o, 0.2);
        o.drain_events();

        o.commit_selection(Some("Norway"));
        assert_eq!(o.phase(), TransitionPhase::Closing);
        assert!(kinds(&mut o).is_empty());

        clock.run(&mut o, 1.0);
        assert_eq!(o.phase(), TransitionPhase::Idle);
        assert_eq!(o.selection().target(), None);
        assert!(o.panel().is_none());
    }

    #[test]
    fn camera_trigger_only_acts_on_rising_edges() {
        let mut o = globe();
        o.commit_selection(Some("Finland"));
        o.drain_events();
        o.set_camera_trigger(true);
        o.set_camera_trigger(true);
        let focus = kinds(&mut o)
            .into_iter()
            .filter(|e| matches!(e, EventKind::CameraFocus { .. }))
            .count();
        assert_eq!(focus, 1);
    }

    #[test]
    fn escape_returns_to_overview_quickly() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        clock.run(&mut o, 6.0);
        o.escape();
        assert_eq!(o.phase(), TransitionPhase::Idle);
        assert_eq!(o.selection().selected(), None);

        clock.run(&mut o, 1.05);
        assert_overview(o.camera_pose());
        assert!(o.is_auto_rotating());
    }

    #[test]
    fn compare_mode_fills_slots_without_sequencing() {
        let mut o = globe();
        o.set_mode(ViewMode::Compare);
        o.assign_slot(Slot::A, "Finland");
        assert!(o.comparison_insights().is_none());
        o.assign_slot(Slot::B, "Norway");
        assert_eq!(o.phase(), TransitionPhase::Idle);
        assert!(o.overlay().is_none());
        assert_eq!(o.styles()[1], RegionStyle::SELECTED);

        let insights = o.comparison_insights().expect("insights");
        assert!(matches!(
            insights.score,
            ScoreLead::Leads { side: Side::A, .. }
        ));

        o.set_active_slot(Slot::A);
        assert_eq!(o.styles()[0], RegionStyle::SELECTED);
        assert_eq!(o.styles()[1], RegionStyle::DEFAULT);

        o.reset_comparison();
        assert!(o.selection().comparison().is_empty());
        o.set_mode(ViewMode::Single);
        assert!(o.comparison_insights().is_none());
    }

    #[test]
    fn leaving_single_mode_abandons_the_sequence() {
        let mut o = globe();
        let mut clock = Clock::new();
        o.commit_selection(Some("Finland"));
        clock.run(&mut o, 1.0);
        o.set_mode(ViewMode::Compare);
        assert_eq!(o.phase(), TransitionPhase::Idle);
        assert!(o.overlay().is_none());
        clock.run(&mut o, 10.0);
        assert!(o.panel().is_none());
    }

    #[test]
    fn overlay_carries_the_configured_flag_code() {
        let config = GlobeConfig {
            flag_codes: [("Finland".to_string(), "fi".to_string())].into(),
            ..GlobeConfig::default()
        };
        let mut o = GlobeOrchestrator::new(dataset(), config);
        o.commit_selection(Some("Finland"));
        assert_eq!(o.overlay().and_then(|v| v.iso_code.as_deref()), Some("fi"));

        o.commit_selection(Some("Norway"));
        let overlay = o.overlay().expect("overlay");
        assert_eq!(overlay.name, "Norway");
        assert_eq!(overlay.iso_code, None);
    }

    #[test]
    fn initial_selection_is_committed_on_build() {
        let o = GlobeOrchestrator::new(
            dataset(),
            GlobeConfig {
                initial_selection: Some("World (Overall)".to_string()),
                ..GlobeConfig::default()
            },
        );
        assert_eq!(o.phase(), TransitionPhase::PanelOpen);
        assert!(o.events().iter().any(|e| matches!(
            e.payload,
            EventKind::PanelOpened { has_data: true, .. }
        )));
    }
}
