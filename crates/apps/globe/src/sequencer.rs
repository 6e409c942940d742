//! Timed phase machine for one selection lifecycle.
//!
//! `Idle -> Revealing -> CameraMoving -> PanelOpen -> Closing -> Idle`, with
//! the world pseudo-entity jumping straight from `Idle` to `PanelOpen`.
//!
//! The sequencer never touches the camera, the overlay or the panel itself.
//! Every call returns the [`Effect`]s the owner has to apply, in order.

use catalog::is_world;
use foundation::time::{Millis, Time};
use runtime::{Generation, Timer, TimerQueue};

/// How long the identity overlay is shown before it starts fading.
pub const REVEAL_DISPLAY: Millis = Millis(2500);
pub const REVEAL_FADE: Millis = Millis(1000);
/// Time given to the camera flight before the panel opens.
pub const CAMERA_SETTLE: Millis = Millis(1500);
pub const CLOSE_TEARDOWN: Millis = Millis(800);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Revealing,
    CameraMoving,
    PanelOpen,
    Closing,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimerKind {
    RevealFade,
    RevealDone,
    CameraSettled,
    TeardownDone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PhaseChanged {
        from: TransitionPhase,
        to: TransitionPhase,
    },
    ShowOverlay {
        name: String,
    },
    FadeOverlay,
    HideOverlay,
    RaiseCameraTrigger,
    LowerCameraTrigger,
    OpenPanel {
        name: String,
    },
    BeginClosing,
    ClosePanel,
    /// Teardown finished; the owner clears the selection.
    ClearSelection,
    /// A timer from an abandoned lifecycle fired and was dropped.
    StaleTimer(TimerKind),
}

#[derive(Debug, Default)]
pub struct TransitionSequencer {
    phase: TransitionPhase,
    target: Option<String>,
    generation: Generation,
    timers: TimerQueue<TimerKind>,
    trigger_raised: bool,
}

impl TransitionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Name the current lifecycle is about.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Starts a lifecycle for `target`, abandoning the one in flight.
    ///
    /// Repeating the current target is a no-op in every phase, including
    /// `Closing`. `None` drops straight to `Idle`.
    pub fn select(&mut self, target: Option<&str>, now: Time) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.target.as_deref() == target {
            return effects;
        }

        self.abandon(&mut effects);
        self.target = target.map(str::to_string);

        let Some(name) = target else {
            return effects;
        };
        if is_world(name) {
            self.enter(TransitionPhase::PanelOpen, &mut effects);
            effects.push(Effect::OpenPanel {
                name: name.to_string(),
            });
            return effects;
        }

        self.enter(TransitionPhase::Revealing, &mut effects);
        effects.push(Effect::ShowOverlay {
            name: name.to_string(),
        });
        let fade_at = now + REVEAL_DISPLAY;
        self.timers.schedule(self.generation, fade_at, TimerKind::RevealFade);
        self.timers.schedule(
            self.generation,
            fade_at + REVEAL_FADE,
            TimerKind::RevealDone,
        );
        effects
    }

    /// User dismissed the panel. Ignored unless it is fully open.
    pub fn close_panel(&mut self, now: Time) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.phase != TransitionPhase::PanelOpen {
            return effects;
        }
        self.enter(TransitionPhase::Closing, &mut effects);
        effects.push(Effect::BeginClosing);
        self.timers.schedule_after(
            self.generation,
            now,
            CLOSE_TEARDOWN,
            TimerKind::TeardownDone,
        );
        effects
    }

    /// Fires every timer due at `now`, including ones scheduled by timers
    /// that fired earlier in the same call.
    pub fn update(&mut self, now: Time) -> Vec<Effect> {
        let mut effects = Vec::new();
        loop {
            let due = self.timers.poll_due(now);
            if due.is_empty() {
                break;
            }
            for timer in due {
                effects.extend(self.on_timer(timer));
            }
        }
        effects
    }

    /// Applies one fired timer. Timers from an older generation, or that no
    /// longer match the phase, only report [`Effect::StaleTimer`].
    pub fn on_timer(&mut self, timer: Timer<TimerKind>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if timer.generation != self.generation {
            effects.push(Effect::StaleTimer(timer.kind));
            return effects;
        }

        match (self.phase, timer.kind) {
            (TransitionPhase::Revealing, TimerKind::RevealFade) => {
                effects.push(Effect::FadeOverlay);
            }
            (TransitionPhase::Revealing, TimerKind::RevealDone) => {
                effects.push(Effect::HideOverlay);
                self.enter(TransitionPhase::CameraMoving, &mut effects);
                self.trigger_raised = true;
                effects.push(Effect::RaiseCameraTrigger);
                // Chained from the due time so the schedule does not drift
                // with frame rate.
                self.timers.schedule(
                    self.generation,
                    timer.due + CAMERA_SETTLE,
                    TimerKind::CameraSettled,
                );
            }
            (TransitionPhase::CameraMoving, TimerKind::CameraSettled) => {
                self.enter(TransitionPhase::PanelOpen, &mut effects);
                if let Some(name) = self.target.clone() {
                    effects.push(Effect::OpenPanel { name });
                }
            }
            (TransitionPhase::Closing, TimerKind::TeardownDone) => {
                effects.push(Effect::ClosePanel);
                self.lower_trigger(&mut effects);
                self.target = None;
                self.generation = self.generation.next();
                self.enter(TransitionPhase::Idle, &mut effects);
                effects.push(Effect::ClearSelection);
            }
            (_, kind) => effects.push(Effect::StaleTimer(kind)),
        }
        effects
    }

    /// Cancels the in-flight lifecycle and removes what it put on screen.
    fn abandon(&mut self, effects: &mut Vec<Effect>) {
        self.timers.cancel_generation(self.generation);
        self.generation = self.generation.next();
        match self.phase {
            TransitionPhase::Revealing => effects.push(Effect::HideOverlay),
            TransitionPhase::PanelOpen | TransitionPhase::Closing => {
                effects.push(Effect::ClosePanel)
            }
            TransitionPhase::Idle | TransitionPhase::CameraMoving => {}
        }
        self.lower_trigger(effects);
        self.enter(TransitionPhase::Idle, effects);
    }

    fn lower_trigger(&mut self, effects: &mut Vec<Effect>) {
        if self.trigger_raised {
            self.trigger_raised = false;
            effects.push(Effect::LowerCameraTrigger);
        }
    }

    fn enter(&mut self, to: TransitionPhase, effects: &mut Vec<Effect>) {
        if self.phase == to {
            return;
        }
        effects.push(Effect::PhaseChanged {
            from: self.phase,
            to,
        });
        self.phase = to;
    }
}
