//! Persistent globe camera with idle rotation and eased fly-to animations.
//!
//! There is exactly one pose. Idle rotation, `focus` and `reset` all write
//! to it under last-writer-wins: starting a flight switches rotation off and
//! replaces any flight already in progress.

use foundation::math::{LonLat, ease_in_out_cubic, lerp, shortest_lng_delta, wrap_lng};
use foundation::time::{Millis, Time, TimeSpan};
use runtime::Frame;

use crate::region::Region;

/// Altitude used whenever the camera aims at a country, regardless of its size.
pub const FOCUS_ALTITUDE: f64 = 0.5;

/// Altitude of the overview pose.
pub const OVERVIEW_ALTITUDE: f64 = 2.5;

pub const OVERVIEW_POSE: CameraPose = CameraPose {
    lat: 0.0,
    lng: 0.0,
    altitude: OVERVIEW_ALTITUDE,
};

pub const FOCUS_DURATION: Millis = Millis(1500);
pub const RESET_DURATION: Millis = Millis(1500);
/// Escape snaps back a little faster than a regular close.
pub const ESCAPE_RESET_DURATION: Millis = Millis(1000);

/// Idle spin in degrees of longitude per second.
pub const AUTO_ROTATE_DEG_PER_S: f64 = 3.36;

const POSE_EPSILON: f64 = 1e-9;

/// Camera position over the globe; altitude is in globe radii.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl CameraPose {
    pub fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self { lat, lng, altitude }
    }

    pub fn looking_at(point: LonLat, altitude: f64) -> Self {
        Self::new(point.lat, point.lng, altitude)
    }

    pub fn approx_eq(&self, other: &CameraPose) -> bool {
        (self.lat - other.lat).abs() <= POSE_EPSILON
            && shortest_lng_delta(self.lng, other.lng).abs() <= POSE_EPSILON
            && (self.altitude - other.altitude).abs() <= POSE_EPSILON
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        OVERVIEW_POSE
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlightKind {
    Focus,
    Reset,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Flight {
    kind: FlightKind,
    from: CameraPose,
    to: CameraPose,
    span: TimeSpan,
}

impl Flight {
    fn pose_at(&self, now: Time) -> CameraPose {
        let t = ease_in_out_cubic(self.span.progress(now));
        let d_lng = shortest_lng_delta(self.from.lng, self.to.lng);
        CameraPose {
            lat: lerp(self.from.lat, self.to.lat, t),
            lng: wrap_lng(self.from.lng + d_lng * t),
            altitude: lerp(self.from.altitude, self.to.altitude, t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraController {
    pose: CameraPose,
    auto_rotating: bool,
    flight: Option<Flight>,
    now: Time,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            pose: OVERVIEW_POSE,
            auto_rotating: true,
            flight: None,
            now: Time::ZERO,
        }
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotating
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Destination of the flight in progress, if any.
    pub fn flight_target(&self) -> Option<CameraPose> {
        self.flight.map(|f| f.to)
    }

    /// Resumes the idle spin. Ignored while a flight is in progress; the
    /// caller decides whether a selection forbids it.
    pub fn start_idle_rotation(&mut self) {
        if self.flight.is_none() {
            self.auto_rotating = true;
        }
    }

    pub fn stop_rotation(&mut self) {
        self.auto_rotating = false;
    }

    /// Pose the camera aims for when focusing `region`.
    ///
    /// Regions without usable geometry fall back to the overview pose.
    pub fn target_for(region: Option<&Region>) -> CameraPose {
        region
            .and_then(Region::centroid)
            .map(|c| CameraPose::looking_at(c, FOCUS_ALTITUDE))
            .unwrap_or(OVERVIEW_POSE)
    }

    pub fn focus(&mut self, region: &Region, duration: Millis) -> CameraPose {
        let target = Self::target_for(Some(region));
        self.focus_pose(target, duration);
        target
    }

    /// Flies to `target` and holds there.
    pub fn focus_pose(&mut self, target: CameraPose, duration: Millis) {
        self.stop_rotation();
        self.fly(FlightKind::Focus, target, duration);
    }

    /// Flies back to the overview pose and resumes idle rotation on arrival.
    pub fn reset(&mut self, duration: Millis) {
        self.stop_rotation();
        self.fly(FlightKind::Reset, OVERVIEW_POSE, duration);
        if self.flight.is_none() {
            self.auto_rotating = true;
        }
    }

    fn fly(&mut self, kind: FlightKind, target: CameraPose, duration: Millis) {
        if let Some(flight) = &mut self.flight {
            if flight.to.approx_eq(&target) {
                // Same destination: keep the running flight so nothing jumps.
                flight.kind = kind;
                return;
            }
        } else if self.pose.approx_eq(&target) {
            return;
        }

        self.flight = Some(Flight {
            kind,
            from: self.pose,
            to: target,
            span: TimeSpan::starting_at(self.now, duration),
        });
        // A zero-length flight lands immediately.
        self.advance_flight();
    }

    /// Advances the flight and idle rotation to `frame.time`.
    ///
    /// Returns the kind of flight that landed during this frame.
    pub fn update(&mut self, frame: Frame) -> Option<FlightKind> {
        self.now = frame.time;
        if self.flight.is_some() {
            return self.advance_flight();
        }
        if self.auto_rotating {
            self.pose.lng = wrap_lng(self.pose.lng + AUTO_ROTATE_DEG_PER_S * frame.dt_s);
        }
        None
    }

    fn advance_flight(&mut self) -> Option<FlightKind> {
        let flight = self.flight?;
        if flight.span.progress(self.now) >= 1.0 {
            self.pose = flight.to;
            self.flight = None;
            if flight.kind == FlightKind::Reset {
                self.auto_rotating = true;
            }
            return Some(flight.kind);
        }
        self.pose = flight.pose_at(self.now);
        None
    }
}
