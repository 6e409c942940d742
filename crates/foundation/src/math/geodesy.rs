/// Geographic position in degrees.
///
/// Boundary data arrives as `[lng, lat]` pairs, so longitude comes first.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LonLat {
    pub lng: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

/// Wraps a longitude into `[-180, 180)`.
pub fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Signed longitude change from `from` to `to` taking the short way around.
pub fn shortest_lng_delta(from: f64, to: f64) -> f64 {
    wrap_lng(to - from)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
