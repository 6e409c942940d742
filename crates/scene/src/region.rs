use catalog::NameResolver;
use foundation::math::LonLat;

/// Ordered boundary ring of `(lng, lat)` points.
pub type Ring = Vec<LonLat>;

/// Index of a region within its [`RegionSet`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u32);

impl RegionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    /// Outer ring followed by any holes.
    Polygon(Vec<Ring>),
    /// Disjoint landmasses, each an outer ring followed by holes.
    MultiPolygon(Vec<Vec<Ring>>),
}

/// A clickable country boundary. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub raw_name: String,
    pub geometry: RegionGeometry,
}

impl Region {
    pub fn polygon(raw_name: impl Into<String>, rings: Vec<Ring>) -> Self {
        Self {
            raw_name: raw_name.into(),
            geometry: RegionGeometry::Polygon(rings),
        }
    }

    pub fn multi_polygon(raw_name: impl Into<String>, parts: Vec<Vec<Ring>>) -> Self {
        Self {
            raw_name: raw_name.into(),
            geometry: RegionGeometry::MultiPolygon(parts),
        }
    }

    /// Outer ring of every part. Holes never contribute to the aim point.
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        let rings: Vec<&Ring> = match &self.geometry {
            RegionGeometry::Polygon(rings) => rings.first().into_iter().collect(),
            RegionGeometry::MultiPolygon(parts) => {
                parts.iter().filter_map(|part| part.first()).collect()
            }
        };
        rings.into_iter()
    }

    /// Arithmetic mean of every outer-ring point across all parts.
    ///
    /// Parts are pooled, not averaged per part, so a part with more points
    /// pulls harder. Returns `None` when there are no finite points.
    pub fn centroid(&self) -> Option<LonLat> {
        let mut sum_lng = 0.0;
        let mut sum_lat = 0.0;
        let mut count = 0usize;
        for p in self.outer_rings().flatten().filter(|p| p.is_finite()) {
            sum_lng += p.lng;
            sum_lat += p.lat;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(LonLat::new(sum_lng / n, sum_lat / n))
    }
}

/// The loaded boundary collection.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> + '_ {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (RegionId(i as u32), r))
    }

    /// First region whose resolved name equals `canonical`.
    pub fn find_canonical(
        &self,
        resolver: &NameResolver,
        canonical: &str,
    ) -> Option<(RegionId, &Region)> {
        self.iter()
            .find(|(_, r)| resolver.resolve(&r.raw_name) == canonical)
    }
}
