use foundation::math::LonLat;
use scene::{Region, Ring};
use serde::Deserialize;

use crate::DecodedRegions;

/// Positions may carry a third (altitude) value; only lng/lat are kept.
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Properties>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

pub fn regions_from_features(fc: FeatureCollection) -> DecodedRegions {
    let mut out = DecodedRegions::default();
    for feature in fc.features {
        let name = feature
            .properties
            .and_then(|p| p.name)
            .filter(|n| !n.trim().is_empty());
        let region = match (name, feature.geometry) {
            (Some(name), Some(Geometry::Polygon { coordinates })) => {
                Region::polygon(name, rings(coordinates))
            }
            (Some(name), Some(Geometry::MultiPolygon { coordinates })) => {
                Region::multi_polygon(name, coordinates.into_iter().map(rings).collect())
            }
            _ => {
                out.skipped += 1;
                continue;
            }
        };
        out.regions.push(region);
    }
    out
}

fn rings(coordinates: Vec<Vec<Position>>) -> Vec<Ring> {
    coordinates.into_iter().map(ring).collect()
}

fn ring(positions: Vec<Position>) -> Ring {
    positions
        .into_iter()
        .filter_map(|p| match p.as_slice() {
            [lng, lat, ..] => Some(LonLat::new(*lng, *lat)),
            _ => None,
        })
        .collect()
}
