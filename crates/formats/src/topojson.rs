//! TopoJSON decoding, as served by the world-atlas boundary packages.
//!
//! Polygons reference shared arcs by index; a negative index `i` means arc
//! `!i` traversed backwards. Quantized topologies store arcs delta-encoded
//! and carry a `transform` back to degrees.

use std::collections::BTreeMap;

use foundation::math::LonLat;
use scene::{Region, Ring};
use serde::Deserialize;

use crate::DecodedRegions;
use crate::geojson::Properties;

/// Object decoded when a topology holds several.
pub const PREFERRED_OBJECT: &str = "countries";

#[derive(Debug, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub objects: BTreeMap<String, TopoObject>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Copy, Clone, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TopoObject {
    GeometryCollection {
        #[serde(default)]
        geometries: Vec<TopoObject>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        properties: Option<Properties>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        properties: Option<Properties>,
    },
    #[serde(other)]
    Unsupported,
}

pub fn regions_from_topology(topo: &Topology) -> DecodedRegions {
    let mut out = DecodedRegions::default();
    let object = topo
        .objects
        .get(PREFERRED_OBJECT)
        .or_else(|| topo.objects.values().next());
    let Some(object) = object else {
        return out;
    };

    let arcs = decode_arcs(topo);
    collect(object, &arcs, &mut out);
    out
}

fn collect(object: &TopoObject, arcs: &[Vec<LonLat>], out: &mut DecodedRegions) {
    match object {
        TopoObject::GeometryCollection { geometries } => {
            for g in geometries {
                collect(g, arcs, out);
            }
        }
        TopoObject::Polygon {
            arcs: refs,
            properties,
        } => match (name_of(properties), polygon(refs, arcs)) {
            (Some(name), Some(rings)) => out.regions.push(Region::polygon(name, rings)),
            _ => out.skipped += 1,
        },
        TopoObject::MultiPolygon {
            arcs: refs,
            properties,
        } => {
            let parts: Option<Vec<Vec<Ring>>> = refs.iter().map(|p| polygon(p, arcs)).collect();
            match (name_of(properties), parts) {
                (Some(name), Some(parts)) => {
                    out.regions.push(Region::multi_polygon(name, parts))
                }
                _ => out.skipped += 1,
            }
        }
        TopoObject::Unsupported => out.skipped += 1,
    }
}

fn name_of(properties: &Option<Properties>) -> Option<String> {
    properties
        .as_ref()
        .and_then(|p| p.name.clone())
        .filter(|n| !n.trim().is_empty())
}

/// `None` if any ring references a missing arc.
fn polygon(refs: &[Vec<i64>], arcs: &[Vec<LonLat>]) -> Option<Vec<Ring>> {
    refs.iter().map(|ring_refs| ring(ring_refs, arcs)).collect()
}

fn ring(refs: &[i64], arcs: &[Vec<LonLat>]) -> Option<Ring> {
    let mut points: Ring = Vec::new();
    for &r in refs {
        let (index, reversed) = if r < 0 { (!r, true) } else { (r, false) };
        let arc = arcs.get(usize::try_from(index).ok()?)?;
        // Consecutive arcs share their joining point.
        points.pop();
        if reversed {
            points.extend(arc.iter().rev().copied());
        } else {
            points.extend(arc.iter().copied());
        }
    }
    Some(points)
}

fn decode_arcs(topo: &Topology) -> Vec<Vec<LonLat>> {
    topo.arcs
        .iter()
        .map(|arc| match topo.transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| {
                        x += p[0];
                        y += p[1];
                        LonLat::new(
                            x * t.scale[0] + t.translate[0],
                            y * t.scale[1] + t.translate[1],
                        )
                    })
                    .collect()
            }
            None => arc
                .iter()
                .filter(|p| p.len() >= 2)
                .map(|p| LonLat::new(p[0], p[1]))
                .collect(),
        })
        .collect()
}
