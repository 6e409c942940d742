pub mod dataset;
pub mod geojson;
pub mod topojson;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use catalog::{CatalogError, Dataset};
use scene::Region;
use serde::Deserialize;

pub use dataset::{decode_dataset, decode_flag_codes};

#[derive(Debug)]
pub enum FormatError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Catalog(CatalogError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            FormatError::Parse(err) => write!(f, "JSON parse error: {err}"),
            FormatError::Catalog(err) => write!(f, "invalid dataset: {err}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Parse(err)
    }
}

impl From<CatalogError> for FormatError {
    fn from(err: CatalogError) -> Self {
        FormatError::Catalog(err)
    }
}

/// Regions decoded from a boundary document.
///
/// Features that are not polygons, or have no name, are counted in
/// `skipped` instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRegions {
    pub regions: Vec<Region>,
    pub skipped: usize,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection(geojson::FeatureCollection),
    Topology(topojson::Topology),
}

/// Decodes either a GeoJSON `FeatureCollection` or a TopoJSON `Topology`.
pub fn decode_regions(json: &str) -> Result<DecodedRegions, FormatError> {
    match serde_json::from_str::<Document>(json)? {
        Document::FeatureCollection(fc) => Ok(geojson::regions_from_features(fc)),
        Document::Topology(topo) => Ok(topojson::regions_from_topology(&topo)),
    }
}

pub fn load_regions(path: impl AsRef<Path>) -> Result<DecodedRegions, FormatError> {
    decode_regions(&read(path.as_ref())?)
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, FormatError> {
    decode_dataset(&read(path.as_ref())?)
}

pub fn load_flag_codes(path: impl AsRef<Path>) -> Result<BTreeMap<String, String>, FormatError> {
    decode_flag_codes(&read(path.as_ref())?)
}

fn read(path: &Path) -> Result<String, FormatError> {
    fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })
}
