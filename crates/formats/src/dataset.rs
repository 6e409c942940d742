use std::collections::BTreeMap;

use catalog::{CountryRecord, Dataset};

use crate::FormatError;

/// Parses the dataset export: a JSON array of country records.
pub fn decode_dataset(json: &str) -> Result<Dataset, FormatError> {
    let records: Vec<CountryRecord> = serde_json::from_str(json)?;
    Ok(Dataset::new(records)?)
}

/// Parses a `{ "Country name": "FI", ... }` object of flag codes.
///
/// Codes are trimmed and lowercased; blank codes are dropped.
pub fn decode_flag_codes(json: &str) -> Result<BTreeMap<String, String>, FormatError> {
    let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, code)| {
            let code = code.trim().to_ascii_lowercase();
            (!code.is_empty()).then_some((name, code))
        })
        .collect())
}
