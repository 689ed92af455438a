use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::TemperatureDataset;

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Failures while turning a file into a [`TemperatureDataset`].
///
/// Policy is fail-fast: any of these aborts the load and nothing is
/// rendered from the offending file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("dataset contains no monthly variance records")]
    EmptyDataset,

    #[error("record {index}: month {month} is outside 1–12")]
    MonthOutOfRange { index: usize, month: u32 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a temperature dataset from a file. Dispatch by extension.
///
/// Only `.json` documents are accepted, with the shape:
///
/// ```json
/// {
///   "baseTemperature": 8.66,
///   "monthlyVariance": [
///     { "year": 1753, "month": 1, "variance": -1.366 },
///     ...
///   ]
/// }
/// ```
pub fn load_file(path: &Path) -> Result<TemperatureDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<TemperatureDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let dataset: TemperatureDataset = serde_json::from_str(&text).context("parsing JSON")?;
    validate(&dataset)?;
    Ok(dataset)
}

fn validate(dataset: &TemperatureDataset) -> Result<(), LoadError> {
    if dataset.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    for (index, record) in dataset.monthly_variance.iter().enumerate() {
        if !(1..=12).contains(&record.month) {
            return Err(LoadError::MonthOutOfRange {
                index,
                month: record.month,
            });
        }
    }
    Ok(())
}
