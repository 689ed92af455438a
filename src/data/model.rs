use std::collections::BTreeMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// VarianceRecord – one (year, month) cell
// ---------------------------------------------------------------------------

/// A single monthly reading: the temperature deviation (°C) from the
/// dataset's base temperature for one (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VarianceRecord {
    pub year: i32,
    /// 1-based calendar month (1 = January).
    pub month: u32,
    pub variance: f64,
}

// ---------------------------------------------------------------------------
// TemperatureDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Loaded once, then read-only for the rest of
/// the process lifetime. Uniqueness of (year, month) pairs is assumed,
/// not validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureDataset {
    /// Reference temperature (°C) that all variances are relative to.
    pub base_temperature: f64,
    /// Ordered monthly readings.
    pub monthly_variance: Vec<VarianceRecord>,
}

impl TemperatureDataset {
    /// Number of monthly records.
    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// (min, max) over the record years. (0, 0) for an empty dataset.
    pub fn year_extent(&self) -> (i32, i32) {
        let min = self.monthly_variance.iter().map(|r| r.year).min();
        let max = self.monthly_variance.iter().map(|r| r.year).max();
        (min.unwrap_or(0), max.unwrap_or(0))
    }

    /// (min, max) over the record months.
    pub fn month_extent(&self) -> (u32, u32) {
        let min = self.monthly_variance.iter().map(|r| r.month).min();
        let max = self.monthly_variance.iter().map(|r| r.month).max();
        (min.unwrap_or(0), max.unwrap_or(0))
    }

    /// (min, max) over the record variances.
    pub fn variance_extent(&self) -> (f64, f64) {
        let min = self
            .monthly_variance
            .iter()
            .map(|r| r.variance)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .monthly_variance
            .iter()
            .map(|r| r.variance)
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    /// (year, month) → record index, for pointer hit-testing.
    /// Later records win if a pair repeats.
    pub fn cell_index(&self) -> BTreeMap<(i32, u32), usize> {
        self.monthly_variance
            .iter()
            .enumerate()
            .map(|(i, r)| ((r.year, r.month), i))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Month names
// ---------------------------------------------------------------------------

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English name for a 1-based month number; empty for out-of-range
/// input (the loader rejects such records before they reach the UI).
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[month as usize - 1],
        _ => "",
    }
}
