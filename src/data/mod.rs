/// Data layer: dataset types and loading.
///
/// Architecture:
/// ```text
///  data/global-temperature.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TemperatureDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │ TemperatureDataset │  base temperature + Vec<VarianceRecord>
///   └────────────────────┘
/// ```
pub mod loader;
pub mod model;
