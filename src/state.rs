use std::path::Path;

use eframe::egui::Pos2;

use crate::data::loader;
use crate::data::model::TemperatureDataset;
use crate::scale::ChartScales;
use crate::ui::chart;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Pointer anchor for the tooltip: which record it describes and where
/// it was opened. Kept while the tooltip fades out so the panel does
/// not blank mid-transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub record: usize,
    pub pos: Pos2,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<TemperatureDataset>,

    /// Scales derived from the dataset extents, built once per load and
    /// read-only afterwards.
    pub scales: Option<ChartScales>,

    /// Record index currently under the pointer.
    pub hovered: Option<usize>,

    /// Last tooltip anchor; cleared once the fade-out completes.
    pub tooltip: Option<TooltipAnchor>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            scales: None,
            hovered: None,
            tooltip: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and derive its scales.
    pub fn set_dataset(&mut self, dataset: TemperatureDataset) {
        self.scales = Some(ChartScales::from_dataset(
            &dataset,
            chart::INNER_WIDTH,
            chart::INNER_HEIGHT,
        ));
        self.hovered = None;
        self.tooltip = None;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a dataset file and ingest it, or surface the error in the
    /// status line. A failed load never renders partially: the previous
    /// dataset (if any) stays untouched.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match loader::load_file(path) {
            Ok(dataset) => {
                let (first, last) = dataset.year_extent();
                log::info!(
                    "Loaded {} monthly records covering {first}–{last}",
                    dataset.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::model::VarianceRecord;

    fn dataset() -> TemperatureDataset {
        TemperatureDataset {
            base_temperature: 8.66,
            monthly_variance: vec![VarianceRecord {
                year: 1753,
                month: 1,
                variance: -1.366,
            }],
        }
    }

    #[test]
    fn set_dataset_builds_scales_once_and_clears_hover() {
        let mut state = AppState::default();
        state.hovered = Some(7);
        state.status_message = Some("Error: stale".to_string());

        state.set_dataset(dataset());

        assert!(state.dataset.is_some());
        assert!(state.scales.is_some());
        assert_eq!(state.hovered, None);
        assert_eq!(state.tooltip, None);
        assert_eq!(state.status_message, None);
        assert!(!state.loading);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.load_path(Path::new("no/such/file.json"));

        assert!(state.dataset.is_some());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert!(!state.loading);
    }

    #[test]
    fn failed_load_renders_nothing_when_no_dataset_yet() {
        let mut state = AppState::default();

        state.load_path(Path::new("no/such/file.json"));

        assert!(state.dataset.is_none());
        assert!(state.scales.is_none());
        assert!(state.status_message.is_some());
    }
}
