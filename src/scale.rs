use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::Color32;

use crate::color::rd_bu;
use crate::data::model::TemperatureDataset;

// ---------------------------------------------------------------------------
// BandScale – discrete categories → contiguous pixel bands
// ---------------------------------------------------------------------------

/// Maps a contiguous inclusive run of integer categories onto
/// equal-width pixel bands covering a range.
#[derive(Debug, Clone)]
pub struct BandScale {
    lo: i32,
    hi: i32,
    range: (f32, f32),
}

impl BandScale {
    pub fn new(domain: RangeInclusive<i32>, range: (f32, f32)) -> Self {
        BandScale {
            lo: *domain.start(),
            hi: *domain.end(),
            range,
        }
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        if self.hi < self.lo {
            0
        } else {
            (self.hi - self.lo) as usize + 1
        }
    }

    /// Width of a single band in pixels.
    pub fn bandwidth(&self) -> f32 {
        let n = self.count();
        if n == 0 {
            0.0
        } else {
            (self.range.1 - self.range.0) / n as f32
        }
    }

    /// Left/top pixel edge of the band for `value`, or `None` when the
    /// value is outside the domain.
    pub fn position(&self, value: i32) -> Option<f32> {
        if value < self.lo || value > self.hi {
            return None;
        }
        Some(self.range.0 + (value - self.lo) as f32 * self.bandwidth())
    }

    /// Domain value whose band contains the pixel coordinate `px`, for
    /// pointer hit-testing. `None` outside the range.
    pub fn invert(&self, px: f32) -> Option<i32> {
        if self.count() == 0 || px < self.range.0 || px >= self.range.1 {
            return None;
        }
        let index = ((px - self.range.0) / self.bandwidth()) as i32;
        Some((self.lo + index).min(self.hi))
    }

    /// All domain values in order.
    pub fn values(&self) -> RangeInclusive<i32> {
        self.lo..=self.hi
    }
}

// ---------------------------------------------------------------------------
// DivergingScale – numeric domain → RdBu ramp
// ---------------------------------------------------------------------------

/// Linear mapping from a numeric domain onto the RdBu diverging ramp.
///
/// The domain may be reversed: the heat map uses
/// `(max_variance, min_variance)` so that warm anomalies land on the
/// red end of the ramp.
#[derive(Debug, Clone)]
pub struct DivergingScale {
    d0: f64,
    d1: f64,
}

impl DivergingScale {
    pub fn new(d0: f64, d1: f64) -> Self {
        DivergingScale { d0, d1 }
    }

    /// Color for a domain value; values outside the domain clamp to the
    /// ramp ends.
    pub fn color_for(&self, value: f64) -> Color32 {
        let span = self.d1 - self.d0;
        let t = if span.abs() < f64::EPSILON {
            0.5
        } else {
            (value - self.d0) / span
        };
        rd_bu(t)
    }

    /// Nice tick values covering the domain, ascending.
    pub fn ticks(&self) -> Vec<f64> {
        ticks(self.d0.min(self.d1), self.d0.max(self.d1), 10)
    }
}

// ---------------------------------------------------------------------------
// Tick generation (1/2/5 decade progression)
// ---------------------------------------------------------------------------

/// Round tick values covering `[start, stop]`, aiming for `count`
/// intervals. Steps are chosen from the 1/2/5 decade progression, so
/// the result is the familiar axis-label sequence.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(stop > start) || count == 0 {
        return Vec::new();
    }
    let step = tick_increment(start, stop, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    if step > 0.0 {
        let lo = (start / step).ceil();
        let hi = (stop / step).floor();
        if hi < lo {
            return Vec::new();
        }
        let n = (hi - lo) as usize + 1;
        (0..n).map(|i| (lo + i as f64) * step).collect()
    } else {
        // A negative step encodes the reciprocal of a sub-unit spacing,
        // keeping the generated values exact (i / inv, not i * 0.1).
        let inv = -step;
        let lo = (start * inv).ceil();
        let hi = (stop * inv).floor();
        if hi < lo {
            return Vec::new();
        }
        let n = (hi - lo) as usize + 1;
        (0..n).map(|i| (lo + i as f64) / inv).collect()
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

// ---------------------------------------------------------------------------
// ChartScales – the write-once scale bundle
// ---------------------------------------------------------------------------

/// All derived scale state for one loaded dataset. Built exactly once
/// per load and read-only afterwards.
pub struct ChartScales {
    /// year → horizontal band.
    pub year: BandScale,
    /// month → vertical band.
    pub month: BandScale,
    /// variance → fill color, domain reversed (max first).
    pub color: DivergingScale,
    /// (year, month) → record index, for pointer hit-testing.
    pub cell_index: BTreeMap<(i32, u32), usize>,
}

impl ChartScales {
    /// Derive the scales from the dataset extents for a grid of
    /// `width` × `height` pixels.
    pub fn from_dataset(dataset: &TemperatureDataset, width: f32, height: f32) -> Self {
        let (year_min, year_max) = dataset.year_extent();
        let (month_min, month_max) = dataset.month_extent();
        let (var_min, var_max) = dataset.variance_extent();

        ChartScales {
            year: BandScale::new(year_min..=year_max, (0.0, width)),
            month: BandScale::new(month_min as i32..=month_max as i32, (0.0, height)),
            color: DivergingScale::new(var_max, var_min),
            cell_index: dataset.cell_index(),
        }
    }
}
