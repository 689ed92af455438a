use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Frame, Id, Order, Painter, Pos2, Rect, RichText,
    Sense, Stroke, Ui, pos2, vec2,
};

use crate::data::model::{TemperatureDataset, VarianceRecord, month_name};
use crate::scale::{ChartScales, DivergingScale};
use crate::state::{AppState, TooltipAnchor};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

// 960×480 outer chart with fixed margins; the grid fills the inner rect.
pub const OUTER_WIDTH: f32 = 960.0;
pub const OUTER_HEIGHT: f32 = 480.0;
pub const MARGIN_TOP: f32 = 40.0;
pub const MARGIN_RIGHT: f32 = 20.0;
pub const MARGIN_BOTTOM: f32 = 20.0;
pub const MARGIN_LEFT: f32 = 80.0;
pub const INNER_WIDTH: f32 = OUTER_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
pub const INNER_HEIGHT: f32 = OUTER_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

const LEGEND_SWATCH_WIDTH: f32 = 40.0;
const LEGEND_SWATCH_HEIGHT: f32 = 10.0;
// The legend row is centered assuming twelve ticks; other tick counts
// shift it off-center exactly as the fixed layout dictates.
const LEGEND_TICK_SLOTS: f32 = 12.0;
const LEGEND_LABEL_Y: f32 = 20.0;

const TICK_LEN: f32 = 6.0;
const TOOLTIP_RISE: f32 = 80.0;
const FADE_SECONDS: f32 = 0.05;

// ---------------------------------------------------------------------------
// Heat map (central panel)
// ---------------------------------------------------------------------------

/// Render the heat map, axes, legend, and hover tooltip.
pub fn heat_map(ui: &mut Ui, state: &mut AppState) {
    let (Some(dataset), Some(scales)) = (&state.dataset, &state.scales) else {
        state.hovered = None;
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view the heat map  (File → Open…)");
        });
        return;
    };

    // Center the fixed-size chart in whatever space the panel offers.
    let avail = ui.available_rect_before_wrap();
    let origin = pos2(
        avail.left() + ((avail.width() - OUTER_WIDTH) * 0.5).max(0.0),
        avail.top() + ((avail.height() - OUTER_HEIGHT) * 0.5).max(0.0),
    );
    let outer = Rect::from_min_size(origin, vec2(OUTER_WIDTH, OUTER_HEIGHT));
    let response = ui.allocate_rect(outer, Sense::hover());

    let text_color = ui.visuals().text_color();
    let ctx = ui.ctx().clone();
    let painter = ui.painter();
    let grid_origin = pos2(outer.left() + MARGIN_LEFT, outer.top() + MARGIN_TOP);

    draw_axes(painter, scales, grid_origin, text_color);
    draw_grid(painter, scales, dataset, grid_origin);
    draw_legend(painter, scales, outer, text_color);

    let hovered_at = response
        .hover_pos()
        .and_then(|pos| hit_test(scales, grid_origin, pos).map(|record| (record, pos)));

    state.hovered = hovered_at.map(|(record, _)| record);
    if let Some((record, pos)) = hovered_at {
        // Anchor once per cell entered; moving inside a cell keeps it.
        if state.tooltip.map_or(true, |t| t.record != record) {
            state.tooltip = Some(TooltipAnchor { record, pos });
        }
    }

    let opacity = ctx.animate_bool_with_time(
        Id::new("heat_map_tooltip_fade"),
        state.hovered.is_some(),
        FADE_SECONDS,
    );

    if opacity <= 0.0 {
        if state.hovered.is_none() {
            state.tooltip = None;
        }
    } else if let Some(anchor) = state.tooltip {
        if let Some(dataset) = &state.dataset {
            if let Some(record) = dataset.monthly_variance.get(anchor.record) {
                draw_tooltip(&ctx, anchor.pos, record, dataset.base_temperature, opacity);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

fn draw_grid(
    painter: &Painter,
    scales: &ChartScales,
    dataset: &TemperatureDataset,
    grid_origin: Pos2,
) {
    for record in &dataset.monthly_variance {
        if let Some(rect) = cell_rect(scales, record) {
            painter.rect_filled(
                rect.translate(grid_origin.to_vec2()),
                CornerRadius::ZERO,
                scales.color.color_for(record.variance),
            );
        }
    }
}

/// Grid-relative rectangle for one record; `None` when the record falls
/// outside the scale domains.
fn cell_rect(scales: &ChartScales, record: &VarianceRecord) -> Option<Rect> {
    let x = scales.year.position(record.year)?;
    let y = scales.month.position(record.month as i32)?;
    Some(Rect::from_min_size(
        pos2(x, y),
        vec2(scales.year.bandwidth(), scales.month.bandwidth()),
    ))
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// Year tick labels only appear on decade boundaries.
fn decade_tick_visible(year: i32) -> bool {
    year % 10 == 0
}

fn draw_axes(painter: &Painter, scales: &ChartScales, grid_origin: Pos2, text_color: Color32) {
    let stroke = Stroke::new(1.0, text_color);
    let font = FontId::proportional(12.0);
    let baseline = grid_origin.y + INNER_HEIGHT;

    // Bottom axis: one tick per decade year, no domain line.
    for year in scales.year.values() {
        if !decade_tick_visible(year) {
            continue;
        }
        let Some(x) = scales.year.position(year) else {
            continue;
        };
        let cx = grid_origin.x + x + scales.year.bandwidth() * 0.5;
        painter.line_segment([pos2(cx, baseline), pos2(cx, baseline + TICK_LEN)], stroke);
        painter.text(
            pos2(cx, baseline + TICK_LEN + 2.0),
            Align2::CENTER_TOP,
            year.to_string(),
            font.clone(),
            text_color,
        );
    }

    // Left axis: full month names, no domain line.
    for month in scales.month.values() {
        let Some(y) = scales.month.position(month) else {
            continue;
        };
        let cy = grid_origin.y + y + scales.month.bandwidth() * 0.5;
        painter.line_segment(
            [pos2(grid_origin.x - TICK_LEN, cy), pos2(grid_origin.x, cy)],
            stroke,
        );
        painter.text(
            pos2(grid_origin.x - TICK_LEN - 4.0, cy),
            Align2::RIGHT_CENTER,
            month_name(month as u32),
            font.clone(),
            text_color,
        );
    }
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

pub struct LegendEntry {
    pub label: String,
    pub color: Color32,
}

/// Legend entries: color-scale ticks in descending order. The first
/// (highest) label carries the degree suffix, the rest are bare numbers.
fn legend_entries(color: &DivergingScale) -> Vec<LegendEntry> {
    let mut tick_values = color.ticks();
    tick_values.reverse();

    tick_values
        .into_iter()
        .enumerate()
        .map(|(i, value)| LegendEntry {
            label: if i == 0 {
                format!("{}℃", format_tick(value))
            } else {
                format_tick(value)
            },
            color: color.color_for(value),
        })
        .collect()
}

/// Integral tick values print without a decimal point.
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn draw_legend(painter: &Painter, scales: &ChartScales, outer: Rect, text_color: Color32) {
    let entries = legend_entries(&scales.color);
    let origin = pos2(
        outer.left() + MARGIN_LEFT + (INNER_WIDTH - LEGEND_SWATCH_WIDTH * LEGEND_TICK_SLOTS) * 0.5,
        outer.top(),
    );
    let font = FontId::proportional(11.0);

    for (i, entry) in entries.iter().enumerate() {
        let x = origin.x + LEGEND_SWATCH_WIDTH * i as f32;
        painter.rect_filled(
            Rect::from_min_size(
                pos2(x, origin.y),
                vec2(LEGEND_SWATCH_WIDTH, LEGEND_SWATCH_HEIGHT),
            ),
            CornerRadius::ZERO,
            entry.color,
        );
        painter.text(
            pos2(x + LEGEND_SWATCH_WIDTH * 0.5, origin.y + LEGEND_LABEL_Y),
            Align2::CENTER_CENTER,
            &entry.label,
            font.clone(),
            text_color,
        );
    }
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// Record index under the pointer, if any.
fn hit_test(scales: &ChartScales, grid_origin: Pos2, pointer: Pos2) -> Option<usize> {
    let year = scales.year.invert(pointer.x - grid_origin.x)?;
    let month = scales.month.invert(pointer.y - grid_origin.y)?;
    scales.cell_index.get(&(year, month as u32)).copied()
}

/// The three tooltip lines: "year - month", variance, and the absolute
/// temperature (base + variance, truncated to three decimals).
fn tooltip_lines(record: &VarianceRecord, base_temperature: f64) -> [String; 3] {
    [
        format!("{} - {}", record.year, month_name(record.month)),
        format!("{}", record.variance),
        format!("{}", truncate3(record.variance + base_temperature)),
    ]
}

/// Truncate to three decimal places: `floor(x · 1000) / 1000`.
fn truncate3(x: f64) -> f64 {
    (x * 1000.0).floor() / 1000.0
}

fn draw_tooltip(
    ctx: &egui::Context,
    anchor: Pos2,
    record: &VarianceRecord,
    base_temperature: f64,
    opacity: f32,
) {
    egui::Area::new(Id::new("heat_map_tooltip"))
        .order(Order::Tooltip)
        .fixed_pos(pos2(anchor.x, anchor.y - TOOLTIP_RISE))
        .pivot(Align2::CENTER_TOP)
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.set_opacity(opacity);
            Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                let [title, variance, temperature] = tooltip_lines(record, base_temperature);
                ui.label(RichText::new(title).strong());
                ui.label(variance);
                ui.label(temperature);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::model::TemperatureDataset;

    fn record(year: i32, month: u32, variance: f64) -> VarianceRecord {
        VarianceRecord {
            year,
            month,
            variance,
        }
    }

    fn two_year_dataset() -> TemperatureDataset {
        TemperatureDataset {
            base_temperature: 8.66,
            monthly_variance: vec![record(1753, 1, -1.366), record(1754, 12, 0.504)],
        }
    }

    #[test]
    fn decade_years_only_get_tick_labels() {
        assert!(decade_tick_visible(1760));
        assert!(decade_tick_visible(2000));
        assert!(decade_tick_visible(0));
        assert!(!decade_tick_visible(1753));
        assert!(!decade_tick_visible(1999));
    }

    #[test]
    fn cell_rects_follow_the_band_scales() {
        let dataset = two_year_dataset();
        let scales = ChartScales::from_dataset(&dataset, INNER_WIDTH, INNER_HEIGHT);

        // Two year bands of 430 px, twelve month bands of 35 px.
        let first = cell_rect(&scales, &dataset.monthly_variance[0]).unwrap();
        assert_eq!(first.min, pos2(0.0, 0.0));
        assert_eq!(first.size(), vec2(430.0, 35.0));

        let second = cell_rect(&scales, &dataset.monthly_variance[1]).unwrap();
        assert_eq!(second.min, pos2(430.0, 385.0));

        let stray = record(1760, 1, 0.0);
        assert!(cell_rect(&scales, &stray).is_none());
    }

    #[test]
    fn grid_fill_matches_the_color_scale() {
        let dataset = two_year_dataset();
        let scales = ChartScales::from_dataset(&dataset, INNER_WIDTH, INNER_HEIGHT);

        for r in &dataset.monthly_variance {
            assert_eq!(
                scales.color.color_for(r.variance),
                crate::color::rd_bu(
                    (r.variance - 0.504) / (-1.366 - 0.504)
                )
            );
        }
    }

    #[test]
    fn hit_test_finds_the_hovered_record() {
        let dataset = two_year_dataset();
        let scales = ChartScales::from_dataset(&dataset, INNER_WIDTH, INNER_HEIGHT);
        let origin = pos2(100.0, 50.0);

        // Center of the (1754, 12) cell.
        let pointer = pos2(100.0 + 430.0 + 215.0, 50.0 + 385.0 + 17.5);
        assert_eq!(hit_test(&scales, origin, pointer), Some(1));

        // Inside the grid but over an empty (year, month) pair.
        let empty = pos2(100.0 + 215.0, 50.0 + 385.0 + 17.5);
        assert_eq!(hit_test(&scales, origin, empty), None);

        // Outside the grid entirely.
        assert_eq!(hit_test(&scales, origin, pos2(0.0, 0.0)), None);
    }

    #[test]
    fn legend_is_descending_with_one_unit_suffix() {
        let scale = DivergingScale::new(5.228, -6.976);
        let entries = legend_entries(&scale);

        assert_eq!(entries.len(), 12);
        assert_eq!(entries[0].label, "5℃");
        assert_eq!(entries[1].label, "4");
        assert_eq!(entries[11].label, "-6");
        assert!(entries[1..].iter().all(|e| !e.label.contains('℃')));

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            ["5℃", "4", "3", "2", "1", "0", "-1", "-2", "-3", "-4", "-5", "-6"]
        );
    }

    #[test]
    fn legend_swatches_use_the_scale_colors() {
        let scale = DivergingScale::new(5.228, -6.976);
        let mut tick_values = scale.ticks();
        tick_values.reverse();

        for (entry, tick) in legend_entries(&scale).iter().zip(tick_values) {
            assert_eq!(entry.color, scale.color_for(tick));
        }
    }

    #[test]
    fn format_tick_drops_trailing_zero() {
        assert_eq!(format_tick(5.0), "5");
        assert_eq!(format_tick(-6.0), "-6");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(0.5), "0.5");
    }

    #[test]
    fn tooltip_shows_the_documented_scenario() {
        // {baseTemperature: 8.66, monthlyVariance: [{1753, 1, -1.366}]}
        let lines = tooltip_lines(&record(1753, 1, -1.366), 8.66);
        assert_eq!(lines[0], "1753 - January");
        assert_eq!(lines[1], "-1.366");
        assert_eq!(lines[2], "7.294");
    }

    #[test]
    fn truncate3_floors_toward_negative_infinity() {
        assert_eq!(truncate3(7.2949), 7.294);
        assert_eq!(truncate3(1.23456), 1.234);
        assert_eq!(truncate3(-1.2345), -1.235);
        assert_eq!(truncate3(2.0), 2.0);
    }
}
