use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// RdBu diverging ramp
// ---------------------------------------------------------------------------

/// ColorBrewer RdBu: the 11-stop red → white → blue diverging ramp.
/// Stop 0 is the warm end, stop 10 the cool end, #f7f7f7 the midpoint.
const RDBU_STOPS: [[u8; 3]; 11] = [
    [0x67, 0x00, 0x1f],
    [0xb2, 0x18, 0x2b],
    [0xd6, 0x60, 0x4d],
    [0xf4, 0xa5, 0x82],
    [0xfd, 0xdb, 0xc7],
    [0xf7, 0xf7, 0xf7],
    [0xd1, 0xe5, 0xf0],
    [0x92, 0xc5, 0xde],
    [0x43, 0x93, 0xc3],
    [0x21, 0x66, 0xac],
    [0x05, 0x30, 0x61],
];

/// Sample the RdBu ramp at `t ∈ [0, 1]`; out-of-range input clamps to
/// the nearest end. Interpolation runs piecewise between neighbouring
/// stops in linear RGB.
pub fn rd_bu(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let segments = (RDBU_STOPS.len() - 1) as f32;
    let position = t * segments;
    let i = (position as usize).min(RDBU_STOPS.len() - 2);
    let fraction = position - i as f32;

    let a: LinSrgb = stop_color(RDBU_STOPS[i]).into_linear();
    let b: LinSrgb = stop_color(RDBU_STOPS[i + 1]).into_linear();
    let mixed: Srgb = Srgb::from_linear(a.mix(b, fraction));

    Color32::from_rgb(
        (mixed.red * 255.0).round() as u8,
        (mixed.green * 255.0).round() as u8,
        (mixed.blue * 255.0).round() as u8,
    )
}

fn stop_color([r, g, b]: [u8; 3]) -> Srgb {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
