//! Generates a synthetic `data/global-temperature.json` in the shape the
//! viewer loads: a base temperature plus one variance record per
//! (year, month).
//!
//! Run with `cargo run --bin generate_sample`.

use std::f64::consts::PI;
use std::fs;

use anyhow::{Context, Result};
use serde_json::json;

const FIRST_YEAR: i32 = 1753;
const LAST_YEAR: i32 = 2015;
const BASE_TEMPERATURE: f64 = 8.66;

/// Minimal deterministic PRNG (splitmix64).
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Seasonal cycle (cold January, warm July) + a late warming trend +
/// observation noise, rounded to the three decimals real datasets carry.
fn variance(year: i32, month: u32, rng: &mut SampleRng) -> f64 {
    let seasonal = -3.2 * (2.0 * PI * (month - 1) as f64 / 12.0).cos();
    let progress = (year - FIRST_YEAR) as f64 / (LAST_YEAR - FIRST_YEAR) as f64;
    let warming = 1.1 * progress.powi(3);
    let noise = rng.gauss(0.0, 0.35);
    round3(seasonal + warming + noise)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn main() -> Result<()> {
    let mut rng = SampleRng::new(42);

    let mut records = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        for month in 1..=12u32 {
            records.push(json!({
                "year": year,
                "month": month,
                "variance": variance(year, month, &mut rng),
            }));
        }
    }

    let dataset = json!({
        "baseTemperature": BASE_TEMPERATURE,
        "monthlyVariance": records,
    });

    fs::create_dir_all("data").context("creating data directory")?;
    let path = "data/global-temperature.json";
    fs::write(path, serde_json::to_string(&dataset)?)
        .with_context(|| format!("writing {path}"))?;

    println!(
        "Wrote {} records ({FIRST_YEAR}–{LAST_YEAR}) to {path}",
        (LAST_YEAR - FIRST_YEAR + 1) * 12
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic() {
        let mut a = SampleRng::new(42);
        let mut b = SampleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn gauss_stays_near_the_mean() {
        let mut rng = SampleRng::new(7);
        let n = 10_000;
        let mean: f64 = (0..n).map(|_| rng.gauss(0.0, 0.35)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "sample mean {mean} too far from 0");
    }

    #[test]
    fn round3_keeps_three_decimals() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0004), -0.0);
        assert_eq!(round3(2.0), 2.0);
    }

    #[test]
    fn variance_is_cold_in_january_warm_in_july() {
        let mut rng = SampleRng::new(42);
        let jan = variance(1800, 1, &mut rng);
        let jul = variance(1800, 7, &mut rng);
        assert!(jan < jul);
    }
}
