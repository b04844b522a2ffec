//! Reconstructs exposure windows from a synthetic, gappy timestamp stream and
//! integrates the effective exposure over them.
//!
//! Run with: `cargo run --example exposure_windows`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use galexdb::exposure::compute_exptime_report;
use galexdb::query::MemoryAdapter;
use galexdb::windows::{reconstruct, Interval};
use galexdb::{Band, ExposureConfig, QueryOptions, SkyPosition};

/// Simulated eclipses of roughly 1500 s, ~5800 s apart, sampled once per
/// second with occasional dropped samples and one short glitch run.
fn synthetic_stream(rng: &mut StdRng) -> Vec<f64> {
    let mut times = Vec::new();
    let mut t0 = 7.0e8;
    for _ in 0..4 {
        let length = rng.gen_range(1200..1700);
        for i in 0..length {
            if rng.gen_bool(0.98) {
                times.push(t0 + i as f64);
            }
        }
        t0 += 5800.0 + rng.gen_range(-50.0..50.0);
    }
    // A lone burst well away from any eclipse.
    times.extend([t0 + 100.0, t0 + 100.5]);
    times
}

fn main() {
    println!("=== Exposure Window Example ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let stream = synthetic_stream(&mut rng);
    println!("Generated {} timestamps", stream.len());

    println!("\n--- Reconstruction ---");
    for (maxgap, minexp) in [(1.0, 1.0), (5.0, 1.0), (5.0, 100.0)] {
        let windows = reconstruct(&stream, maxgap, minexp);
        println!(
            "maxgap={:>4}  minexp={:>5}: {} windows, {:.0} s total",
            maxgap,
            minexp,
            windows.len(),
            windows.total_duration().value()
        );
    }

    let windows = reconstruct(&stream, 5.0, 100.0);
    for w in &windows {
        println!("  {} ({:.0} s)", w, w.duration().value());
    }

    println!("\n--- Effective Exposure ---");
    let adapter = MemoryAdapter::new()
        .with_timestamps_seconds(&stream)
        .with_dead_time(0.05, 0.02);
    let mut config = ExposureConfig::default();
    config.windows.maxgap = 5.0;
    config.windows.minexp = 100.0;

    let trange = Interval::from_f64(6.9e8, 7.1e8);
    let report = compute_exptime_report(
        &adapter,
        Band::Nuv,
        trange,
        Some(SkyPosition::new(176.919525, 0.255083)),
        &config,
        &QueryOptions::default(),
    );
    println!("Windows used:     {}", report.windows.len());
    println!("Chunks planned:   {}", report.chunks_planned);
    println!("Effective (s):    {:.1}", report.total.value());
    println!("Raw (s):          {:.1}", report.windows.total_duration().value());
    println!("All queries ok:   {}", report.is_complete());
}
