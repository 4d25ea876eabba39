//! Compute a default indicator snapshot over a synthetic price series.
//!
//! Run with: cargo run --example indicator_snapshot

use chrono::NaiveDate;
use indicator_math::{compute_indicators, IndicatorConfig};
use market_data::{Observation, OhlcvBar, Series};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A year of synthetic trading days with a gentle upward drift.
    let mut date = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("bad start date")?;
    let mut observations = Vec::new();
    for i in 0..250 {
        let close = 100.0 + i as f64 * 0.2 + (i as f64 * 0.15).sin() * 3.0;
        observations.push(Observation {
            date,
            bar: OhlcvBar {
                open: close - 0.3,
                high: close + 1.2,
                low: close - 1.2,
                close,
                volume: 50_000,
            },
        });
        date = date.succ_opt().ok_or("date overflow")?;
    }
    let series = Series::new(observations)?;

    let snapshot = compute_indicators(&series, &IndicatorConfig::default())?;

    println!("Indicators as of {}:", snapshot.date);
    println!("  close: {:.2}", snapshot.close);
    for (name, value) in snapshot.values() {
        match value {
            Some(value) => println!("  {name}: {value:.4}"),
            None => println!("  {name}: (insufficient history)"),
        }
    }

    Ok(())
}
