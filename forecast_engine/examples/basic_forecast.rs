//! Fit the default model to a synthetic series and print the forecast.
//!
//! Run with: cargo run --example basic_forecast

use chrono::NaiveDate;
use forecast_engine::{forecast, ForecastConfig};
use market_data::{Observation, OhlcvBar, Series};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A random walk with drift, seeded for repeatability.
    let mut rng = StdRng::seed_from_u64(99);
    let mut date = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("bad start date")?;
    let mut close = 100.0;
    let mut observations = Vec::new();
    for _ in 0..200 {
        close += 0.1 + rng.gen_range(-1.0..1.0);
        observations.push(Observation {
            date,
            bar: OhlcvBar {
                open: close - 0.2,
                high: close + 0.8,
                low: close - 0.8,
                close,
                volume: 25_000,
            },
        });
        date = date.succ_opt().ok_or("date overflow")?;
    }
    let series = Series::new(observations)?;

    let config = ForecastConfig::default();
    let result = forecast(&series, &config)?;

    println!(
        "Last close {:.2} on {}; forecasting {} days ahead:",
        series.last().map(|obs| obs.bar.close).unwrap_or_default(),
        series.last_date().map(|d| d.to_string()).unwrap_or_default(),
        result.horizon()
    );
    for point in result.points().iter().take(10) {
        println!("  {}  {:.2}", point.date, point.close);
    }
    if let Some(intervals) = result.intervals() {
        let (lower, upper) = intervals[intervals.len() - 1];
        println!("  ... final-day 95% interval: [{lower:.2}, {upper:.2}]");
    }

    Ok(())
}
