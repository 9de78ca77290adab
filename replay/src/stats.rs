// Reporting for replay results

use crate::error::ReplayError;
use crate::models::{CsvResultRow, ReplayResult};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Print a summary report of a replay
pub fn print_summary(result: &ReplayResult) {
    println!("\nReplay Summary");
    println!("==============");
    println!("Cache capacity: {} entries", result.capacity);
    println!("Total requests: {}", result.stats.requests());
    println!("Unique keys: {}", result.unique_keys);
    println!("Completed in {:.2?}", result.duration);

    println!(
        "\n{:>10} {:>10} {:>8} {:>10} {:>12} {:>10} {:>10}",
        "Hits", "Misses", "HitRate", "Evictions", "Divergences", "GetAvg", "UpdateAvg"
    );
    println!("{}", "-".repeat(78));
    println!(
        "{:>10} {:>10} {:>7.2}% {:>10} {:>12} {:>8.0}ns {:>8.0}ns",
        result.stats.hits,
        result.stats.misses,
        result.stats.hit_rate(),
        result.stats.evictions,
        if result.verified {
            result.stats.divergences.to_string()
        } else {
            "skipped".to_string()
        },
        result.stats.get_latency.avg_ns(),
        result.stats.update_latency.avg_ns(),
    );

    println!("\nCache metrics:");
    print_metrics(&result.metrics);
}

/// Print cache metrics one per line, in key order
pub fn print_metrics(metrics: &BTreeMap<String, f64>) {
    for line in format_metrics(metrics) {
        println!("  {}", line);
    }
}

/// Render cache metrics as `name: value` lines, in key order
pub fn format_metrics(metrics: &BTreeMap<String, f64>) -> Vec<String> {
    metrics
        .iter()
        .map(|(name, value)| {
            if value.fract() == 0.0 {
                format!("{:<14} {}", format!("{}:", name), value)
            } else {
                format!("{:<14} {:.4}", format!("{}:", name), value)
            }
        })
        .collect()
}

/// Export a replay result as a single-row CSV file
pub fn export_csv(result: &ReplayResult, path: &Path) -> Result<(), ReplayError> {
    let file = std::fs::File::create(path)?;
    write_csv(result, file)
}

/// Write a replay result as a single-row CSV table
pub fn write_csv<W: Write>(result: &ReplayResult, sink: W) -> Result<(), ReplayError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.serialize(CsvResultRow::from(result))?;
    writer.flush()?;
    Ok(())
}
