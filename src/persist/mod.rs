// src/persist/mod.rs

use anyhow::{Context, Result};
use chrono::Utc;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::extract::ExtractionResult;

pub const JSON_FILE: &str = "forex_calendar.json";
pub const CSV_FILE: &str = "forex_calendar.csv";

/// Canonical column order, identical to `EventRecord`'s field order.
pub const FIELD_ORDER: [&str; 9] = [
    "date",
    "time",
    "currency",
    "impact",
    "event",
    "actual",
    "forecast",
    "previous",
    "scraped_at",
];

/// Write the canonical JSON file, the tabular CSV, and a dated snapshot
/// copy of the JSON into `dir`, creating the directory if needed.
/// Returns the written paths.
pub fn write_outputs(dir: impl AsRef<Path>, result: &ExtractionResult) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let json_path = dir.join(JSON_FILE);
    write_json(&json_path, result)?;

    let csv_path = dir.join(CSV_FILE);
    write_csv(&csv_path, result)?;

    let snapshot_path = dir.join(format!(
        "forex_calendar_{}.json",
        Utc::now().format("%Y%m%d")
    ));
    fs::copy(&json_path, &snapshot_path)
        .with_context(|| format!("writing snapshot {}", snapshot_path.display()))?;

    Ok(vec![json_path, csv_path, snapshot_path])
}

fn write_json(path: &Path, result: &ExtractionResult) -> Result<()> {
    let body = serde_json::to_string_pretty(&result.events).context("serializing events")?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn write_csv(path: &Path, result: &ExtractionResult) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    // serialize() emits the header from the first record, so an empty
    // result needs the header written explicitly
    if result.events.is_empty() {
        writer
            .write_record(FIELD_ORDER)
            .context("writing CSV header")?;
    }
    for record in &result.events {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
