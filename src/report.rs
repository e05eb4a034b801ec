//! CSV and JSON export of schedules, sweeps and full analyses

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::Analysis;
use crate::error::Result;
use crate::schedule::Schedule;
use crate::sensitivity::SensitivityPoint;

/// Write one CSV row per week, with a header
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &Schedule) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in schedule {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one CSV row per candidate switch period, with a header
pub fn write_sensitivity_csv<W: Write>(writer: W, series: &[SensitivityPoint]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in series {
        csv.serialize(point)?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON of the whole analysis
pub fn write_analysis_json<W: Write>(writer: W, analysis: &Analysis) -> Result<()> {
    serde_json::to_writer_pretty(writer, analysis)?;
    Ok(())
}

pub fn save_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    write_schedule_csv(BufWriter::new(File::create(path)?), schedule)
}

pub fn save_sensitivity_csv<P: AsRef<Path>>(path: P, series: &[SensitivityPoint]) -> Result<()> {
    write_sensitivity_csv(BufWriter::new(File::create(path)?), series)
}
