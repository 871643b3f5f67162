//! Hand-off of run results to external plotting/reporting tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::ComparisonReport;
use crate::sim::ScenarioConfig;
use crate::types::Timeline;

#[derive(Serialize)]
struct ReportFile<'a> {
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a ScenarioConfig>,
    #[serde(flatten)]
    report: &'a ComparisonReport,
}

/// Pretty-printed JSON of the full report, stamped with the UTC time.
pub fn write_json_to<W: Write>(
    mut out: W,
    report: &ComparisonReport,
    scenario: Option<&ScenarioConfig>,
) -> Result<()> {
    let doc = ReportFile {
        generated_at: Utc::now().to_rfc3339(),
        scenario,
        report,
    };
    serde_json::to_writer_pretty(&mut out, &doc)?;
    out.flush()?;
    Ok(())
}

pub fn write_json<P: AsRef<Path>>(
    path: P,
    report: &ComparisonReport,
    scenario: Option<&ScenarioConfig>,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_json_to(BufWriter::new(file), report, scenario)?;
    log::info!("Wrote JSON report to {}", path.as_ref().display());
    Ok(())
}

pub const CSV_HEADER: &str =
    "tick,phase,true_x,true_y,fix_x,fix_y,baseline_x,baseline_y,bqre_x,bqre_y";

/// One row per tick. Fix columns are empty once fixes are lost.
pub fn write_csv_to<W: Write>(
    mut out: W,
    timeline: &Timeline,
    report: &ComparisonReport,
) -> Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for t in 0..timeline.len() {
        let truth = timeline.truth[t];
        let (fix_x, fix_y) = match timeline.fixes.get(t) {
            Some(fix) => (format!("{:.4}", fix.x), format!("{:.4}", fix.y)),
            None => (String::new(), String::new()),
        };
        let base = report.baseline_track[t];
        let bqre = report.bqre_track[t];
        writeln!(
            out,
            "{},{},{:.4},{:.4},{},{},{:.4},{:.4},{:.4},{:.4}",
            t,
            timeline.phase(t).label(),
            truth.x,
            truth.y,
            fix_x,
            fix_y,
            base.x,
            base.y,
            bqre.x,
            bqre.y
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv<P: AsRef<Path>>(
    path: P,
    timeline: &Timeline,
    report: &ComparisonReport,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to(BufWriter::new(file), timeline, report)?;
    log::info!("Wrote trajectories to {}", path.as_ref().display());
    Ok(())
}
