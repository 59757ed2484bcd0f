//! Writing results to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use datasight_model::AnalysisResult;
use datasight_report::render_summary;
use tracing::info;

/// Serialize `result` as pretty JSON.
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .with_context(|| format!("serialize result: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), "wrote analysis json");
    Ok(())
}

/// Write the plain-text table report.
pub fn write_report(result: &AnalysisResult, path: &Path) -> Result<()> {
    std::fs::write(path, render_summary(result))
        .with_context(|| format!("write report: {}", path.display()))?;
    info!(path = %path.display(), "wrote analysis report");
    Ok(())
}

pub fn to_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("serialize analysis result")
}
