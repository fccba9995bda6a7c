use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pdcm_model::ValidationReport;
use tracing::info;

/// Pretty-printed JSON in the public report shape.
pub fn report_to_json(report: &ValidationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize validation report")
}

/// Write the report to `output_path`, creating parent directories.
pub fn write_report_json(report: &ValidationReport, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file =
        File::create(output_path).with_context(|| format!("create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("serialize validation report")?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), "validation report written");
    Ok(())
}
