use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::report::SummaryData;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;

/// Writes `<prefix>summary.json` and `<prefix>report.txt`.
pub fn write_reports(data: &SummaryData<'_>, prefix: &str) -> std::io::Result<Vec<PathBuf>> {
    let summary_path = PathBuf::from(format!("{prefix}summary.json"));
    let json = render_summary_json(data).map_err(std::io::Error::other)?;
    write_text(&summary_path, &json)?;

    let report_path = PathBuf::from(format!("{prefix}report.txt"));
    let report = render_report_text(data);
    write_text(&report_path, &report)?;

    Ok(vec![summary_path, report_path])
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
