pub mod json;
pub mod text;

use crate::model::StyleConfig;
use crate::pipeline::session::MetricTable;

#[derive(Debug, Clone)]
pub struct SummaryData<'a> {
    pub tool_name: String,
    pub tool_version: String,
    pub style: &'a StyleConfig,
    pub score_threshold: f64,
    pub annotation: Option<&'a str>,
    pub tables: &'a [MetricTable],
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Bin label `[lo, hi)`, or `[lo, hi]` for the last bin.
pub fn bin_range(edges: &[f64], bin: usize) -> String {
    let close = if bin + 2 == edges.len() { ']' } else { ')' };
    format!("[{:.3}, {:.3}{}", edges[bin], edges[bin + 1], close)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
