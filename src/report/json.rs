use serde::Serialize;

use crate::pipeline::session::MetricTable;
use crate::report::SummaryData;

#[derive(Serialize)]
struct SummaryJson<'a> {
    tool: &'a str,
    version: &'a str,
    #[serde(rename = "cmsText")]
    cms_text: &'a str,
    score_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<&'a str>,
    n_datasets: usize,
    metrics: &'a [MetricTable],
}

pub fn render_summary_json(data: &SummaryData<'_>) -> serde_json::Result<String> {
    let summary = SummaryJson {
        tool: &data.tool_name,
        version: &data.tool_version,
        cms_text: &data.style.cms_text,
        score_threshold: data.score_threshold,
        annotation: data.annotation,
        n_datasets: data.tables.first().map_or(0, |t| t.datasets.len()),
        metrics: data.tables,
    };
    serde_json::to_string_pretty(&summary)
}
