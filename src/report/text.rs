use crate::pipeline::session::{DatasetRatios, MetricTable};
use crate::report::{SummaryData, bin_range, format_f64_6};

pub fn render_report_text(data: &SummaryData<'_>) -> String {
    let mut out = String::new();

    out.push_str("CaloParticle Purity & Duplicate Rate Report\n");
    out.push_str("===========================================\n\n");
    out.push_str(&format!("{} {}\n", data.tool_name, data.tool_version));
    out.push_str(&format!("Label: {}\n", data.style.caption()));
    out.push_str(&format!(
        "Score threshold: {} (strict)\n",
        format_f64_6(data.score_threshold)
    ));
    if let Some(text) = data.annotation {
        out.push_str(&format!("Annotation: {}\n", text));
    }
    out.push('\n');

    if let Some(first) = data.tables.first() {
        out.push_str("1. Overall rates\n");
        for dataset in &first.datasets {
            out.push_str(&overall_line(dataset));
        }
        out.push('\n');
    }

    for (i, table) in data.tables.iter().enumerate() {
        out.push_str(&format!("{}. {} by axis\n", i + 2, table.metric.label()));
        render_metric_table(&mut out, table);
    }

    out
}

fn overall_line(dataset: &DatasetRatios) -> String {
    let o = &dataset.overall;
    format!(
        "{}: counted={} matched={} duplicated={} purity={} duplicate_rate={}\n",
        dataset.label,
        o.counted,
        o.matched,
        o.duplicated,
        format_f64_6(o.purity),
        format_f64_6(o.duplicate_rate)
    )
}

fn render_metric_table(out: &mut String, table: &MetricTable) {
    for dataset in &table.datasets {
        out.push_str(&format!("[{}]\n", dataset.label));
        for ratios in &dataset.axes {
            out.push_str(&format!("  {}\n", ratios.axis.name()));
            let edges = ratios.edges.as_slice();
            for (b, bin) in ratios.bins.iter().enumerate() {
                let value = if bin.defined {
                    format!(
                        "{} -{} +{}",
                        format_f64_6(bin.ratio),
                        format_f64_6(bin.error_low),
                        format_f64_6(bin.error_high)
                    )
                } else {
                    "n/a".to_string()
                };
                out.push_str(&format!(
                    "    {}\t{}/{}\t{}\n",
                    bin_range(edges, b),
                    bin.numerator,
                    bin.denominator,
                    value
                ));
            }
        }
    }
    out.push('\n');
}
