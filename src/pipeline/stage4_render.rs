use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

use crate::model::{AXES, KinematicAxis, Metric, StyleConfig, Y_LIMITS};
use crate::pipeline::PlotError;
use crate::pipeline::session::MetricTable;

const FIGURE_SIZE: (u32, u32) = (3000, 1500);
const MARKER_SIZE: i32 = 8;
const CAP_WIDTH: u32 = 12;

/// `<prefix><metric>[_comparison].pdf`; the comparison suffix marks a
/// two-dataset figure.
pub fn output_path(prefix: &str, metric: Metric, n_datasets: usize) -> PathBuf {
    let suffix = if n_datasets == 2 { "_comparison" } else { "" };
    PathBuf::from(format!("{}{}{}.pdf", prefix, metric.file_stem(), suffix))
}

pub fn parse_color(name: &str) -> Result<RGBColor, PlotError> {
    let lower = name.trim().to_ascii_lowercase();
    let rgb = match lower.as_str() {
        "red" => RED,
        "black" => BLACK,
        "blue" => BLUE,
        "green" => RGBColor(0, 128, 0),
        "orange" => RGBColor(255, 165, 0),
        "magenta" => MAGENTA,
        "cyan" => CYAN,
        "purple" => RGBColor(128, 0, 128),
        "gray" | "grey" => RGBColor(128, 128, 128),
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| PlotError::InvalidColor(name.to_string()))
            };
            RGBColor(channel(1)?, channel(3)?, channel(5)?)
        }
        _ => return Err(PlotError::InvalidColor(name.to_string())),
    };
    Ok(rgb)
}

fn drawing_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

fn pdf_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Pdf(e.to_string())
}

/// Renders the figure and writes it to `path` as a single-page PDF.
pub fn render_metric(
    table: &MetricTable,
    style: &StyleConfig,
    annotation: Option<&str>,
    path: &Path,
) -> Result<(), PlotError> {
    let svg = render_svg(table, style, annotation)?;
    let pdf = svg_to_pdf(&svg)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, pdf)?;
    Ok(())
}

/// Draws the three panels into an in-memory SVG document.
pub fn render_svg(
    table: &MetricTable,
    style: &StyleConfig,
    annotation: Option<&str>,
) -> Result<String, PlotError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_err)?;
        let panels = root.split_evenly((1, AXES.len()));

        for (idx, (panel, axis)) in panels.iter().zip(AXES).enumerate() {
            draw_panel(panel, idx, axis, table, style, annotation)?;
        }

        root.present().map_err(drawing_err)?;
    }
    Ok(svg)
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, PlotError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(pdf_err)?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default()).map_err(pdf_err)
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    axis_idx: usize,
    axis: KinematicAxis,
    table: &MetricTable,
    style: &StyleConfig,
    annotation: Option<&str>,
) -> Result<(), PlotError> {
    let (x_min, x_max) = axis.x_limits();
    let (y_min, y_max) = Y_LIMITS;

    let mut chart = ChartBuilder::on(area)
        .caption(style.caption(), ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(drawing_err)?;

    chart
        .configure_mesh()
        .x_desc(axis.x_label())
        .y_desc(table.metric.label())
        .axis_desc_style(("sans-serif", 28))
        .label_style(("sans-serif", 22))
        .draw()
        .map_err(drawing_err)?;

    for dataset in &table.datasets {
        let ratios = &dataset.axes[axis_idx];
        let points = ratios
            .points()
            .filter(|(x, _)| *x >= x_min && *x <= x_max)
            .collect::<Vec<_>>();
        let color = dataset.rgb;

        chart
            .draw_series(points.iter().map(|(x, bin)| {
                ErrorBar::new_vertical(
                    *x,
                    bin.ratio - bin.error_low,
                    bin.ratio,
                    bin.ratio + bin.error_high,
                    color.stroke_width(2),
                    CAP_WIDTH,
                )
            }))
            .map_err(drawing_err)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|(x, bin)| Circle::new((*x, bin.ratio), MARKER_SIZE, color.filled())),
            )
            .map_err(drawing_err)?
            .label(dataset.label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled()));
    }

    if let Some(text) = annotation {
        let anchor = axis.annotation_anchor();
        chart
            .draw_series(std::iter::once(Text::new(
                text.to_string(),
                anchor,
                ("sans-serif", 26),
            )))
            .map_err(drawing_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 24))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing_err)?;

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_render.rs"]
mod tests;
