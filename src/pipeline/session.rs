use std::path::PathBuf;

use plotters::style::RGBColor;
use serde::Serialize;

use crate::input::{ClusterEvents, ParticleEvents};
use crate::model::{AXES, METRICS, Metric, StyleConfig};
use crate::pipeline::PlotError;
use crate::pipeline::stage1_count::{ParticleCounts, count_particles};
use crate::pipeline::stage3_ratio::{AxisRatios, axis_ratios};
use crate::pipeline::stage4_render::{output_path, parse_color, render_metric};

pub const DEFAULT_COLORS: [&str; 2] = ["red", "black"];

/// Whole-dataset rates, before binning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallRates {
    pub counted: usize,
    pub matched: usize,
    pub duplicated: usize,
    pub purity: f64,
    pub duplicate_rate: f64,
}

impl OverallRates {
    pub fn from_counts(counts: &ParticleCounts) -> Self {
        let counted = counts.eta.total.len();
        let matched = counts.eta.purity.len();
        let duplicated = counts.eta.duplicate.len();
        let rate = |n: usize| {
            if counted == 0 {
                0.0
            } else {
                n as f64 / counted as f64
            }
        };
        Self {
            counted,
            matched,
            duplicated,
            purity: rate(matched),
            duplicate_rate: rate(duplicated),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetRatios {
    pub label: String,
    pub color: String,
    #[serde(skip)]
    pub rgb: RGBColor,
    pub overall: OverallRates,
    pub axes: Vec<AxisRatios>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricTable {
    pub metric: Metric,
    pub datasets: Vec<DatasetRatios>,
}

#[derive(Debug, Clone)]
pub struct PlotOutput {
    pub tables: Vec<MetricTable>,
    pub figures: Vec<PathBuf>,
}

/// One comparison run: a set of labeled datasets plotted on shared axes for
/// both metrics.
#[derive(Debug, Clone)]
pub struct PurityPlots<'a> {
    particles: &'a [ParticleEvents],
    clusters: &'a [ClusterEvents],
    annotation: Option<String>,
    labels: Option<Vec<String>>,
    colors: Vec<String>,
    output_prefix: Option<String>,
    style: StyleConfig,
}

impl<'a> PurityPlots<'a> {
    pub fn new(particles: &'a [ParticleEvents], clusters: &'a [ClusterEvents]) -> Self {
        Self {
            particles,
            clusters,
            annotation: None,
            labels: None,
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            output_prefix: None,
            style: StyleConfig::default(),
        }
    }

    pub fn annotate(mut self, text: Option<String>) -> Self {
        self.annotation = text;
        self
    }

    pub fn legend(mut self, labels: Option<Vec<String>>) -> Self {
        self.labels = labels;
        self
    }

    pub fn colors(mut self, colors: Vec<String>) -> Self {
        if !colors.is_empty() {
            self.colors = colors;
        }
        self
    }

    pub fn save(mut self, prefix: Option<String>) -> Self {
        self.output_prefix = prefix;
        self
    }

    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn n_datasets(&self) -> usize {
        self.particles.len()
    }

    pub fn run(&self) -> Result<PlotOutput, PlotError> {
        let n = self.n_datasets();
        self.check_shapes()?;

        let labels = self.resolve_labels();
        let mut datasets = Vec::with_capacity(n);
        for (k, (particles, clusters)) in self.particles.iter().zip(self.clusters).enumerate() {
            if particles.is_empty() {
                tracing::warn!(dataset = %labels[k], "particle mapping has no events");
            }
            if particles.len() != clusters.len() {
                tracing::warn!(
                    dataset = %labels[k],
                    particle_events = particles.len(),
                    cluster_events = clusters.len(),
                    "particle and layer-cluster mappings differ in event count"
                );
            }
            let counts = count_particles(particles)?;
            let rgb = parse_color(&self.colors[k])?;
            datasets.push((labels[k].clone(), self.colors[k].clone(), rgb, counts));
        }

        let mut tables = Vec::with_capacity(METRICS.len());
        let mut figures = Vec::new();
        for metric in METRICS {
            let table = build_metric_table(metric, &datasets)?;
            if let Some(prefix) = &self.output_prefix {
                let path = output_path(prefix, metric, n);
                render_metric(&table, &self.style, self.annotation.as_deref(), &path)?;
                figures.push(path);
            }
            tables.push(table);
        }

        Ok(PlotOutput { tables, figures })
    }

    fn check_shapes(&self) -> Result<(), PlotError> {
        let n = self.n_datasets();
        if n == 0 {
            return Err(PlotError::Shape("no datasets given".to_string()));
        }
        if self.clusters.len() != n {
            return Err(PlotError::Shape(format!(
                "{} particle mappings but {} layer-cluster mappings",
                n,
                self.clusters.len()
            )));
        }
        if let Some(labels) = &self.labels {
            if labels.len() < n {
                return Err(PlotError::Shape(format!(
                    "{} legend labels for {} datasets",
                    labels.len(),
                    n
                )));
            }
        }
        if self.colors.len() < n {
            return Err(PlotError::Shape(format!(
                "{} colors for {} datasets",
                self.colors.len(),
                n
            )));
        }
        Ok(())
    }

    fn resolve_labels(&self) -> Vec<String> {
        match &self.labels {
            Some(labels) => labels.clone(),
            None => (1..=self.n_datasets())
                .map(|k| format!("dataset {k}"))
                .collect(),
        }
    }
}

fn build_metric_table(
    metric: Metric,
    datasets: &[(String, String, RGBColor, ParticleCounts)],
) -> Result<MetricTable, PlotError> {
    let mut out = Vec::with_capacity(datasets.len());
    for (label, color, rgb, counts) in datasets {
        let mut axes = Vec::with_capacity(AXES.len());
        for axis in AXES {
            axes.push(axis_ratios(counts.axis(axis), axis, metric)?);
        }
        out.push(DatasetRatios {
            label: label.clone(),
            color: color.clone(),
            rgb: *rgb,
            overall: OverallRates::from_counts(counts),
            axes,
        });
    }
    Ok(MetricTable {
        metric,
        datasets: out,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/session.rs"]
mod tests;
