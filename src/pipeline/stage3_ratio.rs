use serde::Serialize;
use thiserror::Error;

use crate::model::{BinEdges, KinematicAxis, Metric};
use crate::pipeline::stage1_count::AxisSelection;
use crate::pipeline::stage2_histogram::histogram;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioBin {
    pub numerator: u64,
    pub denominator: u64,
    pub ratio: f64,
    pub error_low: f64,
    pub error_high: f64,
    /// False for empty-denominator bins; those carry a zero ratio and zero
    /// errors and are not drawn.
    pub defined: bool,
}

impl RatioBin {
    fn empty(numerator: u64) -> Self {
        Self {
            numerator,
            denominator: 0,
            ratio: 0.0,
            error_low: 0.0,
            error_high: 0.0,
            defined: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ratio needs matching bins: numerator has {numerator_bins}, denominator has {denominator_bins}")]
pub struct RatioShapeError {
    pub numerator_bins: usize,
    pub denominator_bins: usize,
}

/// Bin-wise `n / d` with a binomial uncertainty `sqrt(r (1 - r) / d)`.
/// The uncertainty is symmetric here; see [`sanitize_uncertainties`].
pub fn make_ratio(numerator: &[u64], denominator: &[u64]) -> Result<Vec<RatioBin>, RatioShapeError> {
    if numerator.len() != denominator.len() {
        return Err(RatioShapeError {
            numerator_bins: numerator.len(),
            denominator_bins: denominator.len(),
        });
    }

    let bins = numerator
        .iter()
        .zip(denominator)
        .map(|(&n, &d)| {
            if d == 0 {
                return RatioBin::empty(n);
            }
            let ratio = n as f64 / d as f64;
            let error = (ratio * (1.0 - ratio) / d as f64).sqrt();
            RatioBin {
                numerator: n,
                denominator: d,
                ratio,
                error_low: error,
                error_high: error,
                defined: true,
            }
        })
        .collect();

    Ok(bins)
}

/// Replaces non-finite or negative uncertainties with zero and clips the
/// error bars to the physical range [0, 1].
pub fn sanitize_uncertainties(bins: &mut [RatioBin]) {
    for bin in bins.iter_mut() {
        if !bin.defined {
            bin.error_low = 0.0;
            bin.error_high = 0.0;
            continue;
        }
        let low = finite_non_negative(bin.error_low);
        let high = finite_non_negative(bin.error_high);
        bin.error_low = low.min(bin.ratio.max(0.0));
        bin.error_high = high.min((1.0 - bin.ratio).max(0.0));
    }
}

fn finite_non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisRatios {
    pub axis: KinematicAxis,
    pub edges: BinEdges,
    pub bins: Vec<RatioBin>,
}

impl AxisRatios {
    /// `(x, bin)` pairs for drawable bins, x being the lower bin edge.
    pub fn points(&self) -> impl Iterator<Item = (f64, &RatioBin)> + '_ {
        self.edges
            .lower_edges()
            .iter()
            .copied()
            .zip(&self.bins)
            .filter(|(_, bin)| bin.defined)
    }
}

pub fn axis_ratios(
    selection: &AxisSelection,
    axis: KinematicAxis,
    metric: Metric,
) -> Result<AxisRatios, RatioShapeError> {
    let edges = axis.edges();
    let numerator = histogram(selection.numerator(metric), &edges);
    let denominator = histogram(selection.denominator(), &edges);
    let mut bins = make_ratio(&numerator, &denominator)?;
    sanitize_uncertainties(&mut bins);
    Ok(AxisRatios { axis, edges, bins })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_ratio.rs"]
mod tests;
