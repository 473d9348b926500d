use std::f64::consts::PI;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KinematicAxis {
    Eta,
    Phi,
    Energy,
}

pub const AXES: [KinematicAxis; 3] = [
    KinematicAxis::Eta,
    KinematicAxis::Phi,
    KinematicAxis::Energy,
];

impl KinematicAxis {
    pub fn name(self) -> &'static str {
        match self {
            KinematicAxis::Eta => "eta",
            KinematicAxis::Phi => "phi",
            KinematicAxis::Energy => "energy",
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            KinematicAxis::Eta => "η",
            KinematicAxis::Phi => "φ",
            KinematicAxis::Energy => "Energy (sim) [GeV]",
        }
    }

    pub fn edges(self) -> BinEdges {
        match self {
            KinematicAxis::Eta => BinEdges::linspace(-1.4, 1.4, 10),
            KinematicAxis::Phi => BinEdges::linspace(-PI, PI, 12),
            KinematicAxis::Energy => BinEdges::linspace(0.0, 600.0, 10),
        }
    }

    pub fn x_limits(self) -> (f64, f64) {
        match self {
            KinematicAxis::Eta => (-1.2, 1.2),
            KinematicAxis::Phi => (-PI, PI),
            KinematicAxis::Energy => (0.0, 600.0),
        }
    }

    /// Annotation anchor in data coordinates. The energy panel starts at zero,
    /// so its text is placed relative to the upper limit instead.
    pub fn annotation_anchor(self) -> (f64, f64) {
        let (lo, hi) = self.x_limits();
        match self {
            KinematicAxis::Energy => (hi * 0.2, 0.4),
            _ => (lo * 0.9, 0.4),
        }
    }
}

pub const Y_LIMITS: (f64, f64) = (-0.01, 1.1);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// `n_edges` evenly spaced edges with both endpoints included.
    pub fn linspace(start: f64, stop: f64, n_edges: usize) -> Self {
        let edges = match n_edges {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (stop - start) / (n - 1) as f64;
                let mut edges = (0..n).map(|i| start + step * i as f64).collect::<Vec<_>>();
                edges[n - 1] = stop;
                edges
            }
        };
        Self { edges }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    pub fn n_bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn lower_edges(&self) -> &[f64] {
        &self.edges[..self.n_bins()]
    }
}
