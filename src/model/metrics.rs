use serde::Serialize;

/// Association scores strictly below this value count as a match.
pub const SCORE_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Purity,
    Duplicate,
}

pub const METRICS: [Metric; 2] = [Metric::Purity, Metric::Duplicate];

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Purity => "Purity",
            Metric::Duplicate => "Duplicate",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            Metric::Purity => "purity",
            Metric::Duplicate => "duplicate",
        }
    }
}
