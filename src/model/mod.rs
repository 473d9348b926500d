pub mod axes;
pub mod metrics;
pub mod style;

pub use axes::{AXES, BinEdges, KinematicAxis, Y_LIMITS};
pub use metrics::{METRICS, Metric, SCORE_THRESHOLD};
pub use style::StyleConfig;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
