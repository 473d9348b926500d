use thiserror::Error;

use crate::input::InputError;
use crate::pipeline::stage3_ratio::RatioShapeError;

pub mod session;
pub mod stage1_count;
pub mod stage2_histogram;
pub mod stage3_ratio;
pub mod stage4_render;
pub mod stage5_report;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Ratio(#[from] RatioShapeError),
    #[error("shape mismatch: {0}")]
    Shape(String),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("failed to draw figure: {0}")]
    Drawing(String),
    #[error("failed to convert figure to PDF: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
