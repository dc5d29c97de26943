//! Stateful stripe pipeline.
//!
//! This module wires the segmentation stages to stripe fitting,
//! classification and pairing, and keeps every intermediate list of the last
//! frame for inspection.

mod error;
mod params;
mod pipeline;
mod summary;

pub use error::PipelineError;
pub use params::{CameraParams, PipelineParams};
pub use pipeline::HatchVisionPipeline;
pub use summary::FrameSummary;
