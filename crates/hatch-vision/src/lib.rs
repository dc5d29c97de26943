//! High-level facade for the `hatch-vision-*` workspace.
//!
//! This crate provides:
//! - re-exports of the underlying crates
//! - [`TargetReport`], a serializable snapshot of one detected target
//! - (feature `image`) helpers that run the pipeline on `image` crate buffers
//! - (feature `cli`) the `hatch-vision` batch binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use hatch_vision::detect;
//! use hatch_vision::target::{CameraParams, PipelineParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("frame.png")?.to_rgb8();
//! let reports = detect::detect_targets(&img, &PipelineParams::default(), &CameraParams::default())?;
//! for r in &reports {
//!     println!("target at {:?}, range {:?} in", r.center, r.range_inches);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `hatch_vision::core`: image containers, contours, oriented rectangles, logger.
//! - `hatch_vision::segment`: blur, HSV threshold, contour extraction and filtering.
//! - `hatch_vision::target`: stripe fit, classification, pairing and the stateful pipeline.
//! - `hatch_vision::detect` (feature `image`): end-to-end helpers from `image::RgbImage`.

pub use hatch_vision_core as core;
pub use hatch_vision_segment as segment;
pub use hatch_vision_target as target;

pub use hatch_vision_target::{
    CameraParams, FrameSummary, HatchTarget, HatchVisionPipeline, PipelineError, PipelineParams,
};

mod report;
pub use report::{FrameReport, TargetReport};

#[cfg(feature = "image")]
pub mod detect;
