use hatch_vision_core::ImageError;
use hatch_vision_segment::SegmentError;

/// Errors returned by [`super::HatchVisionPipeline::process`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid image: {0}")]
    InvalidImage(#[from] ImageError),
    #[error(transparent)]
    LibraryFault(#[from] SegmentError),
}
