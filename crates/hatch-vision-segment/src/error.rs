/// Errors returned by segmentation primitives.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("image primitive failed: {0}")]
    Primitive(&'static str),
}
