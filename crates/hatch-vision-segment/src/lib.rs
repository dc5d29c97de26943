//! Segmentation front end of the stripe pipeline.
//!
//! 1. Blur the BGR frame to suppress single-pixel noise.
//! 2. Threshold in HSV space to a binary mask of lit retroreflective tape.
//! 3. Trace region boundaries of the mask.
//! 4. Reject boundaries by area, perimeter, bounding box, solidity, vertex
//!    count and bounding-box aspect ratio.
//!
//! Every stage has an `*_into` form that writes into caller-owned buffers so
//! a long-running pipeline reuses its allocations frame after frame.

mod blur;
mod contour_filter;
mod contours;
mod error;
mod hsv;

pub use blur::{blur, blur_into, BlurKind, BlurParams};
pub use contour_filter::{contour_passes, filter_contours_into, ContourFilterParams};
pub use contours::{extract_contours, find_contours_into, ContourExtractParams};
pub use error::SegmentError;
pub use hsv::{bgr_to_hsv, hsv_threshold, hsv_threshold_into, HsvThresholdParams};
