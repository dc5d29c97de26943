//! Hatch target recognition from segmented stripe contours.
//!
//! Each filtered contour is fit with a minimum-area rectangle and kept when
//! its size, aspect ratio and fill match a strip of tape. Rectangles are
//! split into left-leaning and right-leaning stripes by angle, then paired
//! greedily into targets whose spacing gives scale and range.
//!
//! [`HatchVisionPipeline`] runs the full chain, segmentation included, and
//! keeps every intermediate list of the last frame.
//!
//! ```no_run
//! use hatch_vision_core::BgrImage;
//! use hatch_vision_target::{CameraParams, HatchVisionPipeline, PipelineParams};
//!
//! let frame = BgrImage::new(640, 480);
//! let camera = CameraParams::default();
//! let mut pipeline = HatchVisionPipeline::new(PipelineParams::default());
//! pipeline.process(&frame.view())?;
//! for target in pipeline.targets() {
//!     println!("range {:.1} in", target.range_inches(640, camera.horizontal_fov_deg));
//! }
//! # Ok::<(), hatch_vision_target::PipelineError>(())
//! ```

mod classify;
mod detector;
mod pairing;
pub mod physical;
mod stripe_fit;
mod target;

pub use classify::{classify_stripe, classify_stripes_into, StripeClassifyParams, StripeSide};
pub use detector::{CameraParams, FrameSummary, HatchVisionPipeline, PipelineError, PipelineParams};
pub use pairing::{
    is_partner, pair_stripes, pair_stripes_into, stripe_pixels_per_inch, PairingParams, StripePair,
};
pub use stripe_fit::{fit_stripe, fit_stripes_into, StripeFitParams};
pub use target::HatchTarget;
