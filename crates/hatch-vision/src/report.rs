use hatch_vision_core::OrientedRect;
use hatch_vision_target::{CameraParams, FrameSummary, HatchTarget, HatchVisionPipeline};
use serde::{Deserialize, Serialize};

/// Serializable description of one detected target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    /// Midpoint of the two stripe centers, px.
    pub center: [f64; 2],
    pub pixels_per_inch: f64,
    /// `None` when the stripe spacing gives no finite range.
    pub range_inches: Option<f64>,
    /// Not estimated; always 0.
    pub bearing_deg: f64,
    /// Not estimated; always 0.
    pub incident_angle_deg: f64,
    pub left: OrientedRect,
    pub right: OrientedRect,
}

impl TargetReport {
    pub fn new(target: &HatchTarget, image_width_px: u32, camera: &CameraParams) -> Self {
        let center = target.center();
        let range = target.range_inches(image_width_px, camera.horizontal_fov_deg);
        Self {
            center: [center.x, center.y],
            pixels_per_inch: target.pixels_per_inch(),
            range_inches: range.is_finite().then_some(range),
            bearing_deg: target.bearing_degrees(),
            incident_angle_deg: target.incident_angle_degrees(),
            left: target.left,
            right: target.right,
        }
    }
}

/// Targets and stage counts of one processed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub summary: FrameSummary,
    pub targets: Vec<TargetReport>,
}

impl FrameReport {
    /// Snapshot the last frame processed by `pipeline`.
    pub fn from_pipeline(pipeline: &HatchVisionPipeline, camera: &CameraParams) -> Self {
        let summary = *pipeline.summary();
        let width = u32::try_from(summary.width).unwrap_or(u32::MAX);
        Self {
            summary,
            targets: pipeline
                .targets()
                .iter()
                .map(|t| TargetReport::new(t, width, camera))
                .collect(),
        }
    }
}
