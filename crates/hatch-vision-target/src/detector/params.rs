use hatch_vision_segment::{
    BlurParams, ContourExtractParams, ContourFilterParams, HsvThresholdParams,
};
use serde::{Deserialize, Serialize};

use crate::classify::StripeClassifyParams;
use crate::pairing::PairingParams;
use crate::stripe_fit::StripeFitParams;

/// Configuration for every stage of [`super::HatchVisionPipeline`].
///
/// Missing fields deserialize to their production defaults, so a JSON file
/// only needs the values it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    #[serde(default)]
    pub blur: BlurParams,
    #[serde(default)]
    pub hsv: HsvThresholdParams,
    #[serde(default)]
    pub contours: ContourExtractParams,
    #[serde(default)]
    pub contour_filter: ContourFilterParams,
    #[serde(default)]
    pub stripe_fit: StripeFitParams,
    #[serde(default)]
    pub classify: StripeClassifyParams,
    #[serde(default)]
    pub pairing: PairingParams,
}

/// Camera intrinsics used for range estimation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Horizontal field of view, degrees.
    pub horizontal_fov_deg: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        // Microsoft LifeCam HD-3000
        Self {
            horizontal_fov_deg: 61.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatch_vision_segment::BlurKind;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "blur": { "kind": "median", "radius": 3.0 }, "pairing": { "vertical_tolerance_lengths": 0.5, "horizontal_tolerance_widths": 3.0 } }"#;
        let params: PipelineParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.blur.kind, BlurKind::Median);
        assert_eq!(params.pairing.vertical_tolerance_lengths, 0.5);
        assert_eq!(params.hsv, HsvThresholdParams::default());
        assert_eq!(params.stripe_fit, StripeFitParams::default());
    }

    #[test]
    fn empty_json_is_default() {
        let params: PipelineParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, PipelineParams::default());
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = PipelineParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: PipelineParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn production_constants_parse_exactly() {
        let json = r#"{ "blur": { "kind": "box", "radius": 2.7027027027027026 } }"#;
        let params: PipelineParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.blur.radius, 2.7027027027027026);
        assert_eq!(params.blur, BlurParams::default());

        let json = serde_json::to_string(&ContourFilterParams::default()).unwrap();
        let filter: ContourFilterParams = serde_json::from_str(&json).unwrap();
        assert_eq!(filter.solidity[0], 90.28776978417267);
    }
}
