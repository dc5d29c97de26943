use std::path::Path;

use crate::core::{BgrImage, BgrImageView};
use crate::target::{CameraParams, HatchVisionPipeline, PipelineError, PipelineParams};
use crate::{FrameReport, TargetReport};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid BGR image buffer length (expected {expected} bytes, got {got})")]
    InvalidBgrBuffer { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Decode(#[from] ::image::ImageError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Decode an image file into BGR.
pub fn load_bgr(path: impl AsRef<Path>) -> Result<BgrImage, DetectError> {
    let rgb = ::image::open(path)?.to_rgb8();
    Ok(BgrImage::from_rgb(&rgb))
}

/// Build a `BgrImage` from a raw interleaved BGR buffer.
pub fn bgr_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<BgrImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h).filter(|&(w, h)| w > 0 && h > 0) else {
        return Err(DetectError::InvalidDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(DetectError::InvalidDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidBgrBuffer {
            expected,
            got: pixels.len(),
        });
    }
    BgrImage::from_raw(w, h, pixels.to_vec())
        .map_err(|_| DetectError::InvalidDimensions { width, height })
}

/// Run `pipeline` on one BGR frame and snapshot its targets.
pub fn process_frame(
    pipeline: &mut HatchVisionPipeline,
    frame: &BgrImageView<'_>,
    camera: &CameraParams,
) -> Result<FrameReport, DetectError> {
    pipeline.process(frame)?;
    Ok(FrameReport::from_pipeline(pipeline, camera))
}

/// Run the full pipeline end-to-end on an RGB image with a fresh pipeline.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params, camera),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_targets(
    img: &::image::RgbImage,
    params: &PipelineParams,
    camera: &CameraParams,
) -> Result<Vec<TargetReport>, DetectError> {
    let frame = BgrImage::from_rgb(img);
    let mut pipeline = HatchVisionPipeline::new(params.clone());
    Ok(process_frame(&mut pipeline, &frame.view(), camera)?.targets)
}

pub fn detect_targets_from_bgr_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: &PipelineParams,
    camera: &CameraParams,
) -> Result<Vec<TargetReport>, DetectError> {
    let frame = bgr_image_from_slice(width, height, pixels)?;
    let mut pipeline = HatchVisionPipeline::new(params.clone());
    Ok(process_frame(&mut pipeline, &frame.view(), camera)?.targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fill_oriented_rect, OrientedRect};
    use nalgebra::Point2;

    fn scene() -> BgrImage {
        let mut img = BgrImage::new(640, 480);
        let left = OrientedRect::new(Point2::new(273.1, 240.0), 20.0, 55.0, -165.47);
        let right = OrientedRect::new(Point2::new(366.9, 240.0), 20.0, 55.0, -14.53);
        fill_oriented_rect(&mut img, &left, [0, 255, 0]);
        fill_oriented_rect(&mut img, &right, [0, 255, 0]);
        img
    }

    #[test]
    fn slice_validation() {
        assert!(matches!(
            bgr_image_from_slice(4, 4, &[0; 10]),
            Err(DetectError::InvalidBgrBuffer {
                expected: 48,
                got: 10
            })
        ));
        assert!(matches!(
            bgr_image_from_slice(0, 4, &[]),
            Err(DetectError::InvalidDimensions { .. })
        ));
        let img = bgr_image_from_slice(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.pixel(1, 0), [4, 5, 6]);
    }

    #[test]
    fn rgb_and_bgr_entry_points_agree() {
        let bgr = scene();
        let rgb = bgr.to_rgb().expect("rgb conversion");
        let params = PipelineParams::default();
        let camera = CameraParams::default();

        let from_rgb = detect_targets(&rgb, &params, &camera).unwrap();
        let from_bgr = detect_targets_from_bgr_u8(640, 480, &bgr.data, &params, &camera).unwrap();
        assert_eq!(from_rgb.len(), 1);
        assert_eq!(from_rgb, from_bgr);
    }
}
