use hatch_vision_core::{BgrImage, BgrImageView, BinaryMask, Contour, OrientedRect};
use hatch_vision_segment::{blur_into, filter_contours_into, find_contours_into, hsv_threshold_into};
use log::{debug, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{FrameSummary, PipelineError, PipelineParams};
use crate::classify::classify_stripes_into;
use crate::pairing::{pair_stripes_into, StripePair};
use crate::stripe_fit::fit_stripes_into;
use crate::target::HatchTarget;

/// Frame-by-frame hatch target detector.
///
/// Holds the scratch buffers and the output lists of the last processed
/// frame; they are reused on the next call to [`HatchVisionPipeline::process`].
/// One instance serves one camera stream.
#[derive(Debug, Default)]
pub struct HatchVisionPipeline {
    params: PipelineParams,

    blur_scratch: Vec<f32>,
    blurred: BgrImage,
    mask: BinaryMask,
    contours: Vec<Contour>,
    filtered_contours: Vec<Contour>,
    stripes: Vec<OrientedRect>,
    left: Vec<OrientedRect>,
    right: Vec<OrientedRect>,
    unclassified: Vec<OrientedRect>,
    pairs: Vec<StripePair>,
    right_used: Vec<bool>,
    targets: Vec<HatchTarget>,
    summary: FrameSummary,
}

impl HatchVisionPipeline {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    #[inline]
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Run every stage on `image`.
    ///
    /// An invalid image is rejected before any buffer is touched, so the
    /// outputs of the previous frame stay readable. If a segmentation
    /// primitive fails midway, all outputs are cleared.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn process(&mut self, image: &BgrImageView<'_>) -> Result<(), PipelineError> {
        if let Err(err) = image.validate() {
            warn!("rejecting frame: {err}");
            return Err(err.into());
        }

        if let Err(err) = blur_into(image, &self.params.blur, &mut self.blurred, &mut self.blur_scratch) {
            warn!("blur failed: {err}");
            self.clear();
            return Err(err.into());
        }
        hsv_threshold_into(&self.blurred.view(), &self.params.hsv, &mut self.mask);
        find_contours_into(&self.mask, &self.params.contours, &mut self.contours);
        filter_contours_into(&self.contours, &self.params.contour_filter, &mut self.filtered_contours);

        fit_stripes_into(&self.filtered_contours, &self.params.stripe_fit, &mut self.stripes);
        classify_stripes_into(
            &self.stripes,
            &self.params.classify,
            &mut self.left,
            &mut self.right,
            &mut self.unclassified,
        );
        pair_stripes_into(
            &self.left,
            &self.right,
            &self.params.pairing,
            &mut self.pairs,
            &mut self.right_used,
        );
        self.targets.clear();
        self.targets.extend(
            self.pairs
                .iter()
                .map(|p| HatchTarget::new(self.left[p.left], self.right[p.right])),
        );

        self.summary = FrameSummary {
            width: image.width,
            height: image.height,
            contours: self.contours.len(),
            filtered_contours: self.filtered_contours.len(),
            stripes: self.stripes.len(),
            left: self.left.len(),
            right: self.right.len(),
            unclassified: self.unclassified.len(),
            targets: self.targets.len(),
        };
        debug!("frame {}", self.summary);
        Ok(())
    }

    fn clear(&mut self) {
        self.blurred.reshape(0, 0);
        self.mask = BinaryMask::new(0, 0);
        self.contours.clear();
        self.filtered_contours.clear();
        self.stripes.clear();
        self.left.clear();
        self.right.clear();
        self.unclassified.clear();
        self.pairs.clear();
        self.right_used.clear();
        self.targets.clear();
        self.summary = FrameSummary::default();
    }

    /// Blurred copy of the last frame.
    pub fn blurred(&self) -> &BgrImage {
        &self.blurred
    }

    /// HSV threshold mask of the last frame.
    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    /// Every border traced from the mask.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Borders that passed the shape statistics filter.
    pub fn filtered_contours(&self) -> &[Contour] {
        &self.filtered_contours
    }

    /// Canonical rectangles that fit the stripe profile.
    pub fn filtered_rects(&self) -> &[OrientedRect] {
        &self.stripes
    }

    pub fn left_stripes(&self) -> &[OrientedRect] {
        &self.left
    }

    /// Every right-classified stripe, including those consumed by pairing.
    pub fn right_stripes(&self) -> &[OrientedRect] {
        &self.right
    }

    pub fn unclassified_stripes(&self) -> &[OrientedRect] {
        &self.unclassified
    }

    /// Right stripes that no left stripe claimed, in classification order.
    pub fn unmatched_right_stripes(&self) -> impl Iterator<Item = &OrientedRect> + '_ {
        self.right
            .iter()
            .zip(&self.right_used)
            .filter(|(_, used)| !**used)
            .map(|(rect, _)| rect)
    }

    /// Index pairs into [`Self::left_stripes`] and [`Self::right_stripes`].
    pub fn pairs(&self) -> &[StripePair] {
        &self.pairs
    }

    pub fn targets(&self) -> &[HatchTarget] {
        &self.targets
    }

    pub fn summary(&self) -> &FrameSummary {
        &self.summary
    }
}
