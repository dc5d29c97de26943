//! HSV range segmentation.
//!
//! Hue is stored halved (`0..180`) so it fits a byte; saturation and value
//! span `0..=255`.

use hatch_vision_core::{ensure_mask_size, BgrImageView, BinaryMask};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Inclusive HSV bounds, each `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HsvThresholdParams {
    pub hue: [f64; 2],
    pub saturation: [f64; 2],
    pub value: [f64; 2],
}

impl Default for HsvThresholdParams {
    fn default() -> Self {
        // Green LED ring on retroreflective tape.
        Self {
            hue: [45.69817278554671, 93.99989504410354],
            saturation: [91.72661870503596, 255.0],
            value: [57.32913669064751, 255.0],
        }
    }
}

impl HsvThresholdParams {
    /// Bounds saturated to bytes, `[lo_h, lo_s, lo_v]` and `[hi_h, hi_s, hi_v]`.
    pub fn byte_bounds(&self) -> ([u8; 3], [u8; 3]) {
        let b = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        (
            [b(self.hue[0]), b(self.saturation[0]), b(self.value[0])],
            [b(self.hue[1]), b(self.saturation[1]), b(self.value[1])],
        )
    }
}

/// Convert one BGR pixel to 8-bit HSV.
pub fn bgr_to_hsv(bgr: [u8; 3]) -> [u8; 3] {
    let [b, g, r] = bgr.map(i32::from);
    let v = b.max(g).max(r);
    let diff = v - b.min(g).min(r);

    let s = if v == 0 {
        0
    } else {
        (255.0 * diff as f64 / v as f64 + 0.5).floor() as i32
    };

    let h = if diff == 0 {
        0
    } else {
        let num = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let mut h = (num as f64 * 30.0 / diff as f64 + 0.5).floor() as i32;
        if h < 0 {
            h += 180;
        }
        if h >= 180 {
            h -= 180;
        }
        h
    };

    [h as u8, s as u8, v as u8]
}

/// Write 255 into `mask` where every HSV channel of `src` lies within bounds.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src, mask), fields(width = src.width, height = src.height))
)]
pub fn hsv_threshold_into(
    src: &BgrImageView<'_>,
    params: &HsvThresholdParams,
    mask: &mut BinaryMask,
) {
    ensure_mask_size(mask, src.width, src.height);
    let (lo, hi) = params.byte_bounds();
    for (px, out) in src.data.chunks_exact(3).zip(mask.iter_mut()) {
        let hsv = bgr_to_hsv([px[0], px[1], px[2]]);
        let inside = (0..3).all(|c| hsv[c] >= lo[c] && hsv[c] <= hi[c]);
        *out = if inside { 255 } else { 0 };
    }
}

pub fn hsv_threshold(src: &BgrImageView<'_>, params: &HsvThresholdParams) -> BinaryMask {
    let mut mask = BinaryMask::new(0, 0);
    hsv_threshold_into(src, params, &mut mask);
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatch_vision_core::BgrImage;

    #[test]
    fn primary_colors() {
        assert_eq!(bgr_to_hsv([0, 0, 255]), [0, 255, 255]); // red
        assert_eq!(bgr_to_hsv([0, 255, 0]), [60, 255, 255]); // green
        assert_eq!(bgr_to_hsv([255, 0, 0]), [120, 255, 255]); // blue
        assert_eq!(bgr_to_hsv([0, 255, 255]), [30, 255, 255]); // yellow
        assert_eq!(bgr_to_hsv([128, 128, 128]), [0, 0, 128]);
        assert_eq!(bgr_to_hsv([0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn hue_wraps_for_magenta_side_of_red() {
        // r max, b slightly above g: negative raw hue wraps near 180.
        let [h, _, _] = bgr_to_hsv([40, 0, 255]);
        assert!(h > 170, "{h}");
    }

    #[test]
    fn production_bounds_round_to_bytes() {
        let (lo, hi) = HsvThresholdParams::default().byte_bounds();
        assert_eq!(lo, [46, 92, 57]);
        assert_eq!(hi, [94, 255, 255]);
    }

    #[test]
    fn mask_selects_green_only() {
        let mut img = BgrImage::new(4, 1);
        img.put_pixel(0, 0, [0, 255, 0]); // green
        img.put_pixel(1, 0, [255, 0, 0]); // blue
        img.put_pixel(2, 0, [0, 40, 0]); // too dark
        img.put_pixel(3, 0, [0, 160, 0]); // dim green, still bright enough
        let mask = hsv_threshold(&img.view(), &HsvThresholdParams::default());
        assert_eq!(mask.as_raw(), &vec![255, 0, 0, 255]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut img = BgrImage::new(1, 1);
        img.put_pixel(0, 0, [0, 57, 0]);
        let mask = hsv_threshold(&img.view(), &HsvThresholdParams::default());
        assert_eq!(mask.as_raw()[0], 255);
        img.put_pixel(0, 0, [0, 56, 0]);
        let mask = hsv_threshold(&img.view(), &HsvThresholdParams::default());
        assert_eq!(mask.as_raw()[0], 0);
    }
}
