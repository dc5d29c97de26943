//! Low-pass filtering of the source frame before thresholding.
//!
//! Box and Gaussian filters are separable convolutions with reflect-101
//! borders (`gfedcb|abcdefgh|gfedcba`). The median filter delegates to
//! `imageproc`. The bilateral filter uses a circular window and the sum of
//! absolute channel differences as colour distance.

use hatch_vision_core::{BgrImage, BgrImageView};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::SegmentError;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurKind {
    #[default]
    Box,
    Gaussian,
    Median,
    Bilateral,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlurParams {
    pub kind: BlurKind,
    /// Filter radius in pixels; rounded to the nearest integer before use.
    pub radius: f64,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            kind: BlurKind::Box,
            radius: 2.7027027027027026, // 7x7 box
        }
    }
}

impl BlurParams {
    /// Radius rounded half-up, never negative.
    pub fn int_radius(&self) -> usize {
        (self.radius + 0.5).floor().max(0.0) as usize
    }

    /// Side length of the square window the filter reads.
    pub fn kernel_size(&self) -> usize {
        let r = self.int_radius();
        match self.kind {
            BlurKind::Box | BlurKind::Median => 2 * r + 1,
            BlurKind::Gaussian => 6 * r + 1,
            BlurKind::Bilateral => 2 * bilateral_window_radius(r) + 1,
        }
    }
}

/// Blur `src` into `dst`, reusing `dst` and `scratch` allocations.
///
/// A rounded radius of zero copies the input unchanged.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src, dst, scratch), fields(width = src.width, height = src.height))
)]
pub fn blur_into(
    src: &BgrImageView<'_>,
    params: &BlurParams,
    dst: &mut BgrImage,
    scratch: &mut Vec<f32>,
) -> Result<(), SegmentError> {
    let r = params.int_radius();
    dst.reshape(src.width, src.height);
    if r == 0 {
        dst.data.copy_from_slice(src.data);
        return Ok(());
    }

    match params.kind {
        BlurKind::Box => {
            let n = 2 * r + 1;
            let kernel = vec![1.0 / n as f32; n];
            convolve_separable(src, &kernel, dst, scratch);
        }
        BlurKind::Gaussian => {
            let kernel = gaussian_kernel(6 * r + 1, r as f32);
            convolve_separable(src, &kernel, dst, scratch);
        }
        BlurKind::Median => median(src, r, dst)?,
        BlurKind::Bilateral => bilateral(src, r as f32, dst),
    }
    Ok(())
}

/// Convenience wrapper that allocates its output.
pub fn blur(src: &BgrImageView<'_>, params: &BlurParams) -> Result<BgrImage, SegmentError> {
    let mut dst = BgrImage::default();
    let mut scratch = Vec::new();
    blur_into(src, params, &mut dst, &mut scratch)?;
    Ok(dst)
}

#[inline]
fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let i = i.rem_euclid(period);
    (if i >= n { period - i } else { i }) as usize
}

fn gaussian_kernel(size: usize, sigma: f32) -> Vec<f32> {
    let half = (size / 2) as f32;
    let mut k: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - half;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = k.iter().sum();
    for v in &mut k {
        *v /= sum;
    }
    k
}

fn convolve_separable(
    src: &BgrImageView<'_>,
    kernel: &[f32],
    dst: &mut BgrImage,
    scratch: &mut Vec<f32>,
) {
    let (w, h) = (src.width, src.height);
    let r = (kernel.len() / 2) as isize;
    scratch.clear();
    scratch.resize(w * h * 3, 0.0);

    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            let mut acc = [0f32; 3];
            for (k, &wk) in kernel.iter().enumerate() {
                let sx = reflect101(x as isize + k as isize - r, w);
                let i = (row + sx) * 3;
                acc[0] += wk * src.data[i] as f32;
                acc[1] += wk * src.data[i + 1] as f32;
                acc[2] += wk * src.data[i + 2] as f32;
            }
            scratch[(row + x) * 3..(row + x) * 3 + 3].copy_from_slice(&acc);
        }
    }

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 3];
            for (k, &wk) in kernel.iter().enumerate() {
                let sy = reflect101(y as isize + k as isize - r, h);
                let i = (sy * w + x) * 3;
                acc[0] += wk * scratch[i];
                acc[1] += wk * scratch[i + 1];
                acc[2] += wk * scratch[i + 2];
            }
            let o = (y * w + x) * 3;
            for c in 0..3 {
                dst.data[o + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

fn median(src: &BgrImageView<'_>, r: usize, dst: &mut BgrImage) -> Result<(), SegmentError> {
    // Channel order is irrelevant to a per-channel median, so the BGR bytes
    // ride through an `RgbImage` untouched.
    let rgb = image::RgbImage::from_raw(src.width as u32, src.height as u32, src.data.to_vec())
        .ok_or(SegmentError::Primitive("median filter input buffer"))?;
    let out = imageproc::filter::median_filter(&rgb, r as u32, r as u32);
    let raw = out.into_raw();
    if raw.len() != dst.data.len() {
        return Err(SegmentError::Primitive("median filter output size"));
    }
    dst.data.copy_from_slice(&raw);
    Ok(())
}

fn bilateral_window_radius(r: usize) -> usize {
    (1.5 * r as f32).round() as usize
}

fn bilateral(src: &BgrImageView<'_>, sigma: f32, dst: &mut BgrImage) {
    let (w, h) = (src.width, src.height);
    let radius = bilateral_window_radius(sigma as usize) as isize;
    let space_coeff = -0.5 / (sigma * sigma);
    let color_coeff = -0.5 / (sigma * sigma);

    let mut window: Vec<(isize, isize, f32)> = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dx * dx + dy * dy) as f32;
            if d2 <= (radius * radius) as f32 {
                window.push((dx, dy, (d2 * space_coeff).exp()));
            }
        }
    }
    let color_lut: Vec<f32> = (0..=255 * 3)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    for y in 0..h {
        for x in 0..w {
            let c0 = src.pixel(x, y);
            let mut acc = [0f32; 3];
            let mut wsum = 0f32;
            for &(dx, dy, ws) in &window {
                let sx = reflect101(x as isize + dx, w);
                let sy = reflect101(y as isize + dy, h);
                let c = src.pixel(sx, sy);
                let dist = c0
                    .iter()
                    .zip(c.iter())
                    .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as usize)
                    .sum::<usize>();
                let wgt = ws * color_lut[dist];
                for ch in 0..3 {
                    acc[ch] += wgt * c[ch] as f32;
                }
                wsum += wgt;
            }
            let o = (y * w + x) * 3;
            for ch in 0..3 {
                dst.data[o + ch] = (acc[ch] / wsum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: usize, h: usize, bgr: [u8; 3]) -> BgrImage {
        let mut img = BgrImage::new(w, h);
        for px in img.data.chunks_exact_mut(3) {
            px.copy_from_slice(&bgr);
        }
        img
    }

    fn impulse(w: usize, h: usize) -> BgrImage {
        let mut img = BgrImage::new(w, h);
        img.put_pixel(w / 2, h / 2, [49, 98, 245]);
        img
    }

    #[test]
    fn production_radius_gives_seven_tap_box() {
        let p = BlurParams::default();
        assert_eq!(p.int_radius(), 3);
        assert_eq!(p.kernel_size(), 7);
        let g = BlurParams {
            kind: BlurKind::Gaussian,
            radius: 2.2,
        };
        assert_eq!(g.kernel_size(), 13);
    }

    #[test]
    fn reflect101_indices() {
        let idx: Vec<usize> = (-3..8).map(|i| reflect101(i, 5)).collect();
        assert_eq!(idx, vec![3, 2, 1, 0, 1, 2, 3, 4, 3, 2, 1]);
        assert_eq!(reflect101(-4, 1), 0);
    }

    #[test]
    fn every_kind_preserves_uniform_image() {
        let img = uniform(9, 7, [10, 200, 30]);
        for kind in [
            BlurKind::Box,
            BlurKind::Gaussian,
            BlurKind::Median,
            BlurKind::Bilateral,
        ] {
            let out = blur(&img.view(), &BlurParams { kind, radius: 1.0 }).unwrap();
            assert_eq!(out, img, "{kind:?}");
        }
    }

    #[test]
    fn box_spreads_impulse_evenly() {
        let img = impulse(11, 11);
        let out = blur(
            &img.view(),
            &BlurParams {
                kind: BlurKind::Box,
                radius: 1.0,
            },
        )
        .unwrap();
        // 9-tap average of a single lit pixel
        assert_eq!(out.pixel(5, 5), [5, 11, 27]);
        assert_eq!(out.pixel(4, 4), [5, 11, 27]);
        assert_eq!(out.pixel(3, 5), [0, 0, 0]);
    }

    #[test]
    fn gaussian_impulse_falls_off_symmetrically() {
        let img = impulse(15, 15);
        let out = blur(
            &img.view(),
            &BlurParams {
                kind: BlurKind::Gaussian,
                radius: 1.0,
            },
        )
        .unwrap();
        let g = |x: usize, y: usize| out.pixel(x, y)[2];

        let peak = g(7, 7);
        assert!(peak > 0 && peak < 245);
        for d in 1..=3 {
            let ring = [g(7 - d, 7), g(7 + d, 7), g(7, 7 - d), g(7, 7 + d)];
            assert!(ring.iter().all(|&v| v == ring[0]), "d={d} {ring:?}");
            let diag = [g(7 - d, 7 - d), g(7 + d, 7 - d), g(7 - d, 7 + d), g(7 + d, 7 + d)];
            assert!(diag.iter().all(|&v| v == diag[0]), "d={d} {diag:?}");
            assert!(diag[0] <= ring[0]);
        }
        assert!(peak > g(8, 7) && g(8, 7) > g(9, 7) && g(9, 7) >= g(10, 7));
        assert!(g(8, 8) < g(8, 7));
        assert_eq!(out.pixel(2, 7), [0, 0, 0]);
    }

    #[test]
    fn bilateral_keeps_hard_edge() {
        let mut img = BgrImage::new(12, 8);
        for y in 0..8 {
            for x in 6..12 {
                img.put_pixel(x, y, [0, 200, 0]);
            }
        }
        let bilateral = blur(
            &img.view(),
            &BlurParams {
                kind: BlurKind::Bilateral,
                radius: 2.0,
            },
        )
        .unwrap();
        assert_eq!(bilateral, img);

        let boxed = blur(
            &img.view(),
            &BlurParams {
                kind: BlurKind::Box,
                radius: 2.0,
            },
        )
        .unwrap();
        let (dark, lit) = (boxed.pixel(5, 4)[1], boxed.pixel(6, 4)[1]);
        assert!(dark > 0 && lit < 200, "box edge {dark} {lit}");
    }

    #[test]
    fn median_removes_isolated_pixel() {
        let img = impulse(9, 9);
        let out = blur(
            &img.view(),
            &BlurParams {
                kind: BlurKind::Median,
                radius: 1.0,
            },
        )
        .unwrap();
        assert!(out.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn zero_radius_is_identity() {
        let img = impulse(5, 5);
        let out = blur(
            &img.view(),
            &BlurParams {
                kind: BlurKind::Gaussian,
                radius: 0.3,
            },
        )
        .unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn params_deserialize_lowercase_kind() {
        let p: BlurParams = serde_json::from_str(r#"{"kind":"median","radius":2.0}"#).unwrap();
        assert_eq!(p.kind, BlurKind::Median);
        assert_eq!(p.kernel_size(), 5);
    }
}
