use thiserror::Error;

/// Binary mask produced by colour thresholding: `0` or `255` per pixel.
pub type BinaryMask = image::GrayImage;

/// Errors raised when wrapping a raw pixel buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image has a zero dimension (width={width}, height={height})")]
    EmptyImage { width: usize, height: usize },
    #[error("invalid BGR buffer length (expected {expected} bytes, got {got})")]
    BufferSize { expected: usize, got: usize },
}

/// Borrowed 8-bit BGR image, row-major, 3 interleaved channels.
#[derive(Clone, Copy, Debug)]
pub struct BgrImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // len = w*h*3, B,G,R order
}

impl<'a> BgrImageView<'a> {
    /// Wrap a raw buffer, checking dimensions and length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let view = Self {
            width,
            height,
            data,
        };
        view.validate()?;
        Ok(view)
    }

    /// Check that the view is non-empty and its buffer matches `width * height * 3`.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(ImageError::BufferSize {
                expected: usize::MAX,
                got: self.data.len(),
            })?;
        if self.data.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Owned 8-bit BGR image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BgrImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl BgrImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        BgrImageView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> BgrImageView<'_> {
        BgrImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Resize in place, reusing the existing allocation when it is large enough.
    ///
    /// Pixel contents are unspecified afterwards.
    pub fn reshape(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.resize(width * height * 3, 0);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, bgr: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&bgr);
    }

    /// Mirror the image about its vertical axis.
    pub fn flip_horizontal(&self) -> Self {
        let mut out = Self::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.put_pixel(self.width - 1 - x, y, self.pixel(x, y));
            }
        }
        out
    }

    /// Convert an RGB buffer from the `image` crate, swapping channel order.
    pub fn from_rgb(img: &image::RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let mut data = Vec::with_capacity(img.as_raw().len());
        for px in img.pixels() {
            let [r, g, b] = px.0;
            data.extend_from_slice(&[b, g, r]);
        }
        Self {
            width: w as usize,
            height: h as usize,
            data,
        }
    }

    /// Convert back into an RGB `image` buffer.
    pub fn to_rgb(&self) -> Option<image::RgbImage> {
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(3) {
            data.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        image::RgbImage::from_raw(self.width as u32, self.height as u32, data)
    }
}

/// Make sure `mask` has the requested size, reallocating only on change.
pub fn ensure_mask_size(mask: &mut BinaryMask, width: usize, height: usize) {
    if mask.dimensions() != (width as u32, height as u32) {
        *mask = BinaryMask::new(width as u32, height as u32);
    }
}
