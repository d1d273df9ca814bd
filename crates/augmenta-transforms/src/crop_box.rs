//! Random crop rectangle selection.
//!
//! The solver picks an aspect ratio, a scale and a jittered center and returns
//! a box that always lies inside the source image, or a
//! [`GeometryError::DegenerateCrop`] when the configuration cannot produce one.

use augmenta_image::ImageSize;

use crate::config::AugmentationConfig;
use crate::error::GeometryError;
use crate::random::RandomSource;

// slack allowed for float rounding before a box counts as out of bounds, in pixels
const BOUNDS_TOLERANCE: f32 = 1e-3;

/// An axis-aligned rectangle in source image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width of the box.
    pub width: f32,
    /// Height of the box.
    pub height: f32,
}

impl CropBox {
    /// The box covering the whole image.
    pub fn full(size: ImageSize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width as f32,
            height: size.height as f32,
        }
    }

    /// Area of the box in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the box is non-empty and lies inside an image of the given size.
    pub fn fits_within(&self, size: ImageSize) -> bool {
        let values = [self.x, self.y, self.width, self.height];
        values.iter().all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= size.width as f32 + BOUNDS_TOLERANCE
            && self.y + self.height <= size.height as f32 + BOUNDS_TOLERANCE
    }

    /// Round the box to whole pixels inside an image of the given size.
    ///
    /// # Returns
    ///
    /// The top-left corner and the size of the pixel region, at least 1x1.
    pub fn to_pixels(&self, size: ImageSize) -> (usize, usize, ImageSize) {
        let x = (self.x.round().max(0.0) as usize).min(size.width.saturating_sub(1));
        let y = (self.y.round().max(0.0) as usize).min(size.height.saturating_sub(1));
        let width = (self.width.round() as usize).clamp(1, (size.width - x).max(1));
        let height = (self.height.round() as usize).clamp(1, (size.height - y).max(1));
        (x, y, ImageSize { width, height })
    }

    fn degenerate(&self, source: ImageSize) -> GeometryError {
        GeometryError::DegenerateCrop {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            source_width: source.width,
            source_height: source.height,
        }
    }
}

/// Derives crop boxes from the crop parameters of an [`AugmentationConfig`].
///
/// Draws happen in this order: aspect ratio (skipped when the source aspect
/// ratio is kept), scale (skipped when a fixed scale is set), x jitter, y jitter.
#[derive(Clone, Debug, PartialEq)]
pub struct CropBoxSolver {
    min_aspect_ratio: f32,
    min_scale: f32,
    crop_range: f32,
    fixed_scale: f32,
    match_aspect_ratio: bool,
    output_size: ImageSize,
}

impl CropBoxSolver {
    /// Create a solver from the configuration.
    pub fn new(config: &AugmentationConfig) -> Self {
        Self {
            min_aspect_ratio: config.min_aspect_ratio(),
            min_scale: config.min_scale(),
            crop_range: config.crop_range(),
            fixed_scale: config.fixed_scale(),
            match_aspect_ratio: config.match_aspect_ratio(),
            output_size: config.output_size(),
        }
    }

    /// Sample a crop box for a source image.
    ///
    /// # Arguments
    ///
    /// * `source` - The size of the source image.
    /// * `rng` - The random source to draw from.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateCrop`] if the box is empty, not finite
    /// or does not fit the source, e.g. with a negative `minScale` or a
    /// `cropRange` above 100.
    pub fn solve<R: RandomSource + ?Sized>(
        &self,
        source: ImageSize,
        rng: &mut R,
    ) -> Result<CropBox, GeometryError> {
        if source.is_empty() {
            return Err(CropBox::full(source).degenerate(source));
        }

        let (src_w, src_h) = (source.width as f32, source.height as f32);
        let orig_ar = src_w / src_h;

        let crop_ar = if self.match_aspect_ratio {
            orig_ar
        } else {
            rng.uniform(self.min_aspect_ratio, 1.0 / self.min_aspect_ratio)
        };

        let portrait = orig_ar < 1.0;

        // largest linear scale of the base box that still fits the source
        let max_linear = if portrait {
            (crop_ar / orig_ar).min(1.0)
        } else {
            (orig_ar / crop_ar).min(1.0)
        };

        let scale = if self.fixed_scale != 0.0 {
            let short_side = self.output_size.width.min(self.output_size.height) as f32;
            let scale = short_side / self.fixed_scale;
            if scale > max_linear {
                log::debug!(
                    "fixed scale {scale} capped to {max_linear} for a {}x{} source",
                    source.width,
                    source.height
                );
                max_linear
            } else {
                scale
            }
        } else {
            // sample the area fraction, then convert it to a linear scale
            let max_area = max_linear * max_linear;
            rng.uniform(self.min_scale.min(max_area), max_area).sqrt()
        };

        // the base box spans the short side of the source at the crop aspect ratio
        let (base_w, base_h) = if portrait {
            (src_w, src_w / crop_ar)
        } else {
            (src_h * crop_ar, src_h)
        };

        let mut crop = CropBox {
            x: 0.0,
            y: 0.0,
            width: base_w * scale,
            height: base_h * scale,
        };

        let fits = crop.width <= src_w + BOUNDS_TOLERANCE && crop.height <= src_h + BOUNDS_TOLERANCE;
        if !(crop.width > 0.0 && crop.height > 0.0 && fits) {
            return Err(crop.degenerate(source));
        }
        crop.width = crop.width.min(src_w);
        crop.height = crop.height.min(src_h);

        let center_x = (src_w - crop.width) / 2.0;
        let center_y = (src_h - crop.height) / 2.0;

        crop.x = center_x + rng.uniform_zero_centered(center_x * self.crop_range);
        crop.y = center_y + rng.uniform_zero_centered(center_y * self.crop_range);

        if !crop.fits_within(source) {
            return Err(crop.degenerate(source));
        }

        Ok(crop)
    }
}
