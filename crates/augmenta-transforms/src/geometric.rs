//! Geometric stages of the pipeline: rotation, crop, flip and the final resize.
//!
//! The transformer holds the output size only. Each stage takes the realized
//! parameters of one sample and works on `f32` RGB images. Resampling goes
//! through `fast_image_resize`, averaging when the crop is larger than the
//! output and Catmull-Rom otherwise.

use std::borrow::Cow;

use augmenta_image::{Image, ImageError, ImageSize};
use augmenta_imgproc::{crop, flip, resize, resize::ResizeFilter, rotate};

use crate::config::AugmentationConfig;
use crate::crop_box::CropBox;

/// Rotation, crop, flip and resize to the configured output size.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometricTransformer {
    output_size: ImageSize,
}

impl GeometricTransformer {
    /// Create a transformer producing images of the configured output size.
    pub fn new(config: &AugmentationConfig) -> Self {
        Self {
            output_size: config.output_size(),
        }
    }

    /// The size of the images returned by [`GeometricTransformer::resize`].
    pub fn output_size(&self) -> ImageSize {
        self.output_size
    }

    /// Rotate the image about its center by `angle` degrees, counter-clockwise.
    ///
    /// The output keeps the source size and pixels mapped from outside the
    /// source are black. A zero angle borrows the source untouched.
    pub fn rotate<'a>(
        &self,
        src: &'a Image<f32, 3>,
        angle: f32,
    ) -> Result<Cow<'a, Image<f32, 3>>, ImageError> {
        if angle == 0.0 {
            return Ok(Cow::Borrowed(src));
        }

        let mut dst = Image::from_size_val(src.size(), 0.0)?;
        rotate::rotate(src, &mut dst, angle)?;

        Ok(Cow::Owned(dst))
    }

    /// Copy the pixels covered by the crop box into a new image.
    pub fn crop(&self, src: &Image<f32, 3>, crop_box: &CropBox) -> Result<Image<f32, 3>, ImageError> {
        let (x, y, size) = crop_box.to_pixels(src.size());
        crop::crop_image(src, x, y, size)
    }

    /// Mirror the image horizontally when `flip` is set.
    pub fn flip(&self, mut image: Image<f32, 3>, flip: bool) -> Image<f32, 3> {
        if flip {
            flip::horizontal_flip(&mut image);
        }
        image
    }

    /// Area averaging when shrinking, bicubic otherwise.
    pub fn filter_for(&self, size: ImageSize) -> ResizeFilter {
        if size.area() > self.output_size.area() {
            ResizeFilter::Area
        } else {
            ResizeFilter::Bicubic
        }
    }

    /// Resize the image to the output size.
    pub fn resize<const C: usize>(&self, src: &Image<f32, C>) -> Result<Image<f32, C>, ImageError> {
        let mut dst = Image::from_size_val(self.output_size, 0.0)?;
        resize::resize(src, &mut dst, self.filter_for(src.size()))?;
        Ok(dst)
    }
}
