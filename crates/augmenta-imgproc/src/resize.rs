use augmenta_image::{Image, ImageError};
use fast_image_resize as fr;

/// Resampling filter used by [`resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeFilter {
    /// Average of the covered source pixels, for shrinking.
    Area,
    /// Catmull-Rom cubic convolution.
    Bicubic,
    /// Triangle (bilinear) convolution.
    Bilinear,
}

impl From<ResizeFilter> for fr::ResizeAlg {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Area => fr::ResizeAlg::Convolution(fr::FilterType::Box),
            ResizeFilter::Bicubic => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            ResizeFilter::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        }
    }
}

fn pixel_type<const C: usize>() -> Result<fr::PixelType, ImageError> {
    match C {
        1 => Ok(fr::PixelType::F32),
        3 => Ok(fr::PixelType::F32x3),
        4 => Ok(fr::PixelType::F32x4),
        _ => Err(ImageError::Resize(format!("{C} channel f32 images"))),
    }
}

/// Resample `src` into `dst`, whose size is the target size.
///
/// The work is done by `fast_image_resize` on the `f32` samples viewed as
/// bytes, so no intermediate buffer is allocated.
///
/// # Errors
///
/// [`ImageError::EmptyImage`] if either image has no pixel, and
/// [`ImageError::Resize`] for a channel count the resampler does not handle.
///
/// # Example
///
/// ```
/// use augmenta_image::Image;
/// use augmenta_imgproc::resize::{resize, ResizeFilter};
///
/// let image = Image::<f32, 3>::from_size_val([640, 480].into(), 12.0).unwrap();
/// let mut resized = Image::<f32, 3>::from_size_val([224, 224].into(), 0.0).unwrap();
///
/// resize(&image, &mut resized, ResizeFilter::Area).unwrap();
/// assert!(resized.as_slice().iter().all(|v| (v - 12.0).abs() < 1e-3));
/// ```
pub fn resize<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    filter: ResizeFilter,
) -> Result<(), ImageError> {
    for size in [src.size(), dst.size()] {
        if size.is_empty() {
            return Err(ImageError::EmptyImage(size));
        }
    }
    let pixel_type = pixel_type::<C>()?;

    let src_view = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        bytemuck::cast_slice(src.as_slice()),
        pixel_type,
    )
    .map_err(|e| ImageError::Resize(e.to_string()))?;

    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);
    let mut dst_view = fr::images::Image::from_slice_u8(
        dst_width,
        dst_height,
        bytemuck::cast_slice_mut(dst.as_slice_mut()),
        pixel_type,
    )
    .map_err(|e| ImageError::Resize(e.to_string()))?;

    let options = fr::ResizeOptions::new().resize_alg(filter.into());
    fr::Resizer::new()
        .resize(&src_view, &mut dst_view, &options)
        .map_err(|e| ImageError::Resize(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use augmenta_image::{Image, ImageError, ImageSize};

    use super::ResizeFilter;

    #[test]
    fn area_halves_average_the_covered_pixels() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<_, 1>::new(
            [4, 2].into(),
            vec![
                0.0f32, 2.0, 4.0, 6.0,
                2.0f32, 4.0, 6.0, 8.0,
            ],
        )?;

        let mut resized = Image::<_, 1>::from_size_val([2, 1].into(), 0.0)?;
        super::resize(&image, &mut resized, ResizeFilter::Area)?;

        approx::assert_relative_eq!(resized.as_slice()[0], 2.0, epsilon = 1e-4);
        approx::assert_relative_eq!(resized.as_slice()[1], 6.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn area_keeps_rgb_channels_apart() -> Result<(), ImageError> {
        let data = [10.0f32, 100.0, 200.0].repeat(8 * 6);
        let image = Image::<_, 3>::new([8, 6].into(), data)?;

        let mut resized = Image::<_, 3>::from_size_val([3, 2].into(), 0.0)?;
        super::resize(&image, &mut resized, ResizeFilter::Area)?;

        for pixel in resized.as_slice().chunks_exact(3) {
            approx::assert_relative_eq!(pixel[0], 10.0, epsilon = 1e-3);
            approx::assert_relative_eq!(pixel[1], 100.0, epsilon = 1e-3);
            approx::assert_relative_eq!(pixel[2], 200.0, epsilon = 1e-3);
        }
        Ok(())
    }

    #[test]
    fn upscale_keeps_constants() -> Result<(), ImageError> {
        let image = Image::<_, 3>::from_size_val([3, 2].into(), 17.0f32)?;

        for filter in [ResizeFilter::Bicubic, ResizeFilter::Bilinear] {
            let mut resized = Image::<_, 3>::from_size_val([7, 5].into(), 0.0)?;
            super::resize(&image, &mut resized, filter)?;
            assert_eq!(resized.size(), ImageSize { width: 7, height: 5 });
            for v in resized.as_slice() {
                approx::assert_relative_eq!(*v, 17.0, epsilon = 1e-3);
            }
        }
        Ok(())
    }

    #[test]
    fn empty_images_are_rejected() -> Result<(), ImageError> {
        let image = Image::<_, 1>::from_size_val([3, 3].into(), 0.0f32)?;
        let empty = ImageSize {
            width: 0,
            height: 3,
        };
        let mut resized = Image::<_, 1>::new(empty, vec![])?;
        assert_eq!(
            super::resize(&image, &mut resized, ResizeFilter::Area),
            Err(ImageError::EmptyImage(empty))
        );
        Ok(())
    }

    #[test]
    fn two_channels_are_not_supported() -> Result<(), ImageError> {
        let image = Image::<_, 2>::from_size_val([4, 4].into(), 1.0f32)?;
        let mut resized = Image::<_, 2>::from_size_val([2, 2].into(), 0.0)?;
        assert!(matches!(
            super::resize(&image, &mut resized, ResizeFilter::Bilinear),
            Err(ImageError::Resize(_))
        ));
        Ok(())
    }
}
