use augmenta_image::{Image, ImageError, ImageSize};

/// Copy the `size` box with its top-left corner at `(x, y)` into a new image.
///
/// # Errors
///
/// [`ImageError::RegionOutOfBounds`] if the box is empty or not fully inside `src`.
///
/// # Example
///
/// ```
/// use augmenta_image::Image;
/// use augmenta_imgproc::crop::crop_image;
///
/// let image = Image::<u8, 1>::new([4, 3].into(), (0..12).collect()).unwrap();
/// let cropped = crop_image(&image, 1, 1, [2, 2].into()).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    x: usize,
    y: usize,
    size: ImageSize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy,
{
    let fits = x + size.width <= src.width() && y + size.height <= src.height();
    if size.is_empty() || !fits {
        return Err(ImageError::RegionOutOfBounds(x, y, size, src.size()));
    }

    let span = x * C..(x + size.width) * C;
    let data = src
        .as_slice()
        .chunks_exact(src.stride())
        .skip(y)
        .take(size.height)
        .flat_map(|row| row[span.clone()].iter().copied())
        .collect();

    Image::new(size, data)
}

#[cfg(test)]
mod tests {
    use augmenta_image::{Image, ImageError, ImageSize};

    #[test]
    fn crop_rgb_box() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            [2, 3].into(),
            vec![
                0, 1, 2, 3, 4, 5,
                6, 7, 8, 9, 10, 11,
                12, 13, 14, 15, 16, 17,
            ],
        )?;

        let cropped = super::crop_image(&image, 1, 1, [1, 2].into())?;
        assert_eq!(cropped.size(), ImageSize { width: 1, height: 2 });
        assert_eq!(cropped.as_slice(), &[9, 10, 11, 15, 16, 17]);
        Ok(())
    }

    #[test]
    fn full_box_is_a_copy() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new([3, 2].into(), (0..18).map(|v| v as f32).collect())?;
        assert_eq!(super::crop_image(&image, 0, 0, image.size())?, image);
        Ok(())
    }

    #[test]
    fn box_must_fit() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        let size = ImageSize {
            width: 2,
            height: 2,
        };

        assert_eq!(
            super::crop_image(&image, 2, 0, size),
            Err(ImageError::RegionOutOfBounds(2, 0, size, image.size()))
        );
        assert!(super::crop_image(&image, 0, 0, [0, 2].into()).is_err());
        Ok(())
    }
}
