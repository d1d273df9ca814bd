use augmenta_image::{Image, ImageError};

use crate::parallel;

/// Red weight of the luma projection.
pub const RW: f32 = 0.299;
/// Green weight of the luma projection.
pub const GW: f32 = 0.587;
/// Blue weight of the luma projection.
pub const BW: f32 = 0.114;

/// Plane order that splits an interleaved RGB image into blue, green, red planes.
pub const BGR_PLANES: [usize; 3] = [2, 1, 0];

/// Project each RGB pixel of `src` to its luma `RW * r + GW * g + BW * b` in `dst`.
///
/// ```
/// use augmenta_image::Image;
/// use augmenta_imgproc::color::gray_from_rgb;
///
/// let rgb = Image::<f32, 3>::new([1, 1].into(), vec![100.0, 100.0, 100.0]).unwrap();
/// let mut gray = Image::<f32, 1>::from_size_val(rgb.size(), 0.0).unwrap();
///
/// gray_from_rgb(&rgb, &mut gray).unwrap();
/// assert!((gray.as_slice()[0] - 100.0).abs() < 1e-3);
/// ```
pub fn gray_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::SizeMismatch(src.size(), dst.size()));
    }

    parallel::par_iter_rows(src, dst, |rgb, luma| {
        luma[0] = RW * rgb[0] + GW * rgb[1] + BW * rgb[2];
    });

    Ok(())
}

/// Split an interleaved image into contiguous channel planes, `order[i]`
/// naming the source channel of plane `i`.
///
/// ```
/// use augmenta_image::Image;
/// use augmenta_imgproc::color::{split_planes, BGR_PLANES};
///
/// let image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let planes = split_planes(&image, BGR_PLANES).unwrap();
///
/// assert_eq!(planes, vec![3, 6, 2, 5, 1, 4]);
/// ```
pub fn split_planes<T, const C: usize>(
    src: &Image<T, C>,
    order: [usize; C],
) -> Result<Vec<T>, ImageError>
where
    T: Copy,
{
    let mut planes = Vec::with_capacity(src.as_slice().len());
    for ch in order {
        planes.extend(src.channel(ch)?.into_vec());
    }
    Ok(planes)
}
