use augmenta_image::{Image, ImageError};

use crate::parallel;

/// Bilinear read at a sub-pixel position already known to lie inside `src`.
fn sample_bilinear<const C: usize>(src: &Image<f32, C>, u: f32, v: f32, out: &mut [f32]) {
    let (x0, y0) = (u.floor() as usize, v.floor() as usize);
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let (fx, fy) = (u - x0 as f32, v - y0 as f32);

    let stride = src.stride();
    let data = src.as_slice();
    let at = |x: usize, y: usize, k: usize| data[y * stride + x * C + k];

    for (k, o) in out.iter_mut().enumerate() {
        let top = at(x0, y0, k) * (1.0 - fx) + at(x1, y0, k) * fx;
        let bottom = at(x0, y1, k) * (1.0 - fx) + at(x1, y1, k) * fx;
        *o = top * (1.0 - fy) + bottom * fy;
    }
}

/// Rotate `src` by `angle` degrees counter-clockwise about `(width / 2, height / 2)`.
///
/// Every destination pixel is mapped back into the source and sampled
/// bilinearly. Pixels whose source position falls outside the source grid are
/// set to zero, so the corners uncovered by the rotation come out black.
///
/// # Errors
///
/// [`ImageError::SizeMismatch`] if `dst` does not have the size of `src`.
///
/// # Example
///
/// ```
/// use augmenta_image::Image;
/// use augmenta_imgproc::rotate::rotate;
///
/// let image = Image::<f32, 3>::from_size_val([32, 32].into(), 1.0).unwrap();
/// let mut rotated = Image::<f32, 3>::from_size_val(image.size(), 0.5).unwrap();
///
/// rotate(&image, &mut rotated, 45.0).unwrap();
///
/// assert_eq!(rotated.pixel(16, 16), Some(&[1.0f32, 1.0, 1.0][..]));
/// assert_eq!(rotated.pixel(0, 0), Some(&[0.0f32, 0.0, 0.0][..]));
/// ```
pub fn rotate<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    angle: f32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::SizeMismatch(src.size(), dst.size()));
    }
    if src.size().is_empty() {
        return Ok(());
    }

    let (sin, cos) = angle.to_radians().sin_cos();
    let (cx, cy) = (src.width() as f32 * 0.5, src.height() as f32 * 0.5);
    let (max_x, max_y) = ((src.width() - 1) as f32, (src.height() - 1) as f32);

    parallel::par_iter_rows_indexed(dst, |x, y, pixel| {
        // inverse rotation, y axis pointing down
        let (dx, dy) = (x as f32 - cx, y as f32 - cy);
        let u = cos * dx - sin * dy + cx;
        let v = sin * dx + cos * dy + cy;

        if (0.0..=max_x).contains(&u) && (0.0..=max_y).contains(&v) {
            sample_bilinear(src, u, v, pixel);
        } else {
            pixel.fill(0.0);
        }
    });

    Ok(())
}
