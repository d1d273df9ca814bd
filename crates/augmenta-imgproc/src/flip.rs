use augmenta_image::Image;
use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

/// Mirror the image left to right in place, keeping the channel order of each pixel.
///
/// # Example
///
/// ```
/// use augmenta_image::Image;
/// use augmenta_imgproc::flip::horizontal_flip;
///
/// let mut image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6]).unwrap();
/// horizontal_flip(&mut image);
///
/// assert_eq!(image.as_slice(), &[4, 5, 6, 1, 2, 3]);
/// ```
pub fn horizontal_flip<T, const C: usize>(image: &mut Image<T, C>)
where
    T: Send,
{
    let (width, stride) = (image.width(), image.stride());
    if stride == 0 {
        return;
    }

    image
        .as_slice_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| {
            for x in 0..width / 2 {
                let (left, right) = row.split_at_mut((width - 1 - x) * C);
                left[x * C..(x + 1) * C].swap_with_slice(&mut right[..C]);
            }
        });
}
