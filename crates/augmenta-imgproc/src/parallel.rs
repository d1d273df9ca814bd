use rayon::prelude::*;

use augmenta_image::Image;

/// Apply a function to each pixel in the image in parallel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let cols = src.width();
    if cols == 0 {
        return;
    }
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel of the image in place, in parallel by rows.
pub fn par_iter_rows_inplace<T, const C: usize>(
    image: &mut Image<T, C>,
    f: impl Fn(&mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let stride = image.stride();
    if stride == 0 {
        return;
    }
    image
        .as_slice_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| row.chunks_exact_mut(C).for_each(&f));
}

/// Fill each pixel of the image from its `(x, y)` position, in parallel by rows.
pub fn par_iter_rows_indexed<T, const C: usize>(
    image: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let stride = image.stride();
    if stride == 0 {
        return;
    }
    image
        .as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            row.chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, pixel)| f(x, y, pixel));
        });
}
