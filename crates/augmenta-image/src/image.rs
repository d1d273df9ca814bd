use crate::error::ImageError;

/// Width and height of a raster, in pixels.
///
/// ```
/// use augmenta_image::ImageSize;
///
/// let size = ImageSize::from([640, 480]);
/// assert_eq!(size.area(), 640 * 480);
/// assert!(!size.is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// True when the raster holds no pixel.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        ImageSize { width, height }
    }
}

/// Pixel sample types the pipeline moves between.
///
/// Rendering happens in `f32`; the decoded input and the final buffers are `u8`.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Build a sample from a working value, saturating for integer types.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// An interleaved raster of `C` channels, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const C: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const C: usize> Image<T, C> {
    /// Wrap interleaved pixel data.
    ///
    /// # Errors
    ///
    /// [`ImageError::DataLength`] if `data` does not hold `width * height * C` samples.
    ///
    /// ```
    /// use augmenta_image::Image;
    ///
    /// let image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(image.pixel(1, 0), Some(&[4u8, 5, 6][..]));
    ///
    /// assert!(Image::<u8, 3>::new([2, 1].into(), vec![0; 5]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * C;
        if data.len() != expected {
            return Err(ImageError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// An image of the given size with every sample set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Self::new(size, vec![val; size.area() * C])
    }

    /// Numeric cast of every sample, failing on values the target cannot hold.
    pub fn cast<U>(&self) -> Result<Image<U, C>, ImageError>
    where
        T: num_traits::NumCast + Copy,
        U: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&v| U::from(v).ok_or(ImageError::CastError))
            .collect::<Result<Vec<_>, _>>()?;
        Image::new(self.size, data)
    }

    /// Convert every sample through [`ImageDtype::from_f32`].
    ///
    /// Going to `u8` rounds and saturates instead of failing.
    pub fn convert<U>(&self) -> Result<Image<U, C>, ImageError>
    where
        T: ImageDtype,
        U: ImageDtype,
    {
        let data = self.data.iter().map(|&v| U::from_f32(v.into())).collect();
        Image::new(self.size, data)
    }

    /// Copy one channel out into a single channel image.
    pub fn channel(&self, index: usize) -> Result<Image<T, 1>, ImageError>
    where
        T: Copy,
    {
        if index >= C {
            return Err(ImageError::ChannelIndexOutOfBounds(index, C));
        }
        let data = self.data.iter().skip(index).step_by(C).copied().collect();
        Image::new(self.size, data)
    }

    /// The `C` samples of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let start = (y * self.size.width + x) * C;
        self.data.get(start..start + C)
    }

    /// Size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Samples per row.
    pub fn stride(&self) -> usize {
        self.size.width * C
    }

    /// The interleaved samples.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The interleaved samples, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Give back the sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
