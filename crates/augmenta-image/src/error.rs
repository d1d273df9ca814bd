use crate::image::ImageSize;

/// Errors raised by the raster types and the primitives working on them.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The sample buffer does not match the image size.
    #[error("expected {expected} samples, got {actual}")]
    DataLength {
        /// Samples implied by the size and channel count.
        expected: usize,
        /// Samples provided.
        actual: usize,
    },

    /// Two images that must share a size do not.
    #[error("image size {0} does not match {1}")]
    SizeMismatch(ImageSize, ImageSize),

    /// An empty image was given where pixels are needed.
    #[error("empty {0} image")]
    EmptyImage(ImageSize),

    /// The channel index is out of bounds.
    #[error("channel {0} out of bounds for {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// A region does not fit inside the image.
    #[error("region at ({0}, {1}) of size {2} does not fit in {3}")]
    RegionOutOfBounds(usize, usize, ImageSize, ImageSize),

    /// A sample value cannot be represented in the target type.
    #[error("failed to cast image data")]
    CastError,

    /// The resampler rejected the buffers.
    #[error("resize failed: {0}")]
    Resize(String),
}
