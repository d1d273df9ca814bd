use augmenta_image::ImageError;

/// An error raised while building or reading an augmentation configuration.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    /// The parameter name is not part of the configuration whitelist.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The parameter value cannot be used to build the pipeline.
    #[error("Invalid value {value} for {key}: {reason}")]
    InvalidValue {
        /// The external name of the parameter.
        key: &'static str,
        /// The rejected value.
        value: i32,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The media type tag does not name a known media kind.
    #[error("Unknown media type tag: {0}")]
    UnknownMediaType(i32),
}

/// An error raised when the crop solver cannot produce a valid box.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GeometryError {
    /// The crop box is empty, not finite or falls outside of the source image.
    #[error(
        "Degenerate crop box (x: {x}, y: {y}, width: {width}, height: {height}) \
         for a {source_width}x{source_height} source"
    )]
    DegenerateCrop {
        /// Left edge of the rejected box.
        x: f32,
        /// Top edge of the rejected box.
        y: f32,
        /// Width of the rejected box.
        width: f32,
        /// Height of the rejected box.
        height: f32,
        /// Width of the source image.
        source_width: usize,
        /// Height of the source image.
        source_height: usize,
    },
}

/// An error raised when the source image cannot be used.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InputError {
    /// The source image is missing, zero-sized or could not be decoded.
    #[error("Invalid source image: {0}")]
    InvalidImage(String),
}

/// Any error surfaced by the augmentation pipeline.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AugmentError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Crop geometry error.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Source image error.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Raster operation error.
    #[error("Image operation failed. {0}")]
    Image(#[from] ImageError),
}
