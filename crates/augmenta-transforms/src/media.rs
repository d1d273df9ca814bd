use crate::config::AugmentationConfig;
use crate::error::ConfigError;

/// Kind of media a loader hands to the augmentation stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum MediaType {
    /// Rectangular raster image.
    Image = 0,
    /// Video clip.
    Video = 1,
    /// Audio clip.
    Audio = 2,
    /// Text sample.
    Text = 3,
}

impl TryFrom<i32> for MediaType {
    type Error = ConfigError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(MediaType::Image),
            1 => Ok(MediaType::Video),
            2 => Ok(MediaType::Audio),
            3 => Ok(MediaType::Text),
            _ => Err(ConfigError::UnknownMediaType(tag)),
        }
    }
}

/// Augmentation parameters, one concrete configuration per media kind.
///
/// Only images carry an augmentation policy today.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaParams {
    /// Parameters for image media.
    Image(AugmentationConfig),
}

impl MediaParams {
    /// The media kind these parameters apply to.
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaParams::Image(_) => MediaType::Image,
        }
    }
}

impl From<AugmentationConfig> for MediaParams {
    fn from(config: AugmentationConfig) -> Self {
        MediaParams::Image(config)
    }
}
