//! Named integer parameters of the augmentation policy.
//!
//! Ratios are stored multiplied by 100 so every parameter is an integer, e.g.
//! `minAspectRatio = 75` means a minimum crop aspect ratio of `0.75`.
//!
//! # Examples
//!
//! ```
//! use augmenta_transforms::config::{AugmentationConfig, ConfigKey};
//!
//! let mut config = AugmentationConfig::default();
//! config.set("minScale", 8).unwrap();
//! config.set_key(ConfigKey::DoFlip, 1);
//!
//! assert_eq!(config.get("minScale").unwrap(), 8);
//! assert_eq!(config.min_scale(), 0.08);
//! assert!(config.set("hueRange", 10).is_err());
//! ```

use std::str::FromStr;

use augmenta_image::ImageSize;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The fixed set of configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Output channel count.
    ChannelCount,
    /// Output height in pixels.
    Height,
    /// Output width in pixels.
    Width,
    /// Crop-center jitter fraction, x100.
    CropRange,
    /// Non-zero enables horizontal flip sampling.
    DoFlip,
    /// Minimum crop area fraction, x100.
    MinScale,
    /// Minimum crop aspect ratio, x100.
    MinAspectRatio,
    /// Legacy linear contrast range, x100.
    ContrastRange,
    /// Legacy linear brightness range, x100.
    BrightnessRange,
    /// Rotation range in degrees.
    AngleRange,
    /// Fixed crop scale divisor, 0 disables it.
    FixedScale,
    /// Non-zero forces the crop aspect ratio to the source aspect ratio.
    MatchAspectRatio,
    /// Red channel mean.
    RMean,
    /// Green channel mean.
    GMean,
    /// Blue channel mean.
    BMean,
}

impl ConfigKey {
    /// Every key, in declaration order.
    pub const ALL: [ConfigKey; 15] = [
        ConfigKey::ChannelCount,
        ConfigKey::Height,
        ConfigKey::Width,
        ConfigKey::CropRange,
        ConfigKey::DoFlip,
        ConfigKey::MinScale,
        ConfigKey::MinAspectRatio,
        ConfigKey::ContrastRange,
        ConfigKey::BrightnessRange,
        ConfigKey::AngleRange,
        ConfigKey::FixedScale,
        ConfigKey::MatchAspectRatio,
        ConfigKey::RMean,
        ConfigKey::GMean,
        ConfigKey::BMean,
    ];

    /// The external parameter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ChannelCount => "channelCount",
            ConfigKey::Height => "height",
            ConfigKey::Width => "width",
            ConfigKey::CropRange => "cropRange",
            ConfigKey::DoFlip => "doFlip",
            ConfigKey::MinScale => "minScale",
            ConfigKey::MinAspectRatio => "minAspectRatio",
            ConfigKey::ContrastRange => "contrastRange",
            ConfigKey::BrightnessRange => "brightnessRange",
            ConfigKey::AngleRange => "angleRange",
            ConfigKey::FixedScale => "fixedScale",
            ConfigKey::MatchAspectRatio => "matchAspectRatio",
            ConfigKey::RMean => "R_mean",
            ConfigKey::GMean => "G_mean",
            ConfigKey::BMean => "B_mean",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownKey(name.to_string()))
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Augmentation parameters for image media.
///
/// Serialized with the external parameter names; unknown fields are rejected
/// and missing fields take their default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AugmentationConfig {
    channel_count: i32,
    height: i32,
    width: i32,
    crop_range: i32,
    do_flip: i32,
    min_scale: i32,
    min_aspect_ratio: i32,
    contrast_range: i32,
    brightness_range: i32,
    angle_range: i32,
    fixed_scale: i32,
    match_aspect_ratio: i32,
    #[serde(rename = "R_mean")]
    r_mean: i32,
    #[serde(rename = "G_mean")]
    g_mean: i32,
    #[serde(rename = "B_mean")]
    b_mean: i32,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            channel_count: 3,
            height: 224,
            width: 224,
            crop_range: 0,
            do_flip: 0,
            min_scale: 100,
            min_aspect_ratio: 100,
            contrast_range: 0,
            brightness_range: 0,
            angle_range: 0,
            fixed_scale: 0,
            match_aspect_ratio: 0,
            r_mean: 104,
            g_mean: 119,
            b_mean: 127,
        }
    }
}

impl AugmentationConfig {
    /// Set a parameter by its external name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if `name` is not a known parameter.
    pub fn set(&mut self, name: &str, value: i32) -> Result<(), ConfigError> {
        let key = name.parse::<ConfigKey>()?;
        self.set_key(key, value);
        Ok(())
    }

    /// Get a parameter by its external name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if `name` is not a known parameter.
    pub fn get(&self, name: &str) -> Result<i32, ConfigError> {
        let key = name.parse::<ConfigKey>()?;
        Ok(self.key(key))
    }

    /// Set a parameter.
    pub fn set_key(&mut self, key: ConfigKey, value: i32) {
        *self.slot_mut(key) = value;
    }

    /// Builder-style variant of [`AugmentationConfig::set_key`].
    pub fn with(mut self, key: ConfigKey, value: i32) -> Self {
        self.set_key(key, value);
        self
    }

    /// Get a parameter.
    pub fn key(&self, key: ConfigKey) -> i32 {
        match key {
            ConfigKey::ChannelCount => self.channel_count,
            ConfigKey::Height => self.height,
            ConfigKey::Width => self.width,
            ConfigKey::CropRange => self.crop_range,
            ConfigKey::DoFlip => self.do_flip,
            ConfigKey::MinScale => self.min_scale,
            ConfigKey::MinAspectRatio => self.min_aspect_ratio,
            ConfigKey::ContrastRange => self.contrast_range,
            ConfigKey::BrightnessRange => self.brightness_range,
            ConfigKey::AngleRange => self.angle_range,
            ConfigKey::FixedScale => self.fixed_scale,
            ConfigKey::MatchAspectRatio => self.match_aspect_ratio,
            ConfigKey::RMean => self.r_mean,
            ConfigKey::GMean => self.g_mean,
            ConfigKey::BMean => self.b_mean,
        }
    }

    fn slot_mut(&mut self, key: ConfigKey) -> &mut i32 {
        match key {
            ConfigKey::ChannelCount => &mut self.channel_count,
            ConfigKey::Height => &mut self.height,
            ConfigKey::Width => &mut self.width,
            ConfigKey::CropRange => &mut self.crop_range,
            ConfigKey::DoFlip => &mut self.do_flip,
            ConfigKey::MinScale => &mut self.min_scale,
            ConfigKey::MinAspectRatio => &mut self.min_aspect_ratio,
            ConfigKey::ContrastRange => &mut self.contrast_range,
            ConfigKey::BrightnessRange => &mut self.brightness_range,
            ConfigKey::AngleRange => &mut self.angle_range,
            ConfigKey::FixedScale => &mut self.fixed_scale,
            ConfigKey::MatchAspectRatio => &mut self.match_aspect_ratio,
            ConfigKey::RMean => &mut self.r_mean,
            ConfigKey::GMean => &mut self.g_mean,
            ConfigKey::BMean => &mut self.b_mean,
        }
    }

    /// Check the values the pipeline needs to allocate buffers and sample crops.
    ///
    /// No cross-field consistency is checked; e.g. `minScale > 100` is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            (ConfigKey::Width, "output width must be positive"),
            (ConfigKey::Height, "output height must be positive"),
            (ConfigKey::MinAspectRatio, "minimum aspect ratio must be positive"),
        ];
        for (key, reason) in positive {
            let value = self.key(key);
            if value <= 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.as_str(),
                    value,
                    reason,
                });
            }
        }

        if !matches!(self.channel_count, 1 | 3) {
            return Err(ConfigError::InvalidValue {
                key: ConfigKey::ChannelCount.as_str(),
                value: self.channel_count,
                reason: "only 1 or 3 output channels are supported",
            });
        }

        Ok(())
    }

    /// Output size in pixels.
    pub fn output_size(&self) -> ImageSize {
        ImageSize {
            width: self.width.max(0) as usize,
            height: self.height.max(0) as usize,
        }
    }

    /// Output channel count.
    pub fn channel_count(&self) -> usize {
        self.channel_count.max(0) as usize
    }

    /// Whether horizontal flips are sampled.
    pub fn do_flip(&self) -> bool {
        self.do_flip != 0
    }

    /// Minimum crop area fraction.
    pub fn min_scale(&self) -> f32 {
        self.min_scale as f32 / 100.0
    }

    /// Minimum crop aspect ratio.
    pub fn min_aspect_ratio(&self) -> f32 {
        self.min_aspect_ratio as f32 / 100.0
    }

    /// Crop-center jitter as a fraction of the centered offset.
    pub fn crop_range(&self) -> f32 {
        self.crop_range as f32 / 100.0
    }

    /// Legacy contrast range.
    pub fn contrast_range(&self) -> f32 {
        self.contrast_range as f32 / 100.0
    }

    /// Legacy brightness range.
    pub fn brightness_range(&self) -> f32 {
        self.brightness_range as f32 / 100.0
    }

    /// Rotation range in degrees.
    pub fn angle_range(&self) -> f32 {
        self.angle_range as f32
    }

    /// Fixed crop scale divisor, zero when disabled.
    pub fn fixed_scale(&self) -> f32 {
        self.fixed_scale as f32
    }

    /// Whether the crop keeps the source aspect ratio.
    pub fn match_aspect_ratio(&self) -> bool {
        self.match_aspect_ratio != 0
    }

    /// Per-channel pixel means in red, green, blue order.
    pub fn mean_rgb(&self) -> [i32; 3] {
        [self.r_mean, self.g_mean, self.b_mean]
    }
}

#[cfg(test)]
mod tests {
    use super::{AugmentationConfig, ConfigKey};
    use crate::error::ConfigError;

    #[test]
    fn defaults() -> Result<(), ConfigError> {
        let config = AugmentationConfig::default();
        assert_eq!(config.get("width")?, 224);
        assert_eq!(config.get("height")?, 224);
        assert_eq!(config.get("channelCount")?, 3);
        assert_eq!(config.get("minAspectRatio")?, 100);
        assert_eq!(config.get("doFlip")?, 0);
        assert_eq!(config.mean_rgb(), [104, 119, 127]);
        config.validate()
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut config = AugmentationConfig::default();
        assert_eq!(
            config.set("flipRange", 1),
            Err(ConfigError::UnknownKey("flipRange".to_string()))
        );
        assert_eq!(
            config.get("r_mean"),
            Err(ConfigError::UnknownKey("r_mean".to_string()))
        );
        assert_eq!(config, AugmentationConfig::default());
    }

    #[test]
    fn every_key_round_trips_by_name() -> Result<(), ConfigError> {
        let mut config = AugmentationConfig::default();
        for (i, key) in ConfigKey::ALL.iter().enumerate() {
            config.set(key.as_str(), i as i32 + 1)?;
        }
        for (i, key) in ConfigKey::ALL.iter().enumerate() {
            assert_eq!(config.get(key.as_str())?, i as i32 + 1);
            assert_eq!(key.as_str().parse::<ConfigKey>()?, *key);
        }
        Ok(())
    }

    #[test]
    fn ratios_are_scaled() {
        let config = AugmentationConfig::default()
            .with(ConfigKey::MinScale, 8)
            .with(ConfigKey::MinAspectRatio, 75)
            .with(ConfigKey::CropRange, 50);
        approx::assert_relative_eq!(config.min_scale(), 0.08);
        approx::assert_relative_eq!(config.min_aspect_ratio(), 0.75);
        approx::assert_relative_eq!(config.crop_range(), 0.5);
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let config = AugmentationConfig::default().with(ConfigKey::ChannelCount, 4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "channelCount",
                value: 4,
                ..
            })
        ));

        let config = AugmentationConfig::default().with(ConfigKey::Width, 0);
        assert!(config.validate().is_err());

        // no cross-field checks
        let config = AugmentationConfig::default().with(ConfigKey::MinScale, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_uses_external_names() -> Result<(), serde_json::Error> {
        let config: AugmentationConfig =
            serde_json::from_str(r#"{"width": 256, "doFlip": 1, "R_mean": 120}"#)?;
        assert_eq!(config.key(ConfigKey::Width), 256);
        assert_eq!(config.key(ConfigKey::Height), 224);
        assert!(config.do_flip());
        assert_eq!(config.mean_rgb()[0], 120);

        let json = serde_json::to_value(&config)?;
        assert_eq!(json["minAspectRatio"], 100);
        assert_eq!(json["B_mean"], 127);

        let res = serde_json::from_str::<AugmentationConfig>(r#"{"hue": 3}"#);
        assert!(res.is_err());
        Ok(())
    }
}
