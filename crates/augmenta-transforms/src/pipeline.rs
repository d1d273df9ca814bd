//! The per-sample augmentation pipeline.
//!
//! One call draws a fresh [`AugmentationSample`] and renders the source through
//! rotate, crop, flip, photometric perturbation and resize, in that order.

use augmenta_image::{Image, ImageError, ImageSize};
use augmenta_imgproc::color;

use crate::config::AugmentationConfig;
use crate::crop_box::{CropBox, CropBoxSolver};
use crate::error::{AugmentError, ConfigError, InputError};
use crate::geometric::GeometricTransformer;
use crate::media::MediaParams;
use crate::photometric::{PhotometricPerturber, PhotometricPolicy, PhotometricSample};
use crate::random::{RandomSource, SeededRandom};

/// The random parameters realized for one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AugmentationSample {
    /// Whether the crop is mirrored horizontally.
    pub flip: bool,
    /// Rotation angle in degrees, counter-clockwise.
    pub angle: f32,
    /// Region of the rotated source that is kept.
    pub crop_box: CropBox,
    /// Color perturbation draws.
    pub photometric: PhotometricSample,
}

/// An interleaved `height x width x channels` buffer of saturated `u8` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputBuffer {
    size: ImageSize,
    channels: usize,
    data: Vec<u8>,
}

impl OutputBuffer {
    /// The size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The number of channels, 1 or 3.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The interleaved pixel data, RGB for 3 channels.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Split the channels into contiguous planes, blue first for 3 channels.
    pub fn to_planar(&self) -> Result<PlanarBuffer, ImageError> {
        let data = match self.channels {
            3 => {
                let image = Image::<u8, 3>::new(self.size, self.data.clone())?;
                color::split_planes(&image, color::BGR_PLANES)?
            }
            _ => self.data.clone(),
        };

        Ok(PlanarBuffer {
            size: self.size,
            channels: self.channels,
            data,
        })
    }
}

/// A channel-major buffer: `channels` planes of `height x width` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarBuffer {
    size: ImageSize,
    channels: usize,
    data: Vec<u8>,
}

impl PlanarBuffer {
    /// The size of each plane.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of planes.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// A single plane, `None` if `index` is out of range.
    pub fn plane(&self, index: usize) -> Option<&[u8]> {
        let len = self.size.area();
        self.data.get(index * len..(index + 1) * len)
    }

    /// All the planes back to back.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the plane data.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Randomized augmentation of source images into fixed-size training samples.
///
/// Each pipeline owns its random source. Loader workers should each build
/// their own pipeline instead of sharing one.
///
/// # Examples
///
/// ```
/// use augmenta_image::{Image, ImageSize};
/// use augmenta_transforms::{AugmentationConfig, AugmentationPipeline, ConfigKey};
///
/// let config = AugmentationConfig::default()
///     .with(ConfigKey::Width, 32)
///     .with(ConfigKey::Height, 24)
///     .with(ConfigKey::DoFlip, 1);
///
/// let mut pipeline = AugmentationPipeline::with_seed(config, 7).unwrap();
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 64, height: 48 }, 128).unwrap();
/// let output = pipeline.transform(&image).unwrap();
///
/// assert_eq!(output.width(), 32);
/// assert_eq!(output.height(), 24);
/// assert_eq!(output.channels(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct AugmentationPipeline<R = SeededRandom> {
    config: AugmentationConfig,
    solver: CropBoxSolver,
    photometric: PhotometricPerturber,
    geometric: GeometricTransformer,
    rng: R,
}

impl AugmentationPipeline<SeededRandom> {
    /// Create a pipeline drawing from a [`SeededRandom`] built from `seed`.
    pub fn with_seed(config: AugmentationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SeededRandom::from_seed(seed))
    }
}

impl<R: RandomSource> AugmentationPipeline<R> {
    /// Create a pipeline from a configuration and the random source it owns.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration cannot produce an output buffer.
    pub fn new(config: AugmentationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            solver: CropBoxSolver::new(&config),
            photometric: PhotometricPerturber::new(&config, PhotometricPolicy::default()),
            geometric: GeometricTransformer::new(&config),
            config,
            rng,
        })
    }

    /// Create a pipeline from the parameters of a media kind.
    pub fn from_media_params(params: MediaParams, rng: R) -> Result<Self, ConfigError> {
        match params {
            MediaParams::Image(config) => Self::new(config, rng),
        }
    }

    /// Replace the lighting and saturation amplitudes.
    pub fn with_photometric_policy(mut self, policy: PhotometricPolicy) -> Self {
        self.photometric = PhotometricPerturber::new(&self.config, policy);
        self
    }

    /// The configuration the pipeline was built from.
    pub fn config(&self) -> &AugmentationConfig {
        &self.config
    }

    /// The random source of the pipeline.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// The configured per-channel means, in blue, green, red order.
    pub fn mean(&self) -> [i32; 3] {
        let [r, g, b] = self.config.mean_rgb();
        [b, g, r]
    }

    /// Draw the augmentation parameters for a source of the given size.
    ///
    /// Draws happen in a fixed order: flip (only when flipping is enabled),
    /// angle, contrast, brightness, the crop box, lighting noise, saturation.
    pub fn sample(&mut self, size: ImageSize) -> Result<AugmentationSample, AugmentError> {
        let rng = &mut self.rng;

        let flip = self.config.do_flip() && rng.bernoulli(0.5);
        let angle = rng.uniform_zero_centered(self.config.angle_range());
        let (contrast, brightness) = self.photometric.draw_linear(rng);
        let crop_box = self.solver.solve(size, rng)?;
        let (lighting, saturation) = self.photometric.draw_color(rng);

        let sample = AugmentationSample {
            flip,
            angle,
            crop_box,
            photometric: PhotometricSample {
                contrast,
                brightness,
                lighting,
                saturation,
            },
        };
        log::debug!("augmentation sample for a {size} source: {sample:?}");

        Ok(sample)
    }

    /// Augment an RGB image with freshly drawn parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidImage`] for an empty source and
    /// [`crate::GeometryError::DegenerateCrop`] when no crop box fits.
    pub fn transform(&mut self, src: &Image<u8, 3>) -> Result<OutputBuffer, AugmentError> {
        if src.size().is_empty() {
            return Err(InputError::InvalidImage(format!("empty {} source", src.size())).into());
        }
        let sample = self.sample(src.size())?;
        self.transform_with(src, &sample)
    }

    /// Augment an RGB image with the given parameters, drawing nothing.
    pub fn transform_with(
        &self,
        src: &Image<u8, 3>,
        sample: &AugmentationSample,
    ) -> Result<OutputBuffer, AugmentError> {
        if src.size().is_empty() {
            return Err(InputError::InvalidImage(format!("empty {} source", src.size())).into());
        }

        let src = src.cast::<f32>()?;

        let rotated = self.geometric.rotate(&src, sample.angle)?;
        let cropped = self.geometric.crop(&rotated, &sample.crop_box)?;
        let mut flipped = self.geometric.flip(cropped, sample.flip);
        self.photometric.apply(&mut flipped, &sample.photometric);
        let resized = self.geometric.resize(&flipped)?;

        let data = match self.config.channel_count() {
            1 => {
                let mut gray = Image::<f32, 1>::from_size_val(resized.size(), 0.0)?;
                color::gray_from_rgb(&resized, &mut gray)?;
                gray.convert::<u8>()?.into_vec()
            }
            _ => resized.convert::<u8>()?.into_vec(),
        };

        Ok(OutputBuffer {
            size: resized.size(),
            channels: self.config.channel_count(),
            data,
        })
    }

    /// Decode an encoded image, augment it and split the result into planes.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidImage`] if the bytes cannot be decoded.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<PlanarBuffer, AugmentError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| InputError::InvalidImage(e.to_string()))?;

        let image = Image::<u8, 3>::new(
            ImageSize {
                width: img.width() as usize,
                height: img.height() as usize,
            },
            img.to_rgb8().into_raw(),
        )?;

        Ok(self.transform(&image)?.to_planar()?)
    }
}

#[cfg(test)]
mod tests {
    use augmenta_image::{Image, ImageSize};

    use super::{AugmentationPipeline, OutputBuffer};
    use crate::config::{AugmentationConfig, ConfigKey};
    use crate::error::{AugmentError, ConfigError, InputError};
    use crate::random::ReplayRandom;

    fn config() -> AugmentationConfig {
        AugmentationConfig::default()
            .with(ConfigKey::Width, 8)
            .with(ConfigKey::Height, 6)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = config().with(ConfigKey::ChannelCount, 4);
        let res = AugmentationPipeline::with_seed(config, 0);
        assert!(matches!(res, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn mean_is_bgr() -> Result<(), AugmentError> {
        let pipeline = AugmentationPipeline::with_seed(AugmentationConfig::default(), 0)?;
        assert_eq!(pipeline.mean(), [127, 119, 104]);
        Ok(())
    }

    #[test]
    fn draw_count_per_sample() -> Result<(), AugmentError> {
        let size = ImageSize {
            width: 16,
            height: 12,
        };

        // angle, contrast, brightness, 4 crop draws, 3 lighting, saturation
        let mut pipeline = AugmentationPipeline::new(config(), ReplayRandom::new(vec![0.5]))?;
        pipeline.sample(size)?;
        assert_eq!(pipeline.rng().draws_consumed(), 11);

        let flipping = config().with(ConfigKey::DoFlip, 1);
        let mut pipeline = AugmentationPipeline::new(flipping, ReplayRandom::new(vec![0.5]))?;
        pipeline.sample(size)?;
        assert_eq!(pipeline.rng().draws_consumed(), 12);
        Ok(())
    }

    #[test]
    fn flip_draw_comes_first() -> Result<(), AugmentError> {
        let flipping = config().with(ConfigKey::DoFlip, 1);
        let mut pipeline = AugmentationPipeline::new(flipping, ReplayRandom::new(vec![0.25, 0.5]))?;
        let sample = pipeline.sample(ImageSize {
            width: 16,
            height: 12,
        })?;
        assert!(sample.flip);
        assert_eq!(sample.angle, 0.0);
        Ok(())
    }

    #[test]
    fn empty_source_is_invalid() -> Result<(), AugmentError> {
        let mut pipeline = AugmentationPipeline::with_seed(config(), 0)?;
        let size = ImageSize {
            width: 0,
            height: 0,
        };
        let empty = Image::<u8, 3>::new(size, vec![])?;
        let res = pipeline.transform(&empty);
        assert!(matches!(res, Err(AugmentError::Input(InputError::InvalidImage(_)))));
        Ok(())
    }

    #[test]
    fn planar_split_is_bgr() -> Result<(), AugmentError> {
        let output = OutputBuffer {
            size: ImageSize {
                width: 2,
                height: 1,
            },
            channels: 3,
            data: vec![1, 2, 3, 4, 5, 6],
        };
        let planar = output.to_planar()?;
        assert_eq!(planar.plane(0), Some(&[3u8, 6][..]));
        assert_eq!(planar.plane(1), Some(&[2u8, 5][..]));
        assert_eq!(planar.plane(2), Some(&[1u8, 4][..]));
        assert_eq!(planar.plane(3), None);
        Ok(())
    }

    #[test]
    fn grayscale_output() -> Result<(), AugmentError> {
        let config = config().with(ConfigKey::ChannelCount, 1);
        let mut pipeline = AugmentationPipeline::with_seed(config, 3)?;
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 16,
                height: 12,
            },
            100,
        )?;
        let output = pipeline.transform(&src)?;
        assert_eq!(output.channels(), 1);
        assert_eq!(output.as_slice().len(), 8 * 6);
        assert_eq!(output.to_planar()?.as_slice(), output.as_slice());
        Ok(())
    }
}
