#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// augmentation parameters and their external names.
pub mod config;

/// random crop box selection.
pub mod crop_box;

/// error types for the augmentation pipeline.
pub mod error;

/// rotation, crop, flip and resize stages.
pub mod geometric;

/// media kinds and their parameters.
pub mod media;

/// color perturbation stage.
pub mod photometric;

/// the end to end augmentation pipeline.
pub mod pipeline;

/// random sources driving the draws.
pub mod random;

pub use crate::config::{AugmentationConfig, ConfigKey};
pub use crate::crop_box::{CropBox, CropBoxSolver};
pub use crate::error::{AugmentError, ConfigError, GeometryError, InputError};
pub use crate::geometric::GeometricTransformer;
pub use crate::media::{MediaParams, MediaType};
pub use crate::photometric::{PhotometricPerturber, PhotometricPolicy, PhotometricSample};
pub use crate::pipeline::{AugmentationPipeline, AugmentationSample, OutputBuffer, PlanarBuffer};
pub use crate::random::{RandomSource, ReplayRandom, SeededRandom};
