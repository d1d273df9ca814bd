//! Color perturbations: legacy contrast/brightness, PCA lighting noise and
//! saturation blending.
//!
//! The buffers are interleaved RGB with values in pixel units (0..255).

use augmenta_image::Image;
use augmenta_imgproc::{color, parallel};

use crate::config::AugmentationConfig;
use crate::random::RandomSource;

/// Principal components of natural-image RGB pixels, one component per column.
pub const PCA_BASIS: [[f32; 3]; 3] = [
    [-0.5675, 0.7192, 0.4009],
    [-0.5808, -0.0045, -0.8140],
    [-0.5836, -0.6948, 0.4203],
];

/// Standard deviation of each principal component, in pixel units.
pub const PCA_STD: [[f32; 3]; 3] = [
    [55.46, 0.0, 0.0],
    [0.0, 4.794, 0.0],
    [0.0, 0.0, 1.148],
];

/// Projects an RGB triple onto its luma, replicated on every channel.
pub const GRAY_PROJECTION: [[f32; 3]; 3] = [
    [color::RW, color::GW, color::BW],
    [color::RW, color::GW, color::BW],
    [color::RW, color::GW, color::BW],
];

const IDENTITY: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

// brightness offsets are expressed relative to half the pixel range
const BRIGHTNESS_UNIT: f32 = 127.0;

fn mat_mul(a: &[[f32; 3]; 3], b: &[[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn mat_vec(m: &[[f32; 3]; 3], v: &[f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Amplitudes of the lighting and saturation draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotometricPolicy {
    /// Lighting noise is drawn in `[-lighting, lighting)` per component.
    pub lighting: f32,
    /// The saturation offset is drawn in `[-saturation, saturation)`.
    pub saturation: f32,
}

impl Default for PhotometricPolicy {
    fn default() -> Self {
        Self {
            lighting: 0.5,
            saturation: 0.2,
        }
    }
}

impl PhotometricPolicy {
    /// A policy whose draws are always zero, leaving colors untouched.
    pub fn disabled() -> Self {
        Self {
            lighting: 0.0,
            saturation: 0.0,
        }
    }
}

/// The realized photometric draws for one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotometricSample {
    /// Relative contrast change, the gain is `1 + contrast`.
    pub contrast: f32,
    /// Additive brightness offset in pixel units.
    pub brightness: f32,
    /// Lighting noise coefficients, one per principal component.
    pub lighting: [f32; 3],
    /// Saturation blend weight, `1` keeps the colors.
    pub saturation: f32,
}

impl PhotometricSample {
    /// The sample that leaves the image unchanged.
    pub fn identity() -> Self {
        Self {
            contrast: 0.0,
            brightness: 0.0,
            lighting: [0.0; 3],
            saturation: 1.0,
        }
    }
}

/// Applies the color perturbations.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotometricPerturber {
    policy: PhotometricPolicy,
    contrast_range: f32,
    brightness_range: f32,
}

impl PhotometricPerturber {
    /// Create a perturber from the legacy ranges of the configuration.
    pub fn new(config: &AugmentationConfig, policy: PhotometricPolicy) -> Self {
        Self {
            policy,
            contrast_range: config.contrast_range(),
            brightness_range: config.brightness_range(),
        }
    }

    /// The lighting and saturation amplitudes.
    pub fn policy(&self) -> PhotometricPolicy {
        self.policy
    }

    /// Draw the legacy contrast and brightness values, in that order.
    pub fn draw_linear<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        let contrast = rng.uniform_zero_centered(self.contrast_range);
        let brightness = BRIGHTNESS_UNIT * rng.uniform_zero_centered(self.brightness_range);
        (contrast, brightness)
    }

    /// Draw the lighting noise and the saturation weight, in that order.
    pub fn draw_color<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ([f32; 3], f32) {
        let lighting = [
            rng.uniform_zero_centered(self.policy.lighting),
            rng.uniform_zero_centered(self.policy.lighting),
            rng.uniform_zero_centered(self.policy.lighting),
        ];
        let saturation = 1.0 + rng.uniform_zero_centered(self.policy.saturation);
        (lighting, saturation)
    }

    /// Per-channel offset produced by projecting the noise through the PCA basis.
    pub fn lighting_offset(noise: &[f32; 3]) -> [f32; 3] {
        mat_vec(&mat_mul(&PCA_BASIS, &PCA_STD), noise)
    }

    /// Blend matrix `alpha * I + (1 - alpha) * GRAY_PROJECTION`.
    pub fn saturation_matrix(alpha: f32) -> [[f32; 3]; 3] {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = alpha * IDENTITY[i][j] + (1.0 - alpha) * GRAY_PROJECTION[i][j];
            }
        }
        m
    }

    /// Apply the sample to the image in place.
    ///
    /// Effects whose draw is neutral are skipped without touching the pixels.
    pub fn apply(&self, image: &mut Image<f32, 3>, sample: &PhotometricSample) {
        let linear = sample.contrast != 0.0 || sample.brightness != 0.0;
        let offset = Self::lighting_offset(&sample.lighting);
        let lighting = offset.iter().any(|&o| o != 0.0);
        let saturation = sample.saturation != 1.0;

        if !(linear || lighting || saturation) {
            return;
        }

        let gain = 1.0 + sample.contrast;
        let blend = Self::saturation_matrix(sample.saturation);

        parallel::par_iter_rows_inplace(image, |pixel| {
            let mut rgb = [pixel[0], pixel[1], pixel[2]];
            if linear {
                rgb.iter_mut()
                    .for_each(|v| *v = *v * gain + sample.brightness);
            }
            if lighting {
                rgb.iter_mut().zip(offset.iter()).for_each(|(v, o)| *v += o);
            }
            if saturation {
                rgb = mat_vec(&blend, &rgb);
            }
            pixel.copy_from_slice(&rgb);
        });
    }
}
