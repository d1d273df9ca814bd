#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color conversions and channel layout module.
pub mod color;

/// image cropping module.
pub mod crop;

/// image flipping module.
pub mod flip;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// rotation about the image center.
pub mod rotate;
