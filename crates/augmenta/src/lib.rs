#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use augmenta_image as image;

#[doc(inline)]
pub use augmenta_imgproc as imgproc;

#[doc(inline)]
pub use augmenta_transforms as transforms;
