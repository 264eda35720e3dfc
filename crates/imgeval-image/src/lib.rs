#![deny(missing_docs)]
//! Image types used to hold decoded and normalized pixel data

/// image representation with a compile time channel count.
pub mod image;

/// normalized images with a runtime channel layout.
pub mod matrix;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::matrix::ImageMatrix;
