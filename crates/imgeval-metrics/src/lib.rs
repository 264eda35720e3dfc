#![deny(missing_docs)]
//! Full-reference image quality metrics.
//!
//! All metrics compare a reference image with a candidate image of the same
//! shape (H, W, C) holding normalized floating point values.
//!
//! # Available Metrics
//!
//! - **MSE** (Mean Squared Error): Average squared difference between pixels
//! - **PSNR** (Peak Signal-to-Noise Ratio): Quality metric in dB scale
//! - **SSIM** (Structural Similarity Index): Windowed luminance, contrast and structure similarity

/// Error types for the metrics module.
pub mod error;

/// 1D window kernels.
pub mod kernels;

mod matrix;
mod mse;
mod ssim;

pub use crate::error::MetricsError;
pub use matrix::{psnr_matrix, ssim_matrix};
pub use mse::{mse, psnr};
pub use ssim::{ssim, SsimConfig};
