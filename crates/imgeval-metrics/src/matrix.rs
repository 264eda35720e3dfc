use imgeval_image::{ImageError, ImageMatrix};

use crate::{error::MetricsError, ssim::SsimConfig};

// apply a const-generic metric to two matrices sharing the same channel layout
macro_rules! dispatch {
    ($image1:expr, $image2:expr, |$a:ident, $b:ident| $body:expr) => {
        match ($image1, $image2) {
            (ImageMatrix::Gray($a), ImageMatrix::Gray($b)) => $body,
            (ImageMatrix::GrayAlpha($a), ImageMatrix::GrayAlpha($b)) => $body,
            (ImageMatrix::Rgb($a), ImageMatrix::Rgb($b)) => $body,
            (ImageMatrix::Rgba($a), ImageMatrix::Rgba($b)) => $body,
            (a, b) => Err(shape_mismatch(a, b)),
        }
    };
}

fn shape_mismatch(image1: &ImageMatrix, image2: &ImageMatrix) -> MetricsError {
    let [h1, w1, c1] = image1.shape();
    let [h2, w2, c2] = image2.shape();
    ImageError::InvalidImageShape(h1, w1, c1, h2, w2, c2).into()
}

/// Compute the [`crate::psnr`] of two normalized images of any channel layout.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageShape`] when the channel layouts or sizes differ.
pub fn psnr_matrix(
    image1: &ImageMatrix,
    image2: &ImageMatrix,
    data_range: f64,
) -> Result<f64, MetricsError> {
    dispatch!(image1, image2, |a, b| crate::psnr(a, b, data_range))
}

/// Compute the [`crate::ssim`] of two normalized images of any channel layout.
///
/// Single channel images are compared directly, multichannel images average
/// the index over the channel axis.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageShape`] when the channel layouts or sizes differ.
pub fn ssim_matrix(
    image1: &ImageMatrix,
    image2: &ImageMatrix,
    config: &SsimConfig,
) -> Result<f64, MetricsError> {
    dispatch!(image1, image2, |a, b| crate::ssim(a, b, config))
}
