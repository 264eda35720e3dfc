use imgeval_image::{Image, ImageError};

use crate::error::MetricsError;

// both images must share (H, W, C) and hold at least one element
pub(crate) fn check_shapes<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
) -> Result<(), MetricsError> {
    if image1.size() != image2.size() {
        let [h1, w1, c1] = image1.shape();
        let [h2, w2, c2] = image2.shape();
        return Err(ImageError::InvalidImageShape(h1, w1, c1, h2, w2, c2).into());
    }

    if image1.numel() == 0 {
        return Err(ImageError::EmptyImage(image1.size()).into());
    }

    Ok(())
}

pub(crate) fn check_data_range(data_range: f64) -> Result<(), MetricsError> {
    if !data_range.is_finite() || data_range <= 0.0 {
        return Err(MetricsError::InvalidDataRange(data_range));
    }
    Ok(())
}

/// Compute the mean squared error (MSE) between two images.
///
/// The MSE is defined as:
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// where `I_1` and `I_2` are the two images and `n` is the number of elements
/// over all pixels and channels. The sum is accumulated in `f64`.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use imgeval_image::{Image, ImageSize};
/// use imgeval_metrics::mse;
///
/// let image1 = Image::<f32, 1>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///    },
///    vec![0f32, 1f32, 2f32, 3f32],
/// )
/// .unwrap();
///
/// let image2 = Image::<f32, 1>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///    },
///    vec![0f32, 3f32, 2f32, 3f32],
/// )
/// .unwrap();
///
/// assert_eq!(mse(&image1, &image2).unwrap(), 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if the two images have different shapes or are empty.
pub fn mse<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
) -> Result<f64, MetricsError> {
    check_shapes(image1, image2)?;

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| (a as f64 - b as f64).powi(2))
        .sum::<f64>();

    Ok(sum / image1.numel() as f64)
}

/// Compute the peak signal-to-noise ratio (PSNR) between two images.
///
/// The PSNR is defined as:
///
/// $ PSNR = 10 \log_{10} \left( \frac{R^2}{MSE} \right) $
///
/// where `R` is the data range of the input (1.0 for normalized images) and
/// `MSE` is the mean squared error.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `data_range` - The maximum possible pixel value.
///
/// # Returns
///
/// The PSNR in decibels. Pixel-identical images have no noise, in which case
/// `f64::INFINITY` is returned.
///
/// # Example
///
/// ```
/// use imgeval_image::{Image, ImageSize};
/// use imgeval_metrics::psnr;
///
/// let size = ImageSize { width: 2, height: 2 };
/// let image1 = Image::<f32, 3>::from_size_val(size, 0.0).unwrap();
/// let image2 = Image::<f32, 3>::from_size_val(size, 0.1).unwrap();
///
/// let value = psnr(&image1, &image2, 1.0).unwrap();
/// assert!((value - 20.0).abs() < 1e-4);
///
/// assert_eq!(psnr(&image1, &image1, 1.0).unwrap(), f64::INFINITY);
/// ```
///
/// # Errors
///
/// Returns an error if the shapes differ, the images are empty or the data
/// range is not strictly positive.
pub fn psnr<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
    data_range: f64,
) -> Result<f64, MetricsError> {
    check_data_range(data_range)?;

    let mse = mse(image1, image2)?;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(10.0 * (data_range * data_range / mse).log10())
}
