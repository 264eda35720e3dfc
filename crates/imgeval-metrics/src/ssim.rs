use imgeval_image::Image;

use crate::{
    error::MetricsError,
    kernels,
    mse::{check_data_range, check_shapes},
};

/// Parameters of the structural similarity index.
///
/// The defaults follow the usual full-reference setup: a 7x7 uniform window,
/// `K1 = 0.01`, `K2 = 0.03` and unbiased local (co)variances.
#[derive(Clone, Debug, PartialEq)]
pub struct SsimConfig {
    /// Side of the square sliding window. Must be odd.
    pub win_size: usize,
    /// Maximum possible value range of the inputs.
    pub data_range: f64,
    /// Luminance stabilization constant.
    pub k1: f64,
    /// Contrast stabilization constant.
    pub k2: f64,
    /// Weight the window with a gaussian of this sigma instead of uniformly.
    ///
    /// The window then spans 3.5 sigma on each side and `win_size` is ignored.
    pub gaussian_sigma: Option<f64>,
    /// Normalize the local (co)variances by `NP / (NP - 1)`.
    pub use_sample_covariance: bool,
}

impl Default for SsimConfig {
    fn default() -> Self {
        Self {
            win_size: 7,
            data_range: 1.0,
            k1: 0.01,
            k2: 0.03,
            gaussian_sigma: None,
            use_sample_covariance: true,
        }
    }
}

const GAUSSIAN_TRUNCATE: f64 = 3.5;

impl SsimConfig {
    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), MetricsError> {
        check_data_range(self.data_range)?;

        if let Some(sigma) = self.gaussian_sigma {
            let fits = kernels::gaussian_kernel_size(sigma, GAUSSIAN_TRUNCATE).is_some();
            if !sigma.is_finite() || sigma <= 0.0 || !fits {
                return Err(MetricsError::InvalidSigma(sigma));
            }
        } else if self.win_size == 0 || self.win_size % 2 == 0 {
            return Err(MetricsError::InvalidWindowSize(self.win_size));
        }

        Ok(())
    }

    /// The window side actually used for an image of `rows` x `cols` pixels.
    ///
    /// Windows larger than the image shrink to the largest odd size that fits.
    pub fn window_size(&self, rows: usize, cols: usize) -> usize {
        let requested = match self.gaussian_sigma {
            Some(sigma) => {
                kernels::gaussian_kernel_size(sigma, GAUSSIAN_TRUNCATE).unwrap_or(usize::MAX)
            }
            None => self.win_size,
        };

        let max_fit = rows.min(cols);
        let max_odd = if max_fit % 2 == 0 {
            max_fit.saturating_sub(1)
        } else {
            max_fit
        };
        requested.min(max_odd)
    }

    fn kernel(&self, win_size: usize) -> Vec<f64> {
        match self.gaussian_sigma {
            Some(sigma) => kernels::gaussian_kernel_1d(win_size, sigma),
            None => kernels::box_kernel_1d(win_size),
        }
    }
}

/// Compute the mean structural similarity index (SSIM) between two images.
///
/// For every window position where the full window fits inside the image the
/// local means `μ`, variances `σ²` and covariance `σxy` are computed and combined as
///
/// $ SSIM = \frac{(2 \mu_x \mu_y + C_1)(2 \sigma_{xy} + C_2)}{(\mu_x^2 + \mu_y^2 + C_1)(\sigma_x^2 + \sigma_y^2 + C_2)} $
///
/// with `C1 = (K1 R)^2` and `C2 = (K2 R)^2`. The index of a channel is the mean
/// over all window positions; images with several channels average the per
/// channel indices.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `config` - The SSIM parameters.
///
/// # Returns
///
/// A value in `[-1, 1]`, `1` meaning identical images.
///
/// # Example
///
/// ```
/// use imgeval_image::{Image, ImageSize};
/// use imgeval_metrics::{ssim, SsimConfig};
///
/// let size = ImageSize { width: 8, height: 8 };
/// let image = Image::<f32, 3>::from_size_val(size, 0.5).unwrap();
///
/// assert_eq!(ssim(&image, &image, &SsimConfig::default()).unwrap(), 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if the shapes differ, the images are empty or the
/// configuration is invalid.
pub fn ssim<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
    config: &SsimConfig,
) -> Result<f64, MetricsError> {
    config.validate()?;
    check_shapes(image1, image2)?;

    let rows = image1.rows();
    let cols = image1.cols();
    let win_size = config.window_size(rows, cols);
    let kernel = config.kernel(win_size);

    let planes1 = image1.split_channels()?;
    let planes2 = image2.split_channels()?;
    let total = planes1
        .iter()
        .zip(&planes2)
        .map(|(x, y)| ssim_plane(&to_f64(x), &to_f64(y), rows, cols, &kernel, config))
        .sum::<f64>();

    Ok(total / C as f64)
}

fn to_f64(plane: &Image<f32, 1>) -> Vec<f64> {
    plane.as_slice().iter().map(|&v| v as f64).collect()
}

fn ssim_plane(
    x: &[f64],
    y: &[f64],
    rows: usize,
    cols: usize,
    kernel: &[f64],
    config: &SsimConfig,
) -> f64 {
    let np = (kernel.len() * kernel.len()) as f64;
    let cov_norm = if config.use_sample_covariance && np > 1.0 {
        np / (np - 1.0)
    } else {
        1.0
    };

    let xx = x.iter().map(|v| v * v).collect::<Vec<_>>();
    let yy = y.iter().map(|v| v * v).collect::<Vec<_>>();
    let xy = x.iter().zip(y).map(|(a, b)| a * b).collect::<Vec<_>>();

    let ux = filter_valid(x, rows, cols, kernel);
    let uy = filter_valid(y, rows, cols, kernel);
    let uxx = filter_valid(&xx, rows, cols, kernel);
    let uyy = filter_valid(&yy, rows, cols, kernel);
    let uxy = filter_valid(&xy, rows, cols, kernel);

    let c1 = (config.k1 * config.data_range).powi(2);
    let c2 = (config.k2 * config.data_range).powi(2);

    let sum = (0..ux.len())
        .map(|i| {
            let vx = cov_norm * (uxx[i] - ux[i] * ux[i]);
            let vy = cov_norm * (uyy[i] - uy[i] * uy[i]);
            let vxy = cov_norm * (uxy[i] - ux[i] * uy[i]);

            let a1 = 2.0 * ux[i] * uy[i] + c1;
            let a2 = 2.0 * vxy + c2;
            let b1 = ux[i] * ux[i] + uy[i] * uy[i] + c1;
            let b2 = vx + vy + c2;

            (a1 * a2) / (b1 * b2)
        })
        .sum::<f64>();

    sum / ux.len() as f64
}

/// Correlate a plane with a separable square kernel, keeping only the
/// positions where the window lies fully inside the plane.
///
/// The output has `(rows - k + 1) * (cols - k + 1)` elements.
fn filter_valid(src: &[f64], rows: usize, cols: usize, kernel: &[f64]) -> Vec<f64> {
    let k = kernel.len();
    let out_rows = rows + 1 - k;
    let out_cols = cols + 1 - k;

    // horizontal
    let mut temp = vec![0.0; rows * out_cols];
    for r in 0..rows {
        let row = &src[r * cols..(r + 1) * cols];
        for c in 0..out_cols {
            temp[r * out_cols + c] = row[c..c + k]
                .iter()
                .zip(kernel)
                .map(|(v, w)| v * w)
                .sum();
        }
    }

    // vertical
    let mut dst = vec![0.0; out_rows * out_cols];
    for r in 0..out_rows {
        for c in 0..out_cols {
            dst[r * out_cols + c] = kernel
                .iter()
                .enumerate()
                .map(|(t, w)| temp[(r + t) * out_cols + c] * w)
                .sum();
        }
    }

    dst
}
