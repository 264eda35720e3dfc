use imgeval_image::ImageError;

/// An error type for the metrics module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MetricsError {
    /// The inputs cannot be compared.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The SSIM window size must be odd and positive.
    #[error("Invalid window size {0}, expected an odd positive value")]
    InvalidWindowSize(usize),

    /// The data range must be finite and strictly positive.
    #[error("Invalid data range {0}")]
    InvalidDataRange(f64),

    /// The gaussian sigma must be finite and strictly positive.
    #[error("Invalid gaussian sigma {0}")]
    InvalidSigma(f64),
}
