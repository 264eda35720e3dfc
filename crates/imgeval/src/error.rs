use std::path::PathBuf;

use imgeval_metrics::MetricsError;

/// Errors that abort a whole evaluation run.
///
/// Faults of a single pair never surface here, they are reported through
/// [`crate::PairOutcome`] instead.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    /// The directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        /// The directory that was listed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The candidate directory holds no image with an accepted extension.
    #[error("No images found in {0}")]
    NoImagesFound(PathBuf),

    /// No candidate image could be associated with a reference image.
    #[error("No reference image could be paired with a candidate image")]
    NoPairs,

    /// Positional pairing needs at least as many references as candidates.
    #[error("Number of reference images ({references}) does not match the number of candidate images ({candidates})")]
    PairCountMismatch {
        /// Number of reference images kept for pairing.
        references: usize,
        /// Number of candidate images.
        candidates: usize,
    },

    /// The mapping table could not be loaded.
    #[error("Failed to load the mapping file {path}: {reason}")]
    MappingFile {
        /// The mapping file.
        path: PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// The metric parameters are invalid.
    #[error("Invalid metric configuration. {0}")]
    Config(#[from] MetricsError),

    /// The PSNR ceiling must be finite and strictly positive.
    #[error("Invalid PSNR ceiling {0}")]
    InvalidPsnrCeiling(f64),

    /// The report could not be written.
    #[error("Failed to write the report. {0}")]
    Report(#[from] std::io::Error),
}
