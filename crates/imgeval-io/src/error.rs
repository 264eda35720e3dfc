/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] imgeval_image::ImageError),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The decoded pixel layout has no normalized representation.
    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// Error to encode the PNG image.
    #[error("Failed to encode the png image. {0}")]
    PngEncodingError(String),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),
}

impl IoError {
    /// Whether the error means the file could not be found on disk.
    pub fn is_not_found(&self) -> bool {
        match self {
            IoError::FileDoesNotExist(_) => true,
            IoError::FileError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
