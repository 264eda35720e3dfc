/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to share the same shape.
    #[error("Image shape mismatch: ({0}, {1}, {2}) vs ({3}, {4}, {5})")]
    InvalidImageShape(usize, usize, usize, usize, usize, usize),

    /// Error when the image has no pixels.
    #[error("Image is empty: {0}")]
    EmptyImage(crate::image::ImageSize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),
}
