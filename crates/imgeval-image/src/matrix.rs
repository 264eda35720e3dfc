use crate::image::{Image, ImageSize};

/// A normalized floating point image with a channel layout only known at runtime.
///
/// All values lie in `[0.0, 1.0]`. The variant encodes the number of channels,
/// so two matrices have the same shape only if they share the variant and the size.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageMatrix {
    /// Single channel luminance.
    Gray(Image<f32, 1>),
    /// Luminance with alpha.
    GrayAlpha(Image<f32, 2>),
    /// Red, green and blue.
    Rgb(Image<f32, 3>),
    /// Red, green and blue with alpha.
    Rgba(Image<f32, 4>),
}

impl ImageMatrix {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            ImageMatrix::Gray(img) => img.size(),
            ImageMatrix::GrayAlpha(img) => img.size(),
            ImageMatrix::Rgb(img) => img.size(),
            ImageMatrix::Rgba(img) => img.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            ImageMatrix::Gray(_) => 1,
            ImageMatrix::GrayAlpha(_) => 2,
            ImageMatrix::Rgb(_) => 3,
            ImageMatrix::Rgba(_) => 4,
        }
    }

    /// The (height, width, channels) shape of the image.
    ///
    /// # Examples
    ///
    /// ```
    /// use imgeval_image::{Image, ImageMatrix, ImageSize};
    ///
    /// let image = Image::<f32, 3>::from_size_val(ImageSize { width: 4, height: 2 }, 0.5).unwrap();
    /// let matrix = ImageMatrix::Rgb(image);
    ///
    /// assert_eq!(matrix.shape(), [2, 4, 3]);
    /// ```
    pub fn shape(&self) -> [usize; 3] {
        let size = self.size();
        [size.height, size.width, self.num_channels()]
    }

    /// Get the flat, interleaved pixel data.
    pub fn as_slice(&self) -> &[f32] {
        match self {
            ImageMatrix::Gray(img) => img.as_slice(),
            ImageMatrix::GrayAlpha(img) => img.as_slice(),
            ImageMatrix::Rgb(img) => img.as_slice(),
            ImageMatrix::Rgba(img) => img.as_slice(),
        }
    }
}

impl From<Image<f32, 1>> for ImageMatrix {
    fn from(image: Image<f32, 1>) -> Self {
        ImageMatrix::Gray(image)
    }
}

impl From<Image<f32, 2>> for ImageMatrix {
    fn from(image: Image<f32, 2>) -> Self {
        ImageMatrix::GrayAlpha(image)
    }
}

impl From<Image<f32, 3>> for ImageMatrix {
    fn from(image: Image<f32, 3>) -> Self {
        ImageMatrix::Rgb(image)
    }
}

impl From<Image<f32, 4>> for ImageMatrix {
    fn from(image: Image<f32, 4>) -> Self {
        ImageMatrix::Rgba(image)
    }
}

#[cfg(test)]
mod tests {
    use super::ImageMatrix;
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn matrix_shape() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let gray: ImageMatrix = Image::<f32, 1>::from_size_val(size, 0.0)?.into();
        let rgba: ImageMatrix = Image::<f32, 4>::from_size_val(size, 1.0)?.into();

        assert_eq!(gray.shape(), [2, 3, 1]);
        assert_eq!(rgba.shape(), [2, 3, 4]);
        assert_eq!(rgba.as_slice().len(), 24);
        assert_ne!(gray.shape(), rgba.shape());

        Ok(())
    }
}
