use std::path::Path;

use imgeval_image::{Image, ImageMatrix, ImageSize};

use crate::error::IoError;

const U8_MAX: f32 = u8::MAX as f32;
const U16_MAX: f32 = u16::MAX as f32;

/// Reads an image from the given file path and normalizes it to `[0.0, 1.0]`.
///
/// The format is guessed from the file content, so any format enabled in the
/// image crate is accepted. 8-bit samples are divided by 255 and 16-bit samples
/// by 65535.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if the path does not resolve to a file.
/// * [`IoError::ImageDecodeError`] if the content cannot be decoded.
/// * [`IoError::UnsupportedImageFormat`] for floating point or exotic layouts.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<ImageMatrix, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.is_file() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let matrix: ImageMatrix = match img.color() {
        image::ColorType::L8 => normalize::<_, 1>(size, img.into_luma8().into_raw(), U8_MAX)?.into(),
        image::ColorType::La8 => {
            normalize::<_, 2>(size, img.into_luma_alpha8().into_raw(), U8_MAX)?.into()
        }
        image::ColorType::Rgb8 => normalize::<_, 3>(size, img.into_rgb8().into_raw(), U8_MAX)?.into(),
        image::ColorType::Rgba8 => {
            normalize::<_, 4>(size, img.into_rgba8().into_raw(), U8_MAX)?.into()
        }
        image::ColorType::L16 => {
            normalize::<_, 1>(size, img.into_luma16().into_raw(), U16_MAX)?.into()
        }
        image::ColorType::La16 => {
            normalize::<_, 2>(size, img.into_luma_alpha16().into_raw(), U16_MAX)?.into()
        }
        image::ColorType::Rgb16 => {
            normalize::<_, 3>(size, img.into_rgb16().into_raw(), U16_MAX)?.into()
        }
        image::ColorType::Rgba16 => {
            normalize::<_, 4>(size, img.into_rgba16().into_raw(), U16_MAX)?.into()
        }
        other => return Err(IoError::UnsupportedImageFormat(format!("{other:?}"))),
    };

    Ok(matrix)
}

// convert integer samples to f32 and divide by the maximum representable value
fn normalize<T, const C: usize>(
    size: ImageSize,
    buf: Vec<T>,
    max_value: f32,
) -> Result<Image<f32, C>, IoError>
where
    T: Into<f32> + Copy,
{
    let data = buf.into_iter().map(|x| x.into() / max_value).collect();
    Ok(Image::new(size, data)?)
}
