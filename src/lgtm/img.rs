use crate::lgtm::caption;
use crate::lgtm::consts::{
    CAPTION_COLOR, HEADLINE, HEADLINE_FONT, HEADLINE_OFFSET, MAX_IMAGE_WIDTH, TAGLINE,
    TAGLINE_FONT, TAGLINE_OFFSET,
};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::io::{self, Cursor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to read image data: {0}")]
    Read(#[from] io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] ImageError),
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] ImageError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Reads the dimensions from the image header without decoding pixels.
pub fn dimensions(image_bytes: &[u8]) -> Result<Dimensions, ComposeError> {
    let (width, height) = ImageReader::new(Cursor::new(image_bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(Dimensions { width, height })
}

/// Height that keeps the aspect ratio once the width becomes `target_width`.
pub fn scaled_height(original: Dimensions, target_width: u32) -> u32 {
    let width = u64::from(original.width.max(1));
    let scaled = (u64::from(original.height) * u64::from(target_width) + width / 2) / width;
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

/// Shrinks the source image to at most `MAX_IMAGE_WIDTH` pixels wide, prints
/// the LGTM captions and returns PNG bytes.
///
/// The captions are laid out against the dimensions of the *original* image,
/// so on a shrunk image they sit further right and lower than its center.
pub fn compose(image_bytes: &[u8]) -> Result<Vec<u8>, ComposeError> {
    let original = dimensions(image_bytes)?;
    let image = ImageReader::new(Cursor::new(image_bytes))
        .with_guessed_format()?
        .decode()?;

    let image = if original.width > MAX_IMAGE_WIDTH {
        let height = scaled_height(original, MAX_IMAGE_WIDTH);
        image.resize_exact(MAX_IMAGE_WIDTH, height, FilterType::Lanczos3)
    } else {
        image
    };

    let mut canvas = image.to_rgba8();
    caption::print(
        &mut canvas,
        &HEADLINE_FONT,
        HEADLINE_OFFSET,
        HEADLINE,
        original,
        CAPTION_COLOR,
    );
    caption::print(
        &mut canvas,
        &TAGLINE_FONT,
        TAGLINE_OFFSET,
        TAGLINE,
        original,
        CAPTION_COLOR,
    );

    // For a rough estimate, assume 4 bytes per pixel (RGBA).
    let estimated_size = canvas.width() as usize * canvas.height() as usize * 4;
    let mut composed_bytes_buffer = Cursor::new(Vec::with_capacity(estimated_size));
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut composed_bytes_buffer, ImageFormat::Png)
        .map_err(ComposeError::Encode)?;

    Ok(composed_bytes_buffer.into_inner())
}
