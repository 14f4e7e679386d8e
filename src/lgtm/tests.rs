use crate::lgtm::caption::{self, wrap_lines, BitmapFont};
use crate::lgtm::consts::{TAGLINE, TAGLINE_FONT};
use crate::lgtm::img::{self, ComposeError, Dimensions};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A solid dark image encoded in `format`.
pub fn image_fixture(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([20, 40, 60, 255]));
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image)
        .to_rgb8()
        .write_to(&mut buffer, format)
        .expect("Failed to encode the fixture image.");
    buffer.into_inner()
}

pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    image_fixture(width, height, ImageFormat::Png)
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .expect("Composed output is not a PNG.")
        .to_rgba8()
}

fn white_pixels_in(canvas: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
    ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
        .filter(|&(x, y)| x < canvas.width() && y < canvas.height())
        .filter(|&(x, y)| *canvas.get_pixel(x, y) == WHITE)
        .count()
}

#[test]
fn test_wide_image_is_scaled_down() {
    let composed = img::compose(&png_fixture(800, 600)).unwrap();

    let output = decode(&composed);
    assert_eq!((output.width(), output.height()), (400, 300));
}

#[test]
fn test_odd_aspect_ratio_rounds_height() {
    let composed = img::compose(&png_fixture(1000, 333)).unwrap();

    let output = decode(&composed);
    assert_eq!(output.width(), 400);
    assert_eq!(output.height(), 133);
}

#[test]
fn test_narrow_image_keeps_its_size() {
    for (width, height) in [(400, 400), (150, 150), (37, 512)] {
        let composed = img::compose(&png_fixture(width, height)).unwrap();

        let output = decode(&composed);
        assert_eq!((output.width(), output.height()), (width, height));
    }
}

#[test]
fn test_jpeg_input_becomes_png() {
    let composed = img::compose(&image_fixture(640, 480, ImageFormat::Jpeg)).unwrap();

    assert_eq!(
        image::guess_format(&composed).unwrap(),
        ImageFormat::Png
    );
    assert_eq!(decode(&composed).width(), 400);
}

#[test]
fn test_headline_is_centered_in_original_box() {
    let composed = img::compose(&png_fixture(200, 100)).unwrap();
    let output = decode(&composed);

    // "LGTM" is 4 glyphs of 32px: x in 36..164, y in 34..66.
    assert!(white_pixels_in(&output, 36..164, 34..66) > 100);
    assert_eq!(white_pixels_in(&output, 0..30, 0..30), 0);
}

#[test]
fn test_headline_uses_pre_resize_box() {
    let composed = img::compose(&png_fixture(800, 600)).unwrap();
    let output = decode(&composed);

    // Laid out against 800x600, the headline starts at (336, 284) and is
    // clipped by the 400x300 canvas.
    assert!(white_pixels_in(&output, 336..400, 284..300) > 0);
    assert_eq!(white_pixels_in(&output, 0..300, 0..200), 0);
}

#[test]
fn test_garbage_is_a_decode_error() {
    let result = img::compose(b"definitely not an image");

    assert!(matches!(result, Err(ComposeError::Decode(_))));
}

#[test]
fn test_truncated_png_is_rejected() {
    let mut bytes = png_fixture(64, 64);
    bytes.truncate(40);

    assert!(img::compose(&bytes).is_err());
}

#[test]
fn test_dimensions_from_header() {
    let dimensions = img::dimensions(&png_fixture(321, 123)).unwrap();

    assert_eq!(
        dimensions,
        Dimensions {
            width: 321,
            height: 123,
        }
    );
}

#[test]
fn test_wrap_keeps_fitting_text_on_one_line() {
    let lines = wrap_lines(TAGLINE, &TAGLINE_FONT, 400);

    assert_eq!(lines, vec![TAGLINE.to_string()]);
}

#[test]
fn test_wrap_breaks_on_spaces() {
    let font = BitmapFont::new(1);

    let lines = wrap_lines("aa bb cc", &font, 40);

    assert_eq!(lines, vec!["aa bb".to_string(), "cc".to_string()]);
}

#[test]
fn test_wrap_overlong_first_word_yields_empty_line() {
    let font = BitmapFont::new(4);

    let lines = wrap_lines("LGTM", &font, 100);

    assert_eq!(lines, vec![String::new(), "LGTM".to_string()]);
}

#[test]
fn test_print_clips_outside_canvas() {
    let mut canvas = RgbaImage::new(10, 10);

    caption::print(
        &mut canvas,
        &BitmapFont::new(4),
        (-200, -200),
        "LGTM",
        Dimensions {
            width: 50,
            height: 50,
        },
        WHITE,
    );

    assert_eq!(white_pixels_in(&canvas, 0..10, 0..10), 0);
}
