use crate::lgtm::caption::BitmapFont;
use image::Rgba;

/// Wider images are scaled down to this width, keeping their aspect ratio.
pub const MAX_IMAGE_WIDTH: u32 = 400;

pub const HEADLINE: &str = "LGTM";
pub const TAGLINE: &str = "L o o k s   g o o d   t o   m e .";

pub const HEADLINE_FONT: BitmapFont = BitmapFont::new(4);
pub const TAGLINE_FONT: BitmapFont = BitmapFont::new(1);
pub const HEADLINE_OFFSET: (i64, i64) = (0, 0);
pub const TAGLINE_OFFSET: (i64, i64) = (0, 20);

pub const CAPTION_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
