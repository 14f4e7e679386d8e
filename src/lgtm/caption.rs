use crate::lgtm::img::Dimensions;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

const GLYPH_SIZE: u32 = 8;

/// The 8x8 bitmap font, scaled by an integer factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    pub const fn new(scale: u32) -> Self {
        Self { scale }
    }

    pub const fn line_height(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    pub fn measure(&self, text: &str) -> u32 {
        text.chars().count() as u32 * GLYPH_SIZE * self.scale
    }
}

/// Prints `text` centered horizontally and vertically inside the box that
/// starts at (`x`, `y`) and spans `layout`. The box may be larger than the
/// canvas; whatever falls outside is clipped.
pub fn print(
    canvas: &mut RgbaImage,
    font: &BitmapFont,
    (x, y): (i64, i64),
    text: &str,
    layout: Dimensions,
    color: Rgba<u8>,
) {
    let lines = wrap_lines(text, font, layout.width);
    let line_height = i64::from(font.line_height());
    let text_height = lines.len() as i64 * line_height;
    let top = y + (i64::from(layout.height) - text_height).div_euclid(2);
    for (index, line) in lines.iter().enumerate() {
        let left = x + (i64::from(layout.width) - i64::from(font.measure(line))).div_euclid(2);
        draw_line(
            canvas,
            font,
            (left, top + index as i64 * line_height),
            line,
            color,
        );
    }
}

/// Greedy word wrap on single spaces. Runs of spaces survive because the
/// empty words between them are kept.
pub fn wrap_lines(text: &str, font: &BitmapFont, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split(' ') {
        let mut candidate = current.clone();
        candidate.push(word);
        if font.measure(&candidate.join(" ")) <= max_width {
            current = candidate;
        } else {
            lines.push(current.join(" "));
            current = vec![word];
        }
    }
    lines.push(current.join(" "));
    lines
}

fn draw_line(
    canvas: &mut RgbaImage,
    font: &BitmapFont,
    (x, y): (i64, i64),
    line: &str,
    color: Rgba<u8>,
) {
    let scale = i64::from(font.scale.max(1));
    let glyph_advance = i64::from(GLYPH_SIZE) * scale;
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let mut cursor_x = x;
    for ch in line.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += glyph_advance;
            continue;
        };
        for (row_index, &row_bits) in glyph.iter().enumerate() {
            for column in 0..GLYPH_SIZE {
                if (row_bits >> column) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + i64::from(column) * scale;
                let py = y + row_index as i64 * scale;
                for ty in py..py + scale {
                    for tx in px..px + scale {
                        if tx >= 0 && ty >= 0 && tx < width && ty < height {
                            canvas.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += glyph_advance;
    }
}
