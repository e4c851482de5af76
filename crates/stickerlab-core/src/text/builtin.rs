//! Embedded 5x7 bitmap font.
//!
//! This is the fallback typeface used whenever a requested font file is
//! missing or unreadable, so text rendering never fails. Glyphs are drawn
//! on a 6x7 cell (5 ink columns + 1 spacing column) and scaled up by an
//! integer factor derived from the requested point size.

use super::GlyphMask;

/// Ink columns per glyph.
pub const GLYPH_WIDTH: u32 = 5;
/// Rows per glyph.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per glyph, including spacing.
pub const CELL_WIDTH: u32 = GLYPH_WIDTH + 1;

/// Nominal size of one unscaled glyph row set; `size / 8` gives the scale.
const NOMINAL_SIZE: u32 = 8;

/// Drawn for characters outside printable ASCII.
const REPLACEMENT: [u8; 7] = [0b11111; 7];

/// Integer pixel scale used for a requested font size.
pub fn scale_for_size(size: u32) -> u32 {
    (size.saturating_add(NOMINAL_SIZE / 2) / NOMINAL_SIZE).max(1)
}

/// Characters that occupy a cell. Control characters take no space.
fn drawn_chars(content: &str) -> impl Iterator<Item = char> + '_ {
    content.chars().filter(|c| !c.is_control())
}

/// Width and height of `content` at `size`, in pixels.
pub fn measure(content: &str, size: u32) -> (u32, u32) {
    let count = u32::try_from(drawn_chars(content).count()).unwrap_or(u32::MAX);
    if count == 0 {
        return (0, 0);
    }
    let k = scale_for_size(size);
    let width = count.saturating_mul(CELL_WIDTH).saturating_mul(k).saturating_sub(k);
    (width, GLYPH_HEIGHT.saturating_mul(k))
}

/// Rasterize `content` into a coverage mask (255 = ink).
pub fn rasterize(content: &str, size: u32) -> GlyphMask {
    let (width, height) = measure(content, size);
    let mut mask = GlyphMask::empty(width, height);
    if width == 0 {
        return mask;
    }

    let k = scale_for_size(size);
    for (i, ch) in drawn_chars(content).enumerate() {
        let rows = glyph(ch);
        let cell_x = i as u32 * CELL_WIDTH * k;
        for (ry, bits) in rows.iter().enumerate() {
            for rx in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - rx)) == 0 {
                    continue;
                }
                let x0 = cell_x + rx * k;
                let y0 = ry as u32 * k;
                for dy in 0..k {
                    for dx in 0..k {
                        mask.set(x0 + dx, y0 + dy, 255);
                    }
                }
            }
        }
    }
    mask
}

/// Row bitmaps for a character. Bit 4 is the leftmost column.
fn glyph(ch: char) -> [u8; 7] {
    macro_rules! g {
        ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr) => {
            [$a, $b, $c, $d, $e, $f, $g]
        };
    }

    match ch {
        ' ' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000),
        '!' => g!(0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100),
        '"' => g!(0b01010, 0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000),
        '#' => g!(0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010),
        '$' => g!(0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100),
        '%' => g!(0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011),
        '&' => g!(0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101),
        '\'' => g!(0b01100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000),
        '(' => g!(0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010),
        ')' => g!(0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000),
        '*' => g!(0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000),
        '+' => g!(0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000),
        ',' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000),
        '-' => g!(0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000),
        '.' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100),
        '/' => g!(0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000),

        '0' => g!(0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110),
        '1' => g!(0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        '2' => g!(0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111),
        '3' => g!(0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110),
        '4' => g!(0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010),
        '5' => g!(0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110),
        '6' => g!(0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110),
        '7' => g!(0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000),
        '8' => g!(0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110),
        '9' => g!(0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100),

        ':' => g!(0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000),
        ';' => g!(0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000),
        '<' => g!(0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010),
        '=' => g!(0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000),
        '>' => g!(0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000),
        '?' => g!(0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100),
        '@' => g!(0b01110, 0b10001, 0b00001, 0b01101, 0b10101, 0b10101, 0b01110),

        'A' => g!(0b01110, 0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001),
        'B' => g!(0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110),
        'C' => g!(0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110),
        'D' => g!(0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100),
        'E' => g!(0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111),
        'F' => g!(0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000),
        'G' => g!(0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111),
        'H' => g!(0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001),
        'I' => g!(0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        'J' => g!(0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100),
        'K' => g!(0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001),
        'L' => g!(0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111),
        'M' => g!(0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001),
        'N' => g!(0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001),
        'O' => g!(0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110),
        'P' => g!(0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000),
        'Q' => g!(0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101),
        'R' => g!(0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001),
        'S' => g!(0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110),
        'T' => g!(0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100),
        'U' => g!(0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110),
        'V' => g!(0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100),
        'W' => g!(0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010),
        'X' => g!(0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001),
        'Y' => g!(0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100),
        'Z' => g!(0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111),

        '[' => g!(0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110),
        '\\' => g!(0b00000, 0b10000, 0b01000, 0b00100, 0b00010, 0b00001, 0b00000),
        ']' => g!(0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110),
        '^' => g!(0b00100, 0b01010, 0b10001, 0b00000, 0b00000, 0b00000, 0b00000),
        '_' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111),
        '`' => g!(0b01000, 0b00100, 0b00010, 0b00000, 0b00000, 0b00000, 0b00000),

        'a' => g!(0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111),
        'b' => g!(0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110),
        'c' => g!(0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110),
        'd' => g!(0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111),
        'e' => g!(0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110),
        'f' => g!(0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000),
        'g' => g!(0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110),
        'h' => g!(0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001),
        'i' => g!(0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110),
        'j' => g!(0b00010, 0b00000, 0b00110, 0b00010, 0b00010, 0b10010, 0b01100),
        'k' => g!(0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010),
        'l' => g!(0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        'm' => g!(0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001),
        'n' => g!(0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001),
        'o' => g!(0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110),
        'p' => g!(0b00000, 0b00000, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000),
        'q' => g!(0b00000, 0b00000, 0b01101, 0b10011, 0b01111, 0b00001, 0b00001),
        'r' => g!(0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000),
        's' => g!(0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110),
        't' => g!(0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110),
        'u' => g!(0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101),
        'v' => g!(0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100),
        'w' => g!(0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010),
        'x' => g!(0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001),
        'y' => g!(0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110),
        'z' => g!(0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111),

        '{' => g!(0b00010, 0b00100, 0b00100, 0b01000, 0b00100, 0b00100, 0b00010),
        '|' => g!(0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100),
        '}' => g!(0b01000, 0b00100, 0b00100, 0b00010, 0b00100, 0b00100, 0b01000),
        '~' => g!(0b00000, 0b00000, 0b01000, 0b10101, 0b00010, 0b00000, 0b00000),

        _ => REPLACEMENT,
    }
}
