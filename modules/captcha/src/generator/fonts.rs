//! Monochrome digit font used as a stencil for the dots.
//!
//! Each glyph is [`FONT_WIDTH`] columns by [`FONT_HEIGHT`] rows, one byte per
//! row, the most significant of the five low bits being the leftmost column.

pub const FONT_WIDTH: usize = 5;
pub const FONT_HEIGHT: usize = 8;

#[derive(Debug, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; FONT_HEIGHT]
}

impl Glyph {
    const fn new(rows: [u8; FONT_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Return true if the pixel at `(x, y)` is part of the digit
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        if x >= FONT_WIDTH || y >= FONT_HEIGHT {
            return false;
        }
        self.rows[y] & (1 << (FONT_WIDTH - 1 - x)) != 0
    }

    /// Iterate over the `(x, y)` cells that are set, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..FONT_HEIGHT).flat_map(move |y| {
            (0..FONT_WIDTH).filter(move |&x| self.is_set(x, y)).map(move |x| (x, y))
        })
    }
}

static FONT: [Glyph; 10] = [
    // 0
    Glyph::new([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b10001, 0b01110]),
    // 1
    Glyph::new([0b00100, 0b01100, 0b10100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111]),
    // 2
    Glyph::new([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
    // 3
    Glyph::new([0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b00001, 0b10001, 0b01110]),
    // 4
    Glyph::new([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010, 0b00010]),
    // 5
    Glyph::new([0b11111, 0b10000, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    // 6
    Glyph::new([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b10001, 0b01110]),
    // 7
    Glyph::new([0b11111, 0b00001, 0b00010, 0b00010, 0b00100, 0b00100, 0b01000, 0b01000]),
    // 8
    Glyph::new([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
    // 9
    Glyph::new([0b01110, 0b10001, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
];

/// Get the glyph of a digit, `None` if the value isn't in `0..=9`
pub fn glyph(digit: u8) -> Option<&'static Glyph> {
    FONT.get(digit as usize)
}
