//! Drawing of a single digit as a cloud of jittered dots.

use image::Rgba;
use crate::generator::fonts::{Glyph, FONT_HEIGHT, FONT_WIDTH};
use crate::generator::images::Image;
use crate::generator::layout::Layout;
use crate::random::Random;

/// Maximum horizontal shift, in pixels, added after each row of a glyph
pub const MAX_SKEW: i32 = 2;

/// Draw `glyph` with its top-left corner around `(x, y)`.
///
/// Every set cell of the glyph becomes a circle of random radius and offset.
/// The whole digit is moved up or down by up to half a dot, and sheared by
/// a skew picked once for the digit and accumulated after each row.
pub fn draw_digit(
    image: &mut Image,
    glyph: &Glyph,
    layout: &Layout,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    rng: &mut Random
) {
    let dot = layout.dot_size;
    let skew = rng.float() * rng.rnd(-MAX_SKEW, MAX_SKEW) as f64;
    let min_radius = dot / 2;
    let max_radius = dot / 2 + dot / 4;

    let mut x = x;
    let mut xs = x as f64;
    let y = y + rng.rnd(-min_radius, min_radius);

    for yy in 0..FONT_HEIGHT {
        for xx in 0..FONT_WIDTH {
            if !glyph.is_set(xx, yy) {
                continue;
            }

            let radius = rng.rnd(min_radius, max_radius);
            let ox = x + xx as i32 * dot + rng.rnd(0, radius / 2);
            let oy = y + yy as i32 * dot + rng.rnd(0, radius / 2);
            image.draw_filled_circle(color, ox, oy, radius);
        }

        xs += skew;
        x = xs as i32;
    }
}
