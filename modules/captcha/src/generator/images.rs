//! The canvas of a captcha and the primitives drawn on it.

use image::{Rgba, RgbaImage};
use crate::random::Random;

/// Pixel buffer of a single render.
///
/// Every coordinate is signed, anything falling outside of the buffer is
/// silently dropped.
pub struct Image {
    buffer: RgbaImage
}

impl Image {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self { buffer: RgbaImage::new(width, height) }
    }

    pub fn width(&self) -> i32 {
        self.buffer.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.buffer.height() as i32
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn into_buffer(self) -> RgbaImage {
        self.buffer
    }

    /// Get a pixel, `None` outside of the canvas
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if self.contains(x, y) {
            Some(*self.buffer.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.contains(x, y) {
            self.buffer.put_pixel(x as u32, y as u32, color);
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    /// Fill every pixel of `[from_x, to_x]` on the row `y`
    pub fn draw_horizontal_span(&mut self, color: Rgba<u8>, from_x: i32, to_x: i32, y: i32) {
        if y < 0 || y >= self.height() {
            return;
        }

        let from = from_x.max(0);
        let to = to_x.min(self.width() - 1);
        for x in from..=to {
            self.buffer.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill a disk with the midpoint circle algorithm.
    ///
    /// Each step of the algorithm gives one point per octant, the chords
    /// between symmetric points are filled so the result is a solid disk.
    /// A radius of zero sets a single pixel, a negative radius draws nothing.
    pub fn draw_filled_circle(&mut self, color: Rgba<u8>, x: i32, y: i32, radius: i32) {
        if radius < 0 {
            return;
        }

        let mut f = 1 - radius;
        let mut dfx = 1;
        let mut dfy = -2 * radius;
        let mut xx = 0;
        let mut yy = radius;

        self.set(x, y + radius, color);
        self.set(x, y - radius, color);
        self.draw_horizontal_span(color, x - radius, x + radius, y);

        while xx < yy {
            if f >= 0 {
                yy -= 1;
                dfy += 2;
                f += dfy;
            }
            xx += 1;
            dfx += 2;
            f += dfx;

            self.draw_horizontal_span(color, x - xx, x + xx, y + yy);
            self.draw_horizontal_span(color, x - xx, x + xx, y - yy);
            self.draw_horizontal_span(color, x - yy, x + yy, y + xx);
            self.draw_horizontal_span(color, x - yy, x + yy, y - xx);
        }
    }
}

/// Pick the primary color of an image, every channel is kept dark
pub fn random_primary_color(rng: &mut Random) -> Rgba<u8> {
    Rgba([
        rng.rnd(0, 128) as u8,
        rng.rnd(0, 128) as u8,
        rng.rnd(0, 128) as u8,
        0xFF
    ])
}

/// Shift the three channels of `color` by the same random amount.
///
/// The result never goes above `max`. A color whose brightest channel is
/// already above `max` is left untouched.
pub fn set_random_brightness(color: &mut Rgba<u8>, max: u8, rng: &mut Random) {
    let [r, g, b, _] = color.0;
    let min_c = r.min(g).min(b) as i32;
    let max_c = r.max(g).max(b) as i32;

    if max_c > max as i32 {
        return;
    }

    let delta = rng.rnd(-min_c, max as i32 - max_c);
    for channel in color.0.iter_mut().take(3) {
        *channel = (*channel as i32 + delta) as u8;
    }
}
