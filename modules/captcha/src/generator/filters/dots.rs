use image::Rgba;
use crate::generator::filters::Filter;
use crate::generator::images::{set_random_brightness, Image};
use crate::random::Random;

/// Circles of random size and brightness scattered in the background
pub struct Dots {
    count: usize,
    max_radius: i32,
    color: Rgba<u8>
}

impl Dots {
    pub fn new(count: usize, max_radius: i32, color: Rgba<u8>) -> Self {
        Self { count, max_radius, color }
    }
}

impl Filter for Dots {
    fn apply(&self, i: &mut Image, rng: &mut Random) {
        // the brightness drifts from one circle to the next
        let mut color = self.color;
        let (max_x, max_y) = (i.width(), i.height());

        for _ in 0..self.count {
            set_random_brightness(&mut color, 255, rng);
            let r = rng.rnd(1, self.max_radius);
            let x = rng.rnd(r, max_x - r);
            let y = rng.rnd(r, max_y - r);
            i.draw_filled_circle(color, x, y, r);
        }
    }
}
