use image::Rgba;
use crate::generator::filters::Filter;
use crate::generator::images::Image;
use crate::random::Random;

/// A wandering line crossing the whole image from left to right
pub struct StrikeThrough {
    dot_size: i32,
    color: Rgba<u8>
}

impl StrikeThrough {
    pub fn new(dot_size: i32, color: Rgba<u8>) -> Self {
        Self { dot_size, color }
    }
}

/// Random row in the middle third of the image
fn middle_row(max_y: i32, rng: &mut Random) -> i32 {
    rng.rnd(max_y / 3, max_y - max_y / 3)
}

impl Filter for StrikeThrough {
    fn apply(&self, i: &mut Image, rng: &mut Random) {
        let (max_x, max_y) = (i.width(), i.height());
        let half = self.dot_size / 2;

        let mut y = middle_row(max_y, rng);
        let mut x = 0;
        while x < max_x {
            // the radius is also the step, so consecutive circles overlap
            let r = rng.rnd(1, half - 1);
            y += rng.rnd(-half, half);
            if y <= 0 || y >= max_y {
                y = middle_row(max_y, rng);
            }

            i.draw_filled_circle(self.color, x, y, r);
            x += r;
        }
    }
}
