//! Sizing of the digits so that all of them fit inside the image.

use log::warn;
use error::{RenderError, Result};
use crate::generator::fonts::{FONT_HEIGHT, FONT_WIDTH};

/// Dimensions computed once per image, shared by the digits and the noise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Margin kept on each side of the image
    pub border: i32,
    /// Width of the cell of a single digit
    pub num_width: i32,
    /// Height of the cell of a single digit, one dot row shorter than the glyph
    pub num_height: i32,
    /// Radius unit of every circle
    pub dot_size: i32,
    /// Number of digits
    pub count: usize
}

impl Layout {
    /// Horizontal distance between the origins of two consecutive digits
    pub fn advance(&self) -> i32 {
        self.num_width + self.dot_size
    }

    /// Horizontal space taken by the whole row of digits and their gaps
    pub fn row_width(&self) -> i32 {
        self.advance() * self.count as i32
    }

    /// True when the dots are too small to be visible
    pub fn is_degenerate(&self) -> bool {
        self.dot_size == 0
    }
}

/// Compute the layout of `count` digits in a `width`x`height` image.
///
/// The digits are first sized on the available width, then on the available
/// height if they would be too tall. Extreme inputs give a degenerate layout
/// (`dot_size == 0`) but never an error.
pub fn compute_layout(width: u32, height: u32, count: usize) -> Result<Layout> {
    if width == 0 || height == 0 || count == 0 {
        return Err(RenderError::InvalidDimensions(format!("{width}x{height} with {count} digits")).into());
    }

    let border = (width.min(height) / 5) as i32;

    let w = (width as i32 - border * 2) as f64;
    let h = (height as i32 - border * 2) as f64;
    // one dot of spacing after each digit
    let fw = FONT_WIDTH as f64 + 1.0;
    let fh = FONT_HEIGHT as f64;

    let mut nw = w / count as f64;
    let mut nh = nw * fh / fw;
    if nh > h {
        nh = h;
        nw = fw / fh * nh;
    }

    let dot_size = (nh / fh) as i32;
    let mut num_width = (nw as i32).max(1);
    let num_height = (nh as i32 - dot_size).max(1);

    // the gaps are not part of `nw`, take them back from the cells
    let usable = w as i32;
    if (num_width + dot_size) * count as i32 > usable {
        num_width = (usable / count as i32 - dot_size).max(1);
    }

    let layout = Layout { border, num_width, num_height, dot_size, count };

    if layout.is_degenerate() {
        warn!(target: "Captcha", "degenerate layout for {count} digits in {width}x{height}, digits will not be visible");
    }

    Ok(layout)
}
