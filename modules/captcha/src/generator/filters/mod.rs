//! Filters to disturb CAPTCHAs.

mod dots;
mod strike;

use super::images::Image;
use crate::random::Random;

// reexports
pub use super::filters::dots::Dots;
pub use super::filters::strike::StrikeThrough;

pub trait Filter {
    fn apply(&self, i: &mut Image, rng: &mut Random);
}
