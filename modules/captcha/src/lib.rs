//! Procedural generation of numeric CAPTCHA images.
//!
//! A [`Captcha`] is drawn in a few steps: the digits are sized to fit the
//! image, random circles are scattered in the background, each digit is
//! drawn as a cloud of jittered dots and a wandering line is struck through
//! everything. The result can be read as pixels or encoded as a PNG.

pub mod generator;
pub mod random;

pub use generator::{random_numbers, Captcha, BACKGROUND_CIRCLES, DEFAULT_HEIGHT, DEFAULT_LENGTH, DEFAULT_WIDTH};
pub use generator::layout::{compute_layout, Layout};
pub use random::Random;
