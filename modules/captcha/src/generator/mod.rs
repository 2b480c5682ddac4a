//! Assembly of a complete captcha image.

pub mod digits;
pub mod filters;
pub mod fonts;
pub mod images;
pub mod layout;

use std::io::Write;
use std::path::Path;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageError, Rgba, RgbaImage};
use log::{debug, error};
#[cfg(feature = "debug")]
use log::trace;

use config::CaptchaConfig;
use error::{EncodeError, FileError, RenderError, Result};
use crate::generator::filters::{Dots, Filter, StrikeThrough};
use crate::generator::images::Image;
use crate::generator::layout::Layout;
use crate::random::Random;

pub use config::{DEFAULT_HEIGHT, DEFAULT_LENGTH, DEFAULT_WIDTH};

/// Number of circles drawn behind the digits
pub const BACKGROUND_CIRCLES: usize = 10;

/// A rendered captcha and the digits printed on it
pub struct Captcha {
    image: Image,
    numbers: Vec<u8>,
    layout: Layout,
    primary_color: Rgba<u8>,
    origins: Vec<(i32, i32)>
}

impl Captcha {
    /// Render `numbers` in a new image of the given size, using a freshly seeded random source
    pub fn new(numbers: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        Self::with_rng(numbers, width, height, &mut Random::from_entropy())
    }

    /// Render `numbers` in a new image of the given size.
    ///
    /// Every value must be in `0..=9`.
    pub fn with_rng(numbers: Vec<u8>, width: u32, height: u32, rng: &mut Random) -> Result<Self> {
        if numbers.is_empty() {
            return Err(RenderError::EmptySequence.into());
        }
        let glyphs = numbers.iter()
            .map(|n| fonts::glyph(*n).ok_or_else(|| RenderError::InvalidDigit(format!("{n} is not a digit"))))
            .collect::<core::result::Result<Vec<_>, _>>()?;

        let layout = layout::compute_layout(width, height, numbers.len())?;

        debug!(target: "Captcha", "rendering {} digits in {width}x{height} (dot size {})", numbers.len(), layout.dot_size);
        #[cfg(feature = "debug")]
        trace!(target: "Captcha", "{layout:?}");

        let mut image = Image::new(width, height);
        let primary_color = images::random_primary_color(rng);

        Dots::new(BACKGROUND_CIRCLES, layout.dot_size, primary_color).apply(&mut image, rng);

        // random position of the row, keeping two dots of margin
        let dot = layout.dot_size;
        let max_x = width as i32 - layout.row_width() - dot;
        let max_y = height as i32 - layout.num_height - dot * 2;
        let mut x = rng.rnd(dot * 2, max_x);
        let y = rng.rnd(dot * 2, max_y);

        let mut origins = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            digits::draw_digit(&mut image, glyph, &layout, primary_color, x, y, rng);
            origins.push((x, y));
            x += layout.advance();
        }

        #[cfg(feature = "debug")]
        trace!(target: "Captcha", "digits drawn at {origins:?}");

        StrikeThrough::new(layout.dot_size, primary_color).apply(&mut image, rng);

        Ok(Self { image, numbers, layout, primary_color, origins })
    }

    /// Generate `length` random digits and render them
    pub fn random(length: usize, width: u32, height: u32) -> Result<Self> {
        Self::random_with_rng(length, width, height, &mut Random::from_entropy())
    }

    pub fn random_with_rng(length: usize, width: u32, height: u32, rng: &mut Random) -> Result<Self> {
        let numbers = random_numbers(length, rng);
        Self::with_rng(numbers, width, height, rng)
    }

    /// Render a random captcha with the settings of `config`
    pub fn from_config(config: &CaptchaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => Random::from_seed(seed),
            None => Random::from_entropy()
        };
        Self::random_with_rng(config.length, config.width, config.height, &mut rng)
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// The digits as the text the user must type
    pub fn code(&self) -> String {
        self.numbers.iter().map(|n| char::from(b'0' + n)).collect()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn primary_color(&self) -> Rgba<u8> {
        self.primary_color
    }

    /// Top-left anchor of each digit, from left to right
    pub fn origins(&self) -> &[(i32, i32)] {
        &self.origins
    }

    pub fn width(&self) -> u32 {
        self.image.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.image.height() as u32
    }

    pub fn image(&self) -> &RgbaImage {
        self.image.buffer()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image.into_buffer()
    }

    /// Write the image in the PNG format
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let buffer = self.image.buffer();

        let encoded = PngEncoder::new(writer).write_image(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            ColorType::Rgba8
        );

        match encoded {
            Ok(_) => Ok(()),
            Err(ImageError::IoError(e)) => {
                error!(target: "Captcha", "cannot write the captcha: {e}");
                Err(e.into())
            },
            Err(e) => {
                error!(target: "Captcha", "cannot encode the captcha: {e}");
                Err(EncodeError::Png(e.to_string()).into())
            }
        }
    }

    pub fn as_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_png(&mut bytes)?;
        Ok(bytes)
    }

    /// The PNG encoded in base64
    pub fn as_base64(&self) -> Result<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.as_png()?))
    }

    /// The PNG as a `data:` URI, ready to be embedded
    pub fn as_data_uri(&self) -> Result<String> {
        Ok(format!("data:image/png;base64,{}", self.as_base64()?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let file = match std::fs::File::create(path) {
            Ok(f) => f,
            Err(_) => return Err(error::Error::Fs(FileError::CannotWriteFile(path.to_string_lossy().to_string())))
        };

        let mut writer = std::io::BufWriter::new(file);
        self.write_png(&mut writer)?;

        match writer.flush() {
            Ok(_) => Ok(()),
            Err(e) => Err(error::Error::Fs(FileError::IOError(e.to_string())))
        }
    }
}

/// Generate `length` digits, each one uniform in `0..=9`
pub fn random_numbers(length: usize, rng: &mut Random) -> Vec<u8> {
    (0..length).map(|_| rng.rnd(0, 9) as u8).collect()
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use config::CaptchaConfig;
    use error::{EncodeError, Error, RenderError};
    use crate::generator::{random_numbers, Captcha, DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use crate::random::Random;

    fn render(numbers: Vec<u8>, seed: u64) -> Captcha {
        Captcha::with_rng(numbers, DEFAULT_WIDTH, DEFAULT_HEIGHT, &mut Random::from_seed(seed)).unwrap()
    }

    /// A sink that is already closed
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn same_seed_same_bytes() {
        let a = render(vec![1, 2, 3, 4, 5], 1234);
        let b = render(vec![1, 2, 3, 4, 5], 1234);

        assert_eq!(a.image(), b.image());
        assert_eq!(a.as_png().unwrap(), b.as_png().unwrap());
    }

    #[test]
    fn different_seeds_different_images() {
        let a = render(vec![1, 2, 3, 4, 5], 1);
        let b = render(vec![1, 2, 3, 4, 5], 2);

        assert_ne!(a.image(), b.image());
    }

    #[test]
    fn image_is_not_uniform() {
        for seed in 0..10 {
            let captcha = render(vec![1, 2, 3, 4, 5], seed);
            let first = *captcha.image().get_pixel(0, 0);

            assert!(captcha.image().pixels().any(|p| *p != first));
            assert!(captcha.image().pixels().any(|p| p.0[3] != 0));
        }
    }

    #[test]
    fn digits_are_laid_out_left_to_right() {
        for seed in 0..10 {
            let captcha = render(vec![9, 8, 7, 6, 5, 4], seed);
            let layout = captcha.layout();
            let origins = captcha.origins();

            assert_eq!(origins.len(), 6);
            for pair in origins.windows(2) {
                assert_eq!(pair[1].0 - pair[0].0, layout.num_width + layout.dot_size);
                assert_eq!(pair[1].1, pair[0].1);
            }

            // the row and its margin fit in the image
            let (x, y) = origins[0];
            assert!(x >= 2 * layout.dot_size);
            assert!(y >= 2 * layout.dot_size);
            assert!(x + layout.row_width() + layout.dot_size <= DEFAULT_WIDTH as i32);
            assert!(y + layout.num_height + 2 * layout.dot_size <= DEFAULT_HEIGHT as i32);
        }
    }

    #[test]
    fn digits_use_the_primary_color() {
        let captcha = render(vec![8, 8, 8], 77);
        let primary = captcha.primary_color();

        assert!(primary.0[..3].iter().all(|c| *c <= 128));
        assert!(captcha.image().pixels().any(|p| *p == primary));
    }

    #[test]
    fn png_round_trip_keeps_the_size() {
        let captcha = Captcha::with_rng(vec![0, 1, 2], 173, 61, &mut Random::from_seed(5)).unwrap();
        let bytes = captcha.as_png().unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), 173);
        assert_eq!(decoded.height(), 61);
        assert_eq!(decoded.to_rgba8(), *captcha.image());
    }

    #[test]
    fn closed_sink_is_an_io_error() {
        let captcha = render(vec![4, 2], 3);

        match captcha.write_png(Closed) {
            Err(Error::Encode(EncodeError::Io(_))) => {},
            other => panic!("unexpected result: {other:?}")
        }
    }

    #[test]
    fn base64_and_data_uri() {
        let captcha = render(vec![3, 1, 4], 8);
        let uri = captcha.as_data_uri().unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.ends_with(&captcha.as_base64().unwrap()));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let mut rng = Random::from_seed(0);

        assert!(matches!(
            Captcha::with_rng(vec![], 300, 80, &mut rng),
            Err(Error::Render(RenderError::EmptySequence))
        ));
        assert!(matches!(
            Captcha::with_rng(vec![1, 10], 300, 80, &mut rng),
            Err(Error::Render(RenderError::InvalidDigit(_)))
        ));
        assert!(matches!(
            Captcha::with_rng(vec![1], 0, 80, &mut rng),
            Err(Error::Render(RenderError::InvalidDimensions(_)))
        ));
    }

    #[test]
    fn extreme_digit_count_still_renders() {
        let numbers = random_numbers(300, &mut Random::from_seed(1));
        let captcha = Captcha::with_rng(numbers, 300, 80, &mut Random::from_seed(2)).unwrap();

        assert_eq!(captcha.origins().len(), 300);
        assert!(captcha.layout().is_degenerate());
    }

    #[test]
    fn random_sequence_has_the_requested_length() {
        let mut rng = Random::from_seed(10);
        let numbers = random_numbers(6, &mut rng);

        assert_eq!(numbers.len(), 6);
        assert!(numbers.iter().all(|n| *n <= 9));
    }

    #[test]
    fn random_captcha_keeps_its_code() {
        let captcha = Captcha::random_with_rng(6, 300, 80, &mut Random::from_seed(12)).unwrap();

        assert_eq!(captcha.numbers().len(), 6);
        assert_eq!(captcha.code().len(), 6);
        assert!(captcha.code().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn code_matches_numbers() {
        assert_eq!(render(vec![0, 4, 2, 9], 1).code(), "0429");
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let config = CaptchaConfig { width: 200, height: 70, length: 4, seed: Some(99) };
        let a = Captcha::from_config(&config).unwrap();
        let b = Captcha::from_config(&config).unwrap();

        assert_eq!(a.numbers(), b.numbers());
        assert_eq!(a.image(), b.image());
        assert_eq!((a.width(), a.height()), (200, 70));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CaptchaConfig { length: 0, ..CaptchaConfig::default() };

        assert!(Captcha::from_config(&config).is_err());
    }

    #[test]
    fn entropy_seeded_render() {
        let captcha = Captcha::random(5, 300, 80).unwrap();

        assert_eq!(captcha.origins().len(), 5);
        assert_eq!(captcha.numbers().len(), 5);
        assert_eq!(captcha.image().dimensions(), (300, 80));
    }

    #[test]
    fn save_to_a_file() {
        let path = std::env::temp_dir().join(format!("captcha-{}.png", std::process::id()));
        let captcha = render(vec![5, 5, 5], 4);

        captcha.save(&path).unwrap();
        let decoded = image::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(decoded.width(), DEFAULT_WIDTH);
    }
}
