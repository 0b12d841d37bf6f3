use std::fs::{File};
use std::io::{BufWriter};
use image::{Delay, DynamicImage, RgbImage};
use image::codecs::gif::{GifEncoder, Repeat};

use super::{Frame};

pub mod cli;

// ----------------------------------------------------------------------------

/// A catch-all error type for the file layer.
#[derive(Debug, Copy, Clone)]
pub struct Failure(pub &'static str);

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for Failure {}

// ----------------------------------------------------------------------------

/// Load the specified file, discarding any alpha channel.
pub fn load_image(name: &str) -> crate::Result<RgbImage> {
    let img = image::io::Reader::open(name)?.with_guessed_format()?.decode()?;
    Ok(img.into_rgb8())
}

/// Save `pixels` to the specified file. The format follows the extension.
pub fn save_image(pixels: &RgbImage, name: &str) -> crate::Result<()> {
    Ok(pixels.save(name)?)
}

// ----------------------------------------------------------------------------

/// How an animation is played back.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnimationOptions {
    /// How long each frame is shown, in milliseconds.
    pub delay_ms: u32,

    /// The number of times the animation plays. `0` means forever.
    pub loops: u16,
}

impl Default for AnimationOptions {
    fn default() -> Self { Self {delay_ms: 1000, loops: 0} }
}

impl AnimationOptions {
    fn repeat(&self) -> Repeat {
        if self.loops == 0 { Repeat::Infinite } else { Repeat::Finite(self.loops) }
    }
}

/// Save `frames` to the specified file as an animated GIF.
pub fn save_animation(frames: &[Frame], name: &str, options: &AnimationOptions) -> crate::Result<()> {
    if frames.is_empty() {
        return Err(Failure("An animation needs at least one frame").into());
    }
    let mut encoder = GifEncoder::new(BufWriter::new(File::create(name)?));
    encoder.set_repeat(options.repeat())?;
    let delay = Delay::from_numer_denom_ms(options.delay_ms, 1);
    encoder.encode_frames(frames.iter().map(|frame| {
        let rgba = DynamicImage::ImageRgb8(frame.pixels.clone()).into_rgba8();
        image::Frame::from_parts(rgba, 0, 0, delay)
    }))?;
    Ok(())
}

// ----------------------------------------------------------------------------
