//! Colour statistics of a rectangular region of an image.
//!
//! A [`Region`] borrows the source image, so evaluating a region never
//! copies pixels.

use image::{Rgb, RgbImage};

use super::{Rect};

/// Luma weight of the red channel.
pub const RED_WEIGHT: f64 = 0.2989;

/// Luma weight of the green channel.
pub const GREEN_WEIGHT: f64 = 0.587;

/// Luma weight of the blue channel.
pub const BLUE_WEIGHT: f64 = 0.114;

/// The colour reported for a region that contains no pixels.
pub const EMPTY_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

// ----------------------------------------------------------------------------

/// A rectangular window onto an `RgbImage`.
#[derive(Debug, Copy, Clone)]
pub struct Region<'a> {
    image: &'a RgbImage,
    rect: Rect,
}

impl<'a> Region<'a> {
    /// Clips `rect` to the bounds of `image`.
    pub fn new(image: &'a RgbImage, rect: Rect) -> Self {
        let right = rect.right.min(image.width());
        let bottom = rect.bottom.min(image.height());
        let rect = Rect::new(rect.left.min(right), rect.top.min(bottom), right, bottom);
        Region {image, rect}
    }

    /// The whole of `image`.
    pub fn whole(image: &'a RgbImage) -> Self {
        Region {image, rect: Rect::of_size(image.width(), image.height())}
    }

    pub fn rect(&self) -> Rect { self.rect }

    /// The number of pixels in `self`.
    pub fn len(&self) -> u64 { self.rect.area() }

    pub fn is_empty(&self) -> bool { self.rect.is_empty() }

    /// Iterates over the pixels of `self` row by row.
    pub fn pixels(&self) -> impl 'a + Iterator<Item=&'a Rgb<u8>> {
        let Region {image, rect} = *self;
        (rect.top..rect.bottom).flat_map(move |y| {
            (rect.left..rect.right).map(move |x| image.get_pixel(x, y))
        })
    }
}

// ----------------------------------------------------------------------------

/// A 256-bucket histogram of one 8-bit channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram(pub [u64; 256]);

impl Default for Histogram {
    fn default() -> Self { Histogram([0; 256]) }
}

impl Histogram {
    pub fn add(&mut self, value: u8) { self.0[value as usize] += 1; }

    /// The number of samples counted.
    pub fn total(&self) -> u64 { self.0.iter().sum() }

    /// The standard deviation of the counted samples, or `0.0` if there are
    /// none.
    pub fn deviation(&self) -> f64 {
        let total = self.total();
        if total == 0 { return 0.0; }
        let total = total as f64;
        let mean = self.0.iter().enumerate()
            .map(|(i, &count)| i as f64 * count as f64)
            .sum::<f64>() / total;
        let variance = self.0.iter().enumerate()
            .map(|(i, &count)| count as f64 * (mean - i as f64).powi(2))
            .sum::<f64>() / total;
        variance.sqrt()
    }
}

/// Separate histograms for the red, green and blue channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorHistogram {
    pub red: Histogram,
    pub green: Histogram,
    pub blue: Histogram,
}

impl ColorHistogram {
    /// Counts every pixel of `region`.
    pub fn of(region: &Region) -> Self {
        let mut hist = Self::default();
        for &Rgb([r, g, b]) in region.pixels() {
            hist.red.add(r);
            hist.green.add(g);
            hist.blue.add(b);
        }
        hist
    }

    /// Combines the per-channel deviations using luma weights.
    pub fn detail(&self) -> f64 {
        RED_WEIGHT * self.red.deviation() +
        GREEN_WEIGHT * self.green.deviation() +
        BLUE_WEIGHT * self.blue.deviation()
    }
}

// ----------------------------------------------------------------------------

/// Measures how much colour detail `region` contains. A flat region scores
/// `0.0`.
pub fn detail(region: &Region) -> f64 {
    ColorHistogram::of(region).detail()
}

/// Returns the mean colour of `region`, truncating each channel.
///
/// An empty region is white.
pub fn average_color(region: &Region) -> Rgb<u8> {
    let count = region.len();
    if count == 0 { return EMPTY_COLOR; }
    let mut sums = [0u64; 3];
    for pixel in region.pixels() {
        for (sum, &c) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += c as u64;
        }
    }
    Rgb(sums.map(|sum| (sum / count) as u8))
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32, a: Rgb<u8>, b: Rgb<u8>) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| if (x + y) % 2 == 0 { a } else { b })
    }

    #[test]
    fn uniform_region() {
        let image = RgbImage::from_pixel(6, 5, Rgb([12, 200, 7]));
        let region = Region::whole(&image);
        assert_eq!(detail(&region), 0.0);
        assert_eq!(average_color(&region), Rgb([12, 200, 7]));
    }

    #[test]
    fn empty_region() {
        let image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let region = Region::new(&image, Rect::new(2, 1, 2, 4));
        assert!(region.is_empty());
        assert_eq!(region.pixels().count(), 0);
        assert_eq!(detail(&region), 0.0);
        assert_eq!(average_color(&region), EMPTY_COLOR);
    }

    #[test]
    fn black_and_white() {
        let image = checkerboard(2, 2, Rgb([0, 0, 0]), Rgb([255, 255, 255]));
        let region = Region::whole(&image);
        // Two samples at 0 and two at 255 deviate by 127.5 in every channel.
        let expected = (RED_WEIGHT + GREEN_WEIGHT + BLUE_WEIGHT) * 127.5;
        assert!((detail(&region) - expected).abs() < 1e-9);
        assert_eq!(average_color(&region), Rgb([127, 127, 127]));
    }

    #[test]
    fn channel_weights() {
        let image = checkerboard(4, 4, Rgb([0, 0, 0]), Rgb([10, 0, 0]));
        let hist = ColorHistogram::of(&Region::whole(&image));
        assert_eq!(hist.red.total(), 16);
        assert!((hist.red.deviation() - 5.0).abs() < 1e-9);
        assert_eq!(hist.green.deviation(), 0.0);
        assert!((hist.detail() - RED_WEIGHT * 5.0).abs() < 1e-9);
    }

    #[test]
    fn sub_region() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        image.put_pixel(2, 1, Rgb([90, 30, 3]));
        image.put_pixel(3, 1, Rgb([91, 31, 4]));
        let region = Region::new(&image, Rect::new(2, 1, 4, 2));
        assert_eq!(region.len(), 2);
        assert_eq!(average_color(&region), Rgb([90, 30, 3]));
    }

    #[test]
    fn clipped_to_image() {
        let image = RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]));
        let region = Region::new(&image, Rect::new(1, 1, 10, 10));
        assert_eq!(region.rect(), Rect::new(1, 1, 3, 3));
        assert_eq!(region.pixels().count(), 4);
    }
}
