use image::{Rgb, RgbImage};
use multidimension::{View};
use tracing::{debug, trace};

use super::{Error, Quad, Rect, Region, region};

/// Regions whose detail does not exceed this are not split.
pub const DETAIL_THRESHOLD: f64 = 3.0;

const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

// ----------------------------------------------------------------------------

/// Parameters controlling how a [`Quadtree`] is built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    /// The maximum depth of a leaf. The root has depth `0`.
    pub rate: usize,

    /// A region with detail at or below this value becomes a leaf.
    pub detail_threshold: f64,

    /// Build the four children of a node on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {rate: 10, detail_threshold: DETAIL_THRESHOLD, parallel: false}
    }
}

impl Settings {
    /// The default `Settings` with the specified `rate`.
    pub fn with_rate(rate: usize) -> Self {
        Self {rate, ..Self::default()}
    }
}

// ----------------------------------------------------------------------------

/// A region of the image and its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub rect: Rect,

    /// The distance from the root.
    pub depth: usize,

    /// The colour detail of `rect`; see [`region::detail()`].
    pub detail: f64,

    /// The mean colour of `rect`.
    pub color: Rgb<u8>,

    /// The four quadrants of `rect`, or `None` for a leaf.
    pub children: Option<Box<Quad<Node>>>,
}

impl Node {
    pub fn is_leaf(&self) -> bool { self.children.is_none() }

    /// Appends to `out` every node at `max_depth` or a leaf above it.
    fn frontier<'a>(&'a self, max_depth: usize, out: &mut Vec<&'a Node>) {
        match &self.children {
            Some(children) if self.depth != max_depth => {
                Quad::as_ref(&**children).each(|child| child.frontier(max_depth, out));
            },
            _ => out.push(self),
        }
    }

    /// The number of nodes in the subtree rooted at `self`.
    fn count(&self) -> usize {
        1 + self.children.as_ref().map_or(0, |children| {
            children.elements().map(Node::count).sum()
        })
    }
}

// ----------------------------------------------------------------------------

/// One image of a progressive sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The depth at which the tree was cut to render `pixels`.
    pub depth: usize,
    pub pixels: RgbImage,
}

// ----------------------------------------------------------------------------

/// A quadtree decomposition of an image into regions of low colour detail.
#[derive(Debug, Clone)]
pub struct Quadtree {
    root: Node,
    width: u32,
    height: u32,
    settings: Settings,
    observed_max_depth: usize,
}

impl Quadtree {
    /// Decomposes the whole of `image` with the default `Settings` and the
    /// specified `rate`.
    pub fn build(image: &RgbImage, rate: usize) -> Result<Self, Error> {
        Self::with_settings(image, &Settings::with_rate(rate))
    }

    /// Decomposes the whole of `image`.
    pub fn with_settings(image: &RgbImage, settings: &Settings) -> Result<Self, Error> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage {width, height});
        }
        Self::build_region(image, Rect::of_size(width, height), settings)
    }

    /// Decomposes the part of `image` inside `rect`. The rendered images
    /// are still the size of `image`.
    pub fn build_region(image: &RgbImage, rect: Rect, settings: &Settings) -> Result<Self, Error> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage {width, height});
        }
        if rect.left >= rect.right || rect.top >= rect.bottom || !rect.fits_in(width, height) {
            return Err(Error::InvalidRegion {rect, width, height});
        }
        let builder = Builder {image, settings};
        let (root, observed_max_depth) = builder.node(rect, 0);
        let tree = Self {root, width, height, settings: *settings, observed_max_depth};
        debug!(
            width, height, rate = settings.rate, observed_max_depth,
            nodes = tree.node_count(), "built quadtree"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node { &self.root }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn settings(&self) -> &Settings { &self.settings }

    /// The maximum permitted depth.
    pub fn rate(&self) -> usize { self.settings.rate }

    /// The depth of the deepest leaf.
    pub fn observed_max_depth(&self) -> usize { self.observed_max_depth }

    /// The total number of nodes.
    pub fn node_count(&self) -> usize { self.root.count() }

    /// Returns the nodes that are leaves or lie at `max_depth`, in
    /// depth-first order. Their rectangles tile the root rectangle.
    pub fn collect_frontier(&self, max_depth: usize) -> Vec<&Node> {
        let mut out = Vec::new();
        self.root.frontier(max_depth, &mut out);
        out
    }

    /// Returns all the leaves, in depth-first order.
    pub fn leaves(&self) -> Vec<&Node> {
        self.collect_frontier(self.observed_max_depth)
    }

    /// Paints each node of `collect_frontier(max_depth)` with its mean
    /// colour onto a black image. If `outlines` is set, each rectangle is
    /// bordered by a black line one pixel wide.
    pub fn render(&self, max_depth: usize, outlines: bool) -> RgbImage {
        let mut pixels = RgbImage::new(self.width, self.height);
        for node in self.collect_frontier(max_depth) {
            fill_rect(&mut pixels, node.rect, node.color);
            if outlines { stroke_rect(&mut pixels, node.rect, OUTLINE_COLOR); }
        }
        pixels
    }

    /// Renders the leaves.
    pub fn render_leaves(&self, outlines: bool) -> RgbImage {
        self.render(self.observed_max_depth, outlines)
    }

    /// Renders the tree cut at every depth from `0` to
    /// `observed_max_depth()`, coarsest first, or finest first if `reverse`
    /// is set.
    pub fn render_sequence(&self, outlines: bool, reverse: bool) -> Vec<Frame> {
        let mut frames: Vec<Frame> = (0..=self.observed_max_depth).map(|depth| {
            Frame {depth, pixels: self.render(depth, outlines)}
        }).collect();
        if reverse { frames.reverse(); }
        frames
    }
}

// ----------------------------------------------------------------------------

/// The state shared by every step of `Quadtree` construction.
struct Builder<'a> {
    image: &'a RgbImage,
    settings: &'a Settings,
}

impl<'a> Builder<'a> {
    /// Builds the subtree for `rect` and returns it with the depth of its
    /// deepest leaf.
    fn node(&self, rect: Rect, depth: usize) -> (Node, usize) {
        let region = Region::new(self.image, rect);
        let detail = region::detail(&region);
        let color = region::average_color(&region);
        if depth >= self.settings.rate || detail <= self.settings.detail_threshold {
            trace!(?rect, depth, detail, "leaf");
            return (Node {rect, depth, detail, color, children: None}, depth);
        }
        trace!(?rect, depth, detail, "split");
        let Quad([[ul, ur], [bl, br]]) = rect.quadrants();
        let child = |rect| self.node(rect, depth + 1);
        let ((a, b), (c, d)) = if self.settings.parallel {
            rayon::join(
                || rayon::join(|| child(ul), || child(ur)),
                || rayon::join(|| child(bl), || child(br)),
            )
        } else {
            ((child(ul), child(ur)), (child(bl), child(br)))
        };
        let max_depth = a.1.max(b.1).max(c.1).max(d.1);
        let children = Quad::new(a.0, b.0, c.0, d.0);
        (Node {rect, depth, detail, color, children: Some(Box::new(children))}, max_depth)
    }
}

// ----------------------------------------------------------------------------

/// Sets every pixel of `rect` to `color`.
fn fill_rect(pixels: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    for y in rect.top..rect.bottom {
        for x in rect.left..rect.right {
            pixels.put_pixel(x, y, color);
        }
    }
}

/// Sets the pixels along the inside edge of `rect` to `color`.
fn stroke_rect(pixels: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    if rect.is_empty() { return; }
    let (last_x, last_y) = (rect.right - 1, rect.bottom - 1);
    for x in rect.left..rect.right {
        pixels.put_pixel(x, rect.top, color);
        pixels.put_pixel(x, last_y, color);
    }
    for y in rect.top..rect.bottom {
        pixels.put_pixel(rect.left, y, color);
        pixels.put_pixel(last_x, y, color);
    }
}

// ----------------------------------------------------------------------------
