/// Errors reported when a `Quadtree` cannot be built from its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The source image has no pixels.
    #[error("empty image: {width}x{height} has no pixels")]
    EmptyImage { width: u32, height: u32 },

    /// A region passed to the builder is degenerate or does not fit inside
    /// the image.
    #[error("invalid region {rect:?} for a {width}x{height} image")]
    InvalidRegion { rect: Rect, width: u32, height: u32 },
}

// ----------------------------------------------------------------------------

/// A general `Result` type.
pub type Result<T=()> = std::result::Result<T, Box<dyn std::error::Error>>;

// ----------------------------------------------------------------------------

/// The `Index` type of a 2x2 grid. The coordinates are listed in the order
/// `(row, column)`, i.e. y-coordinate first.
pub type Small = (bool, bool);

// ----------------------------------------------------------------------------

pub mod io;

mod quad;
pub use quad::{Quad, Rect};

pub mod region;
pub use region::{Region, ColorHistogram, average_color, detail};

mod tree;
pub use tree::{Frame, Node, Quadtree, Settings, DETAIL_THRESHOLD};
