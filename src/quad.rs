use multidimension::{Index, View, impl_ops_for_view};

use super::{Small};

/// A 2x2 grid of `T`s, in the order upper-left, upper-right, bottom-left,
/// bottom-right.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Quad<T>(pub [[T; 2]; 2]);

impl<T> Quad<T> {
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Quad([[a, b], [c, d]])
    }

    /// Borrows the four `T`s and wraps the references in a `Quad`.
    pub fn as_ref(&self) -> Quad<&T> {
        let [[ref a, ref b], [ref c, ref d]] = self.0;
        Quad::new(a, b, c, d)
    }

    /// Iterates over the four `T`s in reading order.
    pub fn elements(&self) -> impl Iterator<Item=&T> {
        self.0.iter().flatten()
    }
}

impl<T> std::ops::Index<Small> for Quad<T> {
    type Output = T;
    fn index(&self, index: Small) -> &Self::Output {
        &self.0[index.0 as usize][index.1 as usize]
    }
}

impl<T> std::ops::IndexMut<Small> for Quad<T> {
    fn index_mut(&mut self, index: Small) -> &mut Self::Output {
        &mut self.0[index.0 as usize][index.1 as usize]
    }
}

impl<T: Clone> View for Quad<T> {
    type I = Small;
    type T = T;
    fn size(&self) -> <Self::I as Index>::Size { ((), ()) }
    fn at(&self, index: Self::I) -> Self::T { self[index].clone() }
}

impl_ops_for_view!(Quad<T: Clone>);

// ----------------------------------------------------------------------------

/// An axis-aligned rectangle of pixels. `right` and `bottom` are exclusive.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Rect {left, top, right, bottom}
    }

    /// The rectangle covering a whole `width` x `height` image.
    pub fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 { self.right.saturating_sub(self.left) }

    pub fn height(&self) -> u32 { self.bottom.saturating_sub(self.top) }

    /// The number of pixels covered.
    pub fn area(&self) -> u64 { self.width() as u64 * self.height() as u64 }

    /// Returns `true` if `self` covers no pixels.
    pub fn is_empty(&self) -> bool { self.area() == 0 }

    /// Returns `true` if `self` lies within a `width` x `height` image.
    pub fn fits_in(&self, width: u32, height: u32) -> bool {
        self.left <= self.right && self.top <= self.bottom &&
        self.right <= width && self.bottom <= height
    }

    /// Returns `true` if pixel `(x, y)` lies inside `self`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }

    /// Splits `self` at its midpoint into four quadrants.
    ///
    /// The midpoint is rounded towards `left` and `top`, so an odd-sized
    /// rectangle gives its extra column and row to the right and bottom
    /// quadrants. A 1-pixel span yields an empty quadrant on one side.
    pub fn quadrants(&self) -> Quad<Rect> {
        let mid_x = self.left + self.width() / 2;
        let mid_y = self.top + self.height() / 2;
        Quad::new(
            Rect::new(self.left, self.top, mid_x, mid_y),
            Rect::new(mid_x, self.top, self.right, mid_y),
            Rect::new(self.left, mid_y, mid_x, self.bottom),
            Rect::new(mid_x, mid_y, self.right, self.bottom),
        )
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_partition() {
        let rect = Rect::new(3, 2, 10, 7);
        let quads = rect.quadrants();
        assert_eq!(quads[(false, false)], Rect::new(3, 2, 6, 4));
        assert_eq!(quads[(false, true)], Rect::new(6, 2, 10, 4));
        assert_eq!(quads[(true, false)], Rect::new(3, 4, 6, 7));
        assert_eq!(quads[(true, true)], Rect::new(6, 4, 10, 7));
        let area: u64 = quads.elements().map(Rect::area).sum();
        assert_eq!(area, rect.area());
    }

    #[test]
    fn single_pixel_split() {
        let quads = Rect::new(4, 4, 5, 5).quadrants();
        let areas: Vec<u64> = quads.elements().map(Rect::area).collect();
        assert_eq!(areas, vec![0, 0, 0, 1]);
        assert!(quads.elements().all(|q| q.fits_in(5, 5)));
    }

    #[test]
    fn view_order() {
        let quad = Quad::new(1, 2, 3, 4);
        let mut seen = Vec::new();
        quad.each(|x| seen.push(x));
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(quad.elements().copied().collect::<Vec<_>>(), seen);
    }
}
