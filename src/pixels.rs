use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

use crate::point::Point;

/// A set of pixel coordinates.
///
/// Used both for the rasterized polygon outline and for the pixels written by
/// a fill run.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PixelSet {
    pixels: HashSet<Point>,
}

impl PixelSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.pixels.contains(&p)
    }

    /// Returns `true` if `p` was not already present.
    #[inline]
    pub fn insert(&mut self, p: Point) -> bool {
        self.pixels.insert(p)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns `true` if `p` was present.
    #[inline]
    pub fn remove(&mut self, p: Point) -> bool {
        self.pixels.remove(&p)
    }

    /// All pixels in scanline order.
    pub fn sorted(&self) -> Vec<Point> {
        self.pixels.iter().copied().sorted().collect()
    }

    pub fn is_disjoint(&self, other: &PixelSet) -> bool {
        self.pixels.is_disjoint(&other.pixels)
    }

    /// Pixels of `self` that are not in `other`.
    pub fn difference(&self, other: &PixelSet) -> PixelSet {
        self.pixels.difference(&other.pixels).copied().collect()
    }

    /// Pixels on row `y`, sorted by column.
    pub fn row(&self, y: isize) -> Vec<isize> {
        self.pixels
            .iter()
            .filter(|p| p.y == y)
            .map(|p| p.x)
            .sorted()
            .collect()
    }
}

impl FromIterator<Point> for PixelSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            pixels: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for PixelSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.pixels.extend(iter);
    }
}

impl fmt::Debug for PixelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelSet[{}]{{{}}}", self.len(), self.sorted().iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_novelty() {
        let mut set = PixelSet::new();
        assert!(set.insert(Point::new(1, 1)));
        assert!(!set.insert(Point::new(1, 1)));
        assert_eq!(set.len(), 1);
        assert!(set.remove(Point::new(1, 1)));
        assert!(!set.remove(Point::new(1, 1)));
        assert!(set.is_empty());
    }

    #[test]
    fn row_is_sorted_by_column() {
        let set: PixelSet = [(4, 2), (1, 2), (3, 3), (2, 2)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(set.row(2), vec![1, 2, 4]);
        assert!(set.row(7).is_empty());
    }
}
