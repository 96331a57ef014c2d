use crate::edge::Intercept;
use crate::pixels::PixelSet;
use crate::point::Point;
use crate::raster::BoundaryPixels;
use crate::step::Span;

/// Drawable area: columns `0..width`, rows `0..height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: isize,
    pub height: isize,
}

impl Canvas {
    #[inline]
    pub const fn new(width: isize, height: isize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    #[inline]
    pub fn contains_row(&self, y: isize) -> bool {
        (0..self.height).contains(&y)
    }
}

/// What a filler reads and writes: the read-only outline and the filled set
/// owned by the current run.
#[derive(Debug)]
pub struct FillCanvas<'a> {
    bounds: Canvas,
    boundary: &'a BoundaryPixels,
    filled: PixelSet,
}

impl<'a> FillCanvas<'a> {
    pub fn new(bounds: Canvas, boundary: &'a BoundaryPixels) -> Self {
        Self {
            bounds,
            boundary,
            filled: PixelSet::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Canvas {
        self.bounds
    }

    #[inline]
    pub fn filled(&self) -> &PixelSet {
        &self.filled
    }

    pub fn into_filled(self) -> PixelSet {
        self.filled
    }

    /// In bounds, not on the outline and not yet filled.
    #[inline]
    pub fn is_fillable(&self, p: Point) -> bool {
        self.bounds.contains(p)
            && !self.boundary.contains(p)
            && !self.filled.contains(p)
    }

    /// Fill `p` if it is fillable. Returns whether it was newly filled.
    #[inline]
    pub fn fill(&mut self, p: Point) -> bool {
        self.is_fillable(p) && self.filled.insert(p)
    }

    /// The columns strictly between the outline runs that bracket the crossings
    /// `left` and `right` on row `y`.
    ///
    /// Rounded crossings can land a column outside the rasterized outline, or a
    /// column short of it; the fill runs from the end of the outline run at
    /// `left` up to the start of the outline run at `right`.
    pub fn interior_span(&self, y: isize, left: Intercept, right: Intercept) -> Span {
        let start = match self.outline_near(y, left) {
            Some(mut x) => {
                while self.boundary.contains(Point::new(x, y)) {
                    x += 1;
                }
                x
            }
            None => left.round(),
        };
        let end = match self.outline_near(y, right) {
            Some(mut x) => {
                while self.boundary.contains(Point::new(x - 1, y)) {
                    x -= 1;
                }
                x
            }
            None => right.round(),
        };
        Span::new(start, end)
    }

    /// Outline column on row `y` at most one column from the crossing `c`,
    /// preferring the rounded column, then the side `c` leans towards.
    fn outline_near(&self, y: isize, c: Intercept) -> Option<isize> {
        let x = c.round();
        let toward = if c > Intercept::whole(x) { 1 } else { -1 };
        [x, x + toward, x - toward]
            .into_iter()
            .find(|&column| self.boundary.contains(Point::new(column, y)))
    }

    /// Fill the columns of `span` on row `y`, returning the pixels that were
    /// newly filled.
    pub fn fill_span(&mut self, y: isize, span: Span) -> Vec<Point> {
        span.columns()
            .map(|x| Point::new(x, y))
            .filter(|&p| self.fill(p))
            .collect()
    }
}
