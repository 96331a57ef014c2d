use std::cmp::Ordering;
use std::fmt::{self, Debug};

use id_arena::Id;

use crate::point::Point;

pub type EdgeId = Id<Edge>;

/// Δx/Δy of an edge. Vertical edges carry the "infinite" sentinel instead of a
/// ratio; `dy` is always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InverseSlope {
    Finite { dx: isize, dy: isize },
    Vertical,
}

impl InverseSlope {
    #[inline]
    pub fn between(upper: Point, lower: Point) -> Self {
        if upper.x == lower.x {
            InverseSlope::Vertical
        } else {
            InverseSlope::Finite {
                dx: lower.x - upper.x,
                dy: lower.y - upper.y,
            }
        }
    }

    /// The ratio as a float, `f64::INFINITY` for vertical edges.
    pub fn value(&self) -> f64 {
        match *self {
            InverseSlope::Finite { dx, dy } => dx as f64 / dy as f64,
            InverseSlope::Vertical => f64::INFINITY,
        }
    }
}

/// An exact x coordinate `num / den` along an edge.
///
/// Kept as a fraction over the edge's Δy so that stepping scanline by scanline
/// lands on exactly the value a direct computation would give.
#[derive(Clone, Copy)]
pub struct Intercept {
    num: isize,
    den: isize,
}

impl Intercept {
    #[inline]
    pub fn whole(x: isize) -> Self {
        Self { num: x, den: 1 }
    }

    /// `x0 + dy_rows * slope`.
    pub fn along(x0: isize, slope: InverseSlope, rows: isize) -> Self {
        match slope {
            InverseSlope::Finite { dx, dy } => Self {
                num: x0 * dy + rows * dx,
                den: dy,
            },
            InverseSlope::Vertical => Self::whole(x0),
        }
    }

    /// Move one scanline down the edge.
    #[inline]
    pub fn step(&mut self, slope: InverseSlope) {
        if let InverseSlope::Finite { dx, .. } = slope {
            self.num += dx;
        }
    }

    /// Nearest integer, ties to even.
    pub fn round(&self) -> isize {
        let (q, r) = (self.num.div_euclid(self.den), self.num.rem_euclid(self.den));
        match (2 * r).cmp(&self.den) {
            Ordering::Less => q,
            Ordering::Greater => q + 1,
            Ordering::Equal if q % 2 == 0 => q,
            Ordering::Equal => q + 1,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl PartialEq for Intercept {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Intercept {}

impl PartialOrd for Intercept {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Intercept {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive.
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

impl Debug for Intercept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// A non-horizontal polygon edge, normalized so that `y_min` is the row of the
/// upper endpoint.
#[derive(Clone, Copy)]
pub struct Edge {
    pub id: EdgeId,
    pub y_min: isize,
    pub y_max: isize,
    pub x_at_y_min: isize,
    pub inverse_slope: InverseSlope,
}

impl Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge[{}](y:{}..{}, x0:{}, 1/m:{:.2})",
            self.id.index(),
            self.y_min,
            self.y_max,
            self.x_at_y_min,
            self.inverse_slope.value()
        )
    }
}

impl Edge {
    /// Returns `None` for horizontal (and zero-length) segments.
    pub fn between(id: EdgeId, a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        let (upper, lower) = if a.y < b.y { (a, b) } else { (b, a) };
        Some(Self {
            id,
            y_min: upper.y,
            y_max: lower.y,
            x_at_y_min: upper.x,
            inverse_slope: InverseSlope::between(upper, lower),
        })
    }

    /// Whether scanline `y` crosses this edge. The lower endpoint is excluded.
    #[inline]
    pub fn contains_scanline(&self, y: isize) -> bool {
        (self.y_min <= y) && (y < self.y_max)
    }

    /// Intersection with scanline `y`, computed from scratch.
    #[inline]
    pub fn x_at(&self, y: isize) -> Intercept {
        Intercept::along(self.x_at_y_min, self.inverse_slope, y - self.y_min)
    }

    /// Intersection at the upper endpoint.
    #[inline]
    pub fn start(&self) -> Intercept {
        self.x_at(self.y_min)
    }
}
