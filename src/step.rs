use std::fmt::{self, Display};
use std::ops::Range;

use itertools::Itertools;

use crate::edge::Edge;
use crate::point::Point;

/// A half-open run of columns `[start, end)` on one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: isize,
    pub end: isize,
}

impl Span {
    #[inline]
    pub fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    /// The span covering `left..=right`.
    #[inline]
    pub fn inclusive(left: isize, right: isize) -> Self {
        Self::new(left, right + 1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    pub fn columns(&self) -> Range<isize> {
        self.start..self.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end - 1)
    }
}

/// Tag telling a renderer what a [`FillStep`] is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    EdgeTableBuilt,
    IntersectionsCollected,
    IntersectionsSorted,
    ScanlineExamined,
    SpanIdentified,
    SpanFilled,
    SeedPlaced,
    PixelVisited,
    PixelFilled,
    SeedsDiscovered,
}

/// One observable unit of progress of a fill run.
#[derive(Clone, Debug)]
pub enum FillStep {
    EdgeTableBuilt {
        edges: Vec<Edge>,
    },
    /// Every rounded (scanline, x) crossing, in edge order per scanline.
    IntersectionsCollected {
        intersections: Vec<Point>,
    },
    /// The same crossings, sorted by row and then by column.
    IntersectionsSorted {
        intersections: Vec<Point>,
    },
    ScanlineExamined {
        y: isize,
        xs: Vec<isize>,
    },
    SpanIdentified {
        y: isize,
        span: Span,
    },
    /// `pixels` holds only what this step newly filled: boundary pixels and
    /// pixels already filled are left out.
    SpansFilled {
        y: isize,
        spans: Vec<Span>,
        pixels: Vec<Point>,
    },
    SeedPlaced {
        seed: Point,
    },
    PixelPopped {
        pixel: Point,
    },
    /// A popped pixel that turned out to be boundary, off-canvas or already
    /// filled.
    PixelRejected {
        pixel: Point,
    },
    PixelFilled {
        pixel: Point,
    },
    SeedsDiscovered {
        seeds: Vec<Point>,
    },
}

impl FillStep {
    pub fn kind(&self) -> StepKind {
        match self {
            FillStep::EdgeTableBuilt { .. } => StepKind::EdgeTableBuilt,
            FillStep::IntersectionsCollected { .. } => {
                StepKind::IntersectionsCollected
            }
            FillStep::IntersectionsSorted { .. } => {
                StepKind::IntersectionsSorted
            }
            FillStep::ScanlineExamined { .. } => StepKind::ScanlineExamined,
            FillStep::SpanIdentified { .. } => StepKind::SpanIdentified,
            FillStep::SpansFilled { .. } => StepKind::SpanFilled,
            FillStep::SeedPlaced { .. } => StepKind::SeedPlaced,
            FillStep::PixelPopped { .. } | FillStep::PixelRejected { .. } => {
                StepKind::PixelVisited
            }
            FillStep::PixelFilled { .. } => StepKind::PixelFilled,
            FillStep::SeedsDiscovered { .. } => StepKind::SeedsDiscovered,
        }
    }

    /// The pixels this step added to the filled set.
    pub fn filled_pixels(&self) -> &[Point] {
        match self {
            FillStep::SpansFilled { pixels, .. } => pixels.as_slice(),
            FillStep::PixelFilled { pixel } => std::slice::from_ref(pixel),
            _ => &[],
        }
    }

    /// The coordinates a renderer should highlight for this step.
    pub fn highlights(&self) -> Vec<Point> {
        match self {
            FillStep::EdgeTableBuilt { edges } => edges
                .iter()
                .map(|e| Point::new(e.x_at_y_min, e.y_min))
                .collect(),
            FillStep::IntersectionsCollected { intersections }
            | FillStep::IntersectionsSorted { intersections } => {
                intersections.clone()
            }
            FillStep::ScanlineExamined { y, xs } => {
                xs.iter().map(|&x| Point::new(x, *y)).collect()
            }
            FillStep::SpanIdentified { y, span } => {
                span.columns().map(|x| Point::new(x, *y)).collect()
            }
            FillStep::SpansFilled { pixels, .. } => pixels.clone(),
            FillStep::SeedPlaced { seed: pixel }
            | FillStep::PixelPopped { pixel }
            | FillStep::PixelRejected { pixel }
            | FillStep::PixelFilled { pixel } => vec![*pixel],
            FillStep::SeedsDiscovered { seeds } => seeds.clone(),
        }
    }
}

impl Display for FillStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStep::EdgeTableBuilt { edges } => {
                write!(f, "edge table: {} edges", edges.len())
            }
            FillStep::IntersectionsCollected { intersections } => {
                write!(f, "collected {} intersections", intersections.len())
            }
            FillStep::IntersectionsSorted { intersections } => write!(
                f,
                "sorted (y,x): {}",
                intersections
                    .iter()
                    .map(|p| format!("({},{})", p.y, p.x))
                    .join(" ")
            ),
            FillStep::ScanlineExamined { y, xs } => {
                write!(f, "scanline y={y}: X = {xs:?}")
            }
            FillStep::SpanIdentified { y, span } => {
                write!(f, "span {span} on y={y}")
            }
            FillStep::SpansFilled { y, spans, pixels } => write!(
                f,
                "filled {} on y={y} ({} pixels)",
                spans.iter().join(" "),
                pixels.len()
            ),
            FillStep::SeedPlaced { seed } => write!(f, "seed {seed}"),
            FillStep::PixelPopped { pixel } => write!(f, "popped {pixel}"),
            FillStep::PixelRejected { pixel } => {
                write!(f, "skipped {pixel}")
            }
            FillStep::PixelFilled { pixel } => write!(f, "filled {pixel}"),
            FillStep::SeedsDiscovered { seeds } => {
                write!(f, "pushed [{}]", seeds.iter().join(" "))
            }
        }
    }
}
