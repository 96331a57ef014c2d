use tracing::debug;

use crate::canvas::FillCanvas;
use crate::pixels::PixelSet;
use crate::point::Point;
use crate::step::{FillStep, Span};
use crate::stepper::Filler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Place,
    Pop,
    Extend(Point),
    Fill { y: isize, span: Span },
    Discover { y: isize, span: Span },
    Done,
}

/// Seed fill that works a row span at a time.
///
/// Each popped seed grows into the maximal fillable span on its row. The rows
/// directly above and below are then scanned within that span, and the
/// rightmost pixel of every fillable run found there becomes a new seed.
pub struct ScanlineSeedFill {
    seed: Point,
    stack: Vec<Point>,
    /// Mirrors `stack` for constant-time duplicate checks.
    queued: PixelSet,
    phase: Phase,
}

impl ScanlineSeedFill {
    /// `seed` must already be validated against the canvas and the boundary.
    pub fn new(seed: Point) -> Self {
        Self {
            seed,
            stack: Vec::new(),
            queued: PixelSet::new(),
            phase: Phase::Place,
        }
    }

    fn pop_or_done(&self) -> Phase {
        if self.stack.is_empty() {
            Phase::Done
        } else {
            Phase::Pop
        }
    }

    fn extend(canvas: &FillCanvas<'_>, from: Point) -> Span {
        let (mut left, mut right) = (from.x, from.x);
        while canvas.is_fillable(Point::new(left - 1, from.y)) {
            left -= 1;
        }
        while canvas.is_fillable(Point::new(right + 1, from.y)) {
            right += 1;
        }
        Span::inclusive(left, right)
    }

    /// Push the rightmost pixel of each fillable run of row `y` inside `span`.
    fn discover_row(
        &mut self,
        canvas: &FillCanvas<'_>,
        y: isize,
        span: Span,
        seeds: &mut Vec<Point>,
    ) {
        let mut x = span.start;
        while x < span.end {
            while x < span.end && !canvas.is_fillable(Point::new(x, y)) {
                x += 1;
            }
            if x == span.end {
                break;
            }
            while x + 1 < span.end && canvas.is_fillable(Point::new(x + 1, y)) {
                x += 1;
            }
            let candidate = Point::new(x, y);
            if self.queued.insert(candidate) {
                self.stack.push(candidate);
                seeds.push(candidate);
            }
            x += 1;
        }
    }
}

impl Filler for ScanlineSeedFill {
    fn step(&mut self, canvas: &mut FillCanvas<'_>) -> Option<FillStep> {
        match self.phase {
            Phase::Place => {
                self.stack.push(self.seed);
                self.queued.insert(self.seed);
                self.phase = Phase::Pop;
                Some(FillStep::SeedPlaced { seed: self.seed })
            }
            Phase::Pop => {
                let pixel = self.stack.pop()?;
                self.queued.remove(pixel);
                self.phase = Phase::Extend(pixel);
                Some(FillStep::PixelPopped { pixel })
            }
            Phase::Extend(pixel) => {
                if !canvas.is_fillable(pixel) {
                    debug!("seed {} was already covered", pixel);
                    self.phase = self.pop_or_done();
                    return Some(FillStep::PixelRejected { pixel });
                }
                let span = Self::extend(canvas, pixel);
                self.phase = Phase::Fill { y: pixel.y, span };
                Some(FillStep::SpanIdentified { y: pixel.y, span })
            }
            Phase::Fill { y, span } => {
                let pixels = canvas.fill_span(y, span);
                self.phase = Phase::Discover { y, span };
                Some(FillStep::SpansFilled {
                    y,
                    spans: vec![span],
                    pixels,
                })
            }
            Phase::Discover { y, span } => {
                let mut seeds = Vec::new();
                for row in [y - 1, y + 1] {
                    if canvas.bounds().contains_row(row) {
                        self.discover_row(canvas, row, span, &mut seeds);
                    }
                }
                debug!("new seeds {:?}, stack depth {}", seeds, self.stack.len());
                self.phase = self.pop_or_done();
                Some(FillStep::SeedsDiscovered { seeds })
            }
            Phase::Done => None,
        }
    }

    fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }
}
