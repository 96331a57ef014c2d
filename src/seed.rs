use tracing::debug;

use crate::canvas::FillCanvas;
use crate::pixels::PixelSet;
use crate::point::Point;
use crate::step::FillStep;
use crate::stepper::Filler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Place,
    Pop,
    Check(Point),
    Neighbors(Point),
    Done,
}

/// 4-connected flood fill driven by a stack of single pixels.
pub struct SimpleSeedFill {
    seed: Point,
    stack: Vec<Point>,
    /// Mirrors `stack` for constant-time duplicate checks.
    queued: PixelSet,
    phase: Phase,
}

impl SimpleSeedFill {
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
}

impl Filler for SimpleSeedFill {
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
                self.phase = Phase::Check(pixel);
                Some(FillStep::PixelPopped { pixel })
            }
            Phase::Check(pixel) => {
                if canvas.fill(pixel) {
                    self.phase = Phase::Neighbors(pixel);
                    Some(FillStep::PixelFilled { pixel })
                } else {
                    debug!("{} is boundary, off-canvas or filled", pixel);
                    self.phase = self.pop_or_done();
                    Some(FillStep::PixelRejected { pixel })
                }
            }
            Phase::Neighbors(pixel) => {
                let mut seeds = Vec::with_capacity(4);
                for neighbor in pixel.neighbors() {
                    if canvas.is_fillable(neighbor) && self.queued.insert(neighbor) {
                        self.stack.push(neighbor);
                        seeds.push(neighbor);
                    }
                }
                debug!("pushed {:?}, stack depth {}", seeds, self.stack.len());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::pixels::PixelSet;
    use crate::polygon::Polygon;
    use crate::raster::{Bresenham, LineRasterizer};
    use crate::step::StepKind;

    fn run(raw: Vec<(isize, isize)>, seed: Point) -> (Vec<FillStep>, PixelSet) {
        let polygon = Polygon::try_from(raw).unwrap();
        let boundary = Bresenham.boundary(&polygon);
        let mut filler = SimpleSeedFill::new(seed);
        let mut canvas = FillCanvas::new(Canvas::new(32, 32), &boundary);
        let mut steps = Vec::new();
        while let Some(step) = filler.step(&mut canvas) {
            steps.push(step);
        }
        (steps, canvas.into_filled())
    }

    #[test]
    fn square_interior() {
        let (steps, filled) =
            run(vec![(0, 0), (4, 0), (4, 4), (0, 4)], Point::new(2, 2));
        assert_eq!(filled.len(), 9);
        for y in 1..=3 {
            assert_eq!(filled.row(y), vec![1, 2, 3]);
        }
        assert_eq!(steps[0].kind(), StepKind::SeedPlaced);
        assert_eq!(
            steps.iter().filter(|s| s.kind() == StepKind::PixelFilled).count(),
            9
        );
    }

    #[test]
    fn first_pixel_pushes_every_open_neighbor() {
        let (steps, _) =
            run(vec![(0, 0), (4, 0), (4, 4), (0, 4)], Point::new(2, 2));
        assert!(matches!(steps[1], FillStep::PixelPopped { pixel } if pixel == Point::new(2, 2)));
        assert!(matches!(steps[2], FillStep::PixelFilled { .. }));
        let FillStep::SeedsDiscovered { seeds } = &steps[3] else {
            panic!("expected pushed neighbours, got {:?}", steps[3]);
        };
        assert_eq!(
            seeds,
            &vec![
                Point::new(2, 1),
                Point::new(2, 3),
                Point::new(1, 2),
                Point::new(3, 2)
            ]
        );
    }

    #[test]
    fn single_pixel_pocket() {
        let (steps, filled) =
            run(vec![(0, 0), (2, 0), (2, 2), (0, 2)], Point::new(1, 1));
        assert_eq!(filled.sorted(), vec![Point::new(1, 1)]);
        let kinds: Vec<_> = steps.iter().map(FillStep::kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::SeedPlaced,
                StepKind::PixelVisited,
                StepKind::PixelFilled,
                StepKind::SeedsDiscovered,
            ]
        );
    }

    #[test]
    fn stack_never_holds_a_pixel_twice() {
        let polygon = Polygon::try_from(vec![(0, 0), (8, 0), (8, 4), (4, 4), (4, 8), (0, 8)]).unwrap();
        let boundary = Bresenham.boundary(&polygon);
        let mut filler = SimpleSeedFill::new(Point::new(2, 2));
        let mut canvas = FillCanvas::new(Canvas::new(16, 16), &boundary);
        while filler.step(&mut canvas).is_some() {
            assert_eq!(filler.queued.len(), filler.stack.len());
            assert!(filler.stack.iter().all(|&p| filler.queued.contains(p)));
        }
        assert!(filler.queued.is_empty());
    }
}
