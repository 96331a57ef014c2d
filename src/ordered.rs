use std::collections::VecDeque;
use std::mem;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::canvas::FillCanvas;
use crate::edge::Intercept;
use crate::edge_table::EdgeTable;
use crate::point::Point;
use crate::step::FillStep;
use crate::stepper::Filler;

enum Phase {
    Announce,
    Collect,
    Sort,
    NextRow,
    Spans { y: isize, xs: Vec<Intercept>, pair: usize },
    Done,
}

/// Scanline fill over a globally sorted list of edge crossings.
///
/// All crossings of all scanlines are computed up front, sorted by row and
/// then column, and only then grouped into rows and paired into spans.
pub struct OrderedEdgeListFill {
    table: EdgeTable,
    intersections: Vec<(isize, Intercept)>,
    rows: VecDeque<(isize, Vec<Intercept>)>,
    phase: Phase,
}

impl OrderedEdgeListFill {
    pub fn new(table: EdgeTable) -> Self {
        Self {
            table,
            intersections: Vec::new(),
            rows: VecDeque::new(),
            phase: Phase::Announce,
        }
    }

    fn collect_intersections(&self) -> Vec<(isize, Intercept)> {
        let mut intersections = Vec::with_capacity(2 * self.table.len());
        for y in self.table.scanline_range() {
            let row = self
                .table
                .edges()
                .filter(|edge| edge.contains_scanline(y))
                .map(|edge| (y, edge.x_at(y)));
            intersections.extend(row);
        }
        intersections
    }

    /// Rows of an already sorted intersection list.
    fn group_rows(
        intersections: &[(isize, Intercept)],
    ) -> VecDeque<(isize, Vec<Intercept>)> {
        let mut rows = VecDeque::new();
        for (y, group) in &intersections.iter().group_by(|(y, _)| *y) {
            rows.push_back((y, group.map(|&(_, x)| x).collect()));
        }
        rows
    }

    fn rounded(intersections: &[(isize, Intercept)]) -> Vec<Point> {
        intersections
            .iter()
            .map(|&(y, x)| Point::new(x.round(), y))
            .collect()
    }

    /// Skip over states that would not produce a step.
    fn settle(&mut self) {
        loop {
            let next = match &self.phase {
                Phase::Spans { xs, pair, .. } if 2 * pair + 1 >= xs.len() => {
                    Phase::NextRow
                }
                Phase::NextRow if self.rows.is_empty() => Phase::Done,
                _ => return,
            };
            self.phase = next;
        }
    }
}

impl Filler for OrderedEdgeListFill {
    fn step(&mut self, canvas: &mut FillCanvas<'_>) -> Option<FillStep> {
        let step = match mem::replace(&mut self.phase, Phase::Done) {
            Phase::Announce => {
                self.phase = Phase::Collect;
                FillStep::EdgeTableBuilt {
                    edges: self.table.edges().copied().collect(),
                }
            }
            Phase::Collect => {
                self.intersections = self.collect_intersections();
                debug!("{} raw intersections", self.intersections.len());
                self.phase = Phase::Sort;
                FillStep::IntersectionsCollected {
                    intersections: Self::rounded(&self.intersections),
                }
            }
            Phase::Sort => {
                self.intersections.sort();
                self.rows = Self::group_rows(&self.intersections);
                self.phase = Phase::NextRow;
                FillStep::IntersectionsSorted {
                    intersections: Self::rounded(&mem::take(&mut self.intersections)),
                }
            }
            Phase::NextRow => {
                let (y, crossings) = self.rows.pop_front()?;
                let xs: Vec<isize> = crossings.iter().map(Intercept::round).collect();
                if xs.len() % 2 == 1 {
                    warn!(
                        "scanline y={} has an odd number of intersections {:?}; \
                        dropping the last one",
                        y, xs
                    );
                }
                self.phase = Phase::Spans {
                    y,
                    xs: crossings,
                    pair: 0,
                };
                FillStep::ScanlineExamined { y, xs }
            }
            Phase::Spans { y, xs, pair } => {
                let span = canvas.interior_span(y, xs[2 * pair], xs[2 * pair + 1]);
                let pixels = canvas.fill_span(y, span);
                debug!("fill span {} on y={}", span, y);
                self.phase = Phase::Spans { y, xs, pair: pair + 1 };
                FillStep::SpansFilled {
                    y,
                    spans: vec![span],
                    pixels,
                }
            }
            Phase::Done => return None,
        };
        self.settle();
        Some(step)
    }

    fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::raster::{Bresenham, LineRasterizer};
    use crate::polygon::Polygon;
    use crate::step::{Span, StepKind};

    fn run(raw: Vec<(isize, isize)>) -> (Vec<FillStep>, crate::pixels::PixelSet) {
        let polygon = Polygon::try_from(raw).unwrap();
        let boundary = Bresenham.boundary(&polygon);
        let table = EdgeTable::from_vertices(polygon.vertices()).unwrap();
        let mut filler = OrderedEdgeListFill::new(table);
        let mut canvas = FillCanvas::new(Canvas::new(32, 32), &boundary);
        let mut steps = Vec::new();
        while let Some(step) = filler.step(&mut canvas) {
            steps.push(step);
        }
        assert!(filler.is_finished());
        (steps, canvas.into_filled())
    }

    #[test]
    fn square_step_sequence() {
        let (steps, filled) = run(vec![(0, 0), (4, 0), (4, 4), (0, 4)]);
        let kinds: Vec<_> = steps.iter().map(FillStep::kind).collect();
        let mut expected = vec![
            StepKind::EdgeTableBuilt,
            StepKind::IntersectionsCollected,
            StepKind::IntersectionsSorted,
        ];
        for _ in 0..4 {
            expected.push(StepKind::ScanlineExamined);
            expected.push(StepKind::SpanFilled);
        }
        assert_eq!(kinds, expected);

        for y in 1..=3 {
            assert_eq!(filled.row(y), vec![1, 2, 3]);
        }
        assert!(filled.row(0).is_empty());
        assert_eq!(filled.len(), 9);
    }

    #[test]
    fn sorted_intersections_are_by_row_then_column() {
        let (steps, _) = run(vec![(0, 0), (8, 0), (8, 4), (4, 4), (4, 8), (0, 8)]);
        let FillStep::IntersectionsSorted { intersections } = &steps[2] else {
            panic!("third step should be the sorted list, got {:?}", steps[2]);
        };
        assert!(intersections.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(intersections.len(), 16);
    }

    #[test]
    fn one_span_per_pair_on_a_concave_row() {
        // A "U" shape: rows 0..3 cross four edges.
        let (steps, filled) = run(vec![
            (0, 0),
            (3, 0),
            (3, 4),
            (6, 4),
            (6, 0),
            (9, 0),
            (9, 8),
            (0, 8),
        ]);
        let row_one: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                FillStep::SpansFilled { y: 1, spans, .. } => Some(spans[0]),
                _ => None,
            })
            .collect();
        assert_eq!(row_one, vec![Span::new(1, 3), Span::new(7, 9)]);
        assert_eq!(filled.row(1), vec![1, 2, 7, 8]);
        assert_eq!(filled.row(5), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn odd_crossing_count_fills_complete_pairs_only() {
        let polygon = Polygon::try_from(vec![(0, 0), (4, 0), (4, 4), (0, 4)]).unwrap();
        let boundary = Bresenham.boundary(&polygon);
        let table = EdgeTable::from_vertices(polygon.vertices()).unwrap();
        let mut filler = OrderedEdgeListFill::new(table);
        let mut canvas = FillCanvas::new(Canvas::new(10, 10), &boundary);

        let xs = [0, 4, 7].map(Intercept::whole).to_vec();
        filler.rows = VecDeque::from([(2, xs)]);
        filler.phase = Phase::NextRow;

        let examined = filler.step(&mut canvas).unwrap();
        assert!(matches!(examined, FillStep::ScanlineExamined { y: 2, ref xs } if xs == &[0, 4, 7]));
        let fill = filler.step(&mut canvas).unwrap();
        assert_eq!(fill.filled_pixels().len(), 3);
        assert!(filler.is_finished());
        assert!(filler.step(&mut canvas).is_none());
        assert_eq!(canvas.filled().row(2), vec![1, 2, 3]);
    }
}
