use std::ops::Range;

use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::active::ActiveEdges;
use crate::canvas::FillCanvas;
use crate::edge_table::EdgeTable;
use crate::step::{FillStep, Span};
use crate::stepper::Filler;
use crate::{dbg_active_edges, dbg_edge_table};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Announce,
    Scan(isize),
    Fill(isize),
    Done,
}

/// Scanline fill with an incrementally maintained active edge list.
///
/// Per scanline: purge expired edges, add edges starting here, sort by the
/// running intersection, fill pairs, then step every intersection down one
/// row.
pub struct ActiveEdgeListFill {
    table: EdgeTable,
    active: ActiveEdges,
    scanlines: Range<isize>,
    phase: Phase,
}

impl ActiveEdgeListFill {
    pub fn new(table: EdgeTable) -> Self {
        let scanlines = table.scanline_range();
        let active = ActiveEdges::with_capacity(table.len());
        Self {
            table,
            active,
            scanlines,
            phase: Phase::Announce,
        }
    }

    /// Scanline `y`, or `Done` past the last one.
    fn scan(&self, y: isize) -> Phase {
        if self.scanlines.contains(&y) {
            Phase::Scan(y)
        } else {
            Phase::Done
        }
    }
}

impl Filler for ActiveEdgeListFill {
    fn step(&mut self, canvas: &mut FillCanvas<'_>) -> Option<FillStep> {
        match self.phase {
            Phase::Announce => {
                debug!("{:?}", dbg_edge_table!(&self.table));
                self.phase = self.scan(self.scanlines.start);
                Some(FillStep::EdgeTableBuilt {
                    edges: self.table.edges().copied().collect(),
                })
            }
            Phase::Scan(y) => {
                let purged = self.active.purge_expired(y);
                let added = self.active.insert_bucket(&self.table, y);
                trace!(
                    "scanline y={}: purged {}, added {}, {} active",
                    y,
                    purged,
                    added,
                    self.active.len()
                );
                if self.active.is_empty() {
                    self.phase = self.scan(y + 1);
                    return Some(FillStep::ScanlineExamined { y, xs: Vec::new() });
                }
                self.active.sort();
                trace!("sorted AEL: {:?}", dbg_active_edges!(&self.active));
                self.phase = Phase::Fill(y);
                Some(FillStep::ScanlineExamined {
                    y,
                    xs: self.active.xs(),
                })
            }
            Phase::Fill(y) => {
                let crossings = self.active.crossings();
                if crossings.len() % 2 == 1 {
                    warn!(
                        "scanline y={} has an odd number of active edges {:?}; \
                        dropping the last one",
                        y,
                        self.active.xs()
                    );
                }
                let spans: Vec<Span> = crossings
                    .chunks_exact(2)
                    .map(|pair| canvas.interior_span(y, pair[0], pair[1]))
                    .collect();
                let pixels = spans
                    .iter()
                    .flat_map(|&span| canvas.fill_span(y, span))
                    .collect();
                debug!("fill {} on y={}", spans.iter().join(" "), y);

                self.active.advance();
                self.phase = self.scan(y + 1);
                Some(FillStep::SpansFilled { y, spans, pixels })
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

    fn run(raw: Vec<(isize, isize)>) -> (Vec<FillStep>, PixelSet) {
        let polygon = Polygon::try_from(raw).unwrap();
        let boundary = Bresenham.boundary(&polygon);
        let table = EdgeTable::from_vertices(polygon.vertices()).unwrap();
        let mut filler = ActiveEdgeListFill::new(table);
        let mut canvas = FillCanvas::new(Canvas::new(32, 32), &boundary);
        let mut steps = Vec::new();
        while let Some(step) = filler.step(&mut canvas) {
            steps.push(step);
        }
        assert!(filler.is_finished());
        (steps, canvas.into_filled())
    }

    #[test]
    fn square_fills_interior_rows() {
        let (steps, filled) = run(vec![(0, 0), (4, 0), (4, 4), (0, 4)]);
        for y in 1..=3 {
            assert_eq!(filled.row(y), vec![1, 2, 3], "row {y}");
        }
        assert_eq!(filled.len(), 9);
        assert_eq!(
            steps.iter().filter(|s| s.kind() == StepKind::SpanFilled).count(),
            4
        );
    }

    #[test]
    fn triangle_rows_use_rounded_crossings() {
        let (steps, _) = run(vec![(0, 0), (6, 0), (3, 6)]);
        let rows: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                FillStep::ScanlineExamined { y, xs } => Some((*y, xs.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, vec![0, 6]),
                (1, vec![0, 6]),
                (2, vec![1, 5]),
                (3, vec![2, 4]),
                (4, vec![2, 4]),
                (5, vec![2, 4]),
            ]
        );
    }

    #[test]
    fn triangle_spans_are_clipped_to_the_outline() {
        let (steps, filled) = run(vec![(0, 0), (6, 0), (3, 6)]);
        assert_eq!(filled.row(1), vec![2, 3, 4, 5]);
        assert_eq!(filled.row(3), vec![3, 4]);
        assert!(filled.row(5).is_empty());
        assert_eq!(filled.len(), 10);
        assert!(steps.iter().any(|s| matches!(
            s,
            FillStep::SpansFilled { y: 1, spans, .. } if spans == &[Span::new(2, 6)]
        )));
    }

    #[test]
    fn offset_rectangle_starts_at_its_top_edge() {
        let (steps, filled) = run(vec![(2, 2), (8, 2), (8, 6), (2, 6)]);
        assert_eq!(steps[0].kind(), StepKind::EdgeTableBuilt);
        assert!(matches!(steps[1], FillStep::ScanlineExamined { y: 2, .. }));
        assert_eq!(filled.row(3), vec![3, 4, 5, 6, 7]);
        assert!(filled.row(6).is_empty());
    }
}
