use std::collections::BTreeMap;
use std::ops::{Index, Range};

use id_arena::Arena;
use tracing::debug;

use crate::edge::{Edge, EdgeId};
use crate::error::FillErr;
use crate::point::Point;

/// The non-horizontal edges of a polygon, bucketed by the scanline on which
/// they become active.
pub struct EdgeTable {
    edges: Arena<Edge>,
    buckets: BTreeMap<isize, Vec<EdgeId>>,
    scanlines: Range<isize>,
}

impl Index<EdgeId> for EdgeTable {
    type Output = Edge;

    fn index(&self, id: EdgeId) -> &Self::Output {
        &self.edges[id]
    }
}

impl EdgeTable {
    /// Build the table from an implicitly closed vertex list.
    ///
    /// Horizontal and zero-length edges never change scanline parity and are
    /// left out.
    pub fn from_vertices(vertices: &[Point]) -> Result<Self, FillErr> {
        let n = vertices.len();
        if n < 3 {
            return Err(FillErr::NotEnoughVertices { found: n });
        }

        let mut edges: Arena<Edge> = Arena::with_capacity(n);
        let mut buckets: BTreeMap<isize, Vec<EdgeId>> = BTreeMap::new();
        for i in 0..n {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            if let Some(edge) = Edge::between(edges.next_id(), a, b) {
                let id = edges.alloc(edge);
                buckets.entry(edge.y_min).or_default().push(id);
            }
        }

        let first = edges.iter().next().map(|(_, e)| *e);
        let Some(first) = first else {
            return Err(FillErr::AllEdgesHorizontal);
        };
        let scanlines = edges.iter().fold(
            first.y_min..first.y_max,
            |range, (_, e)| range.start.min(e.y_min)..range.end.max(e.y_max),
        );

        debug!(
            "edge table: {} of {} edges kept, scanlines {:?}",
            edges.len(),
            n,
            scanlines
        );

        Ok(Self {
            edges,
            buckets,
            scanlines,
        })
    }

    /// Edges in polygon order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().map(|(_, e)| e)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.len() == 0
    }

    /// Edges whose `y_min` equals `y`, in polygon order.
    pub fn bucket(&self, y: isize) -> &[EdgeId] {
        self.buckets.get(&y).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> &BTreeMap<isize, Vec<EdgeId>> {
        &self.buckets
    }

    /// `[min(y_min), max(y_max))`.
    #[inline]
    pub fn scanline_range(&self) -> Range<isize> {
        self.scanlines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::InverseSlope;

    fn vertices(raw: &[(isize, isize)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn two_vertices_fail() {
        let result = EdgeTable::from_vertices(&vertices(&[(0, 0), (4, 4)]));
        assert_eq!(
            result.err(),
            Some(FillErr::NotEnoughVertices { found: 2 })
        );
    }

    #[test]
    fn all_horizontal_fails() {
        let result =
            EdgeTable::from_vertices(&vertices(&[(0, 2), (4, 2), (9, 2)]));
        assert_eq!(result.err(), Some(FillErr::AllEdgesHorizontal));
    }

    #[test]
    fn square_keeps_vertical_edges_only() {
        let table = EdgeTable::from_vertices(&vertices(&[
            (0, 0),
            (4, 0),
            (4, 4),
            (0, 4),
        ]))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table
            .edges()
            .all(|e| e.inverse_slope == InverseSlope::Vertical));
        assert_eq!(table.scanline_range(), 0..4);
        assert_eq!(table.bucket(0).len(), 2);
        assert!(table.bucket(1).is_empty());
    }

    #[test]
    fn duplicate_vertices_are_filtered() {
        let table = EdgeTable::from_vertices(&vertices(&[
            (0, 0),
            (0, 0),
            (6, 0),
            (3, 6),
            (3, 6),
        ]))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.scanline_range(), 0..6);
    }

    #[test]
    fn buckets_follow_y_min() {
        let table = EdgeTable::from_vertices(&vertices(&[
            (0, 2),
            (5, 0),
            (8, 6),
            (2, 9),
        ]))
        .unwrap();
        assert_eq!(table.scanline_range(), 0..9);
        let keys: Vec<_> = table.buckets().keys().copied().collect();
        assert_eq!(keys, vec![0, 2, 6]);
        for (&y, ids) in table.buckets() {
            assert!(ids.iter().all(|&id| table[id].y_min == y));
        }
    }
}
