use crate::edge::{Edge, EdgeId, Intercept, InverseSlope};
use crate::edge_table::EdgeTable;

/// An edge crossing the current scanline, with its running intersection.
#[derive(Clone, Copy, Debug)]
pub struct ActiveEdge {
    pub id: EdgeId,
    pub y_max: isize,
    pub x_current: Intercept,
    pub inverse_slope: InverseSlope,
}

impl From<&Edge> for ActiveEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id,
            y_max: edge.y_max,
            x_current: edge.start(),
            inverse_slope: edge.inverse_slope,
        }
    }
}

impl ActiveEdge {
    #[inline]
    pub fn x(&self) -> isize {
        self.x_current.round()
    }
}

/// The active edge list.
#[derive(Clone, Debug, Default)]
pub struct ActiveEdges {
    edges: Vec<ActiveEdge>,
}

impl ActiveEdges {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn items(&self) -> &[ActiveEdge] {
        &self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Retain those elements which pass `f`, otherwise delete the rest.
    pub fn retain_if<F: FnMut(&ActiveEdge) -> bool>(&mut self, f: F) {
        self.edges.retain(f);
    }

    /// Drop every edge whose lower endpoint is at or above scanline `y`.
    /// Returns how many were removed.
    pub fn purge_expired(&mut self, y: isize) -> usize {
        let before = self.len();
        self.retain_if(|edge| edge.y_max > y);
        before - self.len()
    }

    /// Append the edges that start on scanline `y`. Returns how many were
    /// added.
    pub fn insert_bucket(&mut self, table: &EdgeTable, y: isize) -> usize {
        let bucket = table.bucket(y);
        self.edges
            .extend(bucket.iter().map(|&id| ActiveEdge::from(&table[id])));
        bucket.len()
    }

    /// Stable sort by `x_current`; coincident edges keep insertion order.
    pub fn sort(&mut self) {
        self.edges.sort_by(|a, b| a.x_current.cmp(&b.x_current));
    }

    /// Exact intersections, in list order.
    pub fn crossings(&self) -> Vec<Intercept> {
        self.edges.iter().map(|edge| edge.x_current).collect()
    }

    /// Rounded intersections, in list order.
    pub fn xs(&self) -> Vec<isize> {
        self.edges.iter().map(ActiveEdge::x).collect()
    }

    /// Move every edge to its intersection with the next scanline.
    pub fn advance(&mut self) {
        for edge in self.edges.iter_mut() {
            edge.x_current.step(edge.inverse_slope);
        }
    }
}
