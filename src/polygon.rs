use crate::error::FillErr;
use crate::point::Point;

/// An implicitly closed polygon: the last vertex connects back to the first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self, FillErr> {
        if vertices.len() < 3 {
            return Err(FillErr::NotEnoughVertices {
                found: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Consecutive vertex pairs, including the closing `last -> first` pair.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl TryFrom<Vec<(isize, isize)>> for Polygon {
    type Error = FillErr;

    fn try_from(points: Vec<(isize, isize)>) -> Result<Self, Self::Error> {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}
