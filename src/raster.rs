use tracing::debug;

use crate::pixels::PixelSet;
use crate::point::Point;
use crate::polygon::Polygon;

/// The rasterized outline of a polygon. Read-only once built.
pub type BoundaryPixels = PixelSet;

/// Converts a segment into the exact pixels lying on it, endpoints included.
pub trait LineRasterizer {
    fn line(&self, from: Point, to: Point) -> Vec<Point>;

    /// Rasterize every edge of `polygon`, including the closing one.
    fn boundary(&self, polygon: &Polygon) -> BoundaryPixels {
        let boundary: BoundaryPixels = polygon
            .segments()
            .flat_map(|(from, to)| self.line(from, to))
            .collect();
        debug!(
            "rasterized {} edges into {} boundary pixels",
            polygon.vertices().len(),
            boundary.len()
        );
        boundary
    }
}

/// Integer Bresenham line walk, valid in all octants.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bresenham;

impl LineRasterizer for Bresenham {
    fn line(&self, from: Point, to: Point) -> Vec<Point> {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (from.x, from.y);

        let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);
        loop {
            points.push(Point::new(x, y));
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(isize, isize)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let b = Bresenham;
        assert_eq!(
            b.line(Point::new(0, 0), Point::new(3, 0)),
            pts(&[(0, 0), (1, 0), (2, 0), (3, 0)])
        );
        assert_eq!(
            b.line(Point::new(2, 3), Point::new(2, 1)),
            pts(&[(2, 3), (2, 2), (2, 1)])
        );
    }

    #[test]
    fn steep_line_walks_every_row() {
        let line = Bresenham.line(Point::new(6, 0), Point::new(3, 6));
        assert_eq!(
            line,
            pts(&[(6, 0), (6, 1), (5, 2), (5, 3), (4, 4), (4, 5), (3, 6)])
        );
    }

    #[test]
    fn single_point_line() {
        assert_eq!(
            Bresenham.line(Point::new(5, 5), Point::new(5, 5)),
            pts(&[(5, 5)])
        );
    }

    #[test]
    fn square_boundary() {
        let square =
            Polygon::try_from(vec![(0, 0), (4, 0), (4, 4), (0, 4)]).unwrap();
        let boundary = Bresenham.boundary(&square);
        assert_eq!(boundary.len(), 16);
        assert!(boundary.contains(Point::new(4, 2)));
        assert!(!boundary.contains(Point::new(2, 2)));
    }
}
