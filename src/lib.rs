pub mod active;
pub mod ael;
pub mod canvas;
pub mod config;
pub mod debug;
pub mod edge;
pub mod edge_table;
pub mod error;
pub mod ordered;
pub mod pixels;
pub mod point;
pub mod polygon;
pub mod raster;
pub mod seed;
pub mod span_seed;
pub mod step;
pub mod stepper;

pub use canvas::Canvas;
pub use config::FillConfig;
pub use error::FillErr;
pub use pixels::PixelSet;
pub use point::Point;
pub use polygon::Polygon;
pub use raster::{BoundaryPixels, Bresenham, LineRasterizer};
pub use step::{FillStep, Span, StepKind};
pub use stepper::{Advanced, Algorithm, Filler, StepSink, Stepper};

/// Rasterize the outline of `polygon` with Bresenham lines and fill it in
/// one go.
pub fn fill(
    algorithm: Algorithm,
    polygon: &Polygon,
    seed: Option<Point>,
    config: &FillConfig,
) -> Result<PixelSet, FillErr> {
    let boundary = Bresenham.boundary(polygon);
    Ok(Stepper::new(algorithm, polygon, &boundary, seed, config)?.run_to_completion())
}
