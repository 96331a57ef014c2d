use std::{error::Error, fmt::Display};

use crate::point::Point;
use crate::stepper::Algorithm;

/// Validation failures. All of them are detected before a fill run takes its
/// first step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillErr {
    NotEnoughVertices { found: usize },
    /// Every edge of the polygon is horizontal (or zero-length).
    AllEdgesHorizontal,
    VertexOutOfBounds(Point),
    SeedOnBoundary(Point),
    SeedOutOfBounds(Point),
    MissingSeed(Algorithm),
    UnknownAlgorithm,
}

impl Display for FillErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillErr::NotEnoughVertices { found } => {
                write!(f, "a polygon needs at least 3 vertices, got {found}")
            }
            FillErr::AllEdgesHorizontal => {
                write!(f, "no non-horizontal edges found")
            }
            FillErr::VertexOutOfBounds(p) => {
                write!(f, "vertex {p} lies outside the canvas")
            }
            FillErr::SeedOnBoundary(p) => {
                write!(f, "seed point {p} is on the boundary")
            }
            FillErr::SeedOutOfBounds(p) => {
                write!(f, "seed point {p} is outside the canvas")
            }
            FillErr::MissingSeed(algorithm) => {
                write!(f, "{algorithm} needs a seed point")
            }
            FillErr::UnknownAlgorithm => write!(f, "unknown fill algorithm"),
        }
    }
}

impl Error for FillErr {}
