use std::fmt::{self, Display};
use std::str::FromStr;

use tracing::info;

use crate::ael::ActiveEdgeListFill;
use crate::canvas::{Canvas, FillCanvas};
use crate::config::FillConfig;
use crate::debug::step_style;
use crate::edge_table::EdgeTable;
use crate::emit_info;
use crate::error::FillErr;
use crate::info_label;
use crate::ordered::OrderedEdgeListFill;
use crate::pixels::PixelSet;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::raster::BoundaryPixels;
use crate::seed::SimpleSeedFill;
use crate::span_seed::ScanlineSeedFill;
use crate::step::FillStep;

/// A fill algorithm written as a resumable state machine.
///
/// Every call to `step` performs exactly one observable action and returns
/// its record; `None` once the algorithm has nothing left to do.
pub trait Filler {
    fn step(&mut self, canvas: &mut FillCanvas<'_>) -> Option<FillStep>;

    /// `true` once `step` can only return `None`.
    fn is_finished(&self) -> bool;
}

/// Receives every step of a run, e.g. to draw it.
pub trait StepSink {
    fn on_step(&mut self, step: &FillStep, filled: &PixelSet);
}

impl StepSink for Vec<FillStep> {
    fn on_step(&mut self, step: &FillStep, _filled: &PixelSet) {
        self.push(step.clone());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    OrderedEdgeList,
    ActiveEdgeList,
    SimpleSeed,
    ScanlineSeed,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::OrderedEdgeList,
        Algorithm::ActiveEdgeList,
        Algorithm::SimpleSeed,
        Algorithm::ScanlineSeed,
    ];

    #[inline]
    pub fn needs_seed(&self) -> bool {
        matches!(self, Algorithm::SimpleSeed | Algorithm::ScanlineSeed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::OrderedEdgeList => "scanline_ordered_edge_list",
            Algorithm::ActiveEdgeList => "scanline_ael",
            Algorithm::SimpleSeed => "seed_fill_simple",
            Algorithm::ScanlineSeed => "seed_fill_scanline",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = FillErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or(FillErr::UnknownAlgorithm)
    }
}

/// The outcome of [`Stepper::advance`].
#[derive(Clone, Debug)]
pub struct Advanced {
    pub step: FillStep,
    pub has_more: bool,
}

/// Drives one fill run step by step.
///
/// Owns the suspended algorithm and the filled set of the run. Dropping it (or
/// calling [`Stepper::cancel`]) abandons the run; pixels filled so far are not
/// rolled back.
pub struct Stepper<'a> {
    algorithm: Algorithm,
    filler: Box<dyn Filler>,
    canvas: FillCanvas<'a>,
    steps: usize,
    keep_trace: bool,
}

impl<'a> fmt::Debug for Stepper<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stepper")
            .field("algorithm", &self.algorithm)
            .field("steps", &self.steps)
            .field("filled", &self.canvas.filled().len())
            .field("finished", &self.filler.is_finished())
            .finish()
    }
}

fn validate_seed(
    seed: Point,
    canvas: Canvas,
    boundary: &BoundaryPixels,
) -> Result<Point, FillErr> {
    if !canvas.contains(seed) {
        Err(FillErr::SeedOutOfBounds(seed))
    } else if boundary.contains(seed) {
        Err(FillErr::SeedOnBoundary(seed))
    } else {
        Ok(seed)
    }
}

impl<'a> Stepper<'a> {
    /// Validate the inputs and set up a run. Nothing is filled yet.
    pub fn new(
        algorithm: Algorithm,
        polygon: &Polygon,
        boundary: &'a BoundaryPixels,
        seed: Option<Point>,
        config: &FillConfig,
    ) -> Result<Self, FillErr> {
        let bounds = config.canvas;
        if let Some(&outside) =
            polygon.vertices().iter().find(|&&v| !bounds.contains(v))
        {
            return Err(FillErr::VertexOutOfBounds(outside));
        }

        // Every algorithm rejects a degenerate outline.
        let table = EdgeTable::from_vertices(polygon.vertices())?;
        let filler: Box<dyn Filler> = match algorithm {
            Algorithm::OrderedEdgeList => Box::new(OrderedEdgeListFill::new(table)),
            Algorithm::ActiveEdgeList => Box::new(ActiveEdgeListFill::new(table)),
            Algorithm::SimpleSeed | Algorithm::ScanlineSeed => {
                let seed = seed.ok_or(FillErr::MissingSeed(algorithm))?;
                let seed = validate_seed(seed, bounds, boundary)?;
                if algorithm == Algorithm::SimpleSeed {
                    Box::new(SimpleSeedFill::new(seed))
                } else {
                    Box::new(ScanlineSeedFill::new(seed))
                }
            }
        };

        info!(
            "{} {} over {} vertices, seed {:?}",
            info_label!("new run"),
            algorithm,
            polygon.vertices().len(),
            seed
        );

        Ok(Self {
            algorithm,
            filler,
            canvas: FillCanvas::new(bounds, boundary),
            steps: 0,
            keep_trace: config.keep_trace,
        })
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Pixels filled so far.
    #[inline]
    pub fn filled(&self) -> &PixelSet {
        self.canvas.filled()
    }

    #[inline]
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.filler.is_finished()
    }

    /// Run exactly one step.
    pub fn advance(&mut self) -> Option<Advanced> {
        if self.filler.is_finished() {
            return None;
        }
        let step = self.filler.step(&mut self.canvas)?;
        self.steps += 1;
        emit_info!(
            sty:step_style(&step),
            fmt:"step {}: {}" | self.steps, step
        );
        Some(Advanced {
            step,
            has_more: !self.filler.is_finished(),
        })
    }

    /// Hand every remaining step to `sink`, in order.
    pub fn drive<S: StepSink + ?Sized>(&mut self, sink: &mut S) {
        while let Some(Advanced { step, .. }) = self.advance() {
            sink.on_step(&step, self.canvas.filled());
        }
    }

    pub fn run_to_completion(mut self) -> PixelSet {
        while self.advance().is_some() {}
        self.finish()
    }

    /// Like [`run_to_completion`](Self::run_to_completion), also returning the
    /// steps taken. The trace is empty when the config disables it.
    pub fn run_with_trace(mut self) -> (PixelSet, Vec<FillStep>) {
        let mut trace = Vec::new();
        while let Some(Advanced { step, .. }) = self.advance() {
            if self.keep_trace {
                trace.push(step);
            }
        }
        (self.finish(), trace)
    }

    /// Abandon the run.
    pub fn cancel(self) {
        info!(
            "{} {} after {} steps, {} pixels left as filled",
            info_label!("cancelled"),
            self.algorithm,
            self.steps,
            self.canvas.filled().len()
        );
    }

    fn finish(self) -> PixelSet {
        info!(
            "{} {} in {} steps, {} pixels",
            info_label!("finished"),
            self.algorithm,
            self.steps,
            self.canvas.filled().len()
        );
        self.canvas.into_filled()
    }
}

impl<'a> Iterator for Stepper<'a> {
    type Item = FillStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|advanced| advanced.step)
    }
}
