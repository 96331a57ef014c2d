use crate::canvas::Canvas;

/// Settings shared by every fill run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillConfig {
    pub canvas: Canvas,
    /// Whether [`Stepper::run_with_trace`](crate::stepper::Stepper::run_with_trace)
    /// keeps the steps it produces.
    pub keep_trace: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(600, 500),
            keep_trace: true,
        }
    }
}

impl FillConfig {
    pub fn with_canvas(mut self, width: isize, height: isize) -> Self {
        self.canvas = Canvas::new(width, height);
        self
    }

    pub fn with_trace(mut self, keep_trace: bool) -> Self {
        self.keep_trace = keep_trace;
        self
    }
}
