use std::env;

use poly_fill::{
    Algorithm, Bresenham, FillConfig, FillStep, LineRasterizer, PixelSet, Point,
    Polygon, StepSink, Stepper,
};

/// Counts steps and remembers the pixels highlighted by the latest one.
#[derive(Default)]
struct Recorder {
    steps: usize,
    highlighted: Vec<Point>,
}

impl StepSink for Recorder {
    fn on_step(&mut self, step: &FillStep, _filled: &PixelSet) {
        self.steps += 1;
        self.highlighted = step.highlights();
    }
}

fn render(width: isize, height: isize, boundary: &PixelSet, filled: &PixelSet) -> String {
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(x, y);
            out.push(if boundary.contains(p) {
                '#'
            } else if filled.contains(p) {
                'o'
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    out
}

pub fn main() {
    // First argument: max log level (error, warn, info, debug, trace).
    let level = env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    // Any further arguments pick the algorithms to run.
    let algorithms: Vec<Algorithm> = {
        let picked: Vec<_> = env::args()
            .skip(2)
            .filter_map(|arg| match arg.parse::<Algorithm>() {
                Ok(algorithm) => Some(algorithm),
                Err(err) => {
                    eprintln!("{err}: {arg}");
                    None
                }
            })
            .collect();
        if picked.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            picked
        }
    };

    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(level)
        // sets this to be the default, global collector for this application.
        .init();

    let config = FillConfig::default().with_canvas(24, 16).with_trace(false);
    let samples: [(&str, Vec<(isize, isize)>, Point); 2] = [
        (
            "L-shape",
            vec![(1, 1), (13, 1), (13, 7), (7, 7), (7, 14), (1, 14)],
            Point::new(3, 3),
        ),
        (
            "triangle",
            vec![(2, 1), (20, 3), (9, 14)],
            Point::new(10, 5),
        ),
    ];

    for (name, raw, seed) in samples {
        let polygon = match Polygon::try_from(raw) {
            Ok(polygon) => polygon,
            Err(err) => {
                eprintln!("{name}: {err}");
                continue;
            }
        };
        let boundary = Bresenham.boundary(&polygon);

        for &algorithm in &algorithms {
            let seed = algorithm.needs_seed().then_some(seed);
            let mut stepper =
                match Stepper::new(algorithm, &polygon, &boundary, seed, &config) {
                    Ok(stepper) => stepper,
                    Err(err) => {
                        eprintln!("{name} / {algorithm}: {err}");
                        continue;
                    }
                };
            let mut recorder = Recorder::default();
            stepper.drive(&mut recorder);
            let filled = stepper.run_to_completion();

            println!(
                "{name} / {algorithm}: {} steps, {} pixels, last highlight {:?}",
                recorder.steps,
                filled.len(),
                recorder.highlighted
            );
            println!(
                "{}",
                render(config.canvas.width, config.canvas.height, &boundary, &filled)
            );
        }
    }
}
