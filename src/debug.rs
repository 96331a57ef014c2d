use itertools::Itertools;
use procr_ansi_term::{Color, Style};
use std::fmt;

use crate::{
    active::ActiveEdges, edge::InverseSlope, edge_table::EdgeTable,
    step::FillStep,
};

const STYLE_TYPE_NAME: Style = Style::new().bold().fg(Color::Purple);
const STYLE_LABEL: Style = Style::new().fg(Color::Yellow);
const STYLE_ITEM: Style = Style::new().fg(Color::Cyan);

pub const COLOR_GREEN: Color = Color::Fixed(40);
pub const COLOR_BLUE: Color = Color::Fixed(27);
pub const COLOR_ORANGE: Color = Color::Fixed(208);

pub const STYLE_SCANLINE: Style = Style::new().bold().fg(Color::Red);
pub const STYLE_SPAN: Style = Style::new().fg(COLOR_GREEN);
pub const STYLE_SEED: Style = Style::new().fg(COLOR_BLUE);

pub fn debug_with(
    f: impl Fn(&mut fmt::Formatter) -> fmt::Result,
) -> impl fmt::Debug {
    struct DebugWith<F>(F);

    impl<F> fmt::Debug for DebugWith<F>
    where
        F: Fn(&mut fmt::Formatter) -> fmt::Result,
    {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            self.0(f)
        }
    }

    DebugWith(f)
}

#[macro_export]
macro_rules! info_label {
    ($label:literal) => {
        procr_ansi_term::Style::new()
            .bold()
            .fg(procr_ansi_term::Color::Yellow)
            .paint(format!("({})", $label))
    };
}

#[macro_export]
macro_rules! emit_info {
    (sty:$style:expr, msg:$msg:literal) => {
        tracing::info!("{}", $style.paint($msg));
    };
    (sty:$style:expr, fmt:$fmt:literal | $($rest:tt)+) => {
        tracing::info!("{}", $style.paint(format!($fmt, $($rest)*)));
    };
    (fmt:$fmt:literal | $($rest:tt)+) => {
        tracing::info!($fmt, $($rest)*);
    };
}

#[macro_export]
macro_rules! dbg_edge_table {
    ($table:expr) => {
        $crate::debug::debug_with($crate::debug::debug_edge_table($table))
    };
}

/// The edge table, one bucket per line.
pub fn debug_edge_table(
    table: &EdgeTable,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + '_ {
    move |f| {
        write!(f, "{}", STYLE_TYPE_NAME.paint("ET {"))?;
        for (y, ids) in table.buckets() {
            write!(f, "\n  {}", STYLE_LABEL.paint(format!("ET[{y}]:")))?;
            for &id in ids {
                let edge = &table[id];
                write!(
                    f,
                    "\n    {}",
                    STYLE_ITEM.paint(format!(
                        "y_max={}, x_start={}, 1/m={}",
                        edge.y_max,
                        edge.x_at_y_min,
                        slope_label(edge.inverse_slope)
                    ))
                )?;
            }
        }
        write!(f, "\n{}", STYLE_TYPE_NAME.paint("}"))
    }
}

#[macro_export]
macro_rules! dbg_active_edges {
    ($active_edges:expr) => {
        $crate::debug::debug_with($crate::debug::debug_active_edges(
            $active_edges,
        ))
    };
}

pub fn debug_active_edges(
    active_edges: &ActiveEdges,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + '_ {
    move |f| {
        f.write_str(&format!(
            "[ {} ",
            active_edges
                .items()
                .iter()
                .enumerate()
                .map(|(ix, edge)| {
                    format!(
                        "\n{}{}",
                        STYLE_LABEL.paint(format!("AEL[{ix}]: ")),
                        STYLE_ITEM.paint(format!(
                            "x={:?}, y_max={}, 1/m={}",
                            edge.x_current,
                            edge.y_max,
                            slope_label(edge.inverse_slope)
                        ))
                    )
                })
                .join(",")
        ))?;
        if active_edges.is_empty() {
            f.write_str("]")
        } else {
            f.write_str("\n]")
        }
    }
}

fn slope_label(slope: InverseSlope) -> String {
    match slope {
        InverseSlope::Finite { .. } => format!("{:.2}", slope.value()),
        InverseSlope::Vertical => "inf".to_string(),
    }
}

/// The style a step is logged with.
pub fn step_style(step: &FillStep) -> Style {
    match step {
        FillStep::ScanlineExamined { .. } => STYLE_SCANLINE,
        FillStep::SpanIdentified { .. } | FillStep::SpansFilled { .. } => {
            STYLE_SPAN
        }
        FillStep::SeedPlaced { .. } | FillStep::SeedsDiscovered { .. } => {
            STYLE_SEED
        }
        _ => Style::new().fg(COLOR_ORANGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn edge_table_lists_every_bucket() {
        let vertices: Vec<Point> = [(0, 0), (6, 0), (3, 6)]
            .into_iter()
            .map(Point::from)
            .collect();
        let table = EdgeTable::from_vertices(&vertices).unwrap();
        let text = format!("{:?}", dbg_edge_table!(&table));
        assert!(text.contains("ET[0]:"));
        assert!(text.contains("y_max=6, x_start=6, 1/m=-0.50"));
        assert!(text.contains("1/m=0.50"));
    }

    #[test]
    fn empty_active_list() {
        let ael = ActiveEdges::default();
        assert_eq!(format!("{:?}", dbg_active_edges!(&ael)), "[  ]");
    }
}
