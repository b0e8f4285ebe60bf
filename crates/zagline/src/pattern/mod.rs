//! Pattern generation: stack `num_lines` zig-zag lines on a 100x100 canvas.
//!
//! ## Layout
//!
//! ```text
//! line_height     = CANVAS_HEIGHT / num_lines
//! vertical_offset = line_height * vpadding
//! line_y(n)       = n * vertical_offset        (n = 1..=num_lines)
//! ```
//!
//! Lines are placed at multiples of the padded offset, not the raw line height,
//! so a single line sits at `y = vpadding * 100` rather than in the middle.
//! The same offset bounds how far segment midpoints may stray vertically.

mod line;
mod util;

pub use line::{generate_line, LineLayout, ZigzagLine};
pub use util::map_range;

use tracing::debug;

use crate::noise_source::NoiseSource;
use crate::params::Parameters;

/// Logical canvas width in pattern units, independent of display size.
pub const CANVAS_WIDTH: f64 = 100.0;
/// Logical canvas height in pattern units.
pub const CANVAS_HEIGHT: f64 = 100.0;

/// Stroke styling applied to every line.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// A generated pattern, ready for rendering.
///
/// Lines are in generation order, which is also render order (topmost first).
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub lines: Vec<ZigzagLine>,
    pub stroke: Stroke,
    pub width: f64,
    pub height: f64,
}

impl Pattern {
    /// Path descriptors in render order.
    pub fn path_descriptors(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.path.as_str())
    }

    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(ZigzagLine::segment_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Generate a pattern from `params`, sampling `noise`.
///
/// Pure: the same parameters and the same noise instance always give the same
/// pattern. No validation happens here; zero lines or zero segments produce an
/// empty pattern.
///
/// ## Rust Lesson #5: `?Sized` generics
///
/// `N: NoiseSource + ?Sized` accepts concrete types (`&SimplexNoise`), closures,
/// *and* trait objects (`&dyn NoiseSource`). Without `?Sized` the trait object
/// case would not compile, because `dyn Trait` has no size known at compile time.
pub fn generate_pattern<N>(params: &Parameters, noise: &N) -> Pattern
where
    N: NoiseSource + ?Sized,
{
    let stroke = Stroke {
        color: params.line_color.clone(),
        width: params.stroke_width,
    };

    if params.num_lines == 0 || params.num_segments == 0 {
        debug!(
            num_lines = params.num_lines,
            num_segments = params.num_segments,
            "degenerate parameters, returning empty pattern"
        );
        return Pattern { lines: Vec::new(), stroke, width: CANVAS_WIDTH, height: CANVAS_HEIGHT };
    }

    let line_height = CANVAS_HEIGHT / params.num_lines as f64;
    let layout = LineLayout {
        canvas_width: CANVAS_WIDTH,
        num_segments: params.num_segments,
        chaos_x: params.chaos_x,
        chaos_y: params.chaos_y,
        vertical_offset: line_height * params.vpadding,
    };

    let lines: Vec<ZigzagLine> = (1..=params.num_lines)
        .map(|line_index| generate_line(line_index, &layout, noise))
        .collect();

    debug!(
        lines = lines.len(),
        segments = params.num_segments,
        vertical_offset = layout.vertical_offset,
        "generated pattern"
    );

    Pattern { lines, stroke, width: CANVAS_WIDTH, height: CANVAS_HEIGHT }
}
