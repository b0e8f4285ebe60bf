//! Single-line generation: one horizontal line, many displaced segments.

use crate::geometry::{Point, Segment};
use crate::noise_source::NoiseSource;

use super::util::map_range;

/// Layout values shared by every line of a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLayout {
    pub canvas_width: f64,
    pub num_segments: u32,
    pub chaos_x: f64,
    pub chaos_y: f64,
    /// Spacing between consecutive lines, already scaled by vpadding
    pub vertical_offset: f64,
}

/// One generated line and its path descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ZigzagLine {
    /// 1-based line number; also the noise x-key
    pub index: u32,
    pub y: f64,
    /// `M.. l.. L..` instructions, one per segment, space separated
    pub path: String,
}

impl ZigzagLine {
    /// Number of draw instructions (one `M` per segment).
    pub fn segment_count(&self) -> usize {
        self.path.matches('M').count()
    }
}

/// Generate the path for line `line_index` (1-based).
///
/// Each segment samples the noise once at `(line_index, i)` and uses that
/// same value for both axes, so X and Y displacement move together. Segments
/// are emitted in ascending `i`; the path reads left to right.
pub fn generate_line<N>(line_index: u32, layout: &LineLayout, noise: &N) -> ZigzagLine
where
    N: NoiseSource + ?Sized,
{
    let line_y = line_index as f64 * layout.vertical_offset;

    if layout.num_segments == 0 {
        return ZigzagLine { index: line_index, y: line_y, path: String::new() };
    }

    let segment_width = layout.canvas_width / layout.num_segments as f64;
    let max_dx = segment_width * layout.chaos_x;
    let max_dy = layout.vertical_offset * layout.chaos_y;

    // "M0 45 l-0.123 4.5 L2 45" is ~25 bytes; reserve roughly that per segment.
    let mut path = String::with_capacity(layout.num_segments as usize * 32);

    for i in 0..layout.num_segments {
        let r = noise.sample(line_index as i32, i as i32);
        let r = if r.is_finite() { r } else { 0.0 };

        let start_x = segment_width * i as f64;
        let segment = Segment {
            index: i,
            width: segment_width,
            start: Point::new(start_x, line_y),
            end: Point::new(start_x + segment_width, line_y),
            midpoint_offset: Point::new(
                map_range(r, -1.0, 1.0, -max_dx, max_dx),
                map_range(r, -1.0, 1.0, -max_dy, max_dy),
            ),
        };

        if i > 0 {
            path.push(' ');
        }
        segment.write_path(&mut path);
    }

    ZigzagLine { index: line_index, y: line_y, path }
}
