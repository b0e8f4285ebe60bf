//! Geometry types for zig-zag generation.
//!
//! ## Rust Lesson #2: Structs & Derives
//!
//! In JS you'd write: `const point = { x: 1.0, y: 2.0 }`
//! In Rust, we define a `struct` with explicit types.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` + `Copy` = small stack values copied implicitly
//! - `PartialEq` = can compare with `==`

use std::fmt::Write;

/// A 2D point in pattern units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One subdivision of a line, drawn as start -> displaced midpoint -> end.
///
/// Segments only live for the duration of a single line's generation pass;
/// what survives is the path text they append.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: u32,
    pub width: f64,
    pub start: Point,
    pub end: Point,
    /// Offset of the midpoint relative to `start` (an `l` command, not `L`).
    pub midpoint_offset: Point,
}

impl Segment {
    /// Absolute position of the displaced midpoint.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new(
            self.start.x + self.midpoint_offset.x,
            self.start.y + self.midpoint_offset.y,
        )
    }

    /// Append this segment's draw instruction to `out`.
    ///
    /// The format is `M{sx} {sy} l{dx} {dy} L{ex} {ey}`. Numbers use `f64`'s
    /// `Display`, the shortest text that parses back to the same value, so
    /// `45.0` prints as `45`.
    pub fn write_path(&self, out: &mut String) {
        // Writing into a String never fails.
        let _ = write!(
            out,
            "M{} {} l{} {} L{} {}",
            self.start.x,
            self.start.y,
            self.midpoint_offset.x,
            self.midpoint_offset.y,
            self.end.x,
            self.end.y,
        );
    }
}
