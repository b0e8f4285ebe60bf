//! Generation parameters.
//!
//! The generator trusts its input; the range checks live here so front ends
//! (CLI flags, parameter files, the TUI panel) can reject bad values before
//! anything is generated.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LINES_RANGE: RangeInclusive<u32> = 1..=100;
pub const SEGMENTS_RANGE: RangeInclusive<u32> = 1..=100;
pub const CHAOS_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const VPADDING_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const STROKE_WIDTH_RANGE: RangeInclusive<f64> = 0.1..=1.0;

/// Error returned by [`Parameters::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("invalid line color: {0:?}")]
    InvalidColor(String),
}

/// Everything that shapes one render.
///
/// Field names serialize in camelCase (`numLines`, `chaosX`, ...). Keys missing
/// from a parameter file are filled from [`Parameters::default`], so a file
/// with just `numLines: 10` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameters {
    /// Number of horizontal lines
    pub num_lines: u32,
    /// Segments per line
    pub num_segments: u32,
    /// Horizontal midpoint displacement, as a fraction of segment width
    pub chaos_x: f64,
    /// Vertical midpoint displacement, as a fraction of the vertical offset
    pub chaos_y: f64,
    /// Fraction of each line's vertical spacing used as its offset
    pub vpadding: f64,
    pub stroke_width: f64,
    /// Any SVG color: `black`, `#4169e1`, `rgb(10, 20, 30)`
    pub line_color: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            num_lines: 40,
            num_segments: 50,
            chaos_x: 0.5,
            chaos_y: 0.95,
            vpadding: 0.9,
            stroke_width: 0.2,
            line_color: "black".to_string(),
        }
    }
}

impl Parameters {
    /// Check every field against the ranges the front ends accept.
    ///
    /// ## Rust Lesson #4: Early returns with `?`
    ///
    /// Each helper returns `Result<(), ParamError>`; `?` stops at the first
    /// failure and hands that error back to the caller.
    pub fn validate(&self) -> Result<(), ParamError> {
        check_range("numLines", self.num_lines as f64, &range_f64(&LINES_RANGE))?;
        check_range("numSegments", self.num_segments as f64, &range_f64(&SEGMENTS_RANGE))?;
        check_range("chaosX", self.chaos_x, &CHAOS_RANGE)?;
        check_range("chaosY", self.chaos_y, &CHAOS_RANGE)?;
        check_range("vpadding", self.vpadding, &VPADDING_RANGE)?;
        check_range("strokeWidth", self.stroke_width, &STROKE_WIDTH_RANGE)?;

        if svgtypes::Color::from_str(self.line_color.trim()).is_err() {
            return Err(ParamError::InvalidColor(self.line_color.clone()));
        }

        Ok(())
    }
}

fn range_f64(range: &RangeInclusive<u32>) -> RangeInclusive<f64> {
    *range.start() as f64..=*range.end() as f64
}

fn check_range(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), ParamError> {
    // NaN fails `contains`, which is what we want.
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ParamError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
