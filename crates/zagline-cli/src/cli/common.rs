//! Options and output types shared across CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use zagline::{Parameters, Pattern};

use super::config::PatternFile;

/// Output format for generated patterns.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// Pattern parameters accepted by every command.
///
/// Precedence: flag, then `--config` file, then built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Parameter file (YAML, or JSON when the name ends in .json)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Noise seed (random when neither flag nor file sets one)
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Line count (1-100)
    #[arg(long, global = true)]
    pub lines: Option<u32>,

    /// Segments per line (1-100)
    #[arg(long, global = true)]
    pub segments: Option<u32>,

    /// Horizontal noise influence (0-1)
    #[arg(long, global = true)]
    pub chaos_x: Option<f64>,

    /// Vertical noise influence (0-1)
    #[arg(long, global = true)]
    pub chaos_y: Option<f64>,

    /// Vertical padding (0-1)
    #[arg(long, global = true)]
    pub vpadding: Option<f64>,

    /// Stroke width (0.1-1.0)
    #[arg(long, global = true)]
    pub stroke_width: Option<f64>,

    /// Stroke color (any SVG color)
    #[arg(long, global = true)]
    pub color: Option<String>,
}

/// Parameters and seed after merging flags, file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedPattern {
    pub params: Parameters,
    pub seed: u32,
}

impl PatternArgs {
    /// Merge sources and validate. The seed is drawn here, once per run.
    pub fn resolve(&self) -> Result<ResolvedPattern> {
        let file = match &self.config {
            Some(path) => PatternFile::load(path)?,
            None => PatternFile::default(),
        };

        let params = self.apply_overrides(file.params);
        params.validate().context("invalid pattern parameters")?;

        let seed = match self.seed.or(file.seed) {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                info!(seed, "no seed given, picked one at random");
                seed
            }
        };

        Ok(ResolvedPattern { params, seed })
    }

    fn apply_overrides(&self, mut params: Parameters) -> Parameters {
        if let Some(v) = self.lines {
            params.num_lines = v;
        }
        if let Some(v) = self.segments {
            params.num_segments = v;
        }
        if let Some(v) = self.chaos_x {
            params.chaos_x = v;
        }
        if let Some(v) = self.chaos_y {
            params.chaos_y = v;
        }
        if let Some(v) = self.vpadding {
            params.vpadding = v;
        }
        if let Some(v) = self.stroke_width {
            params.stroke_width = v;
        }
        if let Some(v) = &self.color {
            params.line_color = v.clone();
        }
        params
    }
}

/// A line in JSON output format.
#[derive(Serialize)]
pub struct JsonLine<'a> {
    pub index: u32,
    pub y: f64,
    pub d: &'a str,
}

/// JSON output for `generate --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPattern<'a> {
    pub width: f64,
    pub height: f64,
    pub stroke: &'a str,
    pub stroke_width: f64,
    pub seed: u32,
    pub lines: Vec<JsonLine<'a>>,
}

impl<'a> JsonPattern<'a> {
    pub fn new(pattern: &'a Pattern, seed: u32) -> Self {
        Self {
            width: pattern.width,
            height: pattern.height,
            stroke: &pattern.stroke.color,
            stroke_width: pattern.stroke.width,
            seed,
            lines: pattern
                .lines
                .iter()
                .map(|line| JsonLine { index: line.index, y: line.y, d: &line.path })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zagline::{generate_pattern, SimplexNoise};

    #[test]
    fn flags_override_defaults() {
        let args = PatternArgs {
            lines: Some(7),
            chaos_x: Some(0.0),
            color: Some("#ff0000".to_string()),
            seed: Some(9),
            ..PatternArgs::default()
        };
        let resolved = args.resolve().unwrap();
        assert_eq!(resolved.seed, 9);
        assert_eq!(resolved.params.num_lines, 7);
        assert_eq!(resolved.params.chaos_x, 0.0);
        assert_eq!(resolved.params.line_color, "#ff0000");
        assert_eq!(resolved.params.num_segments, Parameters::default().num_segments);
    }

    #[test]
    fn out_of_range_flag_is_rejected() {
        let args = PatternArgs { segments: Some(0), ..PatternArgs::default() };
        let err = args.resolve().unwrap_err();
        assert!(format!("{:#}", err).contains("numSegments"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = PatternArgs {
            config: Some(PathBuf::from("/nonexistent/zagline.yaml")),
            ..PatternArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn json_output_shape() {
        let params = Parameters { num_lines: 2, num_segments: 1, chaos_x: 0.0, chaos_y: 0.0, ..Parameters::default() };
        let pattern = generate_pattern(&params, &SimplexNoise::new(1));
        let value = serde_json::to_value(JsonPattern::new(&pattern, 1)).unwrap();

        assert_eq!(value["strokeWidth"], 0.2);
        assert_eq!(value["seed"], 1);
        assert_eq!(value["lines"][0]["y"], 45.0);
        assert_eq!(value["lines"][1]["d"], "M0 90 l0 0 L100 90");
    }
}
