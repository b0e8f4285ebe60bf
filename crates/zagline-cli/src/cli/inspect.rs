//! Inspect command: read an SVG back and report what it draws.
//!
//! Mostly useful to check an exported pattern: one path per line, one
//! subpath per segment.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use zagline::{extract_paths_from_svg, ParsedPath};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// SVG file to inspect, or - for stdin
    pub input: PathBuf,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of the paths in an SVG document.
#[derive(Debug, Serialize, PartialEq)]
pub struct PathReport {
    pub paths: usize,
    pub segments: usize,
    pub segments_per_path: Vec<usize>,
    /// Stroke color -> number of paths using it
    pub strokes: BTreeMap<String, usize>,
    pub stroke_widths: Vec<f64>,
}

impl PathReport {
    pub fn from_paths(paths: &[ParsedPath]) -> Self {
        let mut strokes = BTreeMap::new();
        let mut stroke_widths: Vec<f64> = Vec::new();

        for path in paths {
            let color = path.stroke.clone().unwrap_or_else(|| "(none)".to_string());
            *strokes.entry(color).or_insert(0) += 1;

            if let Some(width) = path.stroke_width {
                if !stroke_widths.contains(&width) {
                    stroke_widths.push(width);
                }
            }
        }

        let segments_per_path: Vec<usize> = paths.iter().map(|p| p.subpaths).collect();

        Self {
            paths: paths.len(),
            segments: segments_per_path.iter().sum(),
            segments_per_path,
            strokes,
            stroke_widths,
        }
    }
}

/// Execute the inspect command.
pub fn cmd_inspect(args: &InspectArgs) -> Result<()> {
    let content = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read SVG from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?
    };

    let paths = extract_paths_from_svg(&content)?;
    let report = PathReport::from_paths(&paths);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let min = report.segments_per_path.iter().min().copied().unwrap_or(0);
    let max = report.segments_per_path.iter().max().copied().unwrap_or(0);

    println!("Paths:     {}", report.paths);
    println!("Segments:  {} (per path: min {}, max {})", report.segments, min, max);
    for (color, count) in &report.strokes {
        println!("Stroke:    {} x{}", color, count);
    }
    if !report.stroke_widths.is_empty() {
        let widths: Vec<String> = report.stroke_widths.iter().map(|w| w.to_string()).collect();
        println!("Widths:    {}", widths.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zagline::{generate_pattern, render_document, Parameters, SimplexNoise};

    #[test]
    fn report_counts_generated_pattern() {
        let params = Parameters { num_lines: 5, num_segments: 6, ..Parameters::default() };
        let doc = render_document(&generate_pattern(&params, &SimplexNoise::new(4)));
        let report = PathReport::from_paths(&extract_paths_from_svg(&doc).unwrap());

        assert_eq!(report.paths, 5);
        assert_eq!(report.segments, 30);
        assert_eq!(report.segments_per_path, vec![6; 5]);
        assert_eq!(report.strokes.get("black"), Some(&5));
        assert_eq!(report.stroke_widths, vec![0.2]);
    }

    #[test]
    fn report_groups_mixed_strokes() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <path d="M0 0 L1 1" stroke="red"/>
            <path d="M0 0 L1 1 M2 2 L3 3" stroke="red" stroke-width="2"/>
            <path d="M0 0 L1 1"/>
        </svg>"#;
        let report = PathReport::from_paths(&extract_paths_from_svg(svg).unwrap());

        assert_eq!(report.paths, 3);
        assert_eq!(report.segments, 4);
        assert_eq!(report.strokes.get("red"), Some(&2));
        assert_eq!(report.strokes.get("(none)"), Some(&1));
        assert_eq!(report.stroke_widths, vec![2.0]);
    }
}
