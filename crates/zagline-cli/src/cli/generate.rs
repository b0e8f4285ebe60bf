//! Generate command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::debug;

use zagline::{
    generate_pattern, Exporter, FileExporter, SimplexNoise, WriterExporter, DEFAULT_EXPORT_NAME,
};

use super::common::{JsonPattern, OutputFormat, PatternArgs};
use crate::raster::{save_png, svg_data_uri, RASTER_SIZE};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Output file, or - for stdout
    #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Also write the raster mirror as a PNG
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Raster size in pixels for --png
    #[arg(long, default_value_t = RASTER_SIZE)]
    pub png_size: u32,

    /// Print the raster mirror's base64 SVG data URI to stdout
    #[arg(long)]
    pub data_uri: bool,
}

/// Execute the generate command.
pub fn cmd_generate(args: &GenerateArgs, pattern_args: &PatternArgs) -> Result<()> {
    let to_stdout = args.output == "-";
    if to_stdout && args.data_uri {
        bail!("--data-uri prints to stdout and cannot be combined with -o -");
    }

    let resolved = pattern_args.resolve()?;
    let noise = SimplexNoise::new(resolved.seed);

    let start = Instant::now();
    let pattern = generate_pattern(&resolved.params, &noise);
    debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "generation finished");

    match args.format {
        OutputFormat::Svg if to_stdout => {
            let stdout = io::stdout();
            WriterExporter::new(stdout.lock()).export(&pattern, "stdout")?;
        }
        OutputFormat::Svg => {
            let (dir, filename) = split_output_path(&args.output)?;
            FileExporter::new(dir).export(&pattern, &filename)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonPattern::new(&pattern, resolved.seed))?;
            if to_stdout {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", json)?;
            } else {
                fs::write(&args.output, json + "\n")
                    .with_context(|| format!("failed to write {}", args.output))?;
            }
        }
    }

    if !to_stdout {
        eprintln!(
            "Wrote: {} ({} lines, {} segments, seed {})",
            args.output,
            pattern.lines.len(),
            pattern.segment_count(),
            resolved.seed
        );
    }

    if let Some(png_path) = &args.png {
        save_png(&pattern, png_path, args.png_size)?;
        eprintln!("Wrote: {} ({}x{})", png_path.display(), args.png_size, args.png_size);
    }

    if args.data_uri {
        println!("{}", svg_data_uri(&pattern, RASTER_SIZE));
    }

    Ok(())
}

/// Split `path/to/name.svg` into the export directory and file name.
fn split_output_path(output: &str) -> Result<(PathBuf, String)> {
    let path = Path::new(output);
    let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
        bail!("output path {:?} has no file name", output);
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((dir, filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bare_file_name() {
        let (dir, name) = split_output_path("pattern.svg").unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "pattern.svg");
    }

    #[test]
    fn splits_nested_path() {
        let (dir, name) = split_output_path("out/art/zig.svg").unwrap();
        assert_eq!(dir, PathBuf::from("out/art"));
        assert_eq!(name, "zig.svg");
    }

    #[test]
    fn rejects_directory_like_path() {
        assert!(split_output_path("..").is_err());
    }
}
