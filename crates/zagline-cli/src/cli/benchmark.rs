//! Benchmark command implementation.

use std::time::Instant;

use anyhow::Result;
use clap::Args;

use zagline::{generate_pattern, render_document, SimplexNoise};

use super::common::PatternArgs;

#[derive(Args, Debug, Clone)]
pub struct BenchmarkArgs {
    /// Number of generate + serialize rounds
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: u32,
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &BenchmarkArgs, pattern_args: &PatternArgs) -> Result<()> {
    let resolved = pattern_args.resolve()?;
    let params = &resolved.params;
    let noise = SimplexNoise::new(resolved.seed);
    let iterations = args.iterations.max(1);

    println!(
        "Running {} iterations: {} lines x {} segments (seed {})",
        iterations, params.num_lines, params.num_segments, resolved.seed
    );

    let start = Instant::now();
    let mut segments = 0;
    for _ in 0..iterations {
        segments = generate_pattern(params, &noise).segment_count();
    }
    let gen_elapsed = start.elapsed();

    let pattern = generate_pattern(params, &noise);
    let start = Instant::now();
    let mut bytes = 0;
    for _ in 0..iterations {
        bytes = render_document(&pattern).len();
    }
    let svg_elapsed = start.elapsed();

    let per_iter = |d: std::time::Duration| d.as_secs_f64() * 1000.0 / iterations as f64;

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  ZAGLINE BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Segments per pattern: {}", segments);
    println!("  Document size: {} bytes", bytes);
    println!("  Generate total: {:?}", gen_elapsed);
    println!("  Generate avg: {:.3}ms", per_iter(gen_elapsed));
    println!("  Serialize total: {:?}", svg_elapsed);
    println!("  Serialize avg: {:.3}ms", per_iter(svg_elapsed));
    println!("═══════════════════════════════════════════════");

    Ok(())
}
