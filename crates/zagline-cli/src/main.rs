//! zagline - TUI and CLI for noise-displaced zig-zag line patterns
//!
//! Usage:
//!   zagline                          Launch TUI
//!   zagline generate -o pattern.svg  Write a pattern without the TUI
//!   zagline inspect <svg>            Count paths and segments in an SVG
//!   zagline benchmark                Time generation and serialization
//!   zagline defaults                 Print the default parameter file

mod cli;
mod logging;
mod raster;
mod tui;

use clap::{Parser, Subcommand};

use cli::{
    cmd_benchmark, cmd_defaults, cmd_generate, cmd_inspect, BenchmarkArgs, GenerateArgs,
    InspectArgs, PatternArgs,
};

#[derive(Parser, Debug)]
#[command(name = "zagline", version, about = "Noise-displaced zig-zag line patterns")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    pattern: PatternArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a pattern and write it as SVG or JSON
    Generate(GenerateArgs),
    /// Report the paths and segments in an SVG document
    Inspect(InspectArgs),
    /// Time pattern generation and SVG serialization
    Benchmark(BenchmarkArgs),
    /// Print the default parameters as YAML
    Defaults,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.command.is_none());

    let result = match &cli.command {
        Some(Command::Generate(args)) => cmd_generate(args, &cli.pattern),
        Some(Command::Inspect(args)) => cmd_inspect(args),
        Some(Command::Benchmark(args)) => cmd_benchmark(args, &cli.pattern),
        Some(Command::Defaults) => cmd_defaults(),
        None => cli.pattern.resolve().and_then(tui::run_tui),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
