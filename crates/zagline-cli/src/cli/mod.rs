//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `generate` - Generate a pattern as SVG, JSON and/or PNG
//! - `inspect` - Read an SVG back and count its paths and segments
//! - `benchmark` - Time pattern generation and serialization
//! - `defaults` - Print the default parameter file

pub mod benchmark;
pub mod common;
pub mod config;
pub mod generate;
pub mod inspect;

pub use benchmark::{cmd_benchmark, BenchmarkArgs};
pub use common::PatternArgs;
pub use config::cmd_defaults;
pub use generate::{cmd_generate, GenerateArgs};
pub use inspect::{cmd_inspect, InspectArgs};
