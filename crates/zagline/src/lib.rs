//! # zagline
//!
//! Zig-zag line pattern generation: horizontal lines cut into segments whose
//! midpoints are pushed around by coherent noise.
//!
//! ## Rust Lesson #1: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod export;
pub mod geometry;
pub mod noise_source;
pub mod params;
pub mod pattern;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use export::{ExportError, Exporter, FileExporter, MemoryExporter, WriterExporter, DEFAULT_EXPORT_NAME};
pub use geometry::{Point, Segment};
pub use noise_source::{NoiseSource, SimplexNoise};
pub use params::{ParamError, Parameters};
pub use pattern::{
    generate_line, generate_pattern, map_range, LineLayout, Pattern, Stroke, ZigzagLine,
    CANVAS_HEIGHT, CANVAS_WIDTH,
};
pub use svg::{extract_paths_from_svg, render_document, render_svg, ParsedPath, SvgError, SvgSize};
