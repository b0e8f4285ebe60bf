//! SVG output and parsing.
//!
//! Rendering builds the markup by hand: one `<path>` per line, so the element
//! count of a document always equals the line count. Parsing streams the XML
//! with quick-xml and reads back every `<path>` it finds.

use std::fmt::Write;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

use crate::pattern::Pattern;

/// Declaration written at the top of exported documents.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" standalone=\"no\"?>\r\n";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Error type for SVG parsing.
///
/// ## Rust Lesson #6: Error Handling
///
/// Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
/// `Display` and `std::error::Error` impls from the `#[error(...)]` strings,
/// which saves writing the same `match` by hand for every error enum.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error at position {position}: {message}")]
    Xml { position: u64, message: String },
    #[error("bad path data in path #{index}: {message}")]
    PathData { index: usize, message: String },
    #[error("no paths found in SVG")]
    NoPaths,
}

/// Outer `width`/`height` of the `<svg>` element.
///
/// The viewBox is always the pattern's logical canvas; this only decides how
/// big the drawing is when displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvgSize {
    /// `width="100%" height="100%"`: fills whatever contains it
    Fluid,
    /// Fixed pixel size, for rasterizing
    Pixels(u32, u32),
}

/// Render the `<svg>` element for a pattern (no XML declaration).
pub fn render_svg(pattern: &Pattern, size: SvgSize) -> String {
    let (width, height) = match size {
        SvgSize::Fluid => ("100%".to_string(), "100%".to_string()),
        SvgSize::Pixels(w, h) => (w.to_string(), h.to_string()),
    };

    let stroke = escape(pattern.stroke.color.as_str());

    // Rough size: a fixed header plus ~25 bytes per segment
    let mut svg = String::with_capacity(256 + pattern.segment_count() * 32);
    let _ = writeln!(
        svg,
        "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"{}\">",
        width, height, pattern.width, pattern.height, SVG_NAMESPACE
    );

    for d in pattern.path_descriptors() {
        let _ = writeln!(
            svg,
            "<path stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" d=\"{}\"/>",
            stroke, pattern.stroke.width, d
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render a self-contained SVG document: XML declaration plus a fluid `<svg>`.
///
/// Contains nothing time- or environment-dependent, so the same pattern
/// always serializes to the same bytes.
pub fn render_document(pattern: &Pattern) -> String {
    let mut doc = String::from(XML_DECLARATION);
    doc.push_str(&render_svg(pattern, SvgSize::Fluid));
    doc
}

/// A `<path>` element read back from an SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    pub d: String,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    /// Number of subpaths (`M`/`m` commands) in `d`
    pub subpaths: usize,
}

/// Extract every `<path>` element from SVG text, in document order.
pub fn extract_paths_from_svg(svg_content: &str) -> Result<Vec<ParsedPath>, SvgError> {
    let mut reader = Reader::from_str(svg_content);
    reader.config_mut().trim_text(true);

    let mut paths = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"path" {
                    let path = parse_path_element(e, paths.len(), reader.buffer_position() as u64)?;
                    paths.push(path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SvgError::Xml {
                    position: reader.error_position() as u64,
                    message: e.to_string(),
                });
            }
            _ => {}
        }
    }

    if paths.is_empty() {
        Err(SvgError::NoPaths)
    } else {
        Ok(paths)
    }
}

fn parse_path_element(e: &BytesStart, index: usize, position: u64) -> Result<ParsedPath, SvgError> {
    let xml_error = |message: String| SvgError::Xml { position, message };

    let mut d = String::new();
    let mut stroke = None;
    let mut stroke_width = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| xml_error(e.to_string()))?;
        let value = attr.unescape_value().map_err(|e| xml_error(e.to_string()))?;

        match attr.key.as_ref() {
            b"d" => d = value.into_owned(),
            b"stroke" => stroke = Some(value.into_owned()),
            b"stroke-width" => stroke_width = value.trim().parse().ok(),
            _ => {}
        }
    }

    let subpaths = count_subpaths(&d).map_err(|message| SvgError::PathData { index, message })?;

    Ok(ParsedPath { d, stroke, stroke_width, subpaths })
}

/// Count move-to commands in path data, failing on malformed data.
fn count_subpaths(d: &str) -> Result<usize, String> {
    let mut count = 0;
    for segment in svgtypes::PathParser::from(d) {
        match segment.map_err(|e| e.to_string())? {
            svgtypes::PathSegment::MoveTo { .. } => count += 1,
            _ => {}
        }
    }
    Ok(count)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_source::SimplexNoise;
    use crate::params::Parameters;
    use crate::pattern::generate_pattern;

    fn sample_pattern(num_lines: u32, num_segments: u32) -> Pattern {
        let params = Parameters { num_lines, num_segments, ..Parameters::default() };
        generate_pattern(&params, &SimplexNoise::new(2024))
    }

    #[test]
    fn document_has_declaration_and_namespace() {
        let doc = render_document(&sample_pattern(3, 4));
        assert!(doc.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>\r\n<svg "));
        assert!(doc.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(doc.contains("viewBox=\"0 0 100 100\""));
        assert!(doc.contains("width=\"100%\""));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn one_path_element_per_line_with_styling() {
        let svg = render_svg(&sample_pattern(5, 3), SvgSize::Fluid);
        assert_eq!(svg.matches("<path ").count(), 5);
        assert_eq!(svg.matches("stroke=\"black\"").count(), 5);
        assert_eq!(svg.matches("stroke-width=\"0.2\"").count(), 5);
        assert_eq!(svg.matches("fill=\"none\"").count(), 5);
    }

    #[test]
    fn pixel_size_sets_dimensions() {
        let svg = render_svg(&sample_pattern(1, 1), SvgSize::Pixels(500, 500));
        assert!(svg.starts_with("<svg width=\"500\" height=\"500\" viewBox=\"0 0 100 100\""));
    }

    #[test]
    fn color_is_escaped() {
        let mut pattern = sample_pattern(1, 1);
        pattern.stroke.color = "a\"<b".to_string();
        let svg = render_svg(&pattern, SvgSize::Fluid);
        assert!(svg.contains("stroke=\"a&quot;&lt;b\""));
    }

    #[test]
    fn round_trip_preserves_counts_and_paths() {
        let pattern = sample_pattern(12, 9);
        let parsed = extract_paths_from_svg(&render_document(&pattern)).unwrap();

        assert_eq!(parsed.len(), 12);
        for (path, line) in parsed.iter().zip(&pattern.lines) {
            assert_eq!(path.d, line.path);
            assert_eq!(path.subpaths, 9);
            assert_eq!(path.stroke.as_deref(), Some("black"));
            assert_eq!(path.stroke_width, Some(0.2));
        }
    }

    #[test]
    fn round_trip_unescapes_color() {
        let mut pattern = sample_pattern(2, 2);
        pattern.stroke.color = "R&D".to_string();
        let parsed = extract_paths_from_svg(&render_document(&pattern)).unwrap();
        assert_eq!(parsed[0].stroke.as_deref(), Some("R&D"));
    }

    #[test]
    fn export_is_idempotent() {
        let pattern = sample_pattern(40, 50);
        assert_eq!(render_document(&pattern), render_document(&pattern));
    }

    #[test]
    fn parses_foreign_svg_paths() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <g><path d="M 10,10 L 90,10 M 10,20 L 90,20"></path></g>
                <rect x="10" y="10" width="80" height="80"/>
            </svg>
        "#;

        let paths = extract_paths_from_svg(svg).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].subpaths, 2);
        assert_eq!(paths[0].stroke, None);
    }

    #[test]
    fn no_paths_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"></svg>"#;
        assert!(matches!(extract_paths_from_svg(svg), Err(SvgError::NoPaths)));
    }

    #[test]
    fn malformed_path_data_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 10 Q"/></svg>"#;
        assert!(matches!(
            extract_paths_from_svg(svg),
            Err(SvgError::PathData { index: 0, .. })
        ));
    }

    #[test]
    fn malformed_xml_error() {
        let svg = r#"<svg><path d="M0 0 L1 1"></svg>"#;
        assert!(matches!(extract_paths_from_svg(svg), Err(SvgError::Xml { .. })));
    }
}
