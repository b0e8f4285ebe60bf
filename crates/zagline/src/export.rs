//! Exporting patterns as SVG documents.
//!
//! An [`Exporter`] takes a pattern and a file name and puts the serialized
//! document somewhere: a directory, an in-memory list, or any `io::Write`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::pattern::Pattern;
use crate::svg::render_document;

/// File name used when the user doesn't pick one.
pub const DEFAULT_EXPORT_NAME: &str = "pattern.svg";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Something that can receive an exported pattern.
pub trait Exporter {
    fn export(&mut self, pattern: &Pattern, filename: &str) -> Result<(), ExportError>;
}

/// Writes `<dir>/<filename>` on disk, replacing any existing file.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl FileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), last_written: None }
    }

    /// Path of the most recent successful export.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl Exporter for FileExporter {
    fn export(&mut self, pattern: &Pattern, filename: &str) -> Result<(), ExportError> {
        let path = self.dir.join(filename);
        let document = render_document(pattern);

        fs::write(&path, document.as_bytes()).map_err(|source| ExportError::Io {
            name: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), bytes = document.len(), "exported pattern");
        self.last_written = Some(path);
        Ok(())
    }
}

/// Keeps exported documents in memory, in export order.
#[derive(Debug, Clone, Default)]
pub struct MemoryExporter {
    pub files: Vec<(String, Vec<u8>)>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent document exported under `filename`.
    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl Exporter for MemoryExporter {
    fn export(&mut self, pattern: &Pattern, filename: &str) -> Result<(), ExportError> {
        self.files.push((filename.to_string(), render_document(pattern).into_bytes()));
        Ok(())
    }
}

/// Streams documents into a writer (stdout, a socket, a `Vec<u8>`...).
///
/// The file name is only used for logging and error messages.
pub struct WriterExporter<W: Write> {
    writer: W,
}

impl<W: Write> WriterExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for WriterExporter<W> {
    fn export(&mut self, pattern: &Pattern, filename: &str) -> Result<(), ExportError> {
        let document = render_document(pattern);
        let io_error = |source| ExportError::Io { name: filename.to_string(), source };

        self.writer.write_all(document.as_bytes()).map_err(io_error)?;
        self.writer.flush().map_err(io_error)?;

        info!(name = filename, bytes = document.len(), "streamed pattern");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_source::SimplexNoise;
    use crate::params::Parameters;
    use crate::pattern::generate_pattern;
    use crate::svg::extract_paths_from_svg;

    fn pattern() -> Pattern {
        let params = Parameters { num_lines: 6, num_segments: 8, ..Parameters::default() };
        generate_pattern(&params, &SimplexNoise::new(77))
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zagline-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn file_exporter_writes_document() {
        let dir = temp_dir("file");
        let mut exporter = FileExporter::new(&dir);
        exporter.export(&pattern(), DEFAULT_EXPORT_NAME).unwrap();

        let written = exporter.last_written().unwrap().to_path_buf();
        assert_eq!(written, dir.join("pattern.svg"));

        let content = fs::read_to_string(&written).unwrap();
        assert!(content.starts_with("<?xml"));
        assert_eq!(extract_paths_from_svg(&content).unwrap().len(), 6);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn file_exporter_overwrites_identically() {
        let dir = temp_dir("twice");
        let mut exporter = FileExporter::new(&dir);
        let pattern = pattern();

        exporter.export(&pattern, "a.svg").unwrap();
        let first = fs::read(dir.join("a.svg")).unwrap();
        exporter.export(&pattern, "a.svg").unwrap();
        let second = fs::read(dir.join("a.svg")).unwrap();
        assert_eq!(first, second);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn file_exporter_reports_missing_directory() {
        let mut exporter = FileExporter::new("/nonexistent/zagline/dir");
        let err = exporter.export(&pattern(), DEFAULT_EXPORT_NAME).unwrap_err();
        assert!(err.to_string().contains("pattern.svg"));
        assert!(exporter.last_written().is_none());
    }

    #[test]
    fn memory_exporter_keeps_latest() {
        let mut exporter = MemoryExporter::new();
        let small = generate_pattern(&Parameters { num_lines: 1, ..Parameters::default() }, &SimplexNoise::new(0));

        exporter.export(&pattern(), "p.svg").unwrap();
        exporter.export(&small, "p.svg").unwrap();

        assert_eq!(exporter.files.len(), 2);
        let latest = std::str::from_utf8(exporter.get("p.svg").unwrap()).unwrap();
        assert_eq!(extract_paths_from_svg(latest).unwrap().len(), 1);
        assert!(exporter.get("other.svg").is_none());
    }

    #[test]
    fn writer_exporter_matches_render_document() {
        let pattern = pattern();
        let mut exporter = WriterExporter::new(Vec::new());
        exporter.export(&pattern, "stdout").unwrap();
        assert_eq!(exporter.into_inner(), render_document(&pattern).into_bytes());
    }

    #[test]
    fn exporters_are_interchangeable() {
        let pattern = pattern();
        let mut memory = MemoryExporter::new();
        let mut stream = WriterExporter::new(Vec::new());

        let targets: [&mut dyn Exporter; 2] = [&mut memory, &mut stream];
        for target in targets {
            target.export(&pattern, DEFAULT_EXPORT_NAME).unwrap();
        }

        assert_eq!(memory.get(DEFAULT_EXPORT_NAME).unwrap(), stream.into_inner().as_slice());
    }
}
