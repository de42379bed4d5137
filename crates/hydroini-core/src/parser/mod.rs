pub mod line;
pub mod scanner;

use crate::config::ReaderOptions;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity, TracingSink};
use crate::domain::{FormatErrorKind, IniDocument, IniError, IniProperty, IniResult, IniSection};
use scanner::LineScanner;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads INI text into an [`IniDocument`], failing on the first malformed line.
#[derive(Debug, Clone, Default)]
pub struct IniReader<S = TracingSink> {
    options: ReaderOptions,
    sink: S,
}

impl IniReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DiagnosticSink> IniReader<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            options: ReaderOptions::default(),
            sink,
        }
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn read_file(&mut self, path: &Path) -> IniResult<IniDocument> {
        let file = File::open(path).map_err(|source| IniError::io(path, source))?;
        self.read(file, path)
    }

    pub fn parse_str(&mut self, source: &str, path: &Path) -> IniResult<IniDocument> {
        self.read(source.as_bytes(), path)
    }

    /// `path` is only used in diagnostics and errors.
    pub fn read<R: Read>(&mut self, reader: R, path: &Path) -> IniResult<IniDocument> {
        let mut document = IniDocument::new();

        for scanned in LineScanner::new(BufReader::new(reader)) {
            let scanned = scanned.map_err(|source| IniError::io(path, source))?;
            let line = scanned.text.as_str();
            let line_number = scanned.line_number;
            if scanned.lossy {
                self.sink.record(
                    Diagnostic::new(
                        Severity::Warning,
                        format!(
                            "replaced invalid UTF-8 bytes while reading '{}'",
                            path.display()
                        ),
                    )
                    .at_line(line_number),
                );
            }

            if line::is_section_header(line) {
                let name = line::parse_section_header(line)
                    .map_err(|kind| self.reject(kind, line_number, path))?;
                document.add_section(IniSection::parsed(name, line_number));
                continue;
            }

            let Some(section) = document.last_section_mut() else {
                self.sink.record(
                    Diagnostic::new(
                        Severity::Debug,
                        format!("ignoring line outside of any section: '{line}'"),
                    )
                    .at_line(line_number),
                );
                continue;
            };

            if self.options.ignore_comment_lines && line::is_comment_line(line) {
                continue;
            }

            let Some(property) = line::parse_property_line(line) else {
                return Err(self.reject(FormatErrorKind::MalformedProperty, line_number, path));
            };
            section.push_property(IniProperty::parsed(
                property.key,
                property.value,
                property.comment,
                line_number,
            ));
        }

        self.sink.record(Diagnostic::new(
            Severity::Info,
            format!(
                "read {} section(s) from '{}'",
                document.len(),
                path.display()
            ),
        ));
        Ok(document)
    }

    fn reject(&mut self, kind: FormatErrorKind, line_number: usize, path: &Path) -> IniError {
        let error = IniError::format(kind, line_number, path);
        self.sink
            .record(Diagnostic::new(Severity::Error, error.to_string()).at_line(line_number));
        error
    }
}

pub fn read_ini_file(path: &Path) -> IniResult<IniDocument> {
    IniReader::new().read_file(path)
}

pub fn parse_ini_str(source: &str, path: &Path) -> IniResult<IniDocument> {
    IniReader::new().parse_str(source, path)
}
