use crate::config::WriterOptions;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity, TracingSink};
use crate::domain::{IniDocument, IniError, IniProperty, IniResult, IniSection, UnwritableKind};
use crate::parser::line;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Serializes an [`IniDocument`] into the layout [`crate::parser::IniReader`] accepts.
///
/// Properties with an empty value are not written.
#[derive(Debug, Clone, Default)]
pub struct IniWriter<S = TracingSink> {
    options: WriterOptions,
    sink: S,
}

impl IniWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DiagnosticSink> IniWriter<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            options: WriterOptions::default(),
            sink,
        }
    }

    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn write_comments(mut self, enabled: bool) -> Self {
        self.options.write_comments = enabled;
        self
    }

    pub fn options(&self) -> WriterOptions {
        self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Creates or truncates `path`. The document is checked first, so a
    /// refused document leaves an existing file untouched; an io failure
    /// part-way leaves the file incomplete.
    pub fn write_file(&mut self, document: &IniDocument, path: &Path) -> IniResult<()> {
        self.validate(document)?;

        let file = File::create(path).map_err(|source| IniError::io(path, source))?;
        let mut output = BufWriter::new(file);
        self.emit(document, &mut output)
            .and_then(|()| output.flush())
            .map_err(|source| IniError::io(path, source))?;

        self.sink.record(Diagnostic::new(
            Severity::Info,
            format!(
                "wrote {} section(s) to '{}'",
                document.len(),
                path.display()
            ),
        ));
        Ok(())
    }

    pub fn write_to_string(&mut self, document: &IniDocument) -> IniResult<String> {
        let mut buffer = Vec::new();
        self.write(document, &mut buffer, Path::new("<memory>"))?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// `path` is only used in errors.
    pub fn write<W: Write>(
        &mut self,
        document: &IniDocument,
        output: &mut W,
        path: &Path,
    ) -> IniResult<()> {
        self.validate(document)?;
        self.emit(document, output)
            .map_err(|source| IniError::io(path, source))
    }

    /// Refuses content that [`crate::parser::IniReader`] would reject or read
    /// back differently: bad section names or keys, and line breaks in values
    /// or written comments.
    pub fn validate(&mut self, document: &IniDocument) -> IniResult<()> {
        for section in document.sections() {
            if let Some(kind) = self.unwritable_content(section) {
                let error = IniError::Unwritable {
                    section: section.name().to_string(),
                    kind,
                };
                self.sink
                    .record(Diagnostic::new(Severity::Error, error.to_string()));
                return Err(error);
            }
        }
        Ok(())
    }

    fn unwritable_content(&self, section: &IniSection) -> Option<UnwritableKind> {
        if !line::is_writable_section_name(section.name()) {
            return Some(UnwritableKind::SectionName);
        }

        section
            .properties()
            .iter()
            .filter(|property| !property.value().is_empty())
            .find_map(|property| {
                let key = property.key().to_string();
                if !line::is_writable_key(property.key()) {
                    Some(UnwritableKind::PropertyKey { key })
                } else if line::contains_line_break(property.value()) {
                    Some(UnwritableKind::MultiLineValue { key })
                } else if self.options.write_comments
                    && line::contains_line_break(property.comment())
                {
                    Some(UnwritableKind::MultiLineComment { key })
                } else {
                    None
                }
            })
    }

    fn emit<W: Write>(&mut self, document: &IniDocument, output: &mut W) -> io::Result<()> {
        for (index, section) in document.sections().iter().enumerate() {
            if index > 0 && self.options.blank_line_between_sections {
                writeln!(output)?;
            }
            writeln!(output, "[{}]", section.name())?;

            for property in section.properties() {
                if property.value().is_empty() {
                    self.sink.record(Diagnostic::new(
                        Severity::Debug,
                        format!(
                            "skipping property '{}' in section '{}' because its value is empty",
                            property.key(),
                            section.name()
                        ),
                    ));
                    continue;
                }
                writeln!(output, "{}", self.format_property(property))?;
            }
        }
        Ok(())
    }

    pub fn format_property(&self, property: &IniProperty) -> String {
        let line = format!(
            "{key:<key_width$} = {value:<value_width$}",
            key = property.key(),
            value = property.value(),
            key_width = self.options.key_width,
            value_width = self.options.value_width,
        );

        if self.options.write_comments && !property.comment().is_empty() {
            format!("{line}\t# {}", property.comment())
        } else {
            line.trim_end().to_string()
        }
    }
}

pub fn write_ini_file(document: &IniDocument, path: &Path) -> IniResult<()> {
    IniWriter::new().write_file(document, path)
}
