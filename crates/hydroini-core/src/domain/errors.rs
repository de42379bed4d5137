use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub type IniResult<T> = Result<T, IniError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IniErrorCategory {
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl IniErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }
}

/// Reason a line could not be classified by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    /// `[` without a closing `]` at char index 3 or later.
    MalformedSectionHeader,
    EmptySectionName,
    /// Line inside a section that is not `key = value [# comment]`.
    MalformedProperty,
}

impl FormatErrorKind {
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::MalformedSectionHeader => "INPUT.INI_SECTION_HEADER",
            Self::EmptySectionName => "INPUT.INI_SECTION_NAME",
            Self::MalformedProperty => "INPUT.INI_PROPERTY",
        }
    }
}

impl Display for FormatErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MalformedSectionHeader => "invalid section header",
            Self::EmptySectionName => "empty section name",
            Self::MalformedProperty => "invalid key/value line",
        })
    }
}

/// Document content the writer refuses because it would not read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnwritableKind {
    SectionName,
    PropertyKey { key: String },
    MultiLineValue { key: String },
    MultiLineComment { key: String },
}

impl Display for UnwritableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SectionName => f.write_str("name is not a valid section header"),
            Self::PropertyKey { key } => write!(f, "'{key}' is not a valid property key"),
            Self::MultiLineValue { key } => write!(f, "value of '{key}' spans several lines"),
            Self::MultiLineComment { key } => write!(f, "comment of '{key}' spans several lines"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IniError {
    #[error("{kind} on line {line} of file '{}'", path.display())]
    Format {
        kind: FormatErrorKind,
        line: usize,
        path: PathBuf,
    },
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{message} for property '{key}' = '{value}' in section '{section}'{}", line_suffix(*line))]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        line: Option<usize>,
        message: String,
    },
    #[error("missing section '{section}'")]
    MissingSection { section: String },
    #[error("missing property '{key}' in section '{section}'")]
    MissingProperty { section: String, key: String },
    #[error("cannot write section '{section}': {kind}")]
    Unwritable { section: String, kind: UnwritableKind },
    #[error("failed to parse profile '{}': {source}", path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn line_suffix(line: Option<usize>) -> String {
    line.map(|line| format!(" at line {line}"))
        .unwrap_or_default()
}

impl IniError {
    pub fn format(kind: FormatErrorKind, line: usize, path: impl Into<PathBuf>) -> Self {
        Self::Format {
            kind,
            line,
            path: path.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub const fn category(&self) -> IniErrorCategory {
        match self {
            Self::Format { .. }
            | Self::InvalidValue { .. }
            | Self::MissingSection { .. }
            | Self::MissingProperty { .. }
            | Self::Unwritable { .. }
            | Self::Profile { .. } => IniErrorCategory::InputValidationError,
            Self::Io { .. } => IniErrorCategory::IoSystemError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Format { kind, .. } => kind.placeholder(),
            Self::Io { .. } => "IO.INI_FILE",
            Self::InvalidValue { .. } => "INPUT.INI_VALUE",
            Self::MissingSection { .. } => "INPUT.INI_MISSING_SECTION",
            Self::MissingProperty { .. } => "INPUT.INI_MISSING_PROPERTY",
            Self::Unwritable { .. } => "INPUT.INI_UNWRITABLE",
            Self::Profile { .. } => "INPUT.INI_PROFILE",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Source line the error refers to, when there is one.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } => Some(*line),
            Self::InvalidValue { line, .. } => *line,
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Format { path, .. } | Self::Io { path, .. } | Self::Profile { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::{FormatErrorKind, IniError, IniErrorCategory, UnwritableKind};
    use std::io;

    #[test]
    fn exit_mapping_is_stable() {
        assert_eq!(IniErrorCategory::InputValidationError.exit_code(), 2);
        assert_eq!(IniErrorCategory::IoSystemError.exit_code(), 3);
        assert_eq!(IniErrorCategory::InternalError.exit_code(), 5);
    }

    #[test]
    fn format_error_renders_line_and_path() {
        let error = IniError::format(FormatErrorKind::MalformedProperty, 3, "model/roughness.ini");

        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.line_number(), Some(3));
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.INI_PROPERTY] invalid key/value line on line 3 of file 'model/roughness.ini'"
        );
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 2");
    }

    #[test]
    fn io_error_keeps_original_kind() {
        let error = IniError::io(
            "missing.ini",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );

        assert_eq!(error.category(), IniErrorCategory::IoSystemError);
        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.io_error().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
        assert_eq!(error.placeholder(), "IO.INI_FILE");
    }

    #[test]
    fn invalid_value_mentions_line_when_known() {
        let error = IniError::InvalidValue {
            section: "General".to_string(),
            key: "fileVersion".to_string(),
            value: "three".to_string(),
            line: Some(2),
            message: "invalid float literal".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "invalid float literal for property 'fileVersion' = 'three' in section 'General' at line 2"
        );
    }

    #[test]
    fn unwritable_content_is_an_input_error() {
        let error = IniError::Unwritable {
            section: "Global".to_string(),
            kind: UnwritableKind::MultiLineValue {
                key: "frictionId".to_string(),
            },
        };

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.INI_UNWRITABLE] cannot write section 'Global': value of 'frictionId' spans several lines"
        );
    }
}
