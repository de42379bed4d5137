//! Reader/writer settings, loadable from a JSON profile.

use crate::domain::{IniError, IniResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_KEY_WIDTH: usize = 22;
pub const DEFAULT_VALUE_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderOptions {
    /// Skip lines starting with `#` inside a section instead of rejecting them.
    pub ignore_comment_lines: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterOptions {
    pub write_comments: bool,
    pub key_width: usize,
    pub value_width: usize,
    pub blank_line_between_sections: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            write_comments: true,
            key_width: DEFAULT_KEY_WIDTH,
            value_width: DEFAULT_VALUE_WIDTH,
            blank_line_between_sections: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IniProfile {
    pub reader: ReaderOptions,
    pub writer: WriterOptions,
}

impl IniProfile {
    pub fn load(path: &Path) -> IniResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| IniError::io(path, source))?;
        Self::from_json(&content, path)
    }

    pub fn from_json(content: &str, path: &Path) -> IniResult<Self> {
        serde_json::from_str(content).map_err(|source| IniError::Profile {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_KEY_WIDTH, IniProfile, ReaderOptions, WriterOptions};
    use crate::domain::IniError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn empty_profile_uses_defaults() {
        let profile =
            IniProfile::from_json("{}", Path::new("profile.json")).expect("profile should parse");
        assert_eq!(profile, IniProfile::default());
        assert!(profile.writer.write_comments);
        assert_eq!(profile.writer.key_width, DEFAULT_KEY_WIDTH);
        assert!(!profile.reader.ignore_comment_lines);
    }

    #[test]
    fn partial_profile_overrides_only_named_fields() {
        let profile = IniProfile::from_json(
            r#"{ "reader": { "ignoreCommentLines": true }, "writer": { "keyWidth": 18 } }"#,
            Path::new("mdu-profile.json"),
        )
        .expect("profile should parse");

        assert_eq!(
            profile.reader,
            ReaderOptions {
                ignore_comment_lines: true
            }
        );
        assert_eq!(
            profile.writer,
            WriterOptions {
                key_width: 18,
                ..WriterOptions::default()
            }
        );
    }

    #[test]
    fn load_reports_io_and_parse_failures() {
        let temp = TempDir::new().expect("tempdir should be created");
        let missing = temp.path().join("missing.json");
        let error = IniProfile::load(&missing).expect_err("missing profile should fail");
        assert!(matches!(error, IniError::Io { .. }));

        let broken = temp.path().join("broken.json");
        fs::write(&broken, "{ \"writer\": ").expect("profile should be written");
        let error = IniProfile::load(&broken).expect_err("broken profile should fail");
        assert!(matches!(error, IniError::Profile { .. }));
        assert_eq!(error.exit_code(), 2);
    }
}
