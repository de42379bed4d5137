use crate::domain::FormatErrorKind;

/// Lowest accepted char index of the closing `]` in a section header.
pub const MIN_SECTION_HEADER_END: usize = 3;

const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyLine<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub comment: &'a str,
}

pub fn is_section_header(line: &str) -> bool {
    line.starts_with('[')
}

pub fn is_comment_line(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// Name between the brackets of `[Name]`; trailing text after `]` is ignored.
pub fn parse_section_header(line: &str) -> Result<&str, FormatErrorKind> {
    let (char_index, byte_index) = line
        .char_indices()
        .enumerate()
        .find_map(|(char_index, (byte_index, c))| (c == ']').then_some((char_index, byte_index)))
        .ok_or(FormatErrorKind::MalformedSectionHeader)?;

    if char_index < MIN_SECTION_HEADER_END {
        return Err(FormatErrorKind::MalformedSectionHeader);
    }

    let name = line[1..byte_index].trim();
    if name.is_empty() {
        return Err(FormatErrorKind::EmptySectionName);
    }

    Ok(name)
}

/// `true` when `[name]` reads back as exactly `name`.
pub fn is_writable_section_name(name: &str) -> bool {
    !contains_line_break(name) && parse_section_header(&format!("[{name}]")) == Ok(name)
}

/// Keys follow the read grammar and may not open a section header.
pub fn is_writable_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('[')
        && !key.contains(|c: char| c == '=' || c.is_whitespace())
}

pub fn contains_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Matches `key = value [# comment]`. The key is one or more characters that
/// are neither `=` nor whitespace; the value runs up to the first `#`.
pub fn parse_property_line(line: &str) -> Option<PropertyLine<'_>> {
    let line = line.trim_start();
    let key_end = line
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(line.len());
    if key_end == 0 {
        return None;
    }
    let key = &line[..key_end];

    let rest = line[key_end..].trim_start().strip_prefix('=')?;
    let (value, comment) = match rest.split_once(COMMENT_MARKER) {
        Some((value, comment)) => (value, comment),
        None => (rest, ""),
    };

    Some(PropertyLine {
        key,
        value: value.trim(),
        comment: comment.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        PropertyLine, contains_line_break, is_comment_line, is_writable_key,
        is_writable_section_name, parse_property_line, parse_section_header,
    };
    use crate::domain::FormatErrorKind;

    #[test]
    fn section_header_requires_closing_bracket_at_index_three() {
        assert_eq!(parse_section_header("[General]"), Ok("General"));
        assert_eq!(parse_section_header("[AB]"), Ok("AB"));
        assert_eq!(
            parse_section_header("[A]"),
            Err(FormatErrorKind::MalformedSectionHeader)
        );
        assert_eq!(
            parse_section_header("[]"),
            Err(FormatErrorKind::MalformedSectionHeader)
        );
        assert_eq!(
            parse_section_header("[General"),
            Err(FormatErrorKind::MalformedSectionHeader)
        );
    }

    #[test]
    fn section_header_is_trimmed_and_ignores_trailing_text() {
        assert_eq!(parse_section_header("[ Global ]"), Ok("Global"));
        assert_eq!(parse_section_header("[ A]"), Ok("A"));
        assert_eq!(
            parse_section_header("[Branch] # first branch"),
            Ok("Branch")
        );
    }

    #[test]
    fn section_header_bracket_index_counts_characters_not_bytes() {
        assert_eq!(
            parse_section_header("[é]"),
            Err(FormatErrorKind::MalformedSectionHeader)
        );
        assert_eq!(parse_section_header("[éé]"), Ok("éé"));
    }

    #[test]
    fn blank_section_name_is_rejected() {
        assert_eq!(
            parse_section_header("[  ]"),
            Err(FormatErrorKind::EmptySectionName)
        );
    }

    #[test]
    fn property_line_splits_key_value_and_comment() {
        assert_eq!(
            parse_property_line("Program = MyProgram # Program name"),
            Some(PropertyLine {
                key: "Program",
                value: "MyProgram",
                comment: "Program name",
            })
        );
        assert_eq!(
            parse_property_line("fileVersion=3.00"),
            Some(PropertyLine {
                key: "fileVersion",
                value: "3.00",
                comment: "",
            })
        );
    }

    #[test]
    fn value_may_be_empty_and_may_contain_equals() {
        assert_eq!(
            parse_property_line("netFile =   # no grid yet"),
            Some(PropertyLine {
                key: "netFile",
                value: "",
                comment: "no grid yet",
            })
        );
        assert_eq!(
            parse_property_line("expr = a=b"),
            Some(PropertyLine {
                key: "expr",
                value: "a=b",
                comment: "",
            })
        );
    }

    #[test]
    fn comment_starts_at_first_hash() {
        let parsed = parse_property_line("id = x # one # two").expect("line should match");
        assert_eq!(parsed.value, "x");
        assert_eq!(parsed.comment, "one # two");
    }

    #[test]
    fn lines_without_key_or_equals_do_not_match() {
        assert_eq!(parse_property_line("no equals sign here"), None);
        assert_eq!(parse_property_line("= orphan value"), None);
        assert_eq!(parse_property_line("two words = value"), None);
        assert_eq!(parse_property_line("# just a comment"), None);
    }

    #[test]
    fn comment_lines_are_detected_by_leading_hash() {
        assert!(is_comment_line("# generated by model"));
        assert!(!is_comment_line("key = value # note"));
    }

    #[test]
    fn writable_section_names_read_back_unchanged() {
        assert!(is_writable_section_name("General"));
        assert!(is_writable_section_name("AB"));
        assert!(!is_writable_section_name(""));
        assert!(!is_writable_section_name("A"));
        assert!(!is_writable_section_name(" Global"));
        assert!(!is_writable_section_name("Cross]Section"));
        assert!(!is_writable_section_name("Two\nLines"));
    }

    #[test]
    fn writable_keys_follow_the_key_grammar() {
        assert!(is_writable_key("frictionId"));
        assert!(!is_writable_key(""));
        assert!(!is_writable_key("two words"));
        assert!(!is_writable_key("a=b"));
        assert!(!is_writable_key("[Section"));
        assert!(contains_line_break("one\r\ntwo"));
        assert!(!contains_line_break("one line"));
    }
}
