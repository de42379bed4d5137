use std::borrow::Cow;
use std::io::{self, BufRead};

const UTF8_BOM: char = '\u{feff}';

/// Trimmed, non-blank source line with its 1-based physical line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub line_number: usize,
    pub text: String,
    /// Bytes that were not valid UTF-8 were replaced with U+FFFD.
    pub lossy: bool,
}

/// Yields trimmed lines, skipping blank ones. Line numbers still count the
/// skipped lines so diagnostics point at the physical position.
///
/// Invalid UTF-8 never fails the scan; legacy files with Latin-1 bytes in
/// comments are read with the offending bytes replaced.
#[derive(Debug)]
pub struct LineScanner<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = io::Result<ScannedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(error) => return Some(Err(error)),
            }
            self.line_number += 1;

            let decoded = String::from_utf8_lossy(&self.buffer);
            let lossy = matches!(decoded, Cow::Owned(_));
            let mut raw: &str = &decoded;
            if self.line_number == 1 {
                raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
            }
            // Also drops the `\n` / `\r\n` terminator.
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            return Some(Ok(ScannedLine {
                line_number: self.line_number,
                text: text.to_string(),
                lossy,
            }));
        }
    }
}
