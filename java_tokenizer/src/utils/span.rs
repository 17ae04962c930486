//! Source location tracking
//!
//! Positions are what the tokenizer advances as it consumes characters;
//! spans and the source map feed the caret-style diagnostics.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
///
/// Columns count Unicode scalar values; a tab is one column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advance past one character. A line feed moves to column 1 of the next
    /// line; anything else moves one column right.
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Span covering the single character at `pos`
    pub fn single(pos: Position) -> Self {
        let end = Position {
            offset: pos.offset + 1,
            line: pos.line,
            column: pos.column + 1,
        };
        Self { start: pos, end }
    }

    /// Span starting at `start` and covering `text`
    pub fn covering(start: Position, text: &str) -> Self {
        Self {
            start,
            end: start.advance_str(text),
        }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.offset >= self.start.offset && pos.offset < self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a source text, used to render diagnostics
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line and column for a byte offset
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Position for a 1-based line and character column. Out-of-range
    /// values clamp to the end of the line or of the source.
    pub fn position_of(&self, line: u32, column: u32) -> Position {
        let Some(&line_start) = self.line_starts.get(line.saturating_sub(1) as usize) else {
            return self.position_at(self.source.len());
        };
        let offset = self.source[line_start..]
            .char_indices()
            .take_while(|(_, ch)| *ch != '\n')
            .nth(column.saturating_sub(1) as usize)
            .map(|(idx, _)| line_start + idx)
            .unwrap_or_else(|| {
                self.source[line_start..]
                    .find('\n')
                    .map_or(self.source.len(), |idx| line_start + idx)
            });
        Position::new(offset, line.max(1), column.max(1))
    }

    /// Text of a line by number (1-based), without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = match self.line_starts.get(line_idx + 1) {
            Some(next) => next - 1,
            None => self.source.len(),
        };

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Render a message with the offending line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("Error: {}\n", message));
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = format!("{}", span.start.line);
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let mut underline = format!("{} | ", padding);
            for _ in 1..span.start.column {
                underline.push(' ');
            }

            let line_chars = line.chars().count();
            let span_len = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                line_chars.saturating_sub((span.start.column - 1) as usize)
            };

            for _ in 0..span_len.max(1) {
                underline.push('^');
            }

            result.push_str(&underline);
            result.push('\n');
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_tabs_and_multibyte_as_one_column() {
        let pos = Position::start().advance('\t').advance('ë');
        assert_eq!(pos.column, 3);
        assert_eq!(pos.offset, 1 + 'ë'.len_utf8());
    }

    #[test]
    fn newline_resets_column() {
        let pos = Position::start().advance_str("ab\nc");
        assert_eq!((pos.line, pos.column, pos.offset), (2, 2, 4));
    }

    #[test]
    fn source_map_positions() {
        let map = SourceMap::new("class A {\n  int x;\n}".to_string());
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.position_at(12), Position::new(12, 2, 3));
        assert_eq!(map.get_line(2), Some("  int x;"));
        assert_eq!(map.get_line(4), None);
    }

    #[test]
    fn position_of_line_and_column() {
        let map = SourceMap::new("class A {\n  ë x;\n}".to_string());
        assert_eq!(map.position_of(2, 3), Position::new(12, 2, 3));
        assert_eq!(map.position_of(2, 4).offset, 12 + 'ë'.len_utf8());
        // past the end of a line clamps to its terminator
        assert_eq!(map.position_of(1, 40).offset, 9);
        assert_eq!(map.position_of(9, 1).offset, map.source.len());
    }

    #[test]
    fn format_error_underlines_span() {
        let map = SourceMap::new("int a = #;\n".to_string());
        let span = Span::single(map.position_at(8));
        let rendered = map.format_error(&span, "Unexpected character '#' at line: 1 column: 9");

        assert!(rendered.contains("--> 1:9"));
        assert!(rendered.contains("1 | int a = #;"));
        assert!(rendered.ends_with("  |         ^\n"));
    }
}
