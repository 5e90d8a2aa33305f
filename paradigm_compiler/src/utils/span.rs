//! Source location tracking
//!
//! Positions are tracked per character while scanning so that lexical and
//! syntax diagnostics can point at the offending text. Tokens decoded from an
//! interchange file carry a span on their record line instead.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tab stops used when computing display columns
const TAB_WIDTH: u32 = 4;

/// A position in source text with line, column, and byte offset.
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
        Self::new(0, 1, 1)
    }

    /// Start of a given line when no byte offset is meaningful
    pub fn line_start(line: u32) -> Self {
        Self::new(0, line, 1)
    }

    /// Position after consuming `ch`
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            '\t' => Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + TAB_WIDTH - ((self.column - 1) % TAB_WIDTH),
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

/// A span of source text from start (inclusive) to end (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
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

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering exactly one character at `pos`
    pub fn single(pos: Position) -> Self {
        Self {
            start: pos,
            end: Position::new(pos.offset + 1, pos.line, pos.column + 1),
        }
    }

    /// Span covering a whole record line of a token file
    pub fn line(line: u32, width: usize) -> Self {
        Self {
            start: Position::line_start(line),
            end: Position::new(width, line, width as u32 + 1),
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text covered by this span; empty when the span does not fit `input`
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start.offset..self.end.offset).unwrap_or("")
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

/// A value with its source location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Map the value while preserving the span
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Line index over a source text, used to render diagnostics with context
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

    /// Line and column for a byte offset
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|text| text.chars().count())
            .unwrap_or(0);

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// A line of text by line number (1-based), without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Format an error message with the source line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = span.start.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!(" {} |\n", padding));
            result.push_str(&format!(" {} | {}\n", line_num_str, line));

            let span_len = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                line.chars().count().saturating_sub((span.start.column - 1) as usize)
            };

            result.push_str(&format!(
                " {} | {}{}\n",
                padding,
                " ".repeat((span.start.column - 1) as usize),
                "^".repeat(span_len.max(1))
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance_str("ab\ncd");
        assert_eq!(pos, Position::new(5, 2, 3));

        let tabbed = Position::start().advance('\t');
        assert_eq!(tabbed.column, 5);
        assert_eq!(tabbed.offset, 1);

        let wide = Position::start().advance('é');
        assert_eq!(wide.offset, 2);
        assert_eq!(wide.column, 2);
    }

    #[test]
    fn test_span_merge_and_slice() {
        let source = "class Engine";
        let a = Span::new(Position::start(), Position::start().advance_str("class"));
        let b = Span::new(
            Position::start().advance_str("class "),
            Position::start().advance_str(source),
        );

        let merged = a.merge(b);
        assert_eq!(merged.slice(source), "class Engine");
        assert_eq!(b.slice(source), "Engine");
        assert_eq!(merged.len(), source.len());
    }

    #[test]
    fn test_source_map_lookup() {
        let map = SourceMap::new("first\r\nsecond\nthird".to_string());
        assert_eq!(map.get_line(1), Some("first"));
        assert_eq!(map.get_line(2), Some("second"));
        assert_eq!(map.get_line(3), Some("third"));
        assert_eq!(map.get_line(0), None);
        assert_eq!(map.get_line(4), None);

        assert_eq!(map.position_at(8), Position::new(8, 2, 2));
    }

    #[test]
    fn test_format_error_underlines_span() {
        let map = SourceMap::new("foo # bar".to_string());
        let span = Span::single(Position::new(4, 1, 5));
        let rendered = map.format_error(&span, "invalid character '#'");

        assert!(rendered.starts_with("error: invalid character '#'"));
        assert!(rendered.contains("--> 1:5"));
        assert!(rendered.contains(" 1 | foo # bar"));
        assert!(rendered.contains("   |     ^\n"));
    }
}
