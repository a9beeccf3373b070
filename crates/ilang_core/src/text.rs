//! Text span and line lookup types for source location tracking.
//!
//! Positions are measured in characters (not bytes) from the start of the
//! submission, which is what the scanner counts while walking the text.

use std::fmt;

/// A position in source text, measured as a character offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The character offset where this span starts.
    pub start: TextPos,
    /// The length of this span in characters.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::from_bounds(start, end)
    }

    /// The slice of `text` this span covers. Out-of-range parts are clamped.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        let byte_at = |pos: usize| {
            text.char_indices()
                .nth(pos)
                .map(|(i, _)| i)
                .unwrap_or(text.len())
        };
        let start = byte_at(self.start as usize);
        let end = byte_at(self.end() as usize);
        &text[start..end]
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in characters.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A map from character offsets to line numbers, built from source text.
/// Used to convert diagnostic positions to line/column pairs.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Character offsets of the start of each line.
    line_starts: Vec<TextPos>,
    /// Character offset of the end of each line, excluding the line break.
    line_ends: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map from source text. `\r\n`, `\n` and a lone `\r` all
    /// end a line.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut line_ends = Vec::new();
        let mut chars = text.chars().peekable();
        let mut pos: TextPos = 0;
        while let Some(ch) = chars.next() {
            match ch {
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    line_ends.push(pos);
                    pos += 2;
                    line_starts.push(pos);
                }
                '\r' | '\n' => {
                    line_ends.push(pos);
                    pos += 1;
                    line_starts.push(pos);
                }
                _ => pos += 1,
            }
        }
        line_ends.push(pos);
        Self {
            line_starts,
            line_ends,
        }
    }

    /// Get the line number (0-based) for a character offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the line and column for a character offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }

    /// The span of a line, excluding its line break.
    pub fn line_span(&self, line: u32) -> TextSpan {
        let line = line as usize;
        TextSpan::from_bounds(self.line_starts[line], self.line_ends[line])
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
    }

    #[test]
    fn test_text_span_from_bounds_and_union() {
        let a = TextSpan::from_bounds(5, 15);
        assert_eq!(a.length, 10);
        let b = TextSpan::new(20, 2);
        assert_eq!(a.union(&b), TextSpan::from_bounds(5, 22));
    }

    #[test]
    fn test_slice_counts_characters() {
        let text = "é = 1";
        assert_eq!(TextSpan::new(0, 1).slice(text), "é");
        assert_eq!(TextSpan::new(4, 1).slice(text), "1");
        assert_eq!(TextSpan::new(4, 10).slice(text), "1");
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\r\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(13), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc, LineAndColumn::new(1, 2));
        assert_eq!(map.line_span(1), TextSpan::from_bounds(6, 11));
        assert_eq!(map.line_span(2), TextSpan::from_bounds(13, 18));
    }
}
