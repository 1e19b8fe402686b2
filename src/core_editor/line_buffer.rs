use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The logical model of the line being edited: the text plus the dot, the
/// cursor position as a byte offset into it.
///
/// The line may contain embedded newlines (inserted with Alt-Enter); the
/// vertical movement operations treat those as sub-line boundaries.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LineBuffer {
    line: String,
    dot: usize,
}

impl From<&str> for LineBuffer {
    fn from(input: &str) -> Self {
        let mut buffer = LineBuffer::new();
        buffer.insert_str(input);
        buffer
    }
}

impl LineBuffer {
    pub fn new() -> LineBuffer {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The dot, in bytes.
    pub fn dot(&self) -> usize {
        self.dot
    }

    /// Move the dot. The caller must keep it on a char boundary.
    pub fn set_dot(&mut self, dot: usize) {
        debug_assert!(self.line.is_char_boundary(dot));
        self.dot = dot;
    }

    /// Replace the whole line and put the dot at its end.
    pub fn set_line(&mut self, line: String) {
        self.dot = line.len();
        self.line = line;
    }

    /// Whether the line and dot are structurally sound.
    pub fn is_valid(&self) -> bool {
        self.line.is_char_boundary(self.dot)
    }

    #[cfg(test)]
    fn assert_valid(&self) {
        assert!(
            self.line.is_char_boundary(self.dot),
            "dot {} off char boundary in {:?}",
            self.dot,
            self.line
        );
    }

    /// Insert one character at the dot.
    pub fn insert_char(&mut self, c: char) {
        self.line.insert(self.dot, c);
        self.dot += c.len_utf8();
    }

    /// Insert a string at the dot.
    pub fn insert_str(&mut self, s: &str) {
        self.line.insert_str(self.dot, s);
        self.dot += s.len();
    }

    /// Replace `range` with `s`, adjusting the dot so text after the range
    /// keeps its position relative to the replacement.
    pub fn replace_range(&mut self, range: Range<usize>, s: &str) {
        let removed = range.end - range.start;
        let start = range.start;
        let end = range.end;
        self.line.replace_range(range, s);
        if self.dot >= end {
            self.dot = self.dot + s.len() - removed;
        } else if self.dot > start {
            self.dot = start + s.len();
        }
    }

    fn grapheme_left(&self) -> usize {
        self.line[..self.dot]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn grapheme_right(&self) -> usize {
        self.line[self.dot..]
            .graphemes(true)
            .next()
            .map_or(self.dot, |g| self.dot + g.len())
    }

    /// Start of the sub-line containing the dot.
    fn subline_start(&self) -> usize {
        self.line[..self.dot].rfind('\n').map_or(0, |i| i + 1)
    }

    /// End of the sub-line containing the dot (offset of its `\n` or the
    /// end of the buffer).
    fn subline_end(&self) -> usize {
        self.line[self.dot..]
            .find('\n')
            .map_or(self.line.len(), |i| self.dot + i)
    }

    /// Move the dot one grapheme left. No-op at the start.
    pub fn move_left(&mut self) {
        self.dot = self.grapheme_left();
    }

    /// Move the dot one grapheme right. No-op at the end.
    pub fn move_right(&mut self) {
        self.dot = self.grapheme_right();
    }

    /// Move the dot to the sub-line above, keeping the display column.
    /// Returns false when there is no line above.
    pub fn move_up(&mut self) -> bool {
        let start = self.subline_start();
        if start == 0 {
            return false;
        }
        let col = self.line[start..self.dot].width();
        let above_start = self.line[..start - 1].rfind('\n').map_or(0, |i| i + 1);
        self.dot = dot_at_column(&self.line, above_start, start - 1, col);
        true
    }

    /// Move the dot to the sub-line below, keeping the display column.
    /// Returns false when there is no line below.
    pub fn move_down(&mut self) -> bool {
        let end = self.subline_end();
        if end == self.line.len() {
            return false;
        }
        let start = self.subline_start();
        let col = self.line[start..self.dot].width();
        let below_start = end + 1;
        let below_end = self.line[below_start..]
            .find('\n')
            .map_or(self.line.len(), |i| below_start + i);
        self.dot = dot_at_column(&self.line, below_start, below_end, col);
        true
    }

    /// Remove the grapheme left of the dot, returning it.
    pub fn kill_rune_left(&mut self) -> Option<String> {
        if self.dot == 0 {
            return None;
        }
        let start = self.grapheme_left();
        let killed = self.line[start..self.dot].to_owned();
        self.line.replace_range(start..self.dot, "");
        self.dot = start;
        Some(killed)
    }

    /// Remove the grapheme right of the dot, returning it.
    pub fn kill_rune_right(&mut self) -> Option<String> {
        let end = self.grapheme_right();
        if end == self.dot {
            return None;
        }
        let killed = self.line[self.dot..end].to_owned();
        self.line.replace_range(self.dot..end, "");
        Some(killed)
    }

    /// Remove from the start of the sub-line to the dot, returning the
    /// killed text.
    pub fn kill_line_left(&mut self) -> String {
        let start = self.subline_start();
        let killed = self.line[start..self.dot].to_owned();
        self.line.replace_range(start..self.dot, "");
        self.dot = start;
        killed
    }

    /// Remove from the dot to the end of the sub-line, returning the
    /// killed text.
    pub fn kill_line_right(&mut self) -> String {
        let end = self.subline_end();
        let killed = self.line[self.dot..end].to_owned();
        self.line.replace_range(self.dot..end, "");
        killed
    }
}

/// Byte offset within `line[start..end]` whose display column is closest
/// to (but not past) `col`.
fn dot_at_column(line: &str, start: usize, end: usize, col: usize) -> usize {
    let mut used = 0;
    for (i, g) in line[start..end].grapheme_indices(true) {
        let w = g.width();
        if used + w > col {
            return start + i;
        }
        used += w;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn insertion_round_trip() {
        // Inserting characters at successive positions equals the naive
        // concatenation, and the dot equals the bytes inserted before it.
        let mut buffer = LineBuffer::new();
        for c in "héllo".chars() {
            buffer.insert_char(c);
        }
        assert_eq!(buffer.as_str(), "héllo");
        assert_eq!(buffer.dot(), "héllo".len());
        buffer.set_dot(0);
        buffer.insert_str("ab");
        assert_eq!(buffer.as_str(), "abhéllo");
        assert_eq!(buffer.dot(), 2);
        buffer.assert_valid();
    }

    #[test]
    fn kill_then_reinsert_is_neutral() {
        let mut buffer = LineBuffer::from("héllo");
        let killed = buffer.kill_rune_left().expect("line is not empty");
        buffer.insert_str(&killed);
        assert_eq!(buffer.as_str(), "héllo");
        assert_eq!(buffer.dot(), "héllo".len());
        buffer.assert_valid();
    }

    #[test]
    fn kill_line_right_from_mid_line() {
        let mut buffer = LineBuffer::from("abcdef");
        buffer.set_dot(3);
        let killed = buffer.kill_line_right();
        assert_eq!(buffer.as_str(), "abc");
        assert_eq!(buffer.dot(), 3);
        assert_eq!(killed, "def");
        // Undo by inserting the killed text restores the original.
        buffer.insert_str(&killed);
        assert_eq!(buffer.as_str(), "abcdef");
    }

    #[test]
    fn kill_line_left_stops_at_subline_start() {
        let mut buffer = LineBuffer::from("one\ntwo");
        buffer.set_dot(6);
        assert_eq!(buffer.kill_line_left(), "tw");
        assert_eq!(buffer.as_str(), "one\no");
        assert_eq!(buffer.dot(), 4);
    }

    #[rstest]
    #[case("héllo", 6, 1)] // é is two bytes
    #[case("héllo", 0, 0)] // at start: no-op
    #[case("ab", 1, 0)]
    fn move_left_lands_on_grapheme_boundary(
        #[case] input: &str,
        #[case] dot: usize,
        #[case] expected: usize,
    ) {
        let mut buffer = LineBuffer::from(input);
        buffer.set_dot(dot);
        buffer.move_left();
        assert_eq!(buffer.dot(), expected);
        buffer.assert_valid();
    }

    #[test]
    fn move_right_at_end_is_a_no_op() {
        let mut buffer = LineBuffer::from("ab");
        buffer.move_right();
        assert_eq!(buffer.dot(), 2);
    }

    #[test]
    fn vertical_moves_keep_the_column() {
        let mut buffer = LineBuffer::from("alpha\nbeta\ngamma");
        buffer.set_dot(8); // "be|ta"
        assert!(buffer.move_up());
        assert_eq!(buffer.dot(), 2); // "al|pha"
        assert!(buffer.move_down());
        assert_eq!(buffer.dot(), 8);
        assert!(buffer.move_down());
        assert_eq!(buffer.dot(), 13); // "ga|mma"
        assert!(!buffer.move_down());
    }

    #[test]
    fn vertical_move_clips_to_a_short_line() {
        let mut buffer = LineBuffer::from("long line\nhi");
        buffer.set_dot(7);
        assert!(buffer.move_down());
        assert_eq!(buffer.dot(), buffer.as_str().len());
        assert!(!buffer.move_down());
        assert!(buffer.move_up());
        buffer.assert_valid();
    }

    #[test]
    fn move_up_on_the_first_line_fails() {
        let mut buffer = LineBuffer::from("only");
        buffer.set_dot(2);
        assert!(!buffer.move_up());
        assert_eq!(buffer.dot(), 2);
    }

    #[rstest]
    #[case("abcd", 2, 0..2, "XY", "XYcd", 2 + 2 - 2)]
    #[case("echo h", 6, 5..6, "hello", "echo hello", 10)]
    #[case("abcd", 4, 1..3, "", "ad", 2)]
    fn replace_range_adjusts_the_dot(
        #[case] input: &str,
        #[case] dot: usize,
        #[case] range: Range<usize>,
        #[case] replacement: &str,
        #[case] expected: &str,
        #[case] expected_dot: usize,
    ) {
        let mut buffer = LineBuffer::from(input);
        buffer.set_dot(dot);
        buffer.replace_range(range, replacement);
        assert_eq!(buffer.as_str(), expected);
        assert_eq!(buffer.dot(), expected_dot);
        buffer.assert_valid();
    }

    #[test]
    fn kill_rune_at_boundaries_returns_none() {
        let mut buffer = LineBuffer::from("a");
        buffer.set_dot(0);
        assert_eq!(buffer.kill_rune_left(), None);
        buffer.set_dot(1);
        assert_eq!(buffer.kill_rune_right(), None);
    }
}
