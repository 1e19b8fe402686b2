use unicode_width::UnicodeWidthChar;

use crate::styles::Styled;

/// One displayed unit in a row.
///
/// `width` is 1 or 2 for ordinary text and 0 for the continuation slot that
/// follows a double-width cell (combining marks are folded into the cell
/// they modify). `style` is the SGR parameter list; empty means default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) text: String,
    pub(crate) width: u8,
    pub(crate) style: String,
}

impl Cell {
    fn padding() -> Cell {
        Cell {
            text: " ".to_owned(),
            width: 1,
            style: String::new(),
        }
    }
}

/// A position in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Pos {
    pub(crate) line: usize,
    pub(crate) col: usize,
}

impl Pos {
    pub(crate) fn new(line: usize, col: usize) -> Pos {
        Pos { line, col }
    }
}

/// A width-bounded grid of styled cells with a logical cursor.
///
/// Buffers are ephemeral: renderers paint into one per refresh and the
/// writer diffs it against the previously committed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Buffer {
    pub(crate) width: usize,
    pub(crate) col: usize,
    /// Column to which wrapped continuation rows are indented
    pub(crate) indent: usize,
    /// Whether writing past the last column wraps (command line) or is
    /// suppressed (rprompt)
    pub(crate) newline_when_full: bool,
    pub(crate) cells: Vec<Vec<Cell>>,
    pub(crate) dot: Pos,
}

pub(crate) fn row_width(row: &[Cell]) -> usize {
    row.iter().map(|c| c.width as usize).sum()
}

impl Buffer {
    pub(crate) fn new(width: usize) -> Buffer {
        Buffer {
            width,
            col: 0,
            indent: 0,
            newline_when_full: false,
            cells: vec![Vec::new()],
            dot: Pos::default(),
        }
    }

    /// Number of rows.
    pub(crate) fn lines(&self) -> usize {
        self.cells.len()
    }

    /// Index of the current (last) row.
    pub(crate) fn line(&self) -> usize {
        self.cells.len() - 1
    }

    /// The current write position.
    pub(crate) fn cursor(&self) -> Pos {
        Pos::new(self.line(), self.col)
    }

    /// Unconditional row break, indenting the new row to `indent`.
    pub(crate) fn newline(&mut self) {
        self.cells.push(Vec::new());
        self.col = 0;
        if self.indent > 0 {
            self.write_padding(self.indent, "");
        }
    }

    /// Append one character, wrapping or clipping when the row is full.
    pub(crate) fn write(&mut self, c: char, style: &str) {
        if c == '\n' {
            self.newline();
            return;
        }
        // Control characters have no printable form.
        let Some(w) = c.width() else { return };
        if w == 0 {
            // Combining mark: fold into the cell it modifies.
            if let Some(cell) = self.cells.last_mut().and_then(|row| row.last_mut()) {
                cell.text.push(c);
            }
            return;
        }
        if self.col + w > self.width {
            if !self.newline_when_full {
                return;
            }
            self.newline();
        }
        let row = self.cells.last_mut().expect("buffer always has a row");
        row.push(Cell {
            text: c.to_string(),
            width: w as u8,
            style: style.to_owned(),
        });
        if w == 2 {
            row.push(Cell {
                text: String::new(),
                width: 0,
                style: style.to_owned(),
            });
        }
        self.col += w;
    }

    /// Append a string; equivalent to repeated [`Buffer::write`].
    pub(crate) fn writes(&mut self, s: &str, style: &str) {
        for c in s.chars() {
            self.write(c, style);
        }
    }

    /// Append a sequence of styled runs.
    pub(crate) fn write_styleds(&mut self, runs: &[Styled]) {
        for run in runs {
            self.writes(&run.text, &run.style);
        }
    }

    /// Write `n` spaces without ever wrapping.
    pub(crate) fn write_padding(&mut self, n: usize, style: &str) {
        let wrap = self.newline_when_full;
        self.newline_when_full = false;
        for _ in 0..n {
            self.write(' ', style);
        }
        self.newline_when_full = wrap;
    }

    /// Append `other`'s rows below this buffer's rows. If `set_dot`, adopt
    /// `other`'s dot translated by the current row offset.
    pub(crate) fn extend(&mut self, other: Option<Buffer>, set_dot: bool) {
        let Some(other) = other else { return };
        let offset = self.cells.len();
        if set_dot {
            self.dot = Pos::new(offset + other.dot.line, other.dot.col);
        }
        self.col = other.col;
        self.cells.extend(other.cells);
    }

    /// Overlay `other`'s rows starting at column `col`, padding short rows
    /// and appending new ones as needed.
    pub(crate) fn extend_horizontal(&mut self, other: Option<Buffer>, col: usize) {
        let Some(other) = other else { return };
        for (i, orow) in other.cells.into_iter().enumerate() {
            if i < self.cells.len() {
                let row = &mut self.cells[i];
                let have = row_width(row);
                for _ in have..col {
                    row.push(Cell::padding());
                }
                row.extend(orow);
            } else {
                let mut row = Vec::with_capacity(col + orow.len());
                for _ in 0..col {
                    row.push(Cell::padding());
                }
                row.extend(orow);
                self.cells.push(row);
            }
        }
    }

    /// Keep rows `[lo, hi)`, clamping the dot to the surviving rows.
    pub(crate) fn trim_to_lines(&mut self, lo: usize, hi: usize) {
        let hi = hi.min(self.cells.len());
        let lo = lo.min(hi);
        self.cells.truncate(hi);
        self.cells.drain(..lo);
        if self.cells.is_empty() {
            self.cells.push(Vec::new());
        }
        self.dot.line = self.dot.line.saturating_sub(lo).min(self.cells.len() - 1);
    }
}
