use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveRight, MoveToColumn, MoveUp, Show},
    style::Print,
    QueueableCommand,
};
use itertools::Itertools;
use log::trace;

use super::buffer::{row_width, Buffer, Cell};

/// Owns the output sink and the last committed frame, and turns each new
/// frame into the minimum byte stream that transforms one into the other.
pub(crate) struct Writer<W: Write> {
    out: W,
    old_buf: Buffer,
    size: (u16, u16),
}

fn write_cells<W: Write>(out: &mut W, cells: &[Cell]) -> io::Result<()> {
    // Continuation slots of double-width cells carry no text of their own.
    let visible = cells.iter().filter(|c| !(c.width == 0 && c.text.is_empty()));
    let runs = visible.group_by(|c| c.style.clone());
    let mut styled = false;
    for (style, run) in &runs {
        if styled {
            out.queue(Print("\x1b[m"))?;
            styled = false;
        }
        if !style.is_empty() {
            out.queue(Print(format!("\x1b[{style}m")))?;
            styled = true;
        }
        for cell in run {
            out.queue(Print(&cell.text))?;
        }
    }
    if styled {
        out.queue(Print("\x1b[m"))?;
    }
    Ok(())
}

impl<W: Write> Writer<W> {
    pub(crate) fn new(out: W, size: (u16, u16)) -> Writer<W> {
        Writer {
            out,
            old_buf: Buffer::new(size.0 as usize),
            size,
        }
    }

    pub(crate) fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Adopt a new terminal size; the next commit repaints from scratch.
    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.old_buf = Buffer::new(width as usize);
    }

    /// Direct access for session-control writes (autowrap, indicators).
    pub(crate) fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Ring the terminal bell. Failures are deliberately dropped; a beep
    /// is never worth aborting the loop for.
    pub(crate) fn beep(&mut self) {
        let _ = self.out.queue(Print("\x07"));
        let _ = self.out.flush();
    }

    /// Diff `buf` against the previous frame and emit the delta, leaving
    /// the terminal cursor on `buf.dot`. Notification rows are printed
    /// above the frame and scroll away with ordinary output.
    pub(crate) fn commit(&mut self, buf: Buffer, noti: Option<Buffer>) -> io::Result<()> {
        if buf.width != self.old_buf.width {
            self.old_buf = Buffer::new(buf.width);
        }
        self.out.queue(Hide)?;

        // Home of the previous frame: the cursor was left on its dot.
        if self.old_buf.dot.line > 0 {
            self.out.queue(MoveUp(self.old_buf.dot.line as u16))?;
        }
        self.out.queue(MoveToColumn(0))?;

        if let Some(noti) = noti {
            for row in &noti.cells {
                write_cells(&mut self.out, row)?;
                self.out.queue(Print("\r\n"))?;
            }
            // The old frame was overwritten by the notifications.
            self.old_buf = Buffer::new(buf.width);
        }

        let mut cursor_line = 0;
        for (i, row) in buf.cells.iter().enumerate() {
            if i > 0 {
                self.out.queue(Print("\r\n"))?;
                cursor_line = i;
            }
            let (identical, mut prefix, old_width) = match self.old_buf.cells.get(i) {
                Some(old_row) => {
                    if old_row == row {
                        (true, 0, row_width(old_row))
                    } else {
                        let mut k = 0;
                        while k < row.len() && k < old_row.len() && row[k] == old_row[k] {
                            k += 1;
                        }
                        (false, k, row_width(old_row))
                    }
                }
                None => (false, 0, 0),
            };
            if identical {
                continue;
            }
            // Never restart inside a double-width pair.
            while prefix > 0 && row.get(prefix).is_some_and(|c| c.width == 0 && c.text.is_empty())
            {
                prefix -= 1;
            }
            let skip: usize = row[..prefix].iter().map(|c| c.width as usize).sum();
            if skip > 0 {
                self.out.queue(MoveRight(skip as u16))?;
            }
            write_cells(&mut self.out, &row[prefix..])?;
            let new_width = row_width(row);
            if old_width > new_width {
                self.out.queue(Print(" ".repeat(old_width - new_width)))?;
            }
        }

        // Blank out rows the old frame had below the new one.
        for i in buf.cells.len()..self.old_buf.cells.len() {
            self.out.queue(Print("\r\n"))?;
            cursor_line += 1;
            let width = row_width(&self.old_buf.cells[i]);
            if width > 0 {
                self.out.queue(Print(" ".repeat(width)))?;
            }
        }

        let up = cursor_line - buf.dot.line.min(cursor_line);
        if up > 0 {
            self.out.queue(MoveUp(up as u16))?;
        }
        self.out.queue(MoveToColumn(0))?;
        if buf.dot.col > 0 {
            self.out.queue(MoveRight(buf.dot.col as u16))?;
        }

        self.out.queue(Show)?;
        self.out.flush()?;
        trace!("committed {} rows, dot {:?}", buf.lines(), buf.dot);
        self.old_buf = buf;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painting::buffer::Pos;
    use pretty_assertions::assert_eq;

    fn line_buf(width: usize, text: &str, dot_col: usize) -> Buffer {
        let mut b = Buffer::new(width);
        b.newline_when_full = true;
        b.writes(text, "");
        b.dot = Pos::new(b.line(), dot_col);
        b
    }

    fn committed(writer: &mut Writer<Vec<u8>>, buf: Buffer) -> String {
        let start = writer.out.len();
        writer.commit(buf, None).expect("write to Vec cannot fail");
        String::from_utf8_lossy(&writer.out[start..]).into_owned()
    }

    #[test]
    fn first_commit_paints_everything() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        let out = committed(&mut w, line_buf(20, "> hello", 7));
        assert!(out.contains("> hello"));
    }

    #[test]
    fn identical_commit_writes_no_text() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        committed(&mut w, line_buf(20, "> hello", 7));
        let out = committed(&mut w, line_buf(20, "> hello", 7));
        assert!(!out.contains("hello"));
    }

    #[test]
    fn appending_rewrites_only_the_tail() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        committed(&mut w, line_buf(20, "> hell", 6));
        let out = committed(&mut w, line_buf(20, "> hello", 7));
        assert!(out.contains('o'));
        assert!(!out.contains("hell"));
    }

    #[test]
    fn shrinking_pads_the_removed_suffix() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        committed(&mut w, line_buf(20, "> hello", 7));
        let out = committed(&mut w, line_buf(20, "> hell", 6));
        // One space clears the dropped 'o'.
        assert!(out.contains(' '));
    }

    #[test]
    fn removed_rows_are_blanked() {
        let mut w = Writer::new(Vec::new(), (10, 5));
        let mut two = Buffer::new(10);
        two.newline_when_full = true;
        two.writes("one\ntwo", "");
        committed(&mut w, two);
        let out = committed(&mut w, line_buf(10, "one", 3));
        assert!(out.contains("   "), "second row should be cleared: {out:?}");
    }

    #[test]
    fn styled_runs_are_framed_by_sgr_escapes() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        let mut b = Buffer::new(20);
        b.writes("ok", "32");
        let start = w.out.len();
        w.commit(b, None).expect("write to Vec cannot fail");
        let out = String::from_utf8_lossy(&w.out[start..]).into_owned();
        assert!(out.contains("\x1b[32m"));
        assert!(out.contains("\x1b[m"));
    }

    #[test]
    fn notifications_are_printed_above_and_force_a_repaint() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        committed(&mut w, line_buf(20, "> x", 3));
        let mut noti = Buffer::new(20);
        noti.writes("done", "");
        let start = w.out.len();
        w.commit(line_buf(20, "> x", 3), Some(noti))
            .expect("write to Vec cannot fail");
        let out = String::from_utf8_lossy(&w.out[start..]).into_owned();
        assert!(out.contains("done"));
        // The frame below was repainted even though it did not change.
        assert!(out.contains("> x"));
    }

    #[test]
    fn cursor_ends_on_the_dot() {
        let mut w = Writer::new(Vec::new(), (20, 5));
        let out = committed(&mut w, line_buf(20, "> hello", 3));
        // MoveToColumn(0) then MoveRight(3).
        assert!(out.ends_with("\x1b[1G\x1b[3C\x1b[?25h"), "got {out:?}");
    }
}
