mod base;
mod default;

pub use base::{Completer, Span, Suggestion};
pub use default::DefaultCompleter;

use crate::painting::{force_width, scroll_window, str_width, Buffer};
use crate::styles::{sgr_params, StyleSheet};

/// Horizontal padding between menu columns.
const COL_PADDING: usize = 2;

/// One entry of the completion menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) text: String,
    pub(crate) style: String,
}

/// State of completion mode: the candidates, the selection, and the byte
/// range of the line being replaced.
///
/// Candidates are laid out column-major in columns sized to the widest
/// candidate; `last_rows` and `last_shown` record what the renderer last
/// put on screen and drive both arrow-key movement and the mode line's
/// scrollbar.
#[derive(Debug, Clone)]
pub(crate) struct CompletionState {
    pub(crate) candidates: Vec<Candidate>,
    /// Selected index; `None` until the user moves the selection
    pub(crate) current: Option<usize>,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    /// The text being completed, shown in the mode line
    pub(crate) filter: String,
    /// Visible row window of the last render
    pub(crate) last_shown: (usize, usize),
    /// Total menu rows at the last render
    pub(crate) last_rows: usize,
}

impl CompletionState {
    /// Build the state from completer output. `None` when there are no
    /// suggestions.
    pub(crate) fn from_suggestions(line: &str, suggestions: Vec<Suggestion>) -> Option<CompletionState> {
        let first = suggestions.first()?;
        let Span { start, end } = first.span;
        let candidates = suggestions
            .iter()
            .map(|s| Candidate {
                text: s.value.clone(),
                style: s.style.as_ref().map(sgr_params).unwrap_or_default(),
            })
            .collect();
        Some(CompletionState {
            candidates,
            current: None,
            begin: start,
            end,
            filter: line[start..end].to_owned(),
            last_shown: (0, 0),
            last_rows: 0,
        })
    }

    pub(crate) fn selected(&self) -> Option<&Candidate> {
        self.current.and_then(|i| self.candidates.get(i))
    }

    fn rows(&self) -> usize {
        self.last_rows.max(1)
    }

    fn last_col(&self) -> usize {
        (self.candidates.len() - 1) / self.rows()
    }

    /// Tab: advance linearly through the candidates, wrapping around.
    pub(crate) fn cycle_right(&mut self) {
        let n = self.candidates.len();
        self.current = Some(match self.current {
            None => 0,
            Some(cur) => (cur + 1) % n,
        });
    }

    pub(crate) fn select_up(&mut self) {
        let rows = self.rows();
        let n = self.candidates.len();
        let Some(cur) = self.current else {
            self.current = Some(0);
            return;
        };
        let (row, col) = (cur % rows, cur / rows);
        let new_row = if row == 0 { rows - 1 } else { row - 1 };
        self.current = Some((col * rows + new_row).min(n - 1));
    }

    pub(crate) fn select_down(&mut self) {
        let rows = self.rows();
        let n = self.candidates.len();
        let Some(cur) = self.current else {
            self.current = Some(0);
            return;
        };
        let (row, col) = (cur % rows, cur / rows);
        let new_row = if row + 1 >= rows { 0 } else { row + 1 };
        let idx = col * rows + new_row;
        // A short last column wraps back to its top.
        self.current = Some(if idx >= n { col * rows } else { idx });
    }

    pub(crate) fn select_left(&mut self) {
        let rows = self.rows();
        let n = self.candidates.len();
        let Some(cur) = self.current else {
            self.current = Some(0);
            return;
        };
        let (row, col) = (cur % rows, cur / rows);
        let new_col = if col == 0 { self.last_col() } else { col - 1 };
        self.current = Some((new_col * rows + row).min(n - 1));
    }

    pub(crate) fn select_right(&mut self) {
        let rows = self.rows();
        let n = self.candidates.len();
        let Some(cur) = self.current else {
            self.current = Some(0);
            return;
        };
        let (row, col) = (cur % rows, cur / rows);
        let new_col = if col >= self.last_col() { 0 } else { col + 1 };
        self.current = Some((new_col * rows + row).min(n - 1));
    }

    /// Paint the menu into a buffer of `width`, at most `height` rows,
    /// recording the grid shape and the visible window.
    pub(crate) fn list_render(
        &mut self,
        width: usize,
        height: usize,
        sheet: &StyleSheet,
    ) -> Buffer {
        let n = self.candidates.len();
        let widest = self
            .candidates
            .iter()
            .map(|c| str_width(&c.text))
            .max()
            .unwrap_or(0);
        let col_width = (widest + COL_PADDING).clamp(1, width.max(1));
        let ncols = (width / col_width).max(1);
        let nrows = (n + ncols - 1) / ncols;
        self.last_rows = nrows;

        let selected_row = self.current.map_or(0, |c| c % nrows);
        let (low, high) = scroll_window(selected_row, nrows, height);
        self.last_shown = (low, high);

        let selected_style = sgr_params(&sheet.selected);
        let mut b = Buffer::new(width);
        for (i, row) in (low..high).enumerate() {
            if i > 0 {
                b.newline();
            }
            for col in 0..ncols {
                let idx = col * nrows + row;
                let Some(cand) = self.candidates.get(idx) else {
                    continue;
                };
                let style = if self.current == Some(idx) {
                    &selected_style
                } else {
                    &cand.style
                };
                b.writes(&force_width(&cand.text, col_width), style);
            }
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(n: usize) -> CompletionState {
        let suggestions = (0..n)
            .map(|i| Suggestion {
                value: format!("cand{i}"),
                style: None,
                span: Span::new(0, 1),
            })
            .collect();
        CompletionState::from_suggestions("x", suggestions).expect("n > 0")
    }

    #[test]
    fn from_suggestions_records_the_replaced_range() {
        let suggestions = vec![Suggestion {
            value: "hello".to_owned(),
            style: None,
            span: Span::new(5, 6),
        }];
        let c = CompletionState::from_suggestions("echo h", suggestions).expect("one suggestion");
        assert_eq!((c.begin, c.end), (5, 6));
        assert_eq!(c.filter, "h");
        assert_eq!(c.current, None);
    }

    #[test]
    fn no_suggestions_no_state() {
        assert!(CompletionState::from_suggestions("", Vec::new()).is_none());
    }

    #[test]
    fn cycle_wraps_linearly() {
        let mut c = state(3);
        c.cycle_right();
        assert_eq!(c.current, Some(0));
        c.cycle_right();
        c.cycle_right();
        assert_eq!(c.current, Some(2));
        c.cycle_right();
        assert_eq!(c.current, Some(0));
    }

    #[test]
    fn arrows_walk_the_column_major_grid() {
        let mut c = state(5);
        // Fix the grid at 3 rows x 2 columns, as a render would.
        c.last_rows = 3;
        c.cycle_right(); // select 0
        c.select_down();
        assert_eq!(c.current, Some(1));
        c.select_right();
        assert_eq!(c.current, Some(4));
        // Short last column: down wraps to its top.
        c.select_down();
        assert_eq!(c.current, Some(3));
        c.select_up();
        // Up from the column top clamps into the short column.
        assert_eq!(c.current, Some(4));
        c.select_left();
        assert_eq!(c.current, Some(1));
        c.select_left();
        // Left from column 0 wraps to the last column, clamped.
        assert_eq!(c.current, Some(4));
    }

    #[test]
    fn first_arrow_selects_the_first_candidate() {
        let mut c = state(4);
        c.last_rows = 2;
        c.select_down();
        assert_eq!(c.current, Some(0));
    }

    #[test]
    fn list_render_sets_grid_shape_and_window() {
        let sheet = StyleSheet::default();
        let mut c = state(6);
        // "cand0" is 5 wide, so columns are 7 wide; width 15 gives 2 cols.
        let b = c.list_render(15, 10, &sheet);
        assert_eq!(c.last_rows, 3);
        assert_eq!(c.last_shown, (0, 3));
        assert_eq!(b.lines(), 3);
        let row0: String = b.cells[0].iter().map(|cell| cell.text.as_str()).collect();
        assert_eq!(row0.trim_end(), "cand0  cand3");
    }

    #[test]
    fn list_render_windows_around_the_selection() {
        let sheet = StyleSheet::default();
        let mut c = state(12);
        c.current = Some(11);
        let b = c.list_render(10, 4, &sheet);
        assert_eq!(c.last_shown, (8, 12));
        assert_eq!(b.lines(), 4);
        let last: String = b.cells[3].iter().map(|cell| cell.text.as_str()).collect();
        assert!(last.starts_with("cand11"));
    }

    #[test]
    fn selection_is_painted_with_the_selected_style() {
        let sheet = StyleSheet::default();
        let mut c = state(2);
        c.current = Some(1);
        let b = c.list_render(10, 5, &sheet);
        let selected = sgr_params(&sheet.selected);
        let styles: Vec<&str> = b.cells[1].iter().map(|cell| cell.style.as_str()).collect();
        assert!(styles.iter().all(|s| *s == selected));
    }
}
